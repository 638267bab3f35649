use crate::types::dataset::HistoricalDataset;
use log::debug;
use std::collections::HashMap;

/// Predicts a weather description as the most frequent one observed in the same
/// (month, hour) slot, falling back to the most frequent description overall.
///
/// Ties between equally frequent descriptions resolve to the alphabetically first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionModel {
    by_slot: HashMap<(u32, u32), HashMap<String, usize>>,
    global: HashMap<String, usize>,
}

impl DescriptionModel {
    pub fn fit(dataset: &HistoricalDataset) -> Self {
        let mut model = Self::default();
        for record in dataset {
            let Some(description) = record.description.as_deref() else {
                continue;
            };
            *model
                .by_slot
                .entry((record.month(), record.hour()))
                .or_default()
                .entry(description.to_string())
                .or_default() += 1;
            *model.global.entry(description.to_string()).or_default() += 1;
        }
        debug!(
            "Description model fitted on {} distinct descriptions over {} slots",
            model.global.len(),
            model.by_slot.len()
        );
        model
    }

    /// Most likely description for a month and hour, `None` if the history had no
    /// descriptions at all.
    pub fn predict(&self, month: u32, hour: u32) -> Option<&str> {
        self.by_slot
            .get(&(month, hour))
            .and_then(mode)
            .or_else(|| mode(&self.global))
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
    }
}

fn mode(counts: &HashMap<String, usize>) -> Option<&str> {
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(description, _)| description.as_str())
}
