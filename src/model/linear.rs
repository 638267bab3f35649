//! Ordinary least squares temperature regressor.
//!
//! Fits `temperature ≈ β0 + Σ βi · xi` over a declared feature list. Rows missing any
//! declared feature are left out of the fit. The system is solved with an SVD, which
//! copes with tall design matrices and with collinear columns (for example a `year`
//! column that is constant in a single-year history).

use crate::model::error::ModelError;
use crate::model::feature::{Feature, FeatureVector};
use crate::model::TemperatureModel;
use crate::types::dataset::HistoricalDataset;
use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

/// In-sample fit diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitQuality {
    pub rmse: f64,
    /// `None` when the observed temperatures have zero variance.
    pub r_squared: Option<f64>,
    pub n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearTemperatureModel {
    features: Vec<Feature>,
    intercept: f64,
    coefficients: Vec<f64>,
    quality: FitQuality,
}

impl LinearTemperatureModel {
    /// Fits the model on every record that has all of `features`.
    ///
    /// # Errors
    ///
    /// * [`ModelError::InsufficientData`] if fewer complete rows than coefficients remain.
    /// * [`ModelError::Singular`] if the least squares solve fails.
    pub fn fit(dataset: &HistoricalDataset, features: &[Feature]) -> Result<Self, ModelError> {
        let rows: Vec<(Vec<f64>, f64)> = dataset
            .iter()
            .filter_map(|record| {
                let xs: Option<Vec<f64>> = features.iter().map(|f| record.feature(*f)).collect();
                xs.map(|xs| (xs, record.temperature))
            })
            .collect();

        let needed = features.len() + 1;
        if rows.len() < needed {
            return Err(ModelError::InsufficientData {
                rows: rows.len(),
                needed,
            });
        }
        debug!(
            "Fitting temperature model on {} of {} records ({} features)",
            rows.len(),
            dataset.len(),
            features.len()
        );

        let x = DMatrix::from_fn(rows.len(), needed, |i, j| {
            if j == 0 {
                1.0
            } else {
                rows[i].0[j - 1]
            }
        });
        let y = DVector::from_iterator(rows.len(), rows.iter().map(|(_, t)| *t));

        let beta = solve_least_squares(&x, &y).ok_or(ModelError::Singular)?;
        let fitted = &x * &beta;
        let quality = fit_quality(&y, &fitted);
        info!(
            "Temperature model fitted: n={} rmse={:.3} r2={}",
            quality.n,
            quality.rmse,
            quality
                .r_squared
                .map(|r| format!("{r:.3}"))
                .unwrap_or_else(|| "n/a".to_string())
        );

        Ok(Self {
            features: features.to_vec(),
            intercept: beta[0],
            coefficients: beta.iter().skip(1).copied().collect(),
            quality,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficients in the order of [`TemperatureModel::features`].
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn quality(&self) -> &FitQuality {
        &self.quality
    }
}

impl TemperatureModel for LinearTemperatureModel {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn predict(&self, input: &FeatureVector) -> Result<f64, ModelError> {
        let mut prediction = self.intercept;
        for (feature, coefficient) in self.features.iter().zip(&self.coefficients) {
            let value = input
                .get(*feature)
                .ok_or(ModelError::MissingFeature(*feature))?;
            prediction += coefficient * value;
        }
        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(ModelError::NonFinitePrediction)
        }
    }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

fn fit_quality(observed: &DVector<f64>, fitted: &DVector<f64>) -> FitQuality {
    let n = observed.len();
    let sse: f64 = observed
        .iter()
        .zip(fitted.iter())
        .map(|(o, f)| (o - f).powi(2))
        .sum();
    let mean = observed.mean();
    let sst: f64 = observed.iter().map(|o| (o - mean).powi(2)).sum();

    FitQuality {
        rmse: (sse / n as f64).sqrt(),
        r_squared: (sst > 0.0).then(|| 1.0 - sse / sst),
        n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::covariate::Covariate;
    use crate::types::weather_record::WeatherRecord;
    use chrono::NaiveDate;

    fn record(day: u32, hour: u32, humidity: Option<f64>, temperature: f64) -> WeatherRecord {
        let timestamp = NaiveDate::from_ymd_opt(2023, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        let mut record = WeatherRecord::new(timestamp, temperature);
        record.humidity = humidity;
        record
    }

    #[test]
    fn test_least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_fit_recovers_linear_relationship() {
        // temperature = 2 + 3 * humidity + 0.5 * hour
        let mut records = Vec::new();
        for (i, hour) in [0u32, 3, 7, 12, 18, 22].iter().enumerate() {
            let humidity = 10.0 + (i as f64) * 7.0 - (*hour as f64) * 0.25;
            let temperature = 2.0 + 3.0 * humidity + 0.5 * *hour as f64;
            records.push(record(1 + i as u32, *hour, Some(humidity), temperature));
        }
        // A row without humidity must be ignored rather than break the fit.
        records.push(record(20, 5, None, 1000.0));
        let dataset = HistoricalDataset::new(records);

        let features = [Feature::Covariate(Covariate::Humidity), Feature::Hour];
        let model = LinearTemperatureModel::fit(&dataset, &features).unwrap();

        assert!((model.intercept() - 2.0).abs() < 1e-6);
        assert!((model.coefficients()[0] - 3.0).abs() < 1e-6);
        assert!((model.coefficients()[1] - 0.5).abs() < 1e-6);
        assert_eq!(model.quality().n, 6);
        assert!(model.quality().rmse < 1e-6);

        let input: FeatureVector = [
            (Feature::Covariate(Covariate::Humidity), 10.0),
            (Feature::Hour, 4.0),
        ]
        .into_iter()
        .collect();
        let prediction = model.predict(&input).unwrap();
        assert!((prediction - 34.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_requires_enough_complete_rows() {
        let dataset =
            HistoricalDataset::new(vec![record(1, 0, Some(1.0), 5.0), record(2, 0, None, 6.0)]);
        let err = LinearTemperatureModel::fit(&dataset, &[Feature::Covariate(Covariate::Humidity)])
            .unwrap_err();
        assert_eq!(err, ModelError::InsufficientData { rows: 1, needed: 2 });
    }

    #[test]
    fn test_predict_reports_missing_feature() {
        let dataset = HistoricalDataset::new(vec![
            record(1, 1, Some(1.0), 5.0),
            record(2, 2, Some(2.0), 6.0),
            record(3, 3, Some(3.0), 7.0),
        ]);
        let humidity = Feature::Covariate(Covariate::Humidity);
        let model = LinearTemperatureModel::fit(&dataset, &[humidity]).unwrap();

        let mut input = FeatureVector::new();
        input.push(Feature::Hour, 3.0);
        let err = model.predict(&input).unwrap_err();
        assert_eq!(err, ModelError::MissingFeature(humidity));

        input.push(humidity, 4.0);
        assert!((model.predict(&input).unwrap() - 8.0).abs() < 1e-6);
    }
}
