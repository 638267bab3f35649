use crate::model::feature::Feature;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Feature '{0}' is required by the model but unavailable")]
    MissingFeature(Feature),

    #[error("Not enough complete rows to fit the model: found {rows}, need at least {needed}")]
    InsufficientData { rows: usize, needed: usize },

    #[error("Least squares system could not be solved")]
    Singular,

    #[error("Model produced a non-finite prediction")]
    NonFinitePrediction,
}
