use crate::model::error::ModelError;
use crate::weather_data::error::DatasetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalogueError {
    #[error("Invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: &'static str },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Failed to serialize forecast")]
    Serialization(#[from] serde_json::Error),
}
