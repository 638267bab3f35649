use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("Failed to convert column '{column}'")]
    ColumnConversion {
        column: String,
        #[source]
        source: PolarsError,
    },
}
