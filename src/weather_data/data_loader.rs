use crate::types::dataset::HistoricalDataset;
use crate::weather_data::data_extractor::{extract_records, LoadReport};
use crate::weather_data::error::DatasetError;
use crate::weather_data::schema::DatasetSchema;
use log::info;
use polars::frame::DataFrame;
use polars::prelude::*;
use std::path::Path;

/// Reads a headed CSV file of weather history into a [`DataFrame`].
///
/// Every column's type is inferred from the whole file so a sparse covariate column
/// is not mistaken for text after a run of empty cells.
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame, DatasetError> {
    let path = path.as_ref();
    info!("Reading weather history from {:?}", path);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))?;

    info!(
        "Read {} rows and {} columns from {:?}",
        df.height(),
        df.width(),
        path
    );
    Ok(df)
}

/// Loads a CSV file into a [`HistoricalDataset`] using `schema` to find its columns.
///
/// Rows without a usable timestamp or temperature are dropped; the returned
/// [`LoadReport`] says how many.
pub fn load_csv(
    path: impl AsRef<Path>,
    schema: &DatasetSchema,
) -> Result<(HistoricalDataset, LoadReport), DatasetError> {
    let df = read_csv(path)?;
    extract_records(&df, schema)
}
