//! Loading weather history from tabular files.

pub mod data_extractor;
pub mod data_loader;
pub mod error;
pub mod schema;
