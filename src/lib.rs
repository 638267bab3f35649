mod engine;
mod error;
mod forecaster;
mod model;
mod report;
mod types;
mod weather_data;

pub use error::AnalogueError;
pub use forecaster::*;

pub use engine::analogue_finder::find_analogues;
pub use engine::synthesizer::synthesize;

pub use model::description::DescriptionModel;
pub use model::error::ModelError;
pub use model::feature::{Feature, FeatureVector};
pub use model::linear::{FitQuality, LinearTemperatureModel};
pub use model::TemperatureModel;

pub use report::chart::*;
pub use report::format::{format_forecast, tier_annotation};

pub use types::analogue::{AnalogueMatch, AnalogueReading, MatchTier};
pub use types::covariate::Covariate;
pub use types::dataset::HistoricalDataset;
pub use types::synthetic::SyntheticFeatureRecord;
pub use types::target::{TargetDay, TargetMoment};
pub use types::utils::{is_daytime, DAYTIME_HOURS};
pub use types::weather_record::WeatherRecord;

pub use weather_data::data_extractor::{extract_records, parse_timestamp, LoadReport};
pub use weather_data::data_loader::{load_csv, read_csv};
pub use weather_data::error::DatasetError;
pub use weather_data::schema::DatasetSchema;
