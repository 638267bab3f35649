pub mod analogue;
pub mod covariate;
pub mod dataset;
pub mod synthetic;
pub mod target;
pub mod utils;
pub mod weather_record;
