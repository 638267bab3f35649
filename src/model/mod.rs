//! Prediction models used to fill in what a synthetic record cannot average.

pub mod description;
pub mod error;
pub mod feature;
pub mod linear;

use crate::model::error::ModelError;
use crate::model::feature::{Feature, FeatureVector};

/// A trained temperature predictor.
///
/// `features` declares the exact inputs the model was trained on; the synthesizer
/// passes a [`FeatureVector`] containing those features, in that order.
pub trait TemperatureModel {
    fn features(&self) -> &[Feature];

    fn predict(&self, input: &FeatureVector) -> Result<f64, ModelError>;
}
