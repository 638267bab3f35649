//! Presenting forecasts: terminal summaries and trend frames.

pub mod chart;
pub mod format;
