//! The analysis core: synthetic feature records and historical analogues.

pub mod analogue_finder;
pub mod synthesizer;
