//! CLI library components for the meter dataset loader.

pub mod export;
pub mod logging;
pub mod progress;
