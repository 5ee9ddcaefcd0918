// Export our modules for use in binaries and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod event;
pub mod logging;
pub mod terminal;
pub mod timeline;
pub mod ui;
pub mod views;

pub use domain::{CropCategory, LandMetric, RadarDimension, Region};
