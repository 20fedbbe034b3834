pub mod analysis;
pub mod config;
pub mod error;
pub mod geometry;
pub mod measure;
pub mod pose;
pub mod render;

pub use error::MeasureError;
pub use measure::{Measurement, MeasurementRecord, Measurer};
