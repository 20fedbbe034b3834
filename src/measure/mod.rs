pub mod body;
pub mod engine;
pub mod record;
pub mod scale;
pub mod segment;

pub use body::{estimate_top_of_head, BodyLandmarks, HEAD_HEIGHT_RATIO, REQUIRED_KEYPOINTS};
pub use engine::{Measurement, Measurer};
pub use record::MeasurementRecord;
pub use scale::{Calibration, CalibrationPolicy};
pub use segment::{Segment, SegmentDistances};

/// 身長入力のデフォルト（cm）
pub const DEFAULT_HEIGHT_CM: f64 = 160.0;
