use thiserror::Error;

use crate::measure::Segment;

/// 1回の計測パスを中断させるエラー
///
/// キーポイントの欠損はエラーではなく、該当セグメントの省略として扱う。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeasureError {
    #[error("degenerate calibration: height {height_cm} cm over {total_pixels} px")]
    DegenerateCalibration { height_cm: f64, total_pixels: f64 },
    #[error("incomplete calibration: missing segments {missing:?}")]
    IncompleteCalibration { missing: Vec<Segment> },
    #[error("scaled length {value_cm} cm does not fit in the measurement record")]
    ScaleOverflow { value_cm: f64 },
}
