use serde::{Deserialize, Serialize};

use super::segment::{Segment, SegmentDistances};
use crate::error::MeasureError;

/// 区間が欠けているときの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationPolicy {
    /// 存在する区間の合計で身長を割る
    #[default]
    PresentSegments,
    /// 4区間すべてが揃わなければ計測しない
    AllSegments,
}

/// ピクセル → cm 換算
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calibration {
    pub height_cm: f64,
    pub total_pixels: f64,
    pub pixel_to_cm_ratio: f64,
    /// 合計に含まれなかった区間
    pub missing: Vec<Segment>,
}

impl Calibration {
    pub fn from_distances(
        height_cm: f64,
        distances: &SegmentDistances,
        policy: CalibrationPolicy,
    ) -> Result<Self, MeasureError> {
        let total_pixels = distances.total_pixels();
        let degenerate = MeasureError::DegenerateCalibration {
            height_cm,
            total_pixels,
        };

        if !height_cm.is_finite() || height_cm <= 0.0 {
            return Err(degenerate);
        }

        let missing = distances.missing();
        if policy == CalibrationPolicy::AllSegments && !missing.is_empty() {
            return Err(MeasureError::IncompleteCalibration { missing });
        }

        if !total_pixels.is_finite() || total_pixels <= 0.0 {
            return Err(degenerate);
        }
        let pixel_to_cm_ratio = height_cm / total_pixels;
        if !pixel_to_cm_ratio.is_finite() {
            return Err(degenerate);
        }

        if !missing.is_empty() {
            tracing::warn!(
                ?missing,
                total_pixels,
                "calibrating from a partial segment set, scale may be overestimated"
            );
        }

        Ok(Self {
            height_cm,
            total_pixels,
            pixel_to_cm_ratio,
            missing,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// ピクセル長を cm に換算して四捨五入
    ///
    /// u64 に収まらない値は丸めずにエラーにする
    pub fn to_cm(&self, pixels: f64) -> Result<u64, MeasureError> {
        let value_cm = (pixels * self.pixel_to_cm_ratio).round().max(0.0);
        // u64::MAX as f64 は 2^64 に丸められる
        if value_cm >= u64::MAX as f64 {
            return Err(MeasureError::ScaleOverflow { value_cm });
        }
        Ok(value_cm as u64)
    }
}
