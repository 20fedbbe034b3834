use serde::{Deserialize, Serialize};

use super::scale::Calibration;
use super::segment::SegmentDistances;
use crate::error::MeasureError;

/// 計測結果（cm、整数）
///
/// 求められなかった区間は出力しない。`lower_body` は脚2区間のピクセル長を
/// 合算してから換算・丸めるため、`hip_to_knee + knee_to_ankle` と 1 ずれることがある。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_body: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_body: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip_to_knee: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knee_to_ankle: Option<u64>,
}

impl MeasurementRecord {
    /// cm に収まらない値が一つでもあれば記録を作らない
    pub fn assemble(
        distances: &SegmentDistances,
        calibration: &Calibration,
    ) -> Result<Self, MeasureError> {
        let cm = |px: Option<f64>| px.map(|px| calibration.to_cm(px)).transpose();

        let lower_body = match (distances.hip_to_knee, distances.knee_to_ankle) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        };

        Ok(Self {
            head: cm(distances.head_to_shoulder)?,
            upper_body: cm(distances.shoulder_to_hip)?,
            lower_body: cm(lower_body)?,
            hip_to_knee: cm(distances.hip_to_knee)?,
            knee_to_ankle: cm(distances.knee_to_ankle)?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.head.is_some()
            && self.upper_body.is_some()
            && self.lower_body.is_some()
            && self.hip_to_knee.is_some()
            && self.knee_to_ankle.is_some()
    }
}
