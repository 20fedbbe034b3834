use serde::Serialize;

use super::body::{BodyLandmarks, REQUIRED_KEYPOINTS};
use super::record::MeasurementRecord;
use super::scale::Calibration;
use super::segment::SegmentDistances;
use crate::config::MeasureConfig;
use crate::error::MeasureError;
use crate::pose::{Detection, KeypointIndex, LandmarkMap};

/// 1検出分の計測結果と途中経過
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub record: MeasurementRecord,
    pub calibration: Calibration,
    pub distances: SegmentDistances,
    pub landmarks: BodyLandmarks,
}

/// キーポイント → 区間長（cm）の計測器
///
/// 状態を持たないので同じ入力には常に同じ結果を返す。
#[derive(Debug, Clone, Default)]
pub struct Measurer {
    config: MeasureConfig,
}

impl Measurer {
    pub fn new(config: MeasureConfig) -> Self {
        Self { config }
    }

    /// 導出点と区間長だけを求める（身長不要）
    pub fn landmarks(&self, detection: &Detection) -> (BodyLandmarks, SegmentDistances) {
        let map = LandmarkMap::with_min_score(detection, self.config.min_score);
        let body = BodyLandmarks::from_landmarks(&map, self.config.head_height_ratio);
        let distances = SegmentDistances::from_body(&body);
        (body, distances)
    }

    /// 計測に使うのに見つからなかった（または信頼度不足の）キーポイント
    pub fn missing_keypoints(&self, detection: &Detection) -> Vec<KeypointIndex> {
        LandmarkMap::with_min_score(detection, self.config.min_score).missing(&REQUIRED_KEYPOINTS)
    }

    pub fn measure(&self, detection: &Detection, height_cm: f64) -> Result<Measurement, MeasureError> {
        let (landmarks, distances) = self.landmarks(detection);
        tracing::debug!(
            head_to_shoulder = ?distances.head_to_shoulder,
            shoulder_to_hip = ?distances.shoulder_to_hip,
            hip_to_knee = ?distances.hip_to_knee,
            knee_to_ankle = ?distances.knee_to_ankle,
            "segment pixel lengths"
        );

        let calibration =
            Calibration::from_distances(height_cm, &distances, self.config.calibration_policy)?;
        tracing::debug!(
            ratio = calibration.pixel_to_cm_ratio,
            total_pixels = calibration.total_pixels,
            "calibrated"
        );

        let record = MeasurementRecord::assemble(&distances, &calibration)?;
        Ok(Measurement {
            record,
            calibration,
            distances,
            landmarks,
        })
    }

    /// 各検出を独立に計測
    pub fn measure_all(
        &self,
        detections: &[Detection],
        height_cm: f64,
    ) -> Vec<Result<Measurement, MeasureError>> {
        detections
            .iter()
            .map(|det| self.measure(det, height_cm))
            .collect()
    }
}
