use serde::Serialize;

use crate::geometry::{midpoint, Point2D};
use crate::pose::{KeypointIndex, LandmarkMap};

/// 耳〜目の縦距離から頭頂までの高さを推定する倍率（未検証の経験値）
pub const HEAD_HEIGHT_RATIO: f64 = 1.5;

/// 4区間すべてを求めるのに使うキーポイント（肘・手首は使わない）
pub const REQUIRED_KEYPOINTS: [KeypointIndex; 13] = [
    KeypointIndex::Nose,
    KeypointIndex::LeftEye,
    KeypointIndex::RightEye,
    KeypointIndex::LeftEar,
    KeypointIndex::RightEar,
    KeypointIndex::LeftShoulder,
    KeypointIndex::RightShoulder,
    KeypointIndex::LeftHip,
    KeypointIndex::RightHip,
    KeypointIndex::LeftKnee,
    KeypointIndex::RightKnee,
    KeypointIndex::LeftAnkle,
    KeypointIndex::RightAnkle,
];

/// 頭頂位置を推定
///
/// 耳の中点の真上、耳〜目の縦距離 × `head_height_ratio` の位置。
/// 頭の傾きは補正しない。4点のどれかが欠けていれば None。
pub fn estimate_top_of_head(
    left_ear: Option<Point2D>,
    right_ear: Option<Point2D>,
    left_eye: Option<Point2D>,
    right_eye: Option<Point2D>,
    head_height_ratio: f64,
) -> Option<Point2D> {
    let ear_mid = midpoint(left_ear, right_ear)?;
    let eye_mid = midpoint(left_eye, right_eye)?;
    let head_height = head_height_ratio * (ear_mid.y - eye_mid.y).abs();
    Some(Point2D::new(ear_mid.x, ear_mid.y - head_height))
}

/// 1人分の計測に使う導出点
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BodyLandmarks {
    pub nose: Option<Point2D>,
    pub ear_midpoint: Option<Point2D>,
    pub eye_midpoint: Option<Point2D>,
    pub head_top: Option<Point2D>,
    pub shoulder_midpoint: Option<Point2D>,
    pub hip_midpoint: Option<Point2D>,
    pub knee_midpoint: Option<Point2D>,
    pub ankle_midpoint: Option<Point2D>,
}

impl BodyLandmarks {
    pub fn from_landmarks(map: &LandmarkMap<'_>, head_height_ratio: f64) -> Self {
        use KeypointIndex::*;
        let point = |idx: KeypointIndex| map.get(idx).map(Point2D::from);
        let pair = |l: KeypointIndex, r: KeypointIndex| midpoint(point(l), point(r));

        Self {
            nose: point(Nose),
            ear_midpoint: pair(LeftEar, RightEar),
            eye_midpoint: pair(LeftEye, RightEye),
            head_top: estimate_top_of_head(
                point(LeftEar),
                point(RightEar),
                point(LeftEye),
                point(RightEye),
                head_height_ratio,
            ),
            shoulder_midpoint: pair(LeftShoulder, RightShoulder),
            hip_midpoint: pair(LeftHip, RightHip),
            knee_midpoint: pair(LeftKnee, RightKnee),
            ankle_midpoint: pair(LeftAnkle, RightAnkle),
        }
    }
}
