use serde::Serialize;

use super::body::BodyLandmarks;
use crate::geometry::{curved_distance, Point2D};

/// 身長を構成する4区間（上から順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    HeadToShoulder,
    ShoulderToHip,
    HipToKnee,
    KneeToAnkle,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Self::HeadToShoulder,
        Self::ShoulderToHip,
        Self::HipToKnee,
        Self::KneeToAnkle,
    ];

    /// (始点, 終点)
    pub fn anchors(self, body: &BodyLandmarks) -> (Option<Point2D>, Option<Point2D>) {
        match self {
            Self::HeadToShoulder => (body.head_top, body.shoulder_midpoint),
            Self::ShoulderToHip => (body.shoulder_midpoint, body.hip_midpoint),
            Self::HipToKnee => (body.hip_midpoint, body.knee_midpoint),
            Self::KneeToAnkle => (body.knee_midpoint, body.ankle_midpoint),
        }
    }

    /// 曲線近似用の経由点（固定）
    ///
    /// 肩→腰は始点と同じ肩中点を経由するため、鼻があれば往復分だけ長くなる。
    /// 腰→膝の腰中点も始点と一致し、長さには寄与しない。
    pub fn control_points(self, body: &BodyLandmarks) -> Vec<Option<Point2D>> {
        match self {
            Self::HeadToShoulder => vec![body.nose],
            Self::ShoulderToHip => vec![body.nose, body.shoulder_midpoint],
            Self::HipToKnee => vec![body.hip_midpoint],
            Self::KneeToAnkle => Vec::new(),
        }
    }

    /// 区間のピクセル長。始点か終点が欠けていれば None
    pub fn pixel_length(self, body: &BodyLandmarks) -> Option<f64> {
        let (start, end) = self.anchors(body);
        curved_distance(start, end, &self.control_points(body))
    }
}

/// 各区間のピクセル長
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SegmentDistances {
    pub head_to_shoulder: Option<f64>,
    pub shoulder_to_hip: Option<f64>,
    pub hip_to_knee: Option<f64>,
    pub knee_to_ankle: Option<f64>,
}

impl SegmentDistances {
    pub fn from_body(body: &BodyLandmarks) -> Self {
        Self {
            head_to_shoulder: Segment::HeadToShoulder.pixel_length(body),
            shoulder_to_hip: Segment::ShoulderToHip.pixel_length(body),
            hip_to_knee: Segment::HipToKnee.pixel_length(body),
            knee_to_ankle: Segment::KneeToAnkle.pixel_length(body),
        }
    }

    pub fn get(&self, segment: Segment) -> Option<f64> {
        match segment {
            Segment::HeadToShoulder => self.head_to_shoulder,
            Segment::ShoulderToHip => self.shoulder_to_hip,
            Segment::HipToKnee => self.hip_to_knee,
            Segment::KneeToAnkle => self.knee_to_ankle,
        }
    }

    /// 存在する区間の合計
    pub fn total_pixels(&self) -> f64 {
        Segment::ALL.iter().filter_map(|s| self.get(*s)).sum()
    }

    pub fn missing(&self) -> Vec<Segment> {
        Segment::ALL
            .iter()
            .copied()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upright_body() -> BodyLandmarks {
        BodyLandmarks {
            nose: Some(Point2D::new(100.0, 60.0)),
            ear_midpoint: Some(Point2D::new(100.0, 40.0)),
            eye_midpoint: Some(Point2D::new(100.0, 50.0)),
            head_top: Some(Point2D::new(100.0, 25.0)),
            shoulder_midpoint: Some(Point2D::new(100.0, 100.0)),
            hip_midpoint: Some(Point2D::new(100.0, 200.0)),
            knee_midpoint: Some(Point2D::new(100.0, 300.0)),
            ankle_midpoint: Some(Point2D::new(100.0, 400.0)),
        }
    }

    fn approx_eq(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn test_shoulder_to_hip_detours_through_nose() {
        // (100,100) → (100,60) → (100,100) → (100,200) = 40 + 40 + 100
        let body = upright_body();
        assert!(approx_eq(Segment::ShoulderToHip.pixel_length(&body), 180.0));
    }

    #[test]
    fn test_shoulder_to_hip_without_nose() {
        let body = BodyLandmarks { nose: None, ..upright_body() };
        assert!(approx_eq(Segment::ShoulderToHip.pixel_length(&body), 100.0));
    }

    #[test]
    fn test_head_to_shoulder_via_nose() {
        let mut body = upright_body();
        body.nose = Some(Point2D::new(130.0, 60.0));
        // (100,25) → (130,60) → (100,100)
        let expected = (30.0f64.powi(2) + 35.0f64.powi(2)).sqrt() + 50.0;
        assert!(approx_eq(Segment::HeadToShoulder.pixel_length(&body), expected));
    }

    #[test]
    fn test_leg_segments() {
        let body = upright_body();
        assert!(approx_eq(Segment::HipToKnee.pixel_length(&body), 100.0));
        assert!(approx_eq(Segment::KneeToAnkle.pixel_length(&body), 100.0));
        assert!(Segment::KneeToAnkle.control_points(&body).is_empty());
    }

    #[test]
    fn test_missing_anchor_drops_only_that_segment() {
        let body = BodyLandmarks { head_top: None, ..upright_body() };
        let d = SegmentDistances::from_body(&body);
        assert!(d.head_to_shoulder.is_none());
        assert!(d.shoulder_to_hip.is_some());
        assert_eq!(d.missing(), vec![Segment::HeadToShoulder]);
    }

    #[test]
    fn test_total_pixels() {
        let d = SegmentDistances::from_body(&upright_body());
        assert!(d.missing().is_empty());
        assert!((d.total_pixels() - 455.0).abs() < 1e-9);

        let partial = SegmentDistances { knee_to_ankle: None, ..d };
        assert!((partial.total_pixels() - 355.0).abs() < 1e-9);
    }
}
