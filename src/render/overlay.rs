use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::config::RenderConfig;
use crate::geometry::Point2D;
use crate::measure::BodyLandmarks;
use crate::pose::{Detection, LandmarkMap};
use crate::render::skeleton::{HEAD_TOP_COLOR, KEYPOINT_COLOR, SKELETON_COLOR, SKELETON_CONNECTIONS};

/// 画像上にキーポイント・骨格・推定頭頂を描くレンダラー
pub struct OverlayRenderer {
    confidence_threshold: f64,
    keypoint_radius: i32,
}

impl OverlayRenderer {
    pub fn new(confidence_threshold: f64, keypoint_radius: i32) -> Self {
        Self {
            confidence_threshold,
            keypoint_radius,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.confidence_threshold, config.keypoint_radius)
    }

    /// 検出1人分を描画
    ///
    /// 閾値を超えたキーポイントのみ描く。頭頂は耳・目が揃っていれば描く。
    pub fn draw_detection(&self, image: &mut RgbImage, detection: &Detection, body: &BodyLandmarks) {
        let above = |score: f64| score > self.confidence_threshold;

        for kp in &detection.keypoints {
            if above(kp.score) {
                draw_filled_circle_mut(
                    image,
                    to_pixel(Point2D::from(kp)),
                    self.keypoint_radius,
                    Rgb(KEYPOINT_COLOR),
                );
            }
        }

        let map = LandmarkMap::new(detection);
        for (start_idx, end_idx) in SKELETON_CONNECTIONS.iter() {
            let (Some(start), Some(end)) = (map.get(*start_idx), map.get(*end_idx)) else {
                continue;
            };
            if above(start.score) && above(end.score) {
                draw_line_segment_mut(
                    image,
                    to_point(Point2D::from(start)),
                    to_point(Point2D::from(end)),
                    Rgb(SKELETON_COLOR),
                );
            }
        }

        if let (Some(ear_mid), Some(top)) = (body.ear_midpoint, body.head_top) {
            draw_filled_circle_mut(image, to_pixel(top), self.keypoint_radius, Rgb(HEAD_TOP_COLOR));
            draw_line_segment_mut(image, to_point(ear_mid), to_point(top), Rgb(HEAD_TOP_COLOR));
        }
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

fn to_pixel(p: Point2D) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn to_point(p: Point2D) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::HEAD_HEIGHT_RATIO;
    use crate::pose::{Keypoint, KeypointIndex};

    fn blank() -> RgbImage {
        RgbImage::new(64, 64)
    }

    #[test]
    fn test_skeleton_line_drawn() {
        let mut img = blank();
        let det = Detection::new(vec![
            Keypoint::at(KeypointIndex::LeftHip, 10.0, 20.0, 0.9),
            Keypoint::at(KeypointIndex::RightHip, 50.0, 20.0, 0.9),
        ]);
        OverlayRenderer::new(0.3, 1).draw_detection(&mut img, &det, &BodyLandmarks::default());
        // 線は点の上に重ねて描く
        assert_eq!(img.get_pixel(10, 19).0, KEYPOINT_COLOR);
        assert_eq!(img.get_pixel(50, 21).0, KEYPOINT_COLOR);
        assert_eq!(img.get_pixel(10, 20).0, SKELETON_COLOR);
        assert_eq!(img.get_pixel(30, 20).0, SKELETON_COLOR);
        assert_eq!(img.get_pixel(30, 22).0, [0, 0, 0]);
    }

    #[test]
    fn test_keypoints_outside_image_ignored() {
        let mut img = blank();
        let det = Detection::new(vec![
            Keypoint::at(KeypointIndex::LeftKnee, -10.0, 200.0, 0.9),
            Keypoint::at(KeypointIndex::LeftHip, 3.0, 3.0, 0.9),
        ]);
        OverlayRenderer::new(0.3, 0).draw_detection(&mut img, &det, &BodyLandmarks::default());
        assert_eq!(img.get_pixel(3, 3).0, SKELETON_COLOR);
        assert_eq!(img.get_pixel(63, 63).0, [0, 0, 0]);
    }

    #[test]
    fn test_low_confidence_not_drawn() {
        let mut img = blank();
        let det = Detection::new(vec![
            Keypoint::at(KeypointIndex::LeftHip, 10.0, 10.0, 0.2),
            Keypoint::at(KeypointIndex::RightHip, 50.0, 10.0, 0.9),
        ]);
        OverlayRenderer::default().draw_detection(&mut img, &det, &BodyLandmarks::default());
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(50, 10).0, KEYPOINT_COLOR);
        // 片側が閾値未満なので線は引かない
        assert_eq!(img.get_pixel(30, 10).0, [0, 0, 0]);
    }

    #[test]
    fn test_head_top_marker() {
        let mut img = blank();
        let det = Detection::new(vec![
            Keypoint::at(KeypointIndex::LeftEar, 20.0, 40.0, 0.9),
            Keypoint::at(KeypointIndex::RightEar, 40.0, 40.0, 0.9),
            Keypoint::at(KeypointIndex::LeftEye, 25.0, 50.0, 0.9),
            Keypoint::at(KeypointIndex::RightEye, 35.0, 50.0, 0.9),
        ]);
        let map = LandmarkMap::new(&det);
        let body = BodyLandmarks::from_landmarks(&map, HEAD_HEIGHT_RATIO);
        OverlayRenderer::new(0.3, 2).draw_detection(&mut img, &det, &body);
        // 頭頂 (30, 25)、耳の中点 (30, 40) を結ぶ縦線
        assert_eq!(img.get_pixel(30, 25).0, HEAD_TOP_COLOR);
        assert_eq!(img.get_pixel(30, 33).0, HEAD_TOP_COLOR);
    }
}
