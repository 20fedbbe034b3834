//! キーポイント座標上の2次元幾何
//!
//! 検出点に依存する値はすべて `Option` で持ち、欠損は原点で埋めずにそのまま伝播させる。

use serde::Serialize;

use crate::pose::Keypoint;

/// 信頼度を持たない導出点（中点、頭頂推定など）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<&Keypoint> for Point2D {
    fn from(kp: &Keypoint) -> Self {
        Self::new(kp.x, kp.y)
    }
}

impl From<Keypoint> for Point2D {
    fn from(kp: Keypoint) -> Self {
        Self::new(kp.x, kp.y)
    }
}

/// 2点の中点。どちらかが欠けていれば None
pub fn midpoint<A, B>(a: Option<A>, b: Option<B>) -> Option<Point2D>
where
    A: Into<Point2D>,
    B: Into<Point2D>,
{
    let (a, b) = (a?.into(), b?.into());
    Some(Point2D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
}

/// 制御点を順に経由する折れ線の長さ
///
/// 始点・終点のどちらかが欠けていれば None。欠けた制御点は読み飛ばす。
/// 制御点が残らなければ直線距離になる。
pub fn curved_distance(
    start: Option<Point2D>,
    end: Option<Point2D>,
    control_points: &[Option<Point2D>],
) -> Option<f64> {
    let (start, end) = (start?, end?);

    let mut total = 0.0;
    let mut prev = start;
    for point in control_points.iter().flatten() {
        total += prev.distance_to(point);
        prev = *point;
    }
    total += prev.distance_to(&end);

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_midpoint_is_average() {
        let m = midpoint(Some(Point2D::new(0.0, 10.0)), Some(Point2D::new(4.0, 20.0))).unwrap();
        assert_eq!(m, Point2D::new(2.0, 15.0));
    }

    #[test]
    fn test_midpoint_symmetric() {
        let a = Point2D::new(13.7, -2.25);
        let b = Point2D::new(-4.1, 99.5);
        assert_eq!(midpoint(Some(a), Some(b)), midpoint(Some(b), Some(a)));
    }

    #[test]
    fn test_midpoint_absent_propagates() {
        let a = Point2D::new(1.0, 1.0);
        assert!(midpoint(Some(a), None::<Point2D>).is_none());
        assert!(midpoint(None::<Point2D>, Some(a)).is_none());
    }

    #[test]
    fn test_midpoint_from_keypoints() {
        let l = Keypoint::new("left_hip", 90.0, 200.0, 0.9);
        let r = Keypoint::new("right_hip", 110.0, 202.0, 0.9);
        let m = midpoint(Some(&l), Some(&r)).unwrap();
        assert_eq!(m, Point2D::new(100.0, 201.0));
    }

    #[test]
    fn test_straight_line_without_control_points() {
        let d = curved_distance(Some(Point2D::new(1.0, 2.0)), Some(Point2D::new(4.0, 6.0)), &[]);
        assert!(approx_eq(d.unwrap(), 5.0));
    }

    #[test]
    fn test_absent_endpoint_is_none() {
        let p = Some(Point2D::new(0.0, 0.0));
        assert!(curved_distance(p, None, &[]).is_none());
        assert!(curved_distance(None, p, &[p]).is_none());
    }

    #[test]
    fn test_absent_control_points_are_skipped() {
        let start = Some(Point2D::new(0.0, 0.0));
        let end = Some(Point2D::new(0.0, 10.0));
        let with_gap = curved_distance(start, end, &[None, Some(Point2D::new(3.0, 4.0))]);
        let without = curved_distance(start, end, &[Some(Point2D::new(3.0, 4.0))]);
        assert_eq!(with_gap, without);

        let all_gaps = curved_distance(start, end, &[None, None]);
        assert!(approx_eq(all_gaps.unwrap(), 10.0));
    }

    #[test]
    fn test_polyline_at_least_straight_line() {
        let start = Point2D::new(-3.0, 7.0);
        let end = Point2D::new(12.0, -1.5);
        let straight = start.distance_to(&end);
        let detours = [
            vec![Some(Point2D::new(100.0, 100.0))],
            vec![Some(Point2D::new(0.0, 0.0)), Some(Point2D::new(5.0, 5.0))],
            vec![Some(start), Some(end)],
        ];
        for cps in &detours {
            let d = curved_distance(Some(start), Some(end), cps).unwrap();
            assert!(d + 1e-9 >= straight);
        }
    }

    #[test]
    fn test_colinear_monotonic_equals_straight_line() {
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(0.0, 30.0);
        let cps = [Some(Point2D::new(0.0, 10.0)), Some(Point2D::new(0.0, 20.0))];
        let d = curved_distance(Some(start), Some(end), &cps).unwrap();
        assert!(approx_eq(d, 30.0));
    }

    #[test]
    fn test_backtracking_control_point_adds_detour() {
        // 始点 (100,100) → (100,60) → (100,100) → 終点 (100,200)
        let shoulder = Point2D::new(100.0, 100.0);
        let hip = Point2D::new(100.0, 200.0);
        let nose = Point2D::new(100.0, 60.0);
        let d = curved_distance(Some(shoulder), Some(hip), &[Some(nose), Some(shoulder)]).unwrap();
        assert!(approx_eq(d, 180.0));
    }
}
