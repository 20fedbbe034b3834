use std::collections::HashMap;

use super::keypoint::{Detection, Keypoint, KeypointIndex};

/// 名前 → キーポイントの索引
///
/// Detection ごとに一度だけ構築する。未知の名前は無視し、
/// 同名が複数ある場合は先頭のものを採用する。
#[derive(Debug, Clone, Default)]
pub struct LandmarkMap<'a> {
    points: HashMap<KeypointIndex, &'a Keypoint>,
}

impl<'a> LandmarkMap<'a> {
    /// 全キーポイントを受け入れて構築
    pub fn new(detection: &'a Detection) -> Self {
        Self::with_min_score(detection, 0.0)
    }

    /// スコアが `min_score` 未満のキーポイントを欠損扱いにして構築
    pub fn with_min_score(detection: &'a Detection, min_score: f64) -> Self {
        let mut points = HashMap::with_capacity(KeypointIndex::COUNT);
        for kp in &detection.keypoints {
            let Some(index) = kp.index() else {
                continue;
            };
            if !kp.is_valid(min_score) {
                continue;
            }
            points.entry(index).or_insert(kp);
        }
        Self { points }
    }

    pub fn get(&self, index: KeypointIndex) -> Option<&'a Keypoint> {
        self.points.get(&index).copied()
    }

    pub fn contains(&self, index: KeypointIndex) -> bool {
        self.points.contains_key(&index)
    }

    /// 与えた名前のうち欠けているもの
    pub fn missing(&self, required: &[KeypointIndex]) -> Vec<KeypointIndex> {
        required
            .iter()
            .copied()
            .filter(|idx| !self.contains(*idx))
            .collect()
    }
}
