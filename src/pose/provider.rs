use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::keypoint::Detection;

/// 画像から Detection 群を返す外部ポーズ推定器の境界
pub trait KeypointProvider {
    fn estimate(&mut self) -> Result<Vec<Detection>>;
}

/// 推定に失敗した場合は検出ゼロとして扱う
pub fn estimate_or_empty<P: KeypointProvider + ?Sized>(provider: &mut P) -> Vec<Detection> {
    match provider.estimate() {
        Ok(detections) => detections,
        Err(e) => {
            tracing::warn!(error = %e, "keypoint provider failed, treating as zero detections");
            Vec::new()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionsFile {
    Many(Vec<Detection>),
    Wrapped { poses: Vec<Detection> },
    Single(Detection),
}

impl From<DetectionsFile> for Vec<Detection> {
    fn from(file: DetectionsFile) -> Self {
        match file {
            DetectionsFile::Many(v) | DetectionsFile::Wrapped { poses: v } => v,
            DetectionsFile::Single(d) => vec![d],
        }
    }
}

/// pose-detection の出力を保存した JSON を読むプロバイダ
///
/// 受け付ける形式: Detection の配列、`{"poses": [...]}`、単一の Detection
pub struct JsonKeypointProvider {
    path: PathBuf,
}

impl JsonKeypointProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(content: &str) -> Result<Vec<Detection>> {
        let file: DetectionsFile =
            serde_json::from_str(content).context("Failed to parse keypoint JSON")?;
        Ok(file.into())
    }
}

impl KeypointProvider for JsonKeypointProvider {
    fn estimate(&mut self) -> Result<Vec<Detection>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let detections = Self::parse(&content)?;
        tracing::debug!(count = detections.len(), path = %self.path.display(), "loaded detections");
        Ok(detections)
    }
}
