use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::measure::{CalibrationPolicy, DEFAULT_HEIGHT_CM, HEAD_HEIGHT_RATIO};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub measure: MeasureConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MeasureConfig {
    /// 身長（cm）。コマンドライン引数が優先
    #[serde(default = "default_height_cm")]
    pub height_cm: f64,
    /// 耳〜目の縦距離に対する頭頂までの倍率
    #[serde(default = "default_head_height_ratio")]
    pub head_height_ratio: f64,
    /// これ未満のスコアのキーポイントは欠損扱い
    #[serde(default)]
    pub min_score: f64,
    #[serde(default)]
    pub calibration_policy: CalibrationPolicy,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    /// 描画対象とする信頼度の閾値
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    /// キーポイント円の半径（px）
    #[serde(default = "default_keypoint_radius")]
    pub keypoint_radius: i32,
}

fn default_height_cm() -> f64 { DEFAULT_HEIGHT_CM }
fn default_head_height_ratio() -> f64 { HEAD_HEIGHT_RATIO }
fn default_confidence_threshold() -> f64 { 0.3 }
fn default_keypoint_radius() -> i32 { 5 }

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            height_cm: default_height_cm(),
            head_height_ratio: default_head_height_ratio(),
            min_score: 0.0,
            calibration_policy: CalibrationPolicy::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            keypoint_radius: default_keypoint_radius(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// 読めなければデフォルト設定
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.measure, MeasureConfig::default());
        assert_eq!(config.measure.height_cm, 160.0);
        assert_eq!(config.measure.head_height_ratio, 1.5);
        assert_eq!(config.render.confidence_threshold, 0.3);
        assert_eq!(config.render.keypoint_radius, 5);
    }

    #[test]
    fn test_partial_section() {
        let config = Config::parse(
            r#"
            [measure]
            height_cm = 172.5
            calibration_policy = "all_segments"
            "#,
        )
        .unwrap();
        assert_eq!(config.measure.height_cm, 172.5);
        assert_eq!(config.measure.head_height_ratio, 1.5);
        assert_eq!(config.measure.calibration_policy, CalibrationPolicy::AllSegments);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        assert!(Config::parse("[measure]\ncalibration_policy = \"sometimes\"").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("no/such/config.toml");
        assert_eq!(config.measure, MeasureConfig::default());
    }
}
