//! 全体比率のまとめと外部の体型分析サービスとの境界
//!
//! ここでの計算結果は計測側には戻らない。

use anyhow::Result;
use std::fmt::Write;

use crate::measure::MeasurementRecord;

/// 画像と計測値から体型の説明文を返す外部サービス
pub trait BodyTypeAnalyzer {
    fn analyze(&self, prompt: &str, image_jpeg: &[u8]) -> Result<String>;
}

pub const ANALYSIS_FALLBACK: &str = "Error analyzing body type. Please try again.";

/// 全体比率
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportions {
    /// head + upper_body + lower_body
    pub total_height: u64,
    pub upper_ratio_pct: f64,
    pub lower_ratio_pct: f64,
    /// 上半身:下半身 の既約整数比
    pub upper_lower: (u64, u64),
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

impl Proportions {
    /// 頭・上半身・下半身が揃っていない、または合計が u64 を超えるなら None
    pub fn from_record(record: &MeasurementRecord) -> Option<Self> {
        let (head, upper, lower) = (record.head?, record.upper_body?, record.lower_body?);
        let total_height = head.checked_add(upper)?.checked_add(lower)?;
        let divisor = gcd(upper, lower);
        if total_height == 0 || divisor == 0 {
            return None;
        }
        Some(Self {
            total_height,
            upper_ratio_pct: upper as f64 / total_height as f64 * 100.0,
            lower_ratio_pct: lower as f64 / total_height as f64 * 100.0,
            upper_lower: (upper / divisor, lower / divisor),
        })
    }
}

fn or_na(value: Option<u64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// 結果パネルのテキスト版
pub fn render_summary(record: &MeasurementRecord) -> String {
    let mut out = String::new();
    let proportions = Proportions::from_record(record);

    let _ = writeln!(out, "General Proportions");
    match proportions {
        Some(p) => {
            let _ = writeln!(out, "  Total Height: {} cm", p.total_height);
            let _ = writeln!(out, "  Upper:Lower Ratio: {}:{}", p.upper_lower.0, p.upper_lower.1);
            let _ = writeln!(out, "  Upper Body Ratio: {:.1}%", p.upper_ratio_pct);
            let _ = writeln!(out, "  Lower Body Ratio: {:.1}%", p.lower_ratio_pct);
        }
        None => {
            let _ = writeln!(out, "  Total Height: N/A");
            let _ = writeln!(out, "  Upper:Lower Ratio: N/A");
        }
    }

    let _ = writeln!(out, "Detailed Measurements");
    let _ = writeln!(out, "  Head Height: {} cm", or_na(record.head));
    let _ = writeln!(out, "  Upper Body: {} cm", or_na(record.upper_body));
    let _ = writeln!(out, "  Lower Body: {} cm", or_na(record.lower_body));
    let _ = writeln!(out, "  Hip to Knee: {} cm", or_na(record.hip_to_knee));
    let _ = write!(out, "  Knee to Ankle: {} cm", or_na(record.knee_to_ankle));
    out
}

/// 体型分析用プロンプト。比率が出せなければ None
pub fn build_analysis_prompt(record: &MeasurementRecord) -> Option<String> {
    let p = Proportions::from_record(record)?;
    let mut prompt = String::from("Analyze this person's body type based on the following measurements:\n");
    let _ = writeln!(prompt, "- Total Height: {} cm", p.total_height);
    let _ = writeln!(prompt, "- Head Height: {} cm", record.head?);
    let _ = writeln!(prompt, "- Upper Body: {} cm", record.upper_body?);
    let _ = writeln!(prompt, "- Lower Body: {} cm", record.lower_body?);
    let _ = writeln!(prompt, "- Upper:Lower Ratio: {}:{}", p.upper_lower.0, p.upper_lower.1);
    let _ = writeln!(prompt, "- Upper Body Ratio: {:.1}%", p.upper_ratio_pct);
    let _ = writeln!(prompt, "- Lower Body Ratio: {:.1}%", p.lower_ratio_pct);
    prompt.push_str("\nPlease provide:\n");
    prompt.push_str("1. Body type classification\n");
    prompt.push_str("2. Brief description of the body proportions\n");
    prompt.push_str("3. Any notable characteristics\n");
    Some(prompt)
}

/// 分析を依頼し、失敗時は定型文を返す
pub fn describe_body_type<A: BodyTypeAnalyzer + ?Sized>(
    analyzer: &A,
    record: &MeasurementRecord,
    image_jpeg: &[u8],
) -> String {
    let Some(prompt) = build_analysis_prompt(record) else {
        return ANALYSIS_FALLBACK.to_string();
    };
    match analyzer.analyze(&prompt, image_jpeg) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "body type analysis failed");
            ANALYSIS_FALLBACK.to_string()
        }
    }
}
