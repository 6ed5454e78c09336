use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use truth_analyzer_entity::analysis::{Sentiment, Verdict};

/// 模型返回的分析结果（不含 id 与时间戳）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "de_percent")]
    pub confidence: i32,
    #[serde(deserialize_with = "de_from_str")]
    pub verdict: Verdict,
    #[serde(deserialize_with = "de_from_str")]
    pub sentiment: Sentiment,
    #[serde(deserialize_with = "de_signed_percent")]
    pub sentiment_score: i32,
    #[serde(deserialize_with = "de_percent")]
    pub ai_score: i32,
    pub ai_insights: Vec<String>,
    pub sources: Vec<String>,
}

/// 去掉模型可能包裹的 Markdown 代码块标记（```json ... ```）
pub fn strip_code_fence(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // 跳过语言标记
        s = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// 解析模型回复，失败即整个请求失败，不做修复或重试
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult> {
    let json = strip_code_fence(raw);
    serde_json::from_str(json).with_context(|| format!("解析模型返回的 JSON 失败，原始响应: {}", raw))
}

fn de_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    de_clamped(deserializer, 0, 100)
}

fn de_signed_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    de_clamped(deserializer, -100, 100)
}

/// 接受任意 JSON 数值，四舍五入后限制在取值范围内
fn de_clamped<'de, D: Deserializer<'de>>(deserializer: D, min: i32, max: i32) -> Result<i32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(D::Error::custom("分数必须是有限数值"));
    }
    Ok((value.round() as i64).clamp(i64::from(min), i64::from(max)) as i32)
}

fn de_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse()
        .map_err(|e| D::Error::custom(format!("无效取值 {:?}: {}", raw, e)))
}
