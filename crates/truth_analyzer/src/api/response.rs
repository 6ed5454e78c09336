use serde::{Deserialize, Serialize};
use truth_analyzer_entity::analysis::{self, Sentiment, Verdict};
use utoipa::ToSchema;

use crate::ai::AnalysisResult;
use crate::utils::time_format::to_iso8601;

/// 历史记录中文本预览的最大字符数
pub const TEXT_PREVIEW_CHARS: usize = 100;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// 仅在成功写入数据库时返回
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub confidence: i32,
    #[schema(value_type = String, example = "warning")]
    pub verdict: Verdict,
    #[schema(value_type = String, example = "neutral")]
    pub sentiment: Sentiment,
    pub sentiment_score: i32,
    pub ai_score: i32,
    pub ai_insights: Vec<String>,
    pub sources: Vec<String>,
}

impl AnalyzeResponse {
    pub fn new(result: AnalysisResult, id: Option<i32>) -> Self {
        Self {
            id: id.map(|id| id.to_string()),
            confidence: result.confidence,
            verdict: result.verdict,
            sentiment: result.sentiment,
            sentiment_score: result.sentiment_score,
            ai_score: result.ai_score,
            ai_insights: result.ai_insights,
            sources: result.sources,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    /// 超过 100 个字符时截断并追加 `...`
    pub text: String,
    pub confidence: i32,
    #[schema(value_type = String, example = "verified")]
    pub verdict: Verdict,
    #[schema(value_type = String, example = "positive")]
    pub sentiment: Sentiment,
    pub sentiment_score: i32,
    pub ai_score: i32,
    pub ai_insights: Vec<String>,
    pub sources: Vec<String>,
    /// ISO-8601 格式的创建时间
    pub timestamp: String,
}

impl TryFrom<analysis::Model> for HistoryEntry {
    type Error = serde_json::Error;

    fn try_from(model: analysis::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            ai_insights: model.ai_insights_list()?,
            sources: model.sources_list()?,
            id: model.id.to_string(),
            text: truncate_text(&model.text_content, TEXT_PREVIEW_CHARS),
            confidence: model.confidence,
            verdict: model.verdict,
            sentiment: model.sentiment,
            sentiment_score: model.sentiment_score,
            ai_score: model.ai_score,
            timestamp: to_iso8601(&model.created_at),
        })
    }
}

/// 按字符（而非字节）截断
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
