use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 文本分析结果实体（创建后不可修改）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "analyses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub text_content: String,
    pub confidence: i32,
    pub verdict: Verdict,
    pub sentiment: Sentiment,
    pub sentiment_score: i32,
    pub ai_score: i32,
    /// JSON 数组字符串
    #[sea_orm(column_type = "Text")]
    pub ai_insights: String,
    /// JSON 数组字符串
    #[sea_orm(column_type = "Text")]
    pub sources: String,
    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn ai_insights_list(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.ai_insights)
    }

    pub fn sources_list(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.sources)
    }
}

/// 可信度结论，由模型按 confidence 区间给出
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Verdict {
    /// 高可信度
    #[sea_orm(string_value = "verified")]
    Verified,
    /// 中等可信度
    #[sea_orm(string_value = "unverified")]
    Unverified,
    /// 低可信度
    #[sea_orm(string_value = "warning")]
    Warning,
}

/// 情感倾向
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sentiment {
    #[sea_orm(string_value = "positive")]
    Positive,
    #[sea_orm(string_value = "neutral")]
    Neutral,
    #[sea_orm(string_value = "negative")]
    Negative,
}
