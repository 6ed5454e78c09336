use serde::Deserialize;
use utoipa::ToSchema;

/// 分析请求体，空请求体视为 `{}`
#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}
