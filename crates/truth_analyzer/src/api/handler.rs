use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Extension;
use tracing::{debug, info, warn};

use crate::ai::{build_analysis_prompt, parse_analysis};
use crate::api::error::InnerApiError;
use crate::api::request::AnalyzeRequest;
use crate::api::response::{AnalyzeResponse, ErrorResponse, HistoryEntry};
use crate::api::wrapper::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::store::NewAnalysis;

/// 历史记录最多返回的条数
pub const HISTORY_LIMIT: u64 = 50;

fn parse_request(body: &[u8]) -> Result<AnalyzeRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AnalyzeRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        debug!("请求体解析失败: {}", e);
        InnerApiError::BadRequest("Invalid JSON body").into()
    })
}

/// 分析文本可信度与情感倾向
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, body = AnalyzeResponse),
        (status = 400, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn analyze(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<ApiResponse<AnalyzeResponse>, ApiError> {
    let request = parse_request(&body)?;
    let text = request.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(InnerApiError::BadRequest("Text is required").into());
    }

    let Some(generator) = state.generator.as_ref() else {
        return Err(InnerApiError::NotConfigured("OpenAI API key not configured").into());
    };

    let prompt = build_analysis_prompt(&text);
    let reply = generator.generate(&prompt).await.map_err(InnerApiError::Upstream)?;
    let result = parse_analysis(&reply).map_err(InnerApiError::Upstream)?;

    // 写库失败只记录日志，不影响本次响应
    let id = match state.store.as_ref() {
        Some(store) => {
            let record = NewAnalysis {
                text_content: text,
                result: result.clone(),
            };
            match store.insert(record).await {
                Ok(id) => {
                    info!("分析结果已保存，id = {}", id);
                    Some(id)
                }
                Err(e) => {
                    warn!("保存分析结果失败: {:#}", e);
                    None
                }
            }
        }
        None => None,
    };

    Ok(ApiResponse::ok(AnalyzeResponse::new(result, id)))
}

/// 获取最近的分析历史，按创建时间倒序
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, body = Vec<HistoryEntry>),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn history(Extension(state): Extension<Arc<AppState>>) -> Result<ApiResponse<Vec<HistoryEntry>>, ApiError> {
    let Some(store) = state.store.as_ref() else {
        return Err(InnerApiError::NotConfigured("Database not configured").into());
    };

    let records = store.list_recent(HISTORY_LIMIT).await.map_err(InnerApiError::Storage)?;
    let entries = records
        .into_iter()
        .map(HistoryEntry::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| InnerApiError::Storage(e.into()))?;

    debug!("返回 {} 条历史记录", entries.len());
    Ok(ApiResponse::ok(entries))
}

pub async fn method_not_allowed() -> ApiError {
    InnerApiError::MethodNotAllowed.into()
}
