use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::api::error::InnerApiError;
use crate::api::response::ErrorResponse;

/// 成功响应：JSON 正文，跨域头由 CorsLayer 统一添加
pub struct ApiResponse<T: Serialize>(T);

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self(data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError(InnerApiError);

impl From<InnerApiError> for ApiError {
    fn from(value: InnerApiError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        match &self.0 {
            InnerApiError::Upstream(e) | InnerApiError::Storage(e) => error!("请求处理失败: {:#}", e),
            InnerApiError::NotConfigured(msg) => warn!("服务配置缺失: {}", msg),
            _ => {}
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
