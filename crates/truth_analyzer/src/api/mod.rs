mod cors;
pub mod error;
pub mod handler;
pub mod request;
pub mod response;
pub mod wrapper;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ai::TextGenerator;
use crate::store::AnalysisStore;

/// 处理器共享的只读状态；未配置的能力为 None
pub struct AppState {
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub store: Option<Arc<dyn AnalysisStore>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(handler::analyze, handler::history),
    components(schemas(
        request::AnalyzeRequest,
        response::AnalyzeResponse,
        response::HistoryEntry,
        response::ErrorResponse
    ))
)]
pub struct ApiDoc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/analyze",
            post(handler::analyze)
                .fallback(handler::method_not_allowed)
                // 文本长度不设上限
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer(cors::build_cors_layer(Method::POST)),
        )
        .route(
            "/api/history",
            get(handler::history)
                // axum 默认用 GET 处理 HEAD，这里显式拒绝
                .head(handler::method_not_allowed)
                .fallback(handler::method_not_allowed)
                .layer(cors::build_cors_layer(Method::GET)),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
