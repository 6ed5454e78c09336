use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// 预检结果的浏览器缓存时间（24 小时）
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86400);

/// 单个接口的跨域配置：允许任意来源，只放行该接口的方法和 OPTIONS
pub fn build_cors_layer(method: Method) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([method, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE)
}
