mod ai;
mod api;
mod config;
mod database;
mod store;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ai::{OpenAiClient, TextGenerator};
use crate::api::AppState;
use crate::config::AppConfig;
use crate::store::{AnalysisStore, SeaOrmAnalysisStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load();
    utils::init_logger(&config.log_level);

    let state = Arc::new(build_state(&config).await?);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("监听地址 {} 失败", config.bind_address))?;
    info!("服务已启动，监听 http://{}", config.bind_address);
    info!("接口文档: http://{}/swagger-ui", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::signal::terminate())
        .await
        .context("HTTP 服务异常退出")?;

    info!("服务已关闭");
    Ok(())
}

/// 按配置组装处理器依赖，缺失的配置在请求时返回 500
async fn build_state(config: &AppConfig) -> Result<AppState> {
    let generator: Option<Arc<dyn TextGenerator>> = match config.openai_api_key.as_deref() {
        Some(api_key) => {
            info!("模型: {} ({})", config.model.model, config.model.base_url);
            Some(Arc::new(OpenAiClient::new(api_key, config.model.clone())?))
        }
        None => {
            warn!("未配置 OPENAI_API_KEY，分析接口将返回 500");
            None
        }
    };

    let store: Option<Arc<dyn AnalysisStore>> = match config.database_url.as_deref() {
        Some(url) => {
            let db = database::setup_database(url).await?;
            Some(Arc::new(SeaOrmAnalysisStore::new(db)))
        }
        None => {
            warn!("未配置 DATABASE_URL，分析结果不会保存，历史接口将返回 500");
            None
        }
    };

    Ok(AppState { generator, store })
}
