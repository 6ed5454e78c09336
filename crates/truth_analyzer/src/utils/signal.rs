use tracing::{info, warn};

/// 等待 Ctrl-C 或 SIGTERM，用于优雅关闭 HTTP 服务
pub async fn terminate() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("监听 Ctrl-C 信号失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("监听 SIGTERM 信号失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl-C，正在关闭服务"),
        _ = sigterm => info!("收到 SIGTERM，正在关闭服务"),
    }
}
