use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

/// 命令行参数，所有参数均可通过环境变量提供
#[derive(Parser, Debug, Clone)]
#[command(name = "truth-analyzer", version, about)]
pub struct Args {
    /// OpenAI 兼容接口的 API Key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// 数据库连接字符串（sqlite:// 或 postgres://）
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    #[arg(long, env = "OPENAI_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long, env = "OPENAI_MAX_TOKENS", default_value_t = 800)]
    pub max_tokens: u32,

    /// 模型请求超时（秒）
    #[arg(long, env = "OPENAI_TIMEOUT_SECONDS", default_value_t = 60)]
    pub timeout_seconds: u64,

    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:12345")]
    pub bind_address: SocketAddr,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// 模型调用配置
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 800,
            timeout: Duration::from_secs(60),
        }
    }
}

/// 进程启动时构建一次的应用配置，之后只读
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub database_url: Option<String>,
    pub model: ModelConfig,
    pub bind_address: SocketAddr,
    pub log_level: String,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            openai_api_key: non_empty(args.openai_api_key),
            database_url: non_empty(args.database_url),
            model: ModelConfig {
                base_url: args.openai_base_url,
                model: args.model,
                temperature: args.temperature,
                max_tokens: args.max_tokens,
                timeout: Duration::from_secs(args.timeout_seconds),
            },
            bind_address: args.bind_address,
            log_level: args.log_level,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from(Args::parse())
    }
}

/// 空字符串视为未配置
fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
