use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ModelConfig;

/// 发送给模型的一次性对话（系统提示 + 用户提示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

/// 文本生成能力，便于在测试中替换为假实现
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &ChatPrompt) -> Result<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// OpenAI 兼容的 chat/completions 客户端（非流式，单次请求，不重试）
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    config: ModelConfig,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, config: ModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("创建 HTTP 客户端失败")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &ChatPrompt) -> Result<String> {
        let req_body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let base = self.config.base_url.trim_end_matches('/');
        let res = self
            .client
            .post(format!("{}/chat/completions", base))
            .bearer_auth(&self.api_key)
            .json(&req_body)
            .send()
            .await
            .context("模型请求发送失败")?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(anyhow!("模型请求失败: {} {}", status, body));
        }

        let resp: ChatResponse = res.json().await.context("解析模型响应失败")?;
        let content = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .ok_or_else(|| anyhow!("模型未返回任何内容"))?;

        debug!("模型返回 {} 个字符", content.chars().count());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_config(base_url: String) -> ModelConfig {
        ModelConfig {
            base_url,
            timeout: Duration::from_secs(5),
            ..ModelConfig::default()
        }
    }

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            system: "system".to_string(),
            user: "user".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_sends_chat_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 800,
                "messages": [
                    {"role": "system", "content": "system"},
                    {"role": "user", "content": "user"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  {\"ok\": true}\n"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        // base_url 末尾的斜杠应被忽略
        let client = OpenAiClient::new("test-key", test_config(format!("{}/", server.uri()))).unwrap();
        let content = client.generate(&prompt()).await.unwrap();
        assert_eq!(content, "{\"ok\": true}");
    }

    #[tokio::test]
    async fn test_generate_fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("bad-key", test_config(server.uri())).unwrap();
        let err = client.generate(&prompt()).await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_generate_fails_on_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key", test_config(server.uri())).unwrap();
        assert!(client.generate(&prompt()).await.is_err());
    }
}
