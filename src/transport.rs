//! HTTP传输层
//!
//! 后端适配器只依赖 [`HttpTransport`]，生产环境使用基于 reqwest 的实现。

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::TranslatorConfig;
use crate::error::TranslationError;

/// 收到的HTTP响应（任何状态码）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            status_text: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default()
                .to_string(),
            body: body.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP传输接口
///
/// 只有在完全没有收到响应时才返回 `Err`；非200响应作为 `Ok` 返回。
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TranslationError>;

    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TranslationError>;
}

/// 基于 reqwest 的传输实现
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 按配置创建HTTP客户端
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("创建HTTP客户端失败")?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn read_response(response: reqwest::Response) -> Result<HttpResponse, TranslationError> {
        let status = response.status();
        let body = response.text().await?;
        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TranslationError> {
        let response = self.client.get(url).send().await?;
        Self::read_response(response).await
    }

    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TranslationError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        Self::read_response(response).await
    }
}
