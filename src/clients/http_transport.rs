/// HTTP 提交通道
///
/// 以 JSON POST 的方式把问卷发送到配置的地址
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clients::Transport;
use crate::config::Config;
use crate::error::{ConfigError, TransportError};
use crate::logger::truncate_text;
use crate::models::SurveyPayload;

/// HTTP 提交通道
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpTransport {
    /// 创建新的 HTTP 提交通道
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, payload: &SurveyPayload) -> Result<(), TransportError> {
        let body = serde_json::to_vec(payload)?;
        debug!("提交问卷 Payload: {} 字节", body.len());

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::request_failed(&self.endpoint, e))?;

        let status = response.status();
        if status.is_success() {
            info!("✓ 问卷提交成功 ({})", status.as_u16());
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let detail = extract_detail(&text);
        warn!(
            "⚠️ 问卷提交被拒绝: status={} body={}",
            status.as_u16(),
            truncate_text(&text, 200)
        );

        Err(TransportError::BadResponse {
            endpoint: self.endpoint.clone(),
            status: status.as_u16(),
            detail,
        })
    }
}

impl Transport for HttpTransport {
    fn submit<'a>(&'a self, payload: &'a SurveyPayload) -> BoxFuture<'a, Result<(), TransportError>> {
        self.post(payload).boxed()
    }
}

/// 从错误响应体中提取 `detail` / `error` / `non_field_errors[0]`
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("error"))
        .or_else(|| value.get("non_field_errors").and_then(|v| v.get(0)))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
