//! HTTP実装
//!
//! `POST {endpoint}/moderate` と `POST {endpoint}/analyze` に
//! `{"image": "<base64>"}` を送る。

use super::ListingService;
use crate::config::Config;
use crate::error::{ItemAiError, Result};
use async_trait::async_trait;
use item_ai_common::{
    parse_analysis_response, parse_moderation_response, AnalysisAttributes, ModerationVerdict,
};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Serialize)]
struct ImageRequest<'a> {
    image: &'a str,
}

pub struct HttpListingService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpListingService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ItemAiError::Config(format!("HTTPクライアント初期化エラー: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.resolved_endpoint(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    /// 画像をPOSTし、成功時のレスポンス本文を返す
    async fn post_image(&self, path: &str, image_base64: &str) -> Result<String> {
        let url = self.url(path);
        debug!(%url, payload_len = image_base64.len(), "posting image");

        let response = self
            .client
            .post(&url)
            .json(&ImageRequest { image: image_base64 })
            .send()
            .await
            .map_err(|e| ItemAiError::Transport(format!("{} 送信失敗: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ItemAiError::Transport(format!("{} 受信失敗: {}", url, e)))?;

        if !status.is_success() {
            return Err(ItemAiError::Transport(format!("{} HTTP {}: {}", url, status, body)));
        }

        debug!(%url, %status, body_len = body.len(), "response received");
        Ok(body)
    }
}

#[async_trait]
impl ListingService for HttpListingService {
    async fn moderate(&self, image_base64: &str) -> Result<ModerationVerdict> {
        let body = self.post_image("moderate", image_base64).await?;
        let verdict = parse_moderation_response(&body)?;
        info!(approved = verdict.is_appropriate, "moderation finished");
        Ok(verdict)
    }

    async fn analyze(&self, image_base64: &str) -> Result<AnalysisAttributes> {
        let body = self.post_image("analyze", image_base64).await?;
        let attrs = parse_analysis_response(&body)?;
        info!(category = ?attrs.category, "analysis finished");
        Ok(attrs)
    }
}
