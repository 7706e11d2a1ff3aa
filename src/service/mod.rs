//! モデレーション/解析サービス
//!
//! 画像（Base64）を外部サービスへ送る:
//! - moderate: 掲載可否の判定
//! - analyze: 出品属性の抽出

mod http;

pub use http::HttpListingService;

use crate::error::Result;
use async_trait::async_trait;
use item_ai_common::{AnalysisAttributes, ModerationVerdict};

#[async_trait]
pub trait ListingService: Send + Sync {
    /// 画像が掲載可能か判定
    async fn moderate(&self, image_base64: &str) -> Result<ModerationVerdict>;

    /// 画像から出品属性を抽出
    async fn analyze(&self, image_base64: &str) -> Result<AnalysisAttributes>;
}
