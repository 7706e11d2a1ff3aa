//! 出品フォームの状態機械
//!
//! 遷移:
//! - Idle --submit_for_moderation--> Uploading(busy)
//! - Uploading --不承認/通信失敗--> Idle（画像は保持）
//! - Uploading --承認--> Approved --classify_image--> Uploading(busy)
//! - Uploading --解析成功--> Reviewing
//! - Uploading --解析失敗--> Approved（アップロード画面のまま、解析だけ再試行できる）
//! - Reviewing --submit--> Idle（ドラフト・画像を破棄）
//!
//! 画面側は状態を描画し、入力をここへ渡すだけにする。

use crate::error::{ItemAiError, Result};
use crate::picker::{load_image, ImagePicker, PickOutcome, SelectedImage};
use crate::service::ListingService;
use item_ai_common::{DraftField, ItemDraft};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// フォームの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// アップロード画面
    #[default]
    Idle,
    /// モデレーション/解析の応答待ち
    Uploading,
    /// モデレーション承認済み・解析未完了（アップロード画面）
    Approved,
    /// 解析結果の確認・編集画面
    Reviewing,
}

/// 送信された出品レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedItem {
    #[serde(flatten)]
    pub draft: ItemDraft,
    pub image_file: String,
    pub image_sha256: String,
    /// RFC 3339
    pub submitted_at: String,
}

pub struct ItemForm<S> {
    service: S,
    phase: FormPhase,
    busy: bool,
    draft: ItemDraft,
    image: Option<SelectedImage>,
}

impl<S: ListingService> ItemForm<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            phase: FormPhase::Idle,
            busy: false,
            draft: ItemDraft::default(),
            image: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// 画像を選択する
    ///
    /// 成功時は保持中の画像を置き換え、承認状態も取り消す。
    /// キャンセル・読み込み失敗時は既存の画像と状態をそのまま残す。
    pub fn select_image(&mut self, picker: &mut dyn ImagePicker) -> Result<&SelectedImage> {
        self.ensure_not_busy()?;
        if !matches!(self.phase, FormPhase::Idle | FormPhase::Approved) {
            return Err(ItemAiError::InvalidState("画像の選択はアップロード画面でのみ可能です".into()));
        }

        let path = match picker.pick()? {
            PickOutcome::Picked(path) => path,
            PickOutcome::Cancelled => {
                debug!("image pick cancelled");
                return Err(ItemAiError::Cancelled);
            }
        };

        let image = load_image(&path)?;
        info!(file = %image.file_name, digest = %image.digest, "image selected");
        self.phase = FormPhase::Idle;
        Ok(&*self.image.insert(image))
    }

    /// モデレーションを実行し、承認されたら解析まで進める
    ///
    /// 承認済み（Approved）から呼んだ場合も審査からやり直す。
    pub async fn submit_for_moderation(&mut self) -> Result<()> {
        self.ensure_not_busy()?;
        if !matches!(self.phase, FormPhase::Idle | FormPhase::Approved) {
            return Err(ItemAiError::InvalidState("アップロード画面ではありません".into()));
        }
        let payload = self.payload()?;

        self.busy = true;
        self.phase = FormPhase::Uploading;
        let verdict = self.service.moderate(&payload).await;
        self.busy = false;

        match verdict {
            Ok(v) if v.is_appropriate => {
                self.phase = FormPhase::Approved;
            }
            Ok(_) => {
                info!("image rejected by moderation");
                self.phase = FormPhase::Idle;
                return Err(ItemAiError::Rejected);
            }
            Err(e) => {
                warn!(error = %e, "moderation did not complete");
                self.phase = FormPhase::Idle;
                return Err(e);
            }
        }

        self.classify_image().await
    }

    /// 解析を実行してドラフトへマージし、確認画面へ進める
    ///
    /// モデレーション承認済み（Approved）でのみ呼べる。失敗時は Approved のまま。
    pub async fn classify_image(&mut self) -> Result<()> {
        self.ensure_not_busy()?;
        if self.phase != FormPhase::Approved {
            return Err(ItemAiError::InvalidState("モデレーション承認前に解析はできません".into()));
        }
        let payload = self.payload()?;

        self.busy = true;
        self.phase = FormPhase::Uploading;
        let result = self.classify_with(&payload).await;
        self.busy = false;

        match &result {
            Ok(()) => self.phase = FormPhase::Reviewing,
            Err(e) => {
                warn!(error = %e, "analysis did not complete");
                self.phase = FormPhase::Approved;
            }
        }
        result
    }

    fn payload(&self) -> Result<String> {
        self.image
            .as_ref()
            .map(|img| img.to_base64())
            .ok_or(ItemAiError::NoImageSelected)
    }

    async fn classify_with(&mut self, payload: &str) -> Result<()> {
        let attrs = self.service.analyze(payload).await?;
        if let Some(suggested) = attrs.category.as_deref() {
            if item_ai_common::Category::from_label(suggested).is_none() {
                debug!(suggested, "category outside whitelist dropped");
            }
        }
        self.draft.merge_analysis(&attrs);
        Ok(())
    }

    /// ドラフトの1フィールドを書き換える
    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        self.ensure_not_busy()?;
        self.draft.set(field, value);
        Ok(())
    }

    /// 現在のドラフトを確定レコードとして出力し、フォームを初期状態に戻す
    pub fn submit(&mut self) -> Result<SubmittedItem> {
        self.ensure_not_busy()?;
        if self.phase != FormPhase::Reviewing {
            return Err(ItemAiError::InvalidState("送信できるのは確認画面のみです".into()));
        }

        let (image_file, image_sha256) = self
            .image
            .as_ref()
            .map(|img| (img.file_name.clone(), img.digest.clone()))
            .unwrap_or_default();

        let record = SubmittedItem {
            draft: std::mem::take(&mut self.draft),
            image_file,
            image_sha256,
            submitted_at: chrono::Local::now().to_rfc3339(),
        };
        info!(item = %record.draft.item_name, category = %record.draft.category, "item submitted");

        self.reset();
        Ok(record)
    }

    /// ドラフトと画像を破棄して閉じる
    pub fn close(&mut self) -> Result<()> {
        self.ensure_not_busy()?;
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.phase = FormPhase::Idle;
        self.draft = ItemDraft::default();
        self.image = None;
    }

    fn ensure_not_busy(&self) -> Result<()> {
        if self.busy {
            return Err(ItemAiError::Busy);
        }
        Ok(())
    }
}
