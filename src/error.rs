use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItemAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("画像の選択がキャンセルされました")]
    Cancelled,

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像が選択されていません")]
    NoImageSelected,

    #[error("画像がガイドラインに違反しているため承認されませんでした")]
    Rejected,

    #[error("API呼び出しエラー: {0}")]
    Transport(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("処理中のため操作できません")]
    Busy,

    #[error("現在の状態では実行できません: {0}")]
    InvalidState(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

/// 応答本文の解釈失敗は API 応答のパース失敗として扱う
impl From<item_ai_common::Error> for ItemAiError {
    fn from(err: item_ai_common::Error) -> Self {
        match err {
            item_ai_common::Error::Parse(msg) => ItemAiError::ApiParse(msg),
        }
    }
}

/// 利用者向けの通知（アラートのタイトルと本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl ItemAiError {
    /// 失敗した操作を利用者に伝える通知へ変換
    pub fn notice(&self) -> Notice {
        let (title, message) = match self {
            ItemAiError::Cancelled => ("キャンセル", "ファイルの選択がキャンセルされました。".to_string()),
            ItemAiError::ImageLoad(_) | ItemAiError::Io(_) => (
                "エラー",
                "ファイルの選択または読み込み中にエラーが発生しました。".to_string(),
            ),
            ItemAiError::NoImageSelected => ("画像未選択", "先に画像を選択してください。".to_string()),
            ItemAiError::Rejected => (
                "画像が承認されませんでした",
                "この画像はプラットフォームのガイドラインに違反しています。".to_string(),
            ),
            ItemAiError::Transport(_) | ItemAiError::ApiParse(_) => (
                "エラー",
                "画像の送信中にエラーが発生しました。もう一度お試しください。".to_string(),
            ),
            ItemAiError::Busy => ("処理中", "現在の処理が終わるまでお待ちください。".to_string()),
            other => ("エラー", other.to_string()),
        };
        Notice { title, message }
    }

    /// 再試行で解決しうる失敗か
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ItemAiError::Transport(_) | ItemAiError::ApiParse(_) | ItemAiError::ImageLoad(_) | ItemAiError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ItemAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_notice() {
        let notice = ItemAiError::Rejected.notice();
        assert_eq!(notice.title, "画像が承認されませんでした");
        assert!(notice.message.contains("ガイドライン"));
        assert!(!ItemAiError::Rejected.is_retryable());
    }

    #[test]
    fn test_transport_notice_hides_details() {
        let err = ItemAiError::Transport("HTTP 502: bad gateway".to_string());
        let notice = err.notice();
        assert!(!notice.message.contains("502"));
        assert!(notice.message.contains("もう一度"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_cancel_is_not_retryable() {
        assert!(!ItemAiError::Cancelled.is_retryable());
        assert_eq!(ItemAiError::Cancelled.notice().title, "キャンセル");
    }
}
