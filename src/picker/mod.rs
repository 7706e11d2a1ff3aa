//! 画像選択モジュール
//!
//! 画像ファイルを選ばせ、バイト列と表示用の参照情報を読み込む。

mod interactive;
mod scan;

pub use interactive::FolderPicker;
pub use scan::{is_image_path, scan_folder, ImageInfo};

use crate::error::{ItemAiError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::ImageReader;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 選択済み画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// SHA-256（16進）
    pub digest: String,
    bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// 送信用のBase64文字列（data URLの接頭辞は付けない）
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// 表示用の一行ラベル
    pub fn display_label(&self) -> String {
        format!(
            "{} ({}x{}, {} bytes)",
            self.file_name, self.width, self.height, self.size()
        )
    }
}

/// 画像ファイルを読み込み、画像としてデコードできるか確認する
pub fn load_image(path: &Path) -> Result<SelectedImage> {
    if !path.is_file() {
        return Err(ItemAiError::ImageLoad(format!(
            "ファイルが見つかりません: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ItemAiError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let (width, height) = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| ItemAiError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .into_dimensions()
        .map_err(|e| ItemAiError::ImageLoad(format!("画像として読み込めません {}: {}", path.display(), e)))?;

    let digest = hex::encode(Sha256::digest(&bytes));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    debug!(file = %file_name, width, height, size = bytes.len(), "image loaded");

    Ok(SelectedImage {
        file_name,
        width,
        height,
        digest,
        bytes,
    })
}

/// 選択結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(PathBuf),
    Cancelled,
}

/// ファイル選択ダイアログの抽象
pub trait ImagePicker {
    fn pick(&mut self) -> Result<PickOutcome>;
}

/// 指定済みのパスを返すだけのピッカー（--image 指定時）
#[derive(Debug, Clone)]
pub struct FixedPathPicker {
    path: PathBuf,
}

impl FixedPathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImagePicker for FixedPathPicker {
    fn pick(&mut self) -> Result<PickOutcome> {
        Ok(PickOutcome::Picked(self.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_png(path: &Path, w: u32, h: u32) {
        image::RgbImage::new(w, h).save(path).unwrap();
    }

    #[test]
    fn test_load_image_reads_dimensions_and_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shot.png");
        write_png(&path, 3, 2);

        let img = load_image(&path).unwrap();
        assert_eq!(img.file_name, "shot.png");
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.digest.len(), 64);
        assert_eq!(img.bytes(), std::fs::read(&path).unwrap().as_slice());
        assert!(img.display_label().starts_with("shot.png (3x2"));
    }

    #[test]
    fn test_to_base64_has_no_data_url_prefix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shot.png");
        write_png(&path, 1, 1);

        let img = load_image(&path).unwrap();
        let b64 = img.to_base64();
        assert!(!b64.starts_with("data:"));
        assert_eq!(STANDARD.decode(b64).unwrap(), img.bytes());
    }

    #[test]
    fn test_load_image_missing_file() {
        let result = load_image(Path::new("/nonexistent/shot.png"));
        assert!(matches!(result, Err(ItemAiError::ImageLoad(_))));
    }

    #[test]
    fn test_load_image_not_an_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let result = load_image(&path);
        assert!(matches!(result, Err(ItemAiError::ImageLoad(_))));
    }

    #[test]
    fn test_fixed_path_picker() {
        let mut picker = FixedPathPicker::new("/tmp/a.png");
        assert_eq!(picker.pick().unwrap(), PickOutcome::Picked(PathBuf::from("/tmp/a.png")));
    }
}
