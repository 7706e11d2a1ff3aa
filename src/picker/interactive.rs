//! フォルダ内の画像から対話的に1枚選ぶ

use super::scan::scan_folder;
use super::{ImagePicker, PickOutcome};
use crate::error::{ItemAiError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::path::PathBuf;

pub struct FolderPicker {
    folder: PathBuf,
}

impl FolderPicker {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into() }
    }
}

impl ImagePicker for FolderPicker {
    fn pick(&mut self) -> Result<PickOutcome> {
        let images = scan_folder(&self.folder)?;
        if images.is_empty() {
            return Err(ItemAiError::NoImagesFound(self.folder.display().to_string()));
        }

        let names: Vec<&str> = images.iter().map(|i| i.file_name.as_str()).collect();

        // Esc / q でキャンセル
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("画像を選択 (Escでキャンセル)")
            .items(&names)
            .default(0)
            .interact_opt()
            .map_err(|e| ItemAiError::Prompt(e.to_string()))?;

        Ok(match selection {
            Some(idx) => PickOutcome::Picked(images[idx].path.clone()),
            None => PickOutcome::Cancelled,
        })
    }
}
