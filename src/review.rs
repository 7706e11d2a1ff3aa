//! 対話式の出品フォーム
//!
//! アップロード画面 → 確認・編集画面 → 送信 の流れを端末上で行う。
//! 状態は ItemForm が持ち、ここでは描画と入力の受け渡しだけを行う。

use crate::error::{ItemAiError, Result};
use crate::form::{FormPhase, ItemForm, SubmittedItem};
use crate::picker::{FixedPathPicker, ImagePicker};
use crate::service::ListingService;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use item_ai_common::{DraftField, ItemDraft, CATEGORIES};
use std::path::Path;
use std::time::Duration;

const UNSET_CATEGORY: &str = "(未設定)";

/// アップロード画面の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    SelectImage,
    Upload,
    Close,
}

impl UploadAction {
    const ALL: [UploadAction; 3] = [UploadAction::SelectImage, UploadAction::Upload, UploadAction::Close];

    fn label(&self) -> &'static str {
        match self {
            UploadAction::SelectImage => "画像を選択",
            UploadAction::Upload => "画像をアップロード",
            UploadAction::Close => "閉じる",
        }
    }
}

/// 確認画面の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Edit(DraftField),
    Submit,
    Close,
}

/// 確認画面のメニュー項目（フィールド5件 + 送信 + 閉じる）
pub fn review_menu(draft: &ItemDraft) -> Vec<(ReviewAction, String)> {
    let mut items: Vec<(ReviewAction, String)> = DraftField::ALL
        .iter()
        .map(|&field| {
            let value = draft.get(field);
            let shown = if value.is_empty() { "-" } else { value };
            (ReviewAction::Edit(field), format!("{}: {}", field.label(), shown))
        })
        .collect();
    items.push((ReviewAction::Submit, "出品を送信".to_string()));
    items.push((ReviewAction::Close, "破棄して閉じる".to_string()));
    items
}

/// カテゴリ選択肢（ホワイトリスト14件 + 未設定）
pub fn category_choices() -> Vec<&'static str> {
    CATEGORIES
        .iter()
        .map(|c| c.label())
        .chain(std::iter::once(UNSET_CATEGORY))
        .collect()
}

/// 選択肢の位置からカテゴリ値へ（範囲外・未設定は空文字）
pub fn category_from_choice(index: usize) -> String {
    CATEGORIES
        .get(index)
        .map(|c| c.label().to_string())
        .unwrap_or_default()
}

/// 通知の表示文（再試行できる失敗には案内を添える）
pub fn notice_text(err: &ItemAiError) -> String {
    let notice = err.notice();
    let mut text = format!("⚠ {}: {}", notice.title, notice.message);
    if err.is_retryable() {
        text.push_str("\n  もう一度「画像をアップロード」を選ぶと再試行できます");
    }
    text
}

/// 通知を表示
pub fn show_notice(err: &ItemAiError) {
    println!("{}", notice_text(err));
    tracing::debug!(error = %err, "operation failed");
}

/// 画像を読み込み、審査・解析して確定前のドラフトを返す（非対話）
///
/// 失敗は通知を表示せずそのまま返す。表示は呼び出し側が一度だけ行う。
pub async fn analyze_image<S: ListingService>(form: &mut ItemForm<S>, image: &Path) -> Result<ItemDraft> {
    form.select_image(&mut FixedPathPicker::new(image))?;
    form.submit_for_moderation().await?;
    Ok(form.draft().clone())
}

/// 対話式フォームを実行
///
/// 送信されたら Some(レコード)、閉じたら None を返す。
pub async fn run_interactive_form<S: ListingService>(
    form: &mut ItemForm<S>,
    picker: &mut dyn ImagePicker,
    preselect: bool,
) -> Result<Option<SubmittedItem>> {
    println!("🛒 新しい出品\n");

    if preselect {
        select(form, picker);
    }

    loop {
        match form.phase() {
            FormPhase::Idle | FormPhase::Uploading | FormPhase::Approved => {
                match form.image() {
                    Some(img) if form.phase() == FormPhase::Approved => {
                        println!("画像: {} (審査済み・解析待ち)", img.display_label())
                    }
                    Some(img) => println!("画像: {}", img.display_label()),
                    None => println!("画像: 未選択"),
                }

                match prompt_upload_action()? {
                    UploadAction::SelectImage => select(form, picker),
                    UploadAction::Upload => upload(form).await,
                    UploadAction::Close => {
                        form.close()?;
                        println!("閉じました");
                        return Ok(None);
                    }
                }
            }
            FormPhase::Reviewing => match prompt_review_action(form.draft())? {
                ReviewAction::Edit(field) => {
                    let value = prompt_field_value(field, form.draft().get(field))?;
                    form.update_field(field, value)?;
                }
                ReviewAction::Submit => {
                    let record = form.submit()?;
                    println!("\n✅ 出品データを送信しました");
                    return Ok(Some(record));
                }
                ReviewAction::Close => {
                    form.close()?;
                    println!("ドラフトを破棄しました");
                    return Ok(None);
                }
            },
        }
    }
}

fn select<S: ListingService>(form: &mut ItemForm<S>, picker: &mut dyn ImagePicker) {
    match form.select_image(picker) {
        Ok(img) => println!("✔ 画像を選択: {}\n", img.display_label()),
        Err(e) => show_notice(&e),
    }
}

async fn upload<S: ListingService>(form: &mut ItemForm<S>) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    // 審査済みなら解析だけやり直す
    let result = if form.phase() == FormPhase::Approved {
        spinner.set_message("画像を解析中...");
        form.classify_image().await
    } else {
        spinner.set_message("画像を審査・解析中...");
        form.submit_for_moderation().await
    };
    spinner.finish_and_clear();

    match result {
        Ok(()) => println!("✔ 解析完了。内容を確認してください\n"),
        Err(e) => show_notice(&e),
    }
}

fn prompt_upload_action() -> Result<UploadAction> {
    let labels: Vec<&str> = UploadAction::ALL.iter().map(|a| a.label()).collect();
    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("操作")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| ItemAiError::Prompt(e.to_string()))?;
    Ok(UploadAction::ALL[idx])
}

fn prompt_review_action(draft: &ItemDraft) -> Result<ReviewAction> {
    let menu = review_menu(draft);
    let labels: Vec<&str> = menu.iter().map(|(_, label)| label.as_str()).collect();
    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("内容を確認（選択して編集）")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| ItemAiError::Prompt(e.to_string()))?;
    Ok(menu[idx].0)
}

fn prompt_field_value(field: DraftField, current: &str) -> Result<String> {
    if field == DraftField::Category {
        let choices = category_choices();
        let default = choices
            .iter()
            .position(|c| *c == current)
            .unwrap_or(choices.len() - 1);
        let idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(field.label())
            .items(&choices)
            .default(default)
            .interact()
            .map_err(|e| ItemAiError::Prompt(e.to_string()))?;
        return Ok(category_from_choice(idx));
    }

    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(field.label())
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ItemAiError::Prompt(e.to_string()))
}

/// 送信レコードをJSONで保存
pub fn write_record(path: &Path, record: &SubmittedItem) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json)?;
    Ok(())
}
