//! フォームとサービス応答の型定義
//!
//! - ItemDraft: 編集中の出品ドラフト
//! - DraftField: ドラフトのフィールド名
//! - ModerationVerdict: モデレーション応答
//! - AnalysisAttributes: 解析応答（欠けたキーは None）

use crate::category::Category;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 出品ドラフト
///
/// 解析サービスのキー名（snake_case）でシリアライズする
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDraft {
    pub item_name: String,
    pub condition: String,
    pub description: String,
    pub price_range: String,
    pub category: String,
}

impl ItemDraft {
    /// 全フィールドが空か
    pub fn is_empty(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::ItemName => &self.item_name,
            DraftField::Condition => &self.condition,
            DraftField::Description => &self.description,
            DraftField::PriceRange => &self.price_range,
            DraftField::Category => &self.category,
        }
    }

    /// 1フィールドを書き換える（型以外の検証はしない）
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::ItemName => self.item_name = value,
            DraftField::Condition => self.condition = value,
            DraftField::Description => self.description = value,
            DraftField::PriceRange => self.price_range = value,
            DraftField::Category => self.category = value,
        }
    }

    /// 解析結果をマージ
    ///
    /// 応答にあるキーだけ上書きし、カテゴリはホワイトリストを通した値で常に上書きする
    pub fn merge_analysis(&mut self, attrs: &AnalysisAttributes) {
        if let Some(v) = &attrs.item_name {
            self.item_name = v.clone();
        }
        if let Some(v) = &attrs.condition {
            self.condition = v.clone();
        }
        if let Some(v) = &attrs.description {
            self.description = v.clone();
        }
        if let Some(v) = &attrs.price_range {
            self.price_range = v.clone();
        }
        self.category = attrs
            .category
            .as_deref()
            .map(Category::sanitize)
            .unwrap_or_default();
    }
}

/// ドラフトのフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    ItemName,
    Condition,
    Description,
    PriceRange,
    Category,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::ItemName,
        DraftField::Condition,
        DraftField::Description,
        DraftField::PriceRange,
        DraftField::Category,
    ];

    /// サービス応答上のキー名
    pub fn key(&self) -> &'static str {
        match self {
            DraftField::ItemName => "item_name",
            DraftField::Condition => "condition",
            DraftField::Description => "description",
            DraftField::PriceRange => "price_range",
            DraftField::Category => "category",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::ItemName => "Item Name",
            DraftField::Condition => "Condition",
            DraftField::Description => "Description",
            DraftField::PriceRange => "Price Range",
            DraftField::Category => "Category",
        }
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "item_name" | "name" => Ok(DraftField::ItemName),
            "condition" => Ok(DraftField::Condition),
            "description" => Ok(DraftField::Description),
            "price_range" | "price" => Ok(DraftField::PriceRange),
            "category" => Ok(DraftField::Category),
            _ => Err(format!(
                "Unknown field: {}. Use item_name, condition, description, price_range, or category",
                s
            )),
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// モデレーション応答
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    /// `true` 以外（欠落・null・文字列など）は不承認扱い
    #[serde(default, deserialize_with = "strict_true")]
    pub is_appropriate: bool,
}

/// 解析応答
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisAttributes {
    #[serde(deserialize_with = "lenient_text")]
    pub item_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub condition: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub price_range: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
}

fn strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// 文字列はそのまま、数値・真偽値は文字列化、null・配列・オブジェクトは無視
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}
