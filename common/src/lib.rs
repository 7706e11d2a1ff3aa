//! Item AI Common Library
//!
//! CLIとフォーム状態機械で共有される型とユーティリティ

pub mod types;
pub mod category;
pub mod error;
pub mod parser;

pub use types::{AnalysisAttributes, DraftField, ItemDraft, ModerationVerdict};
pub use category::{Category, CATEGORIES};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_analysis_response, parse_moderation_response};
