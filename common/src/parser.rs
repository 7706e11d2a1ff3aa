//! APIレスポンスパーサー
//!
//! モデレーション/解析エンドポイントの応答本文からJSONオブジェクトを抽出してパースする

use crate::error::{Error, Result};
use crate::types::{AnalysisAttributes, ModerationVerdict};

/// レスポンス本文からJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use item_ai_common::extract_json;
///
/// let body = "result: {\"is_appropriate\": true}";
/// let json = extract_json(body).unwrap();
/// assert_eq!(json, "{\"is_appropriate\": true}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// モデレーション応答をパース
pub fn parse_moderation_response(response: &str) -> Result<ModerationVerdict> {
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("モデレーション JSONパースエラー: {}", e)))
}

/// 解析応答をパース
pub fn parse_analysis_response(response: &str) -> Result<AnalysisAttributes> {
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("解析 JSONパースエラー: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // extract_json テスト
    // =============================================

    #[test]
    fn test_extract_json_raw() {
        let response = r#"{"is_appropriate": false}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn test_extract_json_with_block() {
        let response = r#"Here you go:
```json
{"item_name": "Kettle", "category": "Kitchen Appliances"}
```
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("Kettle"));
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"analysis: {"item_name": "Drill"} done"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"item_name": "Drill"}"#);
    }

    #[test]
    fn test_extract_json_error() {
        let result = extract_json("Internal Server Error");
        assert!(result.is_err());
        if let Err(Error::Parse(msg)) = result {
            assert!(msg.contains("JSONが見つかりません"));
        } else {
            panic!("Expected Parse error");
        }
    }

    #[test]
    fn test_extract_json_empty_response() {
        assert!(extract_json("").is_err());
    }

    // =============================================
    // parse_*_response テスト
    // =============================================

    #[test]
    fn test_parse_moderation_response() {
        let verdict = parse_moderation_response(r#"{"is_appropriate": true}"#).unwrap();
        assert!(verdict.is_appropriate);

        let verdict = parse_moderation_response(r#"{"is_appropriate": false, "reason": "nsfw"}"#).unwrap();
        assert!(!verdict.is_appropriate);
    }

    #[test]
    fn test_parse_moderation_response_not_object() {
        let result = parse_moderation_response("true");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_analysis_response() {
        let response = r#"{
            "item_name": "Snowboard",
            "condition": "Like new",
            "description": "154cm all-mountain board",
            "price_range": "$150-$200",
            "category": "Winter Equipment"
        }"#;
        let attrs = parse_analysis_response(response).unwrap();
        assert_eq!(attrs.item_name.as_deref(), Some("Snowboard"));
        assert_eq!(attrs.condition.as_deref(), Some("Like new"));
        assert_eq!(attrs.price_range.as_deref(), Some("$150-$200"));
        assert_eq!(attrs.category.as_deref(), Some("Winter Equipment"));
    }

    #[test]
    fn test_parse_analysis_response_broken_json() {
        let result = parse_analysis_response(r#"{"item_name": }"#);
        if let Err(Error::Parse(msg)) = result {
            assert!(msg.contains("解析 JSONパースエラー"));
        } else {
            panic!("Expected Parse error");
        }
    }
}
