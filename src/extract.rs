//! Pulling a caption out of free-form model text.

use serde_json::Value;
use tracing::debug;

use crate::error::{CaptionError, ParseFailure, Result};
use crate::models::Caption;

/// Span from the first `{` to the last `}` (inclusive), if the text has one.
///
/// Prose around the object is dropped; nothing inside the span is inspected.
pub fn json_candidate(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extract, parse and validate the caption embedded in a model reply.
pub fn caption_from_reply(text: &str) -> Result<Caption> {
    let Some(candidate) = json_candidate(text) else {
        return Err(CaptionError::parse(ParseFailure::NoJson, text));
    };
    debug!(
        "Extracted JSON candidate ({} of {} bytes)",
        candidate.len(),
        text.len()
    );

    let document: Value = serde_json::from_str(candidate)
        .map_err(|e| CaptionError::parse(ParseFailure::MalformedJson(e.to_string()), text))?;

    Caption::from_document(&document)
        .map_err(|e| CaptionError::parse(ParseFailure::Schema(e), text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CAPTION: &str = r#"{
        "product_name": "Red Canvas Sneakers",
        "description": "Low-top canvas sneakers with white rubber soles.",
        "attributes": [{"name": "Color", "value": "Red", "confidence": 0.9}],
        "user_needs": ["casual weekend"],
        "cross_sell_products": []
    }"#;

    #[test]
    fn candidate_drops_surrounding_prose() {
        let text = r#"Sure! Here you go: {"a":1} Hope that helps"#;
        assert_eq!(json_candidate(text), Some(r#"{"a":1}"#));
    }

    #[test]
    fn candidate_spans_first_open_to_last_close() {
        let text = r#"{"a":{"b":2}} trailing } brace"#;
        assert_eq!(json_candidate(text), Some(r#"{"a":{"b":2}} trailing }"#));
    }

    #[test]
    fn candidate_requires_open_brace() {
        assert_eq!(json_candidate("no object here }"), None);
        assert_eq!(json_candidate(""), None);
    }

    #[test]
    fn candidate_requires_close_after_open() {
        assert_eq!(json_candidate("} then {"), None);
        assert_eq!(json_candidate("{ never closed"), None);
    }

    #[test]
    fn reply_without_braces_is_no_json() {
        let err = caption_from_reply("I could not analyse this image.").unwrap_err();
        match err {
            CaptionError::Parse { reason, response } => {
                assert!(matches!(reason, ParseFailure::NoJson));
                assert_eq!(response, "I could not analyse this image.");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_candidate_is_reported_with_raw_text() {
        let text = "Result: {product_name: 'unquoted'}";
        let err = caption_from_reply(text).unwrap_err();
        assert!(matches!(
            err,
            CaptionError::Parse {
                reason: ParseFailure::MalformedJson(_),
                ..
            }
        ));
        assert_eq!(err.raw_response(), Some(text));
    }

    #[test]
    fn schema_mismatch_is_a_parse_error() {
        let text = r#"```json
{"product_name": "Lamp", "description": "Desk lamp"}
```"#;
        let err = caption_from_reply(text).unwrap_err();
        match err {
            CaptionError::Parse {
                reason: ParseFailure::Schema(schema),
                response,
            } => {
                assert_eq!(schema.path(), "");
                assert_eq!(response, text);
            }
            other => panic!("expected schema failure, got {other:?}"),
        }
    }

    #[test]
    fn fenced_reply_yields_caption() {
        let text = format!("Here is the analysis:\n```json\n{VALID_CAPTION}\n```\nLet me know!");
        let caption = caption_from_reply(&text).unwrap();
        assert_eq!(caption.product_name, "Red Canvas Sneakers");
        assert_eq!(caption.user_needs, vec!["casual weekend".to_string()]);
    }
}
