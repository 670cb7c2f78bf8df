//! Best-effort extraction of the audit JSON from free-text model output.
//!
//! Two stages: strip markdown code fences, then take everything from the
//! first `{` to the last `}`. This is a heuristic, not a parser: prose that
//! itself contains a `{` before the real object will break it, and that case
//! surfaces as `MalformedResponse` instead of being repaired.

use tracing::error;

use super::types::AuditData;
use crate::error::AuditError;

/// Raw text is truncated to this many characters in log output.
const LOG_PREVIEW_CHARS: usize = 500;

/// Remove markdown code fence markers (```` ```json ```` and ```` ``` ````),
/// wherever they appear in the text.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Locate the outermost brace pair and return it, braces included.
pub fn locate_json_object(text: &str) -> Result<&str, AuditError> {
    let start = text.find('{');
    let end = text.rfind('}');

    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(AuditError::malformed(text)),
    }
}

/// Run both extraction stages and return the JSON candidate.
pub fn extract_json_candidate(text: &str) -> Result<String, AuditError> {
    let stripped = strip_code_fences(text);
    locate_json_object(&stripped).map(str::to_string)
}

/// Extract and deserialize the audit from a model response.
pub fn parse_audit_data(text: &str) -> Result<AuditData, AuditError> {
    if text.trim().is_empty() {
        error!("Audit response contained no text");
        return Err(AuditError::malformed(text));
    }

    let candidate = extract_json_candidate(text).map_err(|e| {
        error!(
            "No JSON object found in audit response. Raw response (first {} chars): {}",
            LOG_PREVIEW_CHARS,
            preview(text)
        );
        e
    })?;

    serde_json::from_str::<AuditData>(&candidate).map_err(|e| {
        error!(
            "Failed to parse audit JSON: {}. Candidate (first {} chars): {}",
            e,
            LOG_PREVIEW_CHARS,
            preview(&candidate)
        );
        AuditError::malformed(text)
    })
}

fn preview(text: &str) -> String {
    if text.chars().count() > LOG_PREVIEW_CHARS {
        let truncated: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_AUDIT: &str = r#"{
        "domain": "example.com",
        "overallScore": 62,
        "executiveSummary": ["A", "B", "C"],
        "sections": []
    }"#;

    #[test]
    fn test_extracts_object_between_fence_and_prose() {
        let text = "prefix ```json {\"a\":1} ``` suffix";
        let candidate = extract_json_candidate(text).unwrap();
        assert_eq!(candidate, "{\"a\":1}");
        let value: serde_json::Value = serde_json::from_str(&candidate).unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_no_braces_is_malformed() {
        let result = extract_json_candidate("Leider konnte ich die Seite nicht analysieren.");
        assert!(matches!(result, Err(AuditError::MalformedResponse { .. })));
    }

    #[test]
    fn test_closing_brace_before_opening_is_malformed() {
        let result = extract_json_candidate("} nothing here {");
        assert!(matches!(result, Err(AuditError::MalformedResponse { .. })));
    }

    #[test]
    fn test_fence_with_newline_is_stripped() {
        let text = format!("```json\n{}\n```", MINIMAL_AUDIT);
        let data = parse_audit_data(&text).unwrap();
        assert_eq!(data.domain, "example.com");
        assert_eq!(data.overall_score, 62);
        assert_eq!(data.executive_summary.len(), 3);
    }

    #[test]
    fn test_nested_objects_keep_outermost_pair() {
        let text = format!("Hier ist der Audit:\n{}\nViel Erfolg!", MINIMAL_AUDIT);
        let candidate = extract_json_candidate(&text).unwrap();
        assert!(candidate.starts_with('{'));
        assert!(candidate.ends_with('}'));
        assert!(parse_audit_data(&text).is_ok());
    }

    #[test]
    fn test_braces_in_leading_prose_misfire() {
        // Known limitation of the heuristic.
        let text = format!("Format {{siehe unten}}: {}", MINIMAL_AUDIT);
        let result = parse_audit_data(&text);
        assert!(matches!(result, Err(AuditError::MalformedResponse { .. })));
    }

    #[test]
    fn test_empty_text_is_malformed() {
        assert!(matches!(
            parse_audit_data("   "),
            Err(AuditError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_wrong_shape_is_malformed_and_keeps_raw() {
        let text = r#"{"domain": "example.com"}"#;
        match parse_audit_data(text) {
            Err(AuditError::MalformedResponse { raw }) => assert_eq!(raw, text),
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "ä".repeat(LOG_PREVIEW_CHARS + 10);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), LOG_PREVIEW_CHARS + 3);
    }
}
