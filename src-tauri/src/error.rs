use thiserror::Error;

/// User-facing message for responses that do not contain a usable audit.
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "Die KI-Antwort konnte nicht als gültiges JSON verarbeitet werden.";

#[derive(Debug, Error)]
pub enum AuditError {
    /// Missing credential or unusable settings. Raised before any network call.
    #[error("{0}")]
    Configuration(String),

    #[error("Ungültige Anfrage: {0}")]
    InvalidRequest(String),

    /// Network or service failure; the message is shown to the user as-is.
    #[error("{0}")]
    Transport(String),

    /// The service answered, but no audit JSON could be extracted or parsed.
    /// `raw` is kept for logging only.
    #[error("{}", MALFORMED_RESPONSE_MESSAGE)]
    MalformedResponse { raw: String },

    #[error("Worksheet export failed: {0}")]
    Export(String),
}

impl AuditError {
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::MalformedResponse { raw: raw.into() }
    }
}

impl From<AuditError> for String {
    fn from(err: AuditError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_response_hides_raw_text() {
        let err = AuditError::malformed("Here is your audit: {broken");
        let msg: String = err.into();
        assert_eq!(msg, MALFORMED_RESPONSE_MESSAGE);
        assert!(!msg.contains("broken"));
    }

    #[test]
    fn test_transport_message_passes_through() {
        let err = AuditError::Transport("LLM API error: 503 from gemini".to_string());
        assert_eq!(err.to_string(), "LLM API error: 503 from gemini");
    }
}
