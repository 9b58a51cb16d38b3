use serde::{Deserialize, Serialize};

/// Structured body the catalog API attaches to non-success responses. Either
/// field may be absent; older endpoints populate `error` instead of `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    /// User-facing text, preferring `message` over the legacy `error` field.
    pub fn user_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_over_error_field() {
        let body = ErrorBody {
            message: Some("visa already exists".to_string()),
            error: Some("conflict".to_string()),
        };
        assert_eq!(body.user_message(), Some("visa already exists"));
    }

    #[test]
    fn falls_back_to_error_field() {
        let body = ErrorBody {
            message: None,
            error: Some("conflict".to_string()),
        };
        assert_eq!(body.user_message(), Some("conflict"));
    }

    #[test]
    fn tolerates_empty_bodies() {
        let body: ErrorBody = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(body.user_message(), None);
    }
}
