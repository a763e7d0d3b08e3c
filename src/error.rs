use thiserror::Error;

/// Status code the nutrition endpoint uses for recipes it cannot analyze
pub const INSUFFICIENT_QUALITY_STATUS: u16 = 555;

/// User-facing text for [`FinderError::InsufficientQuality`]
pub const INSUFFICIENT_QUALITY_MESSAGE: &str =
    "Recipe with insufficient quality to process correctly.";

/// Errors that can occur while talking to the recipe and nutrition API
#[derive(Error, Debug)]
pub enum FinderError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    /// The provider could not process the submitted recipe (status 555).
    /// Raised from the status code alone, never from error text.
    #[error("HTTP error! status: 555")]
    InsufficientQuality,

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Only one half of the credential pair is configured
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read local input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FinderError {
    /// Classify a non-success status returned by the provider.
    ///
    /// Only the numeric status decides: a body or message that merely
    /// contains "555" is a plain [`FinderError::Status`].
    pub fn from_status(status: u16, body: String) -> Self {
        if status == INSUFFICIENT_QUALITY_STATUS {
            FinderError::InsufficientQuality
        } else {
            FinderError::Status { status, body }
        }
    }

    /// Status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            FinderError::Status { status, .. } => Some(*status),
            FinderError::InsufficientQuality => Some(INSUFFICIENT_QUALITY_STATUS),
            FinderError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The single string shown to the user when an analysis fails
    pub fn user_message(&self) -> String {
        match self {
            FinderError::InsufficientQuality => INSUFFICIENT_QUALITY_MESSAGE.to_string(),
            other => format!("Failed to analyze recipe: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_555_is_insufficient_quality() {
        let err = FinderError::from_status(555, "whatever".to_string());
        assert!(matches!(err, FinderError::InsufficientQuality));
        assert_eq!(err.user_message(), INSUFFICIENT_QUALITY_MESSAGE);
        assert_eq!(err.status(), Some(555));
    }

    #[test]
    fn test_other_status_keeps_code() {
        let err = FinderError::from_status(500, String::new());
        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.user_message(),
            "Failed to analyze recipe: HTTP error! status: 500"
        );
    }

    #[test]
    fn test_body_mentioning_555_is_not_misclassified() {
        let err = FinderError::from_status(502, "upstream 555 gateway".to_string());
        assert!(matches!(err, FinderError::Status { status: 502, .. }));
        assert!(err.user_message().contains("502"));
        assert_ne!(err.user_message(), INSUFFICIENT_QUALITY_MESSAGE);
    }

    #[test]
    fn test_decode_error_message() {
        let decode = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = FinderError::from(decode);
        assert!(err.user_message().starts_with("Failed to analyze recipe: "));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_input_errors_use_generic_prefix() {
        let err = FinderError::InvalidInput("unknown diet 'keto'".to_string());
        assert_eq!(
            err.user_message(),
            "Failed to analyze recipe: Invalid input: unknown diet 'keto'"
        );
    }
}
