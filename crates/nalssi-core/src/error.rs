//! Shared error types for the Nalssi application.

use thiserror::Error;

/// Configuration errors.
///
/// A missing service key is fatal: there is no fallback that can synthesize
/// a credential, so callers surface this immediately instead of degrading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::MissingSetting(_) => "API 키가 설정되지 않았습니다.",
            ConfigError::Invalid(_) => "설정이 올바르지 않습니다.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_setting_message() {
        let err = ConfigError::MissingSetting("OPENAPI_KEY".to_string());
        assert!(err.to_string().contains("OPENAPI_KEY"));
        assert!(err.user_message().contains("API 키"));
    }
}
