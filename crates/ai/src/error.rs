//! Error types for note generation.

use thiserror::Error;

/// Failure of a single generation call.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API key is not set")]
    MissingCredential,

    #[error("request failed: {0}")]
    Http(String),

    #[error("service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("service returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GenerationError::InvalidResponse(e.to_string())
        } else {
            GenerationError::Http(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GenerationError::MissingCredential.to_string(),
            "API key is not set"
        );
        let api = GenerationError::Api {
            status: 429,
            body: "quota".to_string(),
        };
        assert_eq!(api.to_string(), "service returned HTTP 429: quota");
    }
}
