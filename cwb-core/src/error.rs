use thiserror::Error;

/// Message shown when the API answers with `success: false`.
pub const API_UNSTABLE_MESSAGE: &str = "氣象局api連線不穩請稍後再試";

/// Everything that can end a load without rows.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{}", API_UNSTABLE_MESSAGE)]
    ApiUnstable,

    #[error("observation response has no records.location list")]
    MissingRecords,

    #[error("observation request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("observation request failed: {0}")]
    Transport(String),

    #[error("failed to decode observation response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_unstable_displays_fixed_message() {
        assert_eq!(FetchError::ApiUnstable.to_string(), "氣象局api連線不穩請稍後再試");
    }

    #[test]
    fn decode_error_keeps_serde_message() {
        let err: FetchError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("failed to decode observation response"));
    }
}
