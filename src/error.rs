#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A bare-string status named a variant that carries a payload.
    #[error("status '{name}' had no body")]
    UnsupportedBareVariant { name: String },

    #[error("status object contains invalid amount of keys (expected: 1, got: {key_count})")]
    InvalidVariantObjectShape { key_count: usize },

    #[error("unknown status variant '{name}'")]
    UnknownVariant { name: String },

    /// Valid JSON, but not the shape the variant or field requires.
    #[error("invalid payload for '{field}': {reason}")]
    Payload {
        field: &'static str,
        reason: String,
    },

    #[error("invalid hash: {reason}")]
    InvalidHash { reason: String },

    #[error("invalid balance: {reason}")]
    InvalidBalance { reason: String },

    #[error("rpc error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        cause: Option<String>,
        data: Option<serde_json::Value>,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the permanent decode failures raised by the status codecs.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedBareVariant { .. }
                | Self::InvalidVariantObjectShape { .. }
                | Self::UnknownVariant { .. }
                | Self::Payload { .. }
                | Self::Json(_)
        )
    }
}
