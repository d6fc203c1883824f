/// Reasons a raw product, or the response wrapping it, failed to decode.
///
/// Every variant carries a human-readable reason suitable for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The inspected value is not the expected container kind.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required key on a product is absent.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A required key along a nested path in the response is absent.
    #[error("Missing path: {0}")]
    MissingPath(String),

    /// A key is present but holds a value of the wrong type.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FreeGamesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status: {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, FreeGamesError>;
