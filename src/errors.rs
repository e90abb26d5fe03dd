use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No query results for model [{model}].")]
    NotFound { model: String },

    #[error("Malformed resource: {0}")]
    MalformedResource(String),

    #[error("Missing field in response: {0}")]
    MissingField(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl SdkError {
    pub fn not_found(model: impl Into<String>) -> Self {
        Self::NotFound { model: model.into() }
    }

    /// Model name carried by a `NotFound` error.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::NotFound { model } => Some(model),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SdkError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
