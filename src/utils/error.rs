use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Config file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },
}

impl ShopError {
    /// Message for a user-facing notification. Server-reported errors
    /// surface the message the server sent, verbatim.
    pub fn notification(&self) -> String {
        match self {
            ShopError::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
