use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Embedded data file not found: {0}")]
    DataMissing(String),

    #[error("Embedded data file {file} is invalid: {message}")]
    DataInvalid { file: String, message: String },

    #[error("Invalid secret word {word:?}: only the letters a-z are allowed")]
    InvalidWord { word: String },

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    pub fn data_invalid(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataInvalid {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn log_setup_error(message: impl Into<String>) -> Self {
        Self::LogSetup(message.into())
    }
}
