use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeploymentError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Property decoding error: {0}")]
    PropertyDecode(#[from] serde_json::Error),

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Manifest parse error: {message}")]
    ManifestError { message: String },

    #[error("Logger initialization failed: {message}")]
    LoggerError { message: String },
}

pub type Result<T> = std::result::Result<T, DeploymentError>;
