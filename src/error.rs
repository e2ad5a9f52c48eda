use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Calendar retrieval error: {0}")]
    #[diagnostic(code(covergen::retrieval))]
    Retrieval(String),

    #[error("Malformed calendar event: {0}")]
    #[diagnostic(code(covergen::malformed_event))]
    MalformedEvent(String),

    #[error("Rendering resource error: {0}")]
    #[diagnostic(code(covergen::resource))]
    Resource(String),

    #[error("Persistence error: {0}")]
    #[diagnostic(code(covergen::persistence))]
    Persistence(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(covergen::config))]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Retrieval(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Resource(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type CoverResult<T> = Result<T, Error>;

/// Helper to create retrieval errors
pub fn retrieval_error(message: &str) -> Error {
    Error::Retrieval(message.to_string())
}

/// Helper to create malformed event errors
pub fn malformed_event_error(message: &str) -> Error {
    Error::MalformedEvent(message.to_string())
}

/// Helper to create resource errors
pub fn resource_error(message: &str) -> Error {
    Error::Resource(message.to_string())
}

/// Helper to create persistence errors
pub fn persistence_error(message: &str) -> Error {
    Error::Persistence(message.to_string())
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}
