use thiserror::Error;

/// Top-level error type for the artdx workspace.
///
/// Subsystem crates define their own error types and convert into this one
/// where they cross into configuration or I/O territory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArtdxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Attachment error: {0}")]
    Attachment(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl From<toml::de::Error> for ArtdxError {
    fn from(err: toml::de::Error) -> Self {
        ArtdxError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ArtdxError {
    fn from(err: toml::ser::Error) -> Self {
        ArtdxError::Config(err.to_string())
    }
}

/// A specialized `Result` type for artdx operations.
pub type Result<T> = std::result::Result<T, ArtdxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArtdxError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = ArtdxError::MissingCredential("GOOGLE_API_KEY".to_string());
        assert_eq!(err.to_string(), "Missing credential: GOOGLE_API_KEY");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ArtdxError = io_err.into();
        assert!(matches!(err, ArtdxError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: ArtdxError = parse_err.into();
        assert!(matches!(err, ArtdxError::Config(_)));
    }
}
