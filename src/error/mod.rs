use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for strfilter
///
/// Filters fail in two distinct ways. `Validation` means the input value broke
/// a content or type rule and the caller should reject that one record.
/// `InvalidConfiguration` means the filter itself was set up wrong (negative
/// bounds, empty delimiter, unknown filter name) and no input can pass.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration file error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Error with context chain
    #[error("{message}: {source}")]
    WithContext {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    // Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            message: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any context wrappers
    pub fn root(&self) -> &Error {
        match self {
            Error::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the input value was rejected
    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Error::Validation(_))
    }

    /// True when the filter setup is at fault rather than the input
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self.root(), Error::InvalidConfiguration(_))
    }

    /// Get a stable error code for reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "E_VALIDATION",
            Error::InvalidConfiguration(_) => "E_INVALID_CONFIG",
            Error::Config(_) => "E_CONFIG",
            Error::Io(_) => "E_IO",
            Error::WithContext { source, .. } => source.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::validation("x").error_code(), "E_VALIDATION");
        assert_eq!(
            Error::invalid_configuration("x").error_code(),
            "E_INVALID_CONFIG"
        );
        assert_eq!(Error::config("x").error_code(), "E_CONFIG");
    }

    #[test]
    fn test_context_is_transparent_to_kind() {
        let err = Error::validation("Value 42 is not a string").with_context("preset 'username'");

        assert!(err.is_validation());
        assert!(!err.is_invalid_configuration());
        assert_eq!(err.error_code(), "E_VALIDATION");
        assert_eq!(
            err.to_string(),
            "preset 'username': Validation error: Value 42 is not a string"
        );
    }

    #[test]
    fn test_root_of_nested_context() {
        let err = Error::invalid_configuration("delimiter must not be empty")
            .with_context("inner")
            .with_context("outer");

        assert!(matches!(err.root(), Error::InvalidConfiguration(_)));
        assert!(err.is_invalid_configuration());
    }
}
