//! Error handling for interactive pipelines.
//!
//! Every failure in the crate is reported as an [`InteractiveError`]. Errors are
//! `Clone` because a node keeps the failure of its introspection snapshot and
//! hands it out again each time the value is requested.

use thiserror::Error;

/// Result type for interactive pipeline operations.
pub type InteractiveResult<T> = Result<T, InteractiveError>;

/// Error type for building and evaluating interactive pipelines.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InteractiveError {
    /// The pipeline cannot be built from the given source or settings
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        config_key: Option<String>,
        suggested_fix: Option<String>,
    },

    /// A call received an argument it cannot accept
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
        argument: Option<String>,
    },

    /// Neither the wrapper nor the wrapped value has the requested member
    #[error("'{type_name}' object has no attribute '{name}'")]
    AttributeNotFound { name: String, type_name: String },

    /// The node has no pending method to call
    #[error("Object is not callable: {message}")]
    NotCallable { message: String },

    /// A data operation failed while applying a transform
    #[error("Evaluation failed in '{operation}': {message}")]
    Evaluation { message: String, operation: String },

    /// The plot kind is not in the kind table
    #[error("Plot kind '{kind}' is not supported for {data_type}")]
    UnsupportedKind { kind: String, data_type: String },

    /// Reading a configuration file failed
    #[error("IO error: {message}")]
    Io { message: String },

    /// Parsing or emitting a serialized document failed
    #[error("Serialization error: {message}")]
    Serialization { message: String, data_type: String },
}

impl InteractiveError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            config_key: None,
            suggested_fix: None,
        }
    }

    /// Creates a configuration error tied to a configuration key.
    pub fn configuration_with_key(
        message: impl Into<String>,
        config_key: impl Into<String>,
        suggested_fix: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            config_key: Some(config_key.into()),
            suggested_fix: Some(suggested_fix.into()),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            argument: None,
        }
    }

    /// Creates an invalid argument error naming the offending argument.
    pub fn invalid_argument_named(message: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            argument: Some(argument.into()),
        }
    }

    /// Creates an attribute not found error.
    pub fn attribute_not_found(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Creates a not callable error.
    pub fn not_callable(message: impl Into<String>) -> Self {
        Self::NotCallable {
            message: message.into(),
        }
    }

    /// Creates an evaluation error.
    pub fn evaluation(message: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
            operation: operation.into(),
        }
    }

    /// Creates an unsupported plot kind error.
    pub fn unsupported_kind(kind: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::UnsupportedKind {
            kind: kind.into(),
            data_type: data_type.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
            data_type: data_type.into(),
        }
    }

    /// Returns true when the error was raised by a data operation.
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Self::Evaluation { .. })
    }
}

impl From<std::io::Error> for InteractiveError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for InteractiveError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string(), "json")
    }
}

impl From<toml::de::Error> for InteractiveError {
    fn from(error: toml::de::Error) -> Self {
        Self::serialization(error.to_string(), "toml")
    }
}

impl From<toml::ser::Error> for InteractiveError {
    fn from(error: toml::ser::Error) -> Self {
        Self::serialization(error.to_string(), "toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_not_found_message() {
        let err = InteractiveError::attribute_not_found("foo", "Frame");
        assert_eq!(err.to_string(), "'Frame' object has no attribute 'foo'");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: InteractiveError = io.into();
        assert!(matches!(err, InteractiveError::Io { .. }));
        assert!(!err.is_evaluation());
    }
}
