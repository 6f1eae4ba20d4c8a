use std::fmt;

pub type Result<T> = std::result::Result<T, ContextError>;

// JSON parse errors are always problems with the payload we were handed.
impl From<serde_json::Error> for ContextError {
    fn from(err: serde_json::Error) -> ContextError {
        ContextError::BadDocument(ErrorDetails {
            layer: ErrorLayer::DataLayer,
            message: err.to_string(),
        })
    }
}

impl From<toml::de::Error> for ContextError {
    fn from(err: toml::de::Error) -> ContextError {
        ContextError::BadConfig(ErrorDetails {
            layer: ErrorLayer::ConfigLayer,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ContextError {
    fn from(err: std::io::Error) -> ContextError {
        ContextError::Io(ErrorDetails {
            layer: ErrorLayer::IoLayer,
            message: err.to_string(),
        })
    }
}

/// Where the problem originated.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorLayer {
    /// The configuration handed to the resolver could not be parsed or holds
    /// values outside their allowed range.
    ConfigLayer,
    /// A record coming back from the search index did not have the shape we
    /// need, like a bare string where an object was expected.
    ///
    /// Note that most data problems are not errors at all: the derive
    /// operations degrade instead of failing.  This layer is only used when
    /// there is nothing sensible to degrade to.
    DataLayer,
    /// Reading a config file from disk failed.
    IoLayer,
}

/// Payload describing what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub layer: ErrorLayer,
    /// Stringified version of the lower level error.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContextError {
    BadConfig(ErrorDetails),
    BadDocument(ErrorDetails),
    Io(ErrorDetails),
}

impl ContextError {
    pub fn bad_config(message: impl Into<String>) -> ContextError {
        ContextError::BadConfig(ErrorDetails {
            layer: ErrorLayer::ConfigLayer,
            message: message.into(),
        })
    }

    pub fn bad_document(message: impl Into<String>) -> ContextError {
        ContextError::BadDocument(ErrorDetails {
            layer: ErrorLayer::DataLayer,
            message: message.into(),
        })
    }

    pub fn details(&self) -> &ErrorDetails {
        match self {
            ContextError::BadConfig(details)
            | ContextError::BadDocument(details)
            | ContextError::Io(details) => details,
        }
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::BadConfig(details) => write!(f, "bad config: {}", details.message),
            ContextError::BadDocument(details) => {
                write!(f, "bad document: {}", details.message)
            }
            ContextError::Io(details) => write!(f, "io error: {}", details.message),
        }
    }
}

impl std::error::Error for ContextError {}

#[test]
fn test_json_errors_are_data_layer() {
    let err: ContextError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert_eq!(err.details().layer, ErrorLayer::DataLayer);
    assert!(err.to_string().starts_with("bad document: "), "{}", err);
}
