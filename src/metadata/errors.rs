//! Custom error types for metadata processing

use std::fmt;
use std::io;

/// Metadata-specific error types
#[derive(Debug)]
pub enum MetaError {
    /// I/O error
    IoError(io::Error),
    /// Malformed XML or a failure while serializing it
    XmlError(String),
    /// Required element not found
    ElementNotFound(String),
    /// Required attribute missing on an element
    AttributeNotFound { element: String, attribute: String },
    /// Invalid or incomplete configuration
    ConfigError(String),
    /// Catalog (table/column listing) could not be read
    CatalogError(String),
    /// Invalid argument supplied by the caller
    InvalidArgument(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaError::IoError(e) => write!(f, "I/O error: {}", e),
            MetaError::XmlError(msg) => write!(f, "XML error: {}", msg),
            MetaError::ElementNotFound(path) => write!(f, "Element not found: {}", path),
            MetaError::AttributeNotFound { element, attribute } => {
                write!(f, "Attribute '{}' not found on <{}>", attribute, element)
            }
            MetaError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MetaError::CatalogError(msg) => write!(f, "Catalog error: {}", msg),
            MetaError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            MetaError::GenericError(msg) => write!(f, "Metadata error: {}", msg),
        }
    }
}

impl std::error::Error for MetaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetaError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MetaError {
    fn from(error: io::Error) -> Self {
        MetaError::IoError(error)
    }
}

impl From<toml::de::Error> for MetaError {
    fn from(error: toml::de::Error) -> Self {
        MetaError::ConfigError(error.to_string())
    }
}

impl From<serde_json::Error> for MetaError {
    fn from(error: serde_json::Error) -> Self {
        MetaError::ConfigError(format!("invalid JSON: {}", error))
    }
}

impl From<quick_xml::Error> for MetaError {
    fn from(error: quick_xml::Error) -> Self {
        MetaError::XmlError(error.to_string())
    }
}

/// Result type for metadata operations
pub type MetaResult<T> = Result<T, MetaError>;

impl From<String> for MetaError {
    fn from(msg: String) -> Self {
        MetaError::GenericError(msg)
    }
}
