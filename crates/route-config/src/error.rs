//! Error types for configuration decoding.

use std::path::PathBuf;
use thiserror::Error;

use crate::version::{FormatVersion, VersionPolicy};

/// Errors that can occur while decoding a route manager configuration.
///
/// Every decode step returns one of these on failure; the first failure at
/// any depth aborts the whole document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not well-formed markup.
    #[error("malformed document: {0}")]
    Markup(#[from] roxmltree::Error),

    /// Failed to read a configuration file.
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The root element does not carry the expected tag.
    #[error("unknown root element <{found}> (expected <{expected}>)")]
    UnknownTag {
        /// Tag this decoder understands.
        expected: &'static str,
        /// Tag found in the document.
        found: String,
    },

    /// The document version is not accepted by the active policy.
    #[error("unsupported document version {found} (supported {supported}, {policy} policy)")]
    UnsupportedVersion {
        /// Version declared by the document.
        found: FormatVersion,
        /// Version compiled into this decoder.
        supported: FormatVersion,
        /// Policy used for the comparison.
        policy: VersionPolicy,
    },

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingRequiredAttribute {
        /// Tag of the element being decoded.
        element: &'static str,
        /// Name of the absent attribute.
        attribute: &'static str,
    },

    /// An attribute is present but does not parse.
    #[error("<{element}> attribute '{attribute}' has malformed value '{value}': {reason}")]
    MalformedValue {
        /// Tag of the element being decoded.
        element: &'static str,
        /// Name of the offending attribute.
        attribute: &'static str,
        /// Raw attribute text.
        value: String,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// A name was inserted twice into the same collection.
    #[error("duplicate <{element}> name '{name}'")]
    DuplicateName {
        /// Tag of the duplicated element.
        element: &'static str,
        /// The repeated name.
        name: String,
    },

    /// A textual reference does not name any element in scope.
    #[error("<{element}> '{name}' references unknown '{reference}'")]
    UnresolvedReference {
        /// Tag of the element holding the reference.
        element: &'static str,
        /// Name of the element holding the reference.
        name: String,
        /// The name that could not be resolved.
        reference: String,
    },
}

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Coarse status code handed to the HAL initialization path.
///
/// Callers use it to choose between aborting startup and falling back to an
/// empty configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The document holds a value that cannot be accepted.
    BadValue,
    /// A referenced name does not exist.
    NameNotFound,
    /// A name was declared twice.
    AlreadyExists,
    /// The document cannot be handled by this decoder at all.
    InvalidOperation,
    /// The document could not be obtained.
    NoInit,
}

impl Status {
    /// Returns the negative errno-style code used by the HAL.
    pub const fn code(self) -> i32 {
        match self {
            Status::BadValue => -22,
            Status::NameNotFound => -2,
            Status::AlreadyExists => -17,
            Status::InvalidOperation => -38,
            Status::NoInit => -19,
        }
    }

    /// Returns the symbolic name of the status.
    pub const fn name(self) -> &'static str {
        match self {
            Status::BadValue => "BAD_VALUE",
            Status::NameNotFound => "NAME_NOT_FOUND",
            Status::AlreadyExists => "ALREADY_EXISTS",
            Status::InvalidOperation => "INVALID_OPERATION",
            Status::NoInit => "NO_INIT",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a missing attribute error.
    pub fn missing(element: &'static str, attribute: &'static str) -> Self {
        ConfigError::MissingRequiredAttribute { element, attribute }
    }

    /// Create a malformed value error.
    pub fn malformed(
        element: &'static str,
        attribute: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::MalformedValue {
            element,
            attribute,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate name error.
    pub fn duplicate(element: &'static str, name: impl Into<String>) -> Self {
        ConfigError::DuplicateName {
            element,
            name: name.into(),
        }
    }

    /// Create an unresolved reference error.
    pub fn unresolved(
        element: &'static str,
        name: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        ConfigError::UnresolvedReference {
            element,
            name: name.into(),
            reference: reference.into(),
        }
    }

    /// Maps the error onto the status code reported upward.
    pub fn status(&self) -> Status {
        match self {
            ConfigError::ReadFile { .. } => Status::NoInit,
            ConfigError::UnknownTag { .. } | ConfigError::UnsupportedVersion { .. } => {
                Status::InvalidOperation
            }
            ConfigError::Markup(_)
            | ConfigError::MissingRequiredAttribute { .. }
            | ConfigError::MalformedValue { .. } => Status::BadValue,
            ConfigError::DuplicateName { .. } => Status::AlreadyExists,
            ConfigError::UnresolvedReference { .. } => Status::NameNotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    // --- factory methods ---

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/vendor/etc/a.xml", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/vendor/etc/a.xml"))
        );
    }

    #[test]
    fn unresolved_factory_keeps_all_names() {
        let err = ConfigError::unresolved("MixPort", "primary", "Speaker");
        assert!(matches!(
            err,
            ConfigError::UnresolvedReference { element: "MixPort", ref name, ref reference }
                if name == "primary" && reference == "Speaker"
        ));
    }

    // --- Display formatting ---

    #[test]
    fn missing_attribute_display() {
        let err = ConfigError::missing("DevicePort", "role");
        assert_eq!(
            err.to_string(),
            "<DevicePort> is missing required attribute 'role'"
        );
    }

    #[test]
    fn malformed_value_display() {
        let err = ConfigError::malformed("MixPort", "periodSize", "big", "expected an unsigned integer");
        assert_eq!(
            err.to_string(),
            "<MixPort> attribute 'periodSize' has malformed value 'big': expected an unsigned integer"
        );
    }

    #[test]
    fn duplicate_display() {
        let err = ConfigError::duplicate("DevicePort", "Earpiece");
        assert_eq!(err.to_string(), "duplicate <DevicePort> name 'Earpiece'");
    }

    #[test]
    fn unknown_tag_display() {
        let err = ConfigError::UnknownTag {
            expected: "RouteManagerConfiguration",
            found: "audioPolicyConfiguration".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("<audioPolicyConfiguration>"), "got: {msg}");
        assert!(msg.contains("<RouteManagerConfiguration>"), "got: {msg}");
    }

    // --- status mapping ---

    #[test]
    fn status_mapping() {
        assert_eq!(ConfigError::missing("Route", "sink").status(), Status::BadValue);
        assert_eq!(ConfigError::duplicate("Criterion", "a").status(), Status::AlreadyExists);
        assert_eq!(
            ConfigError::unresolved("Criterion", "a", "b").status(),
            Status::NameNotFound
        );
        assert_eq!(
            ConfigError::read_file("/x", mock_io_err()).status(),
            Status::NoInit
        );
    }

    #[test]
    fn status_display_includes_code() {
        assert_eq!(Status::BadValue.to_string(), "BAD_VALUE (-22)");
    }

    // --- Error::source() chain ---

    #[test]
    fn read_file_source_is_some() {
        let err = ConfigError::read_file("/x", mock_io_err());
        assert!(err.source().is_some(), "ReadFile must expose I/O source");
    }

    #[test]
    fn duplicate_source_is_none() {
        assert!(ConfigError::duplicate("Module", "m").source().is_none());
    }
}
