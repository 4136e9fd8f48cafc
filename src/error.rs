//! Error types for spark-layout.
//!
//! Two layers:
//! - [`ConfigError`]: a configuration object or setter argument violates an
//!   invariant of the data model. Raised synchronously, before anything is
//!   committed.
//! - [`LayoutError`]: everything a tree operation or geometry read can fail
//!   with, including wrapped configuration errors.
//!
//! Looking up or removing an absent child key is deliberately not an error.

use thiserror::Error;

use crate::types::Axis;

/// Result type alias for tree operations and geometry reads.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// A configuration value failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The root needs literal pixel anchors to bottom out resolution.
    #[error("root node requires an explicit numeric `{axis}` anchor")]
    RootAnchor { axis: Axis },

    #[error("invalid {field} keyword `{value}`")]
    InvalidKeyword { field: &'static str, value: String },

    #[error("invalid {bound} constraint on the {axis} axis: {reason}")]
    InvalidConstraint {
        axis: Axis,
        bound: &'static str,
        reason: String,
    },

    #[error("fraction {value}/{base} requires base > 0 and base >= value")]
    InvalidFraction { value: f32, base: f32 },

    #[error("content declares more than one type tag (`{first}` and `{second}`)")]
    DuplicateContentTag {
        first: &'static str,
        second: &'static str,
    },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// Both size vocabularies were used for the same axis.
    #[error("the {axis} axis is sized by both `area` and `sizing`")]
    ConflictingSize { axis: Axis },

    #[error("malformed configuration: {0}")]
    Malformed(String),

    /// A nested child failed validation.
    #[error("in child `{key}`: {source}")]
    Child {
        key: String,
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// The innermost error, unwrapping nested child context.
    pub fn root_cause(&self) -> &ConfigError {
        let mut error = self;
        while let ConfigError::Child { source, .. } = error {
            error = source;
        }
        error
    }

    pub(crate) fn in_child(self, key: &str) -> Self {
        ConfigError::Child {
            key: key.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}

/// Top-level error for tree operations and geometry reads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A percent or fill size had no parent pixel size to resolve against.
    #[error("no parent dimension to resolve the {axis} axis against")]
    MissingParentDimension { axis: Axis },

    #[error("child key `{key}` already exists")]
    DuplicateChildKey { key: String },

    /// The handle's node was removed from the committed tree.
    #[error("no node at path `{path}`")]
    NodeNotFound { path: String },
}

impl LayoutError {
    pub(crate) fn not_found(path: &[String]) -> Self {
        LayoutError::NodeNotFound {
            path: format!("/{}", path.join("/")),
        }
    }
}
