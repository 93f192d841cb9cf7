//! Error types for deep copy operations

use std::fmt;

use thiserror::Error;

use crate::value::Kind;

/// Position of a failing element inside a sequence or map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Index into an array or slice
    Index(usize),
    /// Debug rendering of a map key
    Key(String),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Index(i) => write!(f, "index {}", i),
            Element::Key(k) => write!(f, "key {}", k),
        }
    }
}

/// Which argument precondition a call violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// An argument is not a reference
    NotReference,
    /// An argument is a nil reference
    NilReference,
    /// Source and destination have different types
    TypeMismatch,
    /// The references do not point at records
    NotRecord,
    /// Insert into a nil map
    NilMap,
    /// Map key of a type that cannot be compared
    NotComparable,
}

/// Main error type for deep copy operations
#[derive(Error, Debug)]
pub enum CopyError {
    /// The value's kind has no copier (channels, functions, raw pointers)
    #[error("unable to deep copy value of type {type_name}: kind {kind} is not supported")]
    UnsupportedKind {
        /// Offending kind
        kind: Kind,
        /// Offending type
        type_name: String,
    },

    /// An array, slice or map element failed to copy
    #[error("failed to copy {container} element at {element}: {source}")]
    ElementCopyFailed {
        /// Which element
        element: Element,
        /// Type of the containing sequence or map
        container: String,
        /// Underlying failure
        source: Box<CopyError>,
    },

    /// A record field failed to copy
    #[error("failed to copy field `{field}` of {record}: {source}")]
    FieldCopyFailed {
        /// Field name
        field: String,
        /// Record type name
        record: String,
        /// Underlying failure
        source: Box<CopyError>,
    },

    /// A public entry point was called with bad arguments
    #[error("invalid argument: {detail}")]
    InvalidArgument {
        /// Which precondition failed
        reason: Precondition,
        /// Description including the offending values
        detail: String,
    },

    /// A copier received a value of the wrong kind
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected kind
        expected: Kind,
        /// Actual type received
        got: String,
    },

    /// A private field held a non-zero value under `PrivateFields::Reject`
    #[error("private field `{field}` of {record} holds a value that cannot be copied")]
    UnexportedField {
        /// Field name
        field: String,
        /// Record type name
        record: String,
    },
}

impl CopyError {
    /// The innermost error of the cause chain.
    pub fn root_cause(&self) -> &CopyError {
        let mut current = self;
        while let CopyError::ElementCopyFailed { source, .. }
        | CopyError::FieldCopyFailed { source, .. } = current
        {
            current = &**source;
        }
        current
    }
}

/// Result type alias for deep copy operations
pub type Result<T> = std::result::Result<T, CopyError>;
