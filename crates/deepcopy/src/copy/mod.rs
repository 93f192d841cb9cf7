//! The copy engine
//!
//! A top-level call creates a fresh [`VisitedTable`] and hands the value to
//! the kind dispatcher, [`copy_value`]. The dispatcher passes primitives
//! through, routes every other supported kind to its copier, and fails on
//! the rest. Copiers for containers call back into the dispatcher for their
//! elements; only the reference copier touches the visited table.

mod map;
mod pointer;
mod record;
mod sequence;
mod string;
mod visited;

pub use string::duplicate_string;
pub use visited::VisitedTable;

use crate::context::CopyOptions;
use crate::error::{CopyError, Result};
use crate::value::{Kind, Value};

/// Signature shared by every per-kind copier.
pub type Copier = fn(&Value, &mut VisitedTable, &CopyOptions) -> Result<Value>;

/// The copier registered for a kind.
///
/// Primitive kinds, `Invalid`, and the unsupported handle kinds (channels,
/// functions, raw pointers) have no entry.
pub fn copier_for(kind: Kind) -> Option<Copier> {
    let copier: Copier = match kind {
        Kind::String => string::copy_string,
        Kind::Array => sequence::copy_array,
        Kind::Slice => sequence::copy_slice,
        Kind::Map => map::copy_map,
        Kind::Ref => pointer::copy_pointer,
        Kind::Record => record::copy_record,
        _ => return None,
    };
    Some(copier)
}

// ═══════════════════════════════════════════════════════════════════════
// Kind Dispatcher
// ═══════════════════════════════════════════════════════════════════════

/// Deep copy `value`, sharing `visited` with the rest of the traversal.
///
/// # Errors
///
/// Returns `UnsupportedKind` for kinds without a copier, or whatever the
/// copier for this kind reports.
pub fn copy_value(
    value: &Value,
    visited: &mut VisitedTable,
    options: &CopyOptions,
) -> Result<Value> {
    let kind = value.kind();
    if kind == Kind::Invalid || kind.is_primitive() {
        return Ok(value.clone());
    }
    match copier_for(kind) {
        Some(copier) => copier(value, visited, options),
        None => Err(CopyError::UnsupportedKind {
            kind,
            type_name: value.type_name(),
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Entry Points
// ═══════════════════════════════════════════════════════════════════════

/// Deep copy engine bound to a set of [`CopyOptions`].
///
/// # Example
///
/// ```
/// use deepcopy::{CopyOptions, DeepCopier, Type, Value};
///
/// let copier = DeepCopier::with_options(CopyOptions::strict());
/// let original = Value::slice(Type::String, vec![Value::from("a"), Value::from("b")]);
/// let copy = copier.deep_copy(&original).unwrap();
///
/// assert_eq!(copy, original);
/// assert!(!copy.as_slice().unwrap().shares_storage(original.as_slice().unwrap()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepCopier {
    options: CopyOptions,
}

impl DeepCopier {
    /// Create a copier with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a copier with custom options.
    pub fn with_options(options: CopyOptions) -> Self {
        Self { options }
    }

    /// The options this copier applies.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Make a fully independent copy of `value`.
    ///
    /// References that share a target in `value` share a target in the
    /// copy, and reference cycles are reproduced rather than followed.
    ///
    /// # Errors
    ///
    /// Fails if any reachable value is a channel, function or raw pointer,
    /// or (under `PrivateFields::Reject`) a record hides non-zero private
    /// state. The error names the path to the offending value.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = %value.kind()))]
    pub fn deep_copy(&self, value: &Value) -> Result<Value> {
        let mut visited = VisitedTable::new();
        let result = copy_value(value, &mut visited, &self.options);
        match &result {
            Ok(_) => tracing::trace!(references = visited.len(), "deep copy complete"),
            Err(err) => tracing::debug!(error = %err, "deep copy failed"),
        }
        result
    }

    /// Like [`DeepCopier::deep_copy`], but panics on failure.
    ///
    /// For call sites where a non-copyable value is a programming error.
    pub fn deep_copy_or_panic(&self, value: &Value) -> Value {
        match self.deep_copy(value) {
            Ok(copy) => copy,
            Err(err) => panic!("deep copy failed: {}", err),
        }
    }

    /// Copy the record behind `source` into the record behind `destination`.
    ///
    /// Both arguments must be non-nil references of the same type to
    /// records. References back to `source` found inside it are rewritten
    /// to point at `destination`. Private fields of `destination` keep
    /// their values. On failure `destination` is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for bad arguments, or any error a field
    /// copy reports.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn copy_into(&self, source: &Value, destination: &Value) -> Result<()> {
        let result = record::copy_into(source, destination, &self.options);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "copy into destination failed");
        }
        result
    }
}

/// Make a fully independent copy of `value` with default options.
///
/// # Errors
///
/// See [`DeepCopier::deep_copy`].
pub fn deep_copy(value: &Value) -> Result<Value> {
    DeepCopier::new().deep_copy(value)
}

/// Make a fully independent copy of `value`, panicking on failure.
pub fn deep_copy_or_panic(value: &Value) -> Value {
    DeepCopier::new().deep_copy_or_panic(value)
}

/// Copy the record behind `source` into the record behind `destination`.
///
/// # Errors
///
/// See [`DeepCopier::copy_into`].
pub fn copy_into(source: &Value, destination: &Value) -> Result<()> {
    DeepCopier::new().copy_into(source, destination)
}
