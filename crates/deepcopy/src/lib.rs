//! # Deepcopy
//!
//! Cycle-safe deep copy of dynamically shaped runtime values.
//!
//! Deepcopy takes a [`Value`] of any shape (primitive, aggregate, or a
//! graph of references) and produces a copy that shares no mutable storage
//! with the original. Shared references stay shared and reference cycles
//! stay cycles; neither is duplicated or followed forever.
//!
//! ## Architecture
//!
//! - **Value model**: [`Value`], its declared [`Type`] and structural [`Kind`]
//! - **Kind dispatcher**: routes each value to the copier for its kind
//! - **Visited table**: per-call map from source reference [`Identity`] to copy
//! - **Copiers**: string, array, slice, map, reference, and record
//!
//! ## Limitations
//!
//! Channels, functions and raw pointers cannot be duplicated and make the
//! whole copy fail. Private record fields are invisible to the engine and
//! are left at their zero value (see [`PrivateFields`] for a strict mode).
//!
//! Only cycles that pass through a reference are detected. A slice or map
//! that holds itself directly recurses until the stack overflows. Cyclic
//! copies, like cyclic originals, are reference counted and never freed.
//!
//! ## Example
//!
//! ```
//! use deepcopy::{deep_copy, FieldDef, Pointer, RecordType, RecordValue, Type, Value};
//!
//! let node = RecordType::declare("Node");
//! node.define(vec![
//!     FieldDef::public("value", Type::I64),
//!     FieldDef::public("next", Type::reference(Type::Record(node.clone()))),
//! ]);
//!
//! // A one-node ring: node.next == node
//! let head = Pointer::new(Value::Record(
//!     RecordValue::new(node).with_field("value", Value::I64(7)),
//! ));
//! head.update(|v| {
//!     if let Value::Record(r) = v {
//!         r.set("next", Value::Ref(head.clone()));
//!     }
//! });
//!
//! let copy = deep_copy(&Value::Ref(head.clone())).unwrap();
//! let copy = copy.as_pointer().unwrap();
//! let next = copy.load().unwrap().as_record().unwrap().get("next").cloned().unwrap();
//!
//! assert!(!copy.ptr_eq(&head));
//! assert!(next.as_pointer().unwrap().ptr_eq(copy));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod copy;
pub mod error;
pub mod value;

// Re-export main types
pub use context::{CopyOptions, PrivateFields};
pub use copy::{
    copier_for, copy_into, copy_value, deep_copy, deep_copy_or_panic, duplicate_string, Copier,
    DeepCopier, VisitedTable,
};
pub use error::{CopyError, Element, Precondition, Result};
pub use value::{
    ArrayValue, ChannelValue, Complex, FieldDef, FunctionValue, Identity, Kind, MapKey, MapValue,
    NativeFnPtr, Pointer, RecordType, RecordValue, SliceValue, Type, Value, Visibility,
};

/// Deepcopy version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
