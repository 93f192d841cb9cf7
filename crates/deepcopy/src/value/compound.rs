//! Compound value types: arrays, records, slices and maps

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::{MapKey, RecordType, Type, Value};
use crate::error::{CopyError, Precondition, Result};

// ═══════════════════════════════════════════════════════════════════════
// Owned Aggregates
// ═══════════════════════════════════════════════════════════════════════

/// A fixed-length array, owned by whatever contains it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    elem: Type,
    items: Vec<Value>,
}

impl ArrayValue {
    /// Create an array; its length is fixed at `items.len()`
    pub fn new(elem: Type, items: Vec<Value>) -> Self {
        Self { elem, items }
    }

    /// Element type
    pub fn elem_type(&self) -> &Type {
        &self.elem
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in index order
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Get an element by index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Overwrite an element; `false` if out of bounds
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// A record instance with named fields.
///
/// Uses IndexMap to keep fields in declaration order. The field set is
/// fixed by the record type: every declared field is present, starting at
/// its zero value.
#[derive(Debug, Clone)]
pub struct RecordValue {
    ty: RecordType,
    fields: IndexMap<String, Value>,
}

impl RecordValue {
    /// Create a record with every field at its zero value
    pub fn new(ty: RecordType) -> Self {
        let fields = ty
            .fields()
            .iter()
            .map(|f| (f.name.clone(), f.ty.zero_value()))
            .collect();
        Self { ty, fields }
    }

    /// Set a field (builder pattern).
    ///
    /// Names the record type does not declare are ignored.
    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// The record's type
    pub fn record_type(&self) -> &RecordType {
        &self.ty
    }

    /// The record's type name
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Overwrite a field; `false` if the type declares no such field
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Shared Storage
// ═══════════════════════════════════════════════════════════════════════

/// A dynamic sequence over shared backing storage, or nil.
///
/// Clones share the backing buffer, so a write through one clone is seen
/// by all of them. A nil slice is distinct from an empty one.
#[derive(Debug, Clone)]
pub struct SliceValue {
    elem: Type,
    items: Option<Arc<RwLock<Vec<Value>>>>,
}

impl SliceValue {
    /// Create a slice over a new backing buffer
    pub fn new(elem: Type, items: Vec<Value>) -> Self {
        Self {
            elem,
            items: Some(Arc::new(RwLock::new(items))),
        }
    }

    /// A nil slice
    pub fn nil(elem: Type) -> Self {
        Self { elem, items: None }
    }

    /// Whether this slice is nil
    pub fn is_nil(&self) -> bool {
        self.items.is_none()
    }

    /// Element type
    pub fn elem_type(&self) -> &Type {
        &self.elem
    }

    /// Number of elements (zero for nil)
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, |items| items.read().len())
    }

    /// Whether the slice has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get an element by index
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items
            .as_ref()
            .and_then(|items| items.read().get(index).cloned())
    }

    /// Overwrite an element; `false` if nil or out of bounds
    pub fn set(&self, index: usize, value: Value) -> bool {
        let Some(items) = &self.items else {
            return false;
        };
        match items.write().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Shallow snapshot of the elements, `None` for nil
    pub fn to_vec(&self) -> Option<Vec<Value>> {
        self.items.as_ref().map(|items| items.read().clone())
    }

    /// Whether two slices use the same backing buffer
    pub fn shares_storage(&self, other: &SliceValue) -> bool {
        match (&self.items, &other.items) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// An associative container over shared storage, or nil.
///
/// Iteration follows insertion order, though nothing in the copy engine
/// depends on it.
#[derive(Debug, Clone)]
pub struct MapValue {
    key: Type,
    value: Type,
    entries: Option<Arc<RwLock<IndexMap<MapKey, Value>>>>,
}

impl MapValue {
    /// Create an empty, non-nil map
    pub fn new(key: Type, value: Type) -> Self {
        Self::with_capacity(key, value, 0)
    }

    /// Create an empty, non-nil map with room for `capacity` entries
    pub fn with_capacity(key: Type, value: Type, capacity: usize) -> Self {
        Self {
            key,
            value,
            entries: Some(Arc::new(RwLock::new(IndexMap::with_capacity(capacity)))),
        }
    }

    /// A nil map
    pub fn nil(key: Type, value: Type) -> Self {
        Self {
            key,
            value,
            entries: None,
        }
    }

    /// Add an entry (builder pattern).
    ///
    /// # Errors
    ///
    /// Same as [`MapValue::insert`].
    pub fn with_entry(self, key: Value, value: Value) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Whether this map is nil
    pub fn is_nil(&self) -> bool {
        self.entries.is_none()
    }

    /// Key type
    pub fn key_type(&self) -> &Type {
        &self.key
    }

    /// Value type
    pub fn value_type(&self) -> &Type {
        &self.value
    }

    /// Number of entries (zero for nil)
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |e| e.read().len())
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the value stored under `key`
    pub fn get(&self, key: &Value) -> Option<Value> {
        let key = MapKey::new(key.clone())?;
        self.entries
            .as_ref()
            .and_then(|e| e.read().get(&key).cloned())
    }

    /// Insert an entry, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the map is nil or the key is not
    /// comparable.
    pub fn insert(&self, key: Value, value: Value) -> Result<Option<Value>> {
        let Some(entries) = &self.entries else {
            return Err(CopyError::InvalidArgument {
                reason: Precondition::NilMap,
                detail: format!(
                    "cannot insert into nil map of type {}",
                    Type::map(self.key.clone(), self.value.clone())
                ),
            });
        };
        let type_name = key.type_name();
        let key = MapKey::new(key).ok_or_else(|| CopyError::InvalidArgument {
            reason: Precondition::NotComparable,
            detail: format!("values of type {} cannot be map keys", type_name),
        })?;
        Ok(entries.write().insert(key, value))
    }

    /// Shallow snapshot of the entries, `None` for nil
    pub fn entries(&self) -> Option<Vec<(MapKey, Value)>> {
        self.entries.as_ref().map(|e| {
            e.read()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
    }

    /// Whether two maps use the same storage
    pub fn shares_storage(&self, other: &MapValue) -> bool {
        match (&self.entries, &other.entries) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
