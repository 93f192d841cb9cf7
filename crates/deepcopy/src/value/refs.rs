//! References: single heap slots with a stable identity

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Type, Value};

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// Opaque token naming one reference allocation.
///
/// Assigned when the slot is allocated and never reused within the
/// process. Two pointers have the same identity exactly when they point at
/// the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(u64);

impl Identity {
    fn fresh() -> Self {
        Identity(NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Slot {
    identity: Identity,
    value: RwLock<Value>,
}

/// A reference to a single heap slot, or nil.
///
/// Cloning a `Pointer` aliases the slot; writes through one clone are seen
/// through every other. Equality is identity.
///
/// Slots are reference counted, so a cycle of pointers is never freed.
#[derive(Clone)]
pub struct Pointer {
    elem: Type,
    slot: Option<Arc<Slot>>,
}

impl Pointer {
    /// Allocate a slot holding `value`; the element type is the value's type
    pub fn new(value: Value) -> Self {
        Self::typed(value.type_of(), value)
    }

    /// Allocate a slot with an explicit element type (e.g. `Type::Any`)
    pub fn typed(elem: Type, value: Value) -> Self {
        Self {
            elem,
            slot: Some(Arc::new(Slot {
                identity: Identity::fresh(),
                value: RwLock::new(value),
            })),
        }
    }

    /// A nil reference to `elem`
    pub fn nil(elem: Type) -> Self {
        Self { elem, slot: None }
    }

    /// Whether this reference points nowhere
    pub fn is_nil(&self) -> bool {
        self.slot.is_none()
    }

    /// The declared type of the referent
    pub fn elem_type(&self) -> &Type {
        &self.elem
    }

    /// Identity of the referenced slot, `None` for nil
    pub fn identity(&self) -> Option<Identity> {
        self.slot.as_ref().map(|s| s.identity)
    }

    /// Shallow snapshot of the referent.
    ///
    /// The lock is released before returning, so callers can recurse into
    /// the snapshot while other code writes to the slot.
    pub fn load(&self) -> Option<Value> {
        self.slot.as_ref().map(|s| s.value.read().clone())
    }

    /// Store a new referent, returning the old one (`None` for nil)
    pub fn replace(&self, value: Value) -> Option<Value> {
        self.slot
            .as_ref()
            .map(|s| std::mem::replace(&mut *s.value.write(), value))
    }

    /// Mutate the referent in place (`None` for nil)
    pub fn update<R>(&self, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        self.slot.as_ref().map(|s| f(&mut *s.value.write()))
    }

    /// Whether two references point at the same slot (two nils are equal)
    pub fn ptr_eq(&self, other: &Pointer) -> bool {
        match (&self.slot, &other.slot) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity() {
            Some(id) => write!(f, "&{}{}", self.elem, id),
            None => write!(f, "nil"),
        }
    }
}
