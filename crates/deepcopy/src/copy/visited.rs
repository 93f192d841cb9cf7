//! Per-call registry of references already copied

use std::collections::HashMap;

use crate::value::{Identity, Pointer};

/// Maps the identity of each source reference to the reference that
/// replaces it in the copy.
///
/// One table lives for exactly one top-level call. Entries are added before
/// the new referent is populated, so a cycle back to the source finds the
/// (still incomplete) copy instead of recursing.
#[derive(Debug, Default)]
pub struct VisitedTable {
    copies: HashMap<Identity, Pointer>,
}

impl VisitedTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The copy already produced for `source`, if any.
    pub fn lookup(&self, source: Identity) -> Option<&Pointer> {
        self.copies.get(&source)
    }

    /// Record that `copy` replaces the reference with identity `source`.
    pub fn register(&mut self, source: Identity, copy: Pointer) {
        tracing::trace!(%source, copy = ?copy, "registered reference copy");
        self.copies.insert(source, copy);
    }

    /// Number of references copied so far.
    pub fn len(&self) -> usize {
        self.copies.len()
    }

    /// Whether no reference has been copied yet.
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }
}
