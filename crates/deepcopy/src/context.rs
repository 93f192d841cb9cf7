//! Copy configuration

/// How the record copiers treat private (unexported) fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrivateFields {
    /// Leave private fields at their zero value in the copy
    #[default]
    Skip,

    /// Fail with `UnexportedField` if a source private field is non-zero
    Reject,
}

/// Configuration for a deep copy.
///
/// This is passed through all copier calls. It holds no per-call state;
/// the visited table is created fresh by each top-level call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    /// Treatment of private record fields
    pub private_fields: PrivateFields,
}

impl CopyOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that refuse to silently drop private field contents.
    pub fn strict() -> Self {
        Self {
            private_fields: PrivateFields::Reject,
        }
    }

    /// Set the private field policy (builder pattern).
    pub fn with_private_fields(mut self, policy: PrivateFields) -> Self {
        self.private_fields = policy;
        self
    }
}
