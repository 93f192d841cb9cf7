//! Handle value types: functions and channels
//!
//! Neither can be duplicated: a copied function would still run the same
//! code over the same captured state, and a copied channel would still be
//! connected to the same peers. The copy engine rejects both.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Type, Value};

/// Type alias for native function pointers to reduce complexity
pub type NativeFnPtr = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// An executable function reference, or nil.
#[derive(Clone)]
pub struct FunctionValue {
    /// Function name (for display/debugging)
    pub name: String,

    /// The actual function pointer
    func: Option<NativeFnPtr>,
}

impl FunctionValue {
    /// Wrap a native function
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Some(Arc::new(func)),
        }
    }

    /// A nil function
    pub fn nil() -> Self {
        Self {
            name: String::new(),
            func: None,
        }
    }

    /// Whether this function is nil
    pub fn is_nil(&self) -> bool {
        self.func.is_none()
    }

    /// Call the function
    ///
    /// # Errors
    ///
    /// Returns the function's own error, or an error for a nil function.
    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        match &self.func {
            Some(f) => f(args),
            None => Err("call of nil function".to_string()),
        }
    }

    /// Whether two function values are the same function
    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        match (&self.func, &other.func) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "FunctionValue(nil)")
        } else {
            write!(f, "FunctionValue({})", self.name)
        }
    }
}

/// A bounded in-process channel, or nil.
///
/// Clones are connected to the same buffer.
#[derive(Debug, Clone)]
pub struct ChannelValue {
    elem: Type,
    capacity: usize,
    buffer: Option<Arc<Mutex<VecDeque<Value>>>>,
}

impl ChannelValue {
    /// Open a channel holding at most `capacity` values
    pub fn new(elem: Type, capacity: usize) -> Self {
        Self {
            elem,
            capacity,
            buffer: Some(Arc::new(Mutex::new(VecDeque::with_capacity(capacity)))),
        }
    }

    /// A nil channel
    pub fn nil(elem: Type) -> Self {
        Self {
            elem,
            capacity: 0,
            buffer: None,
        }
    }

    /// Whether this channel is nil
    pub fn is_nil(&self) -> bool {
        self.buffer.is_none()
    }

    /// Element type
    pub fn elem_type(&self) -> &Type {
        &self.elem
    }

    /// Queue a value; `false` if the channel is nil or full
    pub fn try_send(&self, value: Value) -> bool {
        let Some(buffer) = &self.buffer else {
            return false;
        };
        let mut buffer = buffer.lock();
        if buffer.len() >= self.capacity {
            return false;
        }
        buffer.push_back(value);
        true
    }

    /// Take the oldest queued value
    pub fn try_recv(&self) -> Option<Value> {
        self.buffer.as_ref().and_then(|b| b.lock().pop_front())
    }

    /// Whether two channel values are connected to the same buffer
    pub fn ptr_eq(&self, other: &ChannelValue) -> bool {
        match (&self.buffer, &other.buffer) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}
