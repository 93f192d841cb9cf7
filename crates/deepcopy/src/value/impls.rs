//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create a fixed-length array value
    pub fn array(elem: Type, items: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(elem, items))
    }

    /// Create a slice value over a new backing buffer
    pub fn slice(elem: Type, items: Vec<Value>) -> Self {
        Value::Slice(SliceValue::new(elem, items))
    }

    /// Create a nil slice
    pub fn nil_slice(elem: Type) -> Self {
        Value::Slice(SliceValue::nil(elem))
    }

    /// Create a nil map
    pub fn nil_map(key: Type, value: Type) -> Self {
        Value::Map(MapValue::nil(key, value))
    }

    /// Allocate a slot holding `value` and reference it
    pub fn reference(value: Value) -> Self {
        Value::Ref(Pointer::new(value))
    }

    /// Create a nil reference
    pub fn nil_ref(elem: Type) -> Self {
        Value::Ref(Pointer::nil(elem))
    }

    /// Create a function value
    pub fn function(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Value::Function(FunctionValue::new(name, func))
    }

    /// Open a channel value
    pub fn channel(elem: Type, capacity: usize) -> Self {
        Value::Channel(ChannelValue::new(elem, capacity))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is copied by value (no storage to alias)
    pub fn is_primitive(&self) -> bool {
        self.kind().is_primitive()
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if value is a nil slice, map, reference, channel or function
    pub fn is_nil(&self) -> bool {
        match self {
            Value::Slice(s) => s.is_nil(),
            Value::Map(m) => m.is_nil(),
            Value::Ref(p) => p.is_nil(),
            Value::Channel(c) => c.is_nil(),
            Value::Function(f) => f.is_nil(),
            _ => false,
        }
    }

    /// Check if value equals the zero value of its type.
    ///
    /// Floats are zero only as `+0.0`; `-0.0` is not.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Empty | Value::Unit => true,
            Value::Bool(b) => !b,
            Value::Char(c) => *c == '\0',
            Value::I8(n) => *n == 0,
            Value::I16(n) => *n == 0,
            Value::I32(n) => *n == 0,
            Value::I64(n) => *n == 0,
            Value::I128(n) => *n == 0,
            Value::Isize(n) => *n == 0,
            Value::U8(n) => *n == 0,
            Value::U16(n) => *n == 0,
            Value::U32(n) => *n == 0,
            Value::U64(n) => *n == 0,
            Value::U128(n) => *n == 0,
            Value::Usize(n) => *n == 0,
            Value::F32(n) => n.to_bits() == 0,
            Value::F64(n) => n.to_bits() == 0,
            Value::C64(c) => c.re.to_bits() == 0 && c.im.to_bits() == 0,
            Value::C128(c) => c.re.to_bits() == 0 && c.im.to_bits() == 0,
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.items().iter().all(Value::is_zero),
            Value::Record(r) => r.fields().all(|(_, v)| v.is_zero()),
            Value::RawPointer(addr) => *addr == 0,
            Value::Slice(_)
            | Value::Map(_)
            | Value::Ref(_)
            | Value::Channel(_)
            | Value::Function(_) => self.is_nil(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract as f64 (converts from f32)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(n) => Some(f64::from(*n)),
            Value::F64(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract array
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Extract record
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Extract slice
    pub fn as_slice(&self) -> Option<&SliceValue> {
        match self {
            Value::Slice(s) => Some(s),
            _ => None,
        }
    }

    /// Extract map
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Extract reference
    pub fn as_pointer(&self) -> Option<&Pointer> {
        match self {
            Value::Ref(p) => Some(p),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::U8(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::U64(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Usize(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::new(s))
    }
}

impl From<ArrayValue> for Value {
    fn from(a: ArrayValue) -> Self {
        Value::Array(a)
    }
}

impl From<RecordValue> for Value {
    fn from(r: RecordValue) -> Self {
        Value::Record(r)
    }
}

impl From<SliceValue> for Value {
    fn from(s: SliceValue) -> Self {
        Value::Slice(s)
    }
}

impl From<MapValue> for Value {
    fn from(m: MapValue) -> Self {
        Value::Map(m)
    }
}

impl From<Pointer> for Value {
    fn from(p: Pointer) -> Self {
        Value::Ref(p)
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Empty, Value::Empty) => true,
            (Value::Unit, Value::Unit) => true,

            // Primitives
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,

            // Signed integers
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::I128(a), Value::I128(b)) => a == b,
            (Value::Isize(a), Value::Isize(b)) => a == b,

            // Unsigned integers
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::U128(a), Value::U128(b)) => a == b,
            (Value::Usize(a), Value::Usize(b)) => a == b,

            // Floats and complex numbers (IEEE equality)
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::C64(a), Value::C64(b)) => a == b,
            (Value::C128(a), Value::C128(b)) => a == b,

            (Value::String(a), Value::String(b)) => a == b,

            // Owned aggregates compare by content
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => {
                a.record_type() == b.record_type() && a.fields().eq(b.fields())
            }

            // Shared storage: nil equals nil, otherwise compare contents
            (Value::Slice(a), Value::Slice(b)) => {
                a.elem_type() == b.elem_type() && a.to_vec() == b.to_vec()
            }
            (Value::Map(a), Value::Map(b)) => {
                a.key_type() == b.key_type()
                    && a.value_type() == b.value_type()
                    && match (a.entries(), b.entries()) {
                        (Some(x), Some(y)) => {
                            x.len() == y.len()
                                && x.iter().all(|(k, v)| b.get(k.value()).as_ref() == Some(v))
                        }
                        (None, None) => true,
                        _ => false,
                    }
            }

            // References and handles compare by identity
            (Value::Ref(a), Value::Ref(b)) => a.elem_type() == b.elem_type() && a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Channel(a), Value::Channel(b)) => a.ptr_eq(b),
            (Value::RawPointer(a), Value::RawPointer(b)) => a == b,

            // Different types
            _ => false,
        }
    }
}
