//! Comparable wrapper for Value to enable use as map keys

use std::hash::{Hash, Hasher};

use super::Value;

/// A value that can be used as a map key.
///
/// Only comparable values qualify: primitives, strings, references
/// (compared by identity), and arrays or records made of comparable values.
/// Floats and complex numbers compare by bit pattern, so `NaN` keys are
/// found again and `0.0` and `-0.0` are distinct keys.
#[derive(Debug, Clone)]
pub struct MapKey(Value);

impl MapKey {
    /// Wrap a value, or `None` if it is not comparable
    pub fn new(value: Value) -> Option<Self> {
        Self::is_comparable(&value).then_some(MapKey(value))
    }

    /// The wrapped value
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Check if a value can be used as a key
    pub fn is_comparable(value: &Value) -> bool {
        match value {
            Value::Slice(_) | Value::Map(_) | Value::Function(_) | Value::Channel(_) => false,
            Value::Array(a) => a.items().iter().all(Self::is_comparable),
            Value::Record(r) => r.fields().all(|(_, v)| Self::is_comparable(v)),
            _ => true,
        }
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    // Hash the discriminant first
    std::mem::discriminant(value).hash(state);

    match value {
        Value::Empty | Value::Unit => {}
        Value::Bool(b) => b.hash(state),
        Value::Char(c) => c.hash(state),
        Value::I8(n) => n.hash(state),
        Value::I16(n) => n.hash(state),
        Value::I32(n) => n.hash(state),
        Value::I64(n) => n.hash(state),
        Value::I128(n) => n.hash(state),
        Value::Isize(n) => n.hash(state),
        Value::U8(n) => n.hash(state),
        Value::U16(n) => n.hash(state),
        Value::U32(n) => n.hash(state),
        Value::U64(n) => n.hash(state),
        Value::U128(n) => n.hash(state),
        Value::Usize(n) => n.hash(state),
        Value::F32(n) => n.to_bits().hash(state),
        Value::F64(n) => n.to_bits().hash(state),
        Value::C64(c) => (c.re.to_bits(), c.im.to_bits()).hash(state),
        Value::C128(c) => (c.re.to_bits(), c.im.to_bits()).hash(state),
        Value::String(s) => s.hash(state),
        Value::Array(a) => {
            a.len().hash(state);
            for item in a.items() {
                hash_value(item, state);
            }
        }
        Value::Record(r) => {
            r.type_name().hash(state);
            for (_, v) in r.fields() {
                hash_value(v, state);
            }
        }
        Value::Ref(p) => p.identity().hash(state),
        Value::RawPointer(addr) => addr.hash(state),
        // Not comparable; MapKey::new never wraps these
        Value::Slice(_) | Value::Map(_) | Value::Function(_) | Value::Channel(_) => {}
    }
}

fn key_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::F32(x), Value::F32(y)) => x.to_bits() == y.to_bits(),
        (Value::F64(x), Value::F64(y)) => x.to_bits() == y.to_bits(),
        (Value::C64(x), Value::C64(y)) => {
            x.re.to_bits() == y.re.to_bits() && x.im.to_bits() == y.im.to_bits()
        }
        (Value::C128(x), Value::C128(y)) => {
            x.re.to_bits() == y.re.to_bits() && x.im.to_bits() == y.im.to_bits()
        }
        (Value::Array(x), Value::Array(y)) => {
            x.elem_type() == y.elem_type()
                && x.len() == y.len()
                && x.items().iter().zip(y.items()).all(|(p, q)| key_eq(p, q))
        }
        (Value::Record(x), Value::Record(y)) => {
            x.record_type() == y.record_type()
                && x.fields().zip(y.fields()).all(|((_, p), (_, q))| key_eq(p, q))
        }
        _ => a == b,
    }
}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        key_eq(&self.0, &other.0)
    }
}

impl Eq for MapKey {}
