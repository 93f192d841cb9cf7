//! Display and Debug implementations for Value
//!
//! References print their type and identity, never their referent, so
//! cyclic values always print in finite space.

use std::fmt;

use super::*;

fn write_list<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", item)?;
    }
    write!(f, "{}", close)
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "<empty>"),
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "'{}'", c),

            Value::I8(n) => write!(f, "{}i8", n),
            Value::I16(n) => write!(f, "{}i16", n),
            Value::I32(n) => write!(f, "{}i32", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::I128(n) => write!(f, "{}i128", n),
            Value::Isize(n) => write!(f, "{}isize", n),

            Value::U8(n) => write!(f, "{}u8", n),
            Value::U16(n) => write!(f, "{}u16", n),
            Value::U32(n) => write!(f, "{}u32", n),
            Value::U64(n) => write!(f, "{}u64", n),
            Value::U128(n) => write!(f, "{}u128", n),
            Value::Usize(n) => write!(f, "{}usize", n),

            Value::F32(n) => write!(f, "{}f32", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::C64(c) => write!(f, "({}{:+}i)c64", c.re, c.im),
            Value::C128(c) => write!(f, "({}{:+}i)", c.re, c.im),

            Value::String(s) => write!(f, "{:?}", s.as_ref()),

            Value::Array(a) => write_list(f, "[", a.items().iter(), "]"),

            Value::Record(r) => {
                write!(f, "{} {{ ", r.type_name())?;
                for (i, (k, v)) in r.fields().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", k, v)?;
                }
                write!(f, " }}")
            }

            Value::Slice(s) => match s.to_vec() {
                Some(items) => write_list(f, "slice![", items.iter(), "]"),
                None => write!(f, "nil"),
            },

            Value::Map(m) => match m.entries() {
                Some(entries) => {
                    write!(f, "{{")?;
                    for (i, (k, v)) in entries.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{:?}: {:?}", k.value(), v)?;
                    }
                    write!(f, "}}")
                }
                None => write!(f, "nil"),
            },

            Value::Ref(p) => write!(f, "{:?}", p),

            Value::Channel(c) if c.is_nil() => write!(f, "nil"),
            Value::Channel(c) => write!(f, "<chan {}>", c.elem_type()),
            Value::Function(func) if func.is_nil() => write!(f, "nil"),
            Value::Function(func) => write!(f, "<fn {}>", func.name),
            Value::RawPointer(addr) => write!(f, "<raw {:#x}>", addr),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is more user-friendly, Debug is more detailed
        match self {
            Value::String(s) => write!(f, "{}", s.as_ref()), // No quotes for Display
            Value::Char(c) => write!(f, "{}", c),            // No quotes for Display
            _ => fmt::Debug::fmt(self, f),
        }
    }
}
