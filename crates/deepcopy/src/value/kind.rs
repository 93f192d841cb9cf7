//! Structural categories of values

use std::fmt;

use super::Value;

/// The structural category of a value.
///
/// Every `Value` variant maps to exactly one kind. The copy engine
/// dispatches on kind, never on the concrete variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// No dynamic value
    Invalid,
    /// `()`
    Unit,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// Complex with 32-bit parts
    C64,
    /// Complex with 64-bit parts
    C128,
    /// String
    String,
    /// Fixed-length array
    Array,
    /// Dynamic sequence
    Slice,
    /// Associative container
    Map,
    /// Reference
    Ref,
    /// Record
    Record,
    /// Channel
    Channel,
    /// Function
    Function,
    /// Raw pointer
    RawPointer,
}

impl Kind {
    /// Whether values of this kind are plain data, copied by value.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Kind::Unit
                | Kind::Bool
                | Kind::Char
                | Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::I128
                | Kind::Isize
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
                | Kind::U128
                | Kind::Usize
                | Kind::F32
                | Kind::F64
                | Kind::C64
                | Kind::C128
        )
    }

    /// Lowercase name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Unit => "unit",
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::I128 => "i128",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::U128 => "u128",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::C64 => "c64",
            Kind::C128 => "c128",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Ref => "ref",
            Kind::Record => "record",
            Kind::Channel => "channel",
            Kind::Function => "function",
            Kind::RawPointer => "raw pointer",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// The structural category of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Empty => Kind::Invalid,
            Value::Unit => Kind::Unit,
            Value::Bool(_) => Kind::Bool,
            Value::Char(_) => Kind::Char,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::I128(_) => Kind::I128,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::U128(_) => Kind::U128,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::C64(_) => Kind::C64,
            Value::C128(_) => Kind::C128,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Record(_) => Kind::Record,
            Value::Slice(_) => Kind::Slice,
            Value::Map(_) => Kind::Map,
            Value::Ref(_) => Kind::Ref,
            Value::Channel(_) => Kind::Channel,
            Value::Function(_) => Kind::Function,
            Value::RawPointer(_) => Kind::RawPointer,
        }
    }
}
