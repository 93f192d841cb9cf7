//! Type descriptors: the declared type of a value

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::{ArrayValue, ChannelValue, FunctionValue, MapValue, Pointer, RecordValue, SliceValue};
use super::{Complex, Value};

/// The declared type of a value.
///
/// Types are needed wherever a value has to be produced without a source to
/// copy from: the zero value of a skipped private field, a nil reference of
/// the right type, a fresh referent for a copied reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Dynamically typed slot; its zero value is `Value::Empty`
    Any,
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
    Array {
        /// Element type
        elem: Arc<Type>,
        /// Number of elements
        len: usize,
    },
    /// Dynamic sequence
    Slice(Arc<Type>),
    /// Associative container
    Map {
        /// Key type
        key: Arc<Type>,
        /// Value type
        value: Arc<Type>,
    },
    /// Reference to a value of the inner type
    Ref(Arc<Type>),
    /// Nominal record type
    Record(RecordType),
    /// Channel carrying values of the inner type
    Channel(Arc<Type>),
    /// Function
    Function,
    /// Raw unmanaged pointer
    RawPointer,
}

impl Type {
    /// `[elem; len]`
    pub fn array(elem: Type, len: usize) -> Self {
        Type::Array {
            elem: Arc::new(elem),
            len,
        }
    }

    /// `[elem]`
    pub fn slice(elem: Type) -> Self {
        Type::Slice(Arc::new(elem))
    }

    /// `{key: value}`
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Arc::new(key),
            value: Arc::new(value),
        }
    }

    /// `&elem`
    pub fn reference(elem: Type) -> Self {
        Type::Ref(Arc::new(elem))
    }

    /// `chan<elem>`
    pub fn channel(elem: Type) -> Self {
        Type::Channel(Arc::new(elem))
    }

    /// The default value of this type.
    ///
    /// Numbers are zero, strings empty, arrays filled with zero elements,
    /// records have every field at its zero value, and every kind of shared
    /// storage or handle is nil.
    pub fn zero_value(&self) -> Value {
        match self {
            Type::Any => Value::Empty,
            Type::Unit => Value::Unit,
            Type::Bool => Value::Bool(false),
            Type::Char => Value::Char('\0'),
            Type::I8 => Value::I8(0),
            Type::I16 => Value::I16(0),
            Type::I32 => Value::I32(0),
            Type::I64 => Value::I64(0),
            Type::I128 => Value::I128(0),
            Type::Isize => Value::Isize(0),
            Type::U8 => Value::U8(0),
            Type::U16 => Value::U16(0),
            Type::U32 => Value::U32(0),
            Type::U64 => Value::U64(0),
            Type::U128 => Value::U128(0),
            Type::Usize => Value::Usize(0),
            Type::F32 => Value::F32(0.0),
            Type::F64 => Value::F64(0.0),
            Type::C64 => Value::C64(Complex::default()),
            Type::C128 => Value::C128(Complex::default()),
            Type::String => Value::string(""),
            Type::Array { elem, len } => {
                Value::Array(ArrayValue::new((**elem).clone(), vec![elem.zero_value(); *len]))
            }
            Type::Slice(elem) => Value::Slice(SliceValue::nil((**elem).clone())),
            Type::Map { key, value } => {
                Value::Map(MapValue::nil((**key).clone(), (**value).clone()))
            }
            Type::Ref(elem) => Value::Ref(Pointer::nil((**elem).clone())),
            Type::Record(record) => Value::Record(RecordValue::new(record.clone())),
            Type::Channel(elem) => Value::Channel(ChannelValue::nil((**elem).clone())),
            Type::Function => Value::Function(FunctionValue::nil()),
            Type::RawPointer => Value::RawPointer(0),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "any"),
            Type::Unit => write!(f, "()"),
            Type::Bool => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::I8 => write!(f, "i8"),
            Type::I16 => write!(f, "i16"),
            Type::I32 => write!(f, "i32"),
            Type::I64 => write!(f, "i64"),
            Type::I128 => write!(f, "i128"),
            Type::Isize => write!(f, "isize"),
            Type::U8 => write!(f, "u8"),
            Type::U16 => write!(f, "u16"),
            Type::U32 => write!(f, "u32"),
            Type::U64 => write!(f, "u64"),
            Type::U128 => write!(f, "u128"),
            Type::Usize => write!(f, "usize"),
            Type::F32 => write!(f, "f32"),
            Type::F64 => write!(f, "f64"),
            Type::C64 => write!(f, "c64"),
            Type::C128 => write!(f, "c128"),
            Type::String => write!(f, "String"),
            Type::Array { elem, len } => write!(f, "[{}; {}]", elem, len),
            Type::Slice(elem) => write!(f, "[{}]", elem),
            Type::Map { key, value } => write!(f, "{{{}: {}}}", key, value),
            Type::Ref(elem) => write!(f, "&{}", elem),
            Type::Record(record) => write!(f, "{}", record.name()),
            Type::Channel(elem) => write!(f, "chan<{}>", elem),
            Type::Function => write!(f, "fn"),
            Type::RawPointer => write!(f, "*raw"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Record Types
// ═══════════════════════════════════════════════════════════════════════

/// Whether a field can be observed from outside its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Exported: read and written by the copy engine
    Public,
    /// Unexported: invisible to the copy engine
    Private,
}

/// A declared record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name
    pub name: String,

    /// Declared field type
    pub ty: Type,

    /// Field visibility
    pub visibility: Visibility,
}

impl FieldDef {
    /// An exported field
    pub fn public(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
        }
    }

    /// An unexported field
    pub fn private(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Private,
        }
    }

    /// Whether the copy engine may read and write this field
    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

struct RecordDecl {
    name: String,
    fields: OnceLock<Vec<FieldDef>>,
}

/// A nominal record type.
///
/// Declaration and definition are separate steps so that a record can hold
/// references to its own type:
///
/// ```
/// use deepcopy::{FieldDef, RecordType, Type};
///
/// let node = RecordType::declare("Node");
/// node.define(vec![
///     FieldDef::public("value", Type::I64),
///     FieldDef::public("next", Type::reference(Type::Record(node.clone()))),
/// ]);
/// assert_eq!(node.fields().len(), 2);
/// ```
///
/// Two record types are equal only when they come from the same
/// declaration. A self-referential type holds an `Arc` to itself and is
/// never freed, like any other static type declaration.
#[derive(Clone)]
pub struct RecordType(Arc<RecordDecl>);

impl RecordType {
    /// Declare a record type whose fields are defined later
    pub fn declare(name: impl Into<String>) -> Self {
        RecordType(Arc::new(RecordDecl {
            name: name.into(),
            fields: OnceLock::new(),
        }))
    }

    /// Declare and define a record type in one step
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        let record = Self::declare(name);
        record.define(fields);
        record
    }

    /// Define the fields of a declared type.
    ///
    /// Returns `false` if the type was already defined; the first
    /// definition wins.
    pub fn define(&self, fields: Vec<FieldDef>) -> bool {
        self.0.fields.set(fields).is_ok()
    }

    /// The type's name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Fields in declaration order (empty until defined)
    pub fn fields(&self) -> &[FieldDef] {
        self.0.fields.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordType({})", self.0.name)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Dynamic Type of a Value
// ═══════════════════════════════════════════════════════════════════════

impl Value {
    /// The declared type of this value.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Empty => Type::Any,
            Value::Unit => Type::Unit,
            Value::Bool(_) => Type::Bool,
            Value::Char(_) => Type::Char,
            Value::I8(_) => Type::I8,
            Value::I16(_) => Type::I16,
            Value::I32(_) => Type::I32,
            Value::I64(_) => Type::I64,
            Value::I128(_) => Type::I128,
            Value::Isize(_) => Type::Isize,
            Value::U8(_) => Type::U8,
            Value::U16(_) => Type::U16,
            Value::U32(_) => Type::U32,
            Value::U64(_) => Type::U64,
            Value::U128(_) => Type::U128,
            Value::Usize(_) => Type::Usize,
            Value::F32(_) => Type::F32,
            Value::F64(_) => Type::F64,
            Value::C64(_) => Type::C64,
            Value::C128(_) => Type::C128,
            Value::String(_) => Type::String,
            Value::Array(a) => Type::array(a.elem_type().clone(), a.len()),
            Value::Record(r) => Type::Record(r.record_type().clone()),
            Value::Slice(s) => Type::slice(s.elem_type().clone()),
            Value::Map(m) => Type::map(m.key_type().clone(), m.value_type().clone()),
            Value::Ref(p) => Type::reference(p.elem_type().clone()),
            Value::Channel(c) => Type::channel(c.elem_type().clone()),
            Value::Function(_) => Type::Function,
            Value::RawPointer(_) => Type::RawPointer,
        }
    }

    /// Human-readable name of this value's type, used in messages.
    pub fn type_name(&self) -> String {
        self.type_of().to_string()
    }
}
