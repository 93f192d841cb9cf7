//! Value representation for runtime values

mod callable;
mod compound;
mod display;
mod hashable;
mod impls;
mod kind;
mod refs;
mod types;

pub use callable::{ChannelValue, FunctionValue, NativeFnPtr};
pub use compound::{ArrayValue, MapValue, RecordValue, SliceValue};
pub use hashable::MapKey;
pub use kind::Kind;
pub use refs::{Identity, Pointer};
pub use types::{FieldDef, RecordType, Type, Visibility};

/// A complex number with real and imaginary parts of the same width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
    /// Real part
    pub re: T,
    /// Imaginary part
    pub im: T,
}

impl<T> Complex<T> {
    /// Create a complex number from its parts
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Runtime value of arbitrary shape.
///
/// Values are organized into four tiers:
/// - Tier 1: Inline primitives (copied by value, never aliased)
/// - Tier 2: Owned aggregates (arrays and records live inside their parent)
/// - Tier 3: Shared storage (references, slices and maps can be aliased)
/// - Tier 4: Handles the copy engine refuses to duplicate
#[derive(Clone)]
pub enum Value {
    /// No dynamic value at all (an unset `Any` slot)
    Empty,

    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// The unit type `()`
    Unit,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Unicode scalar value
    Char(char),

    // Signed integers
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 128-bit signed integer
    I128(i128),
    /// Pointer-sized signed integer
    Isize(isize),

    // Unsigned integers
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// 128-bit unsigned integer
    U128(u128),
    /// Pointer-sized unsigned integer
    Usize(usize),

    // Floating point
    /// 32-bit floating point
    F32(f32),
    /// 64-bit floating point
    F64(f64),

    // Complex
    /// Complex number with 32-bit parts
    C64(Complex<f32>),
    /// Complex number with 64-bit parts
    C128(Complex<f64>),

    /// Immutable string; the `Arc` is the backing storage a copy must not share
    String(std::sync::Arc<String>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Owned Aggregates
    // ═══════════════════════════════════════════════════════════════════
    /// Fixed-length array
    Array(ArrayValue),

    /// Record (struct) instance
    Record(RecordValue),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Shared Storage
    // ═══════════════════════════════════════════════════════════════════
    /// Dynamic sequence; may be nil
    Slice(SliceValue),

    /// Associative container; may be nil
    Map(MapValue),

    /// Reference to a single heap slot; may be nil
    Ref(Pointer),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 4: Non-duplicable Handles
    // ═══════════════════════════════════════════════════════════════════
    /// Communication channel
    Channel(ChannelValue),

    /// Executable function reference
    Function(FunctionValue),

    /// Raw unmanaged memory address
    RawPointer(usize),
}
