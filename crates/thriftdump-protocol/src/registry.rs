//! Static type-tag dispatch table.
//!
//! Maps each wire type code to its display name and the reader that
//! consumes a value of that type. The table is a plain `static` array
//! indexed by code, built at compile time and never mutated.
//!
//! ```text
//! code:  0    1    2     3     4       5    6    7    8    9    10   11      12      13   14   15    16
//!        stop -    bool  byte  double  -    i16  -    i32  -    i64  string  struct  map  set  list  enum
//! ```

use crate::collections::{read_enum, read_list, read_map, read_set};
use crate::decoder::{
    Decoder, read_bool, read_byte, read_double, read_i16, read_i32, read_i64, read_string,
    read_struct,
};
use crate::error::DecodeResult;
use crate::types::{Value, WireType};

/// Signature shared by every value reader.
pub(crate) type ReadFn = for<'a, 'b> fn(&'b mut Decoder<'a>) -> DecodeResult<Value>;

/// One row of the registry.
#[derive(Clone, Copy)]
pub struct TypeEntry {
    wire_type: WireType,
    pub(crate) read: ReadFn,
}

impl TypeEntry {
    const fn new(wire_type: WireType, read: ReadFn) -> Option<Self> {
        Some(Self { wire_type, read })
    }

    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    pub fn name(&self) -> &'static str {
        self.wire_type.name()
    }
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry")
            .field("wire_type", &self.wire_type)
            .finish_non_exhaustive()
    }
}

static ENTRIES: [Option<TypeEntry>; 17] = [
    None, // 0: stop marker, never a value type
    None,
    TypeEntry::new(WireType::Bool, read_bool),
    TypeEntry::new(WireType::Byte, read_byte),
    TypeEntry::new(WireType::Double, read_double),
    None,
    TypeEntry::new(WireType::I16, read_i16),
    None,
    TypeEntry::new(WireType::I32, read_i32),
    None,
    TypeEntry::new(WireType::I64, read_i64),
    TypeEntry::new(WireType::String, read_string),
    TypeEntry::new(WireType::Struct, read_struct),
    TypeEntry::new(WireType::Map, read_map),
    TypeEntry::new(WireType::Set, read_set),
    TypeEntry::new(WireType::List, read_list),
    TypeEntry::new(WireType::Enum, read_enum),
];

/// Lookup facade over the static table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeRegistry;

impl TypeRegistry {
    /// Returns the entry for `code`, or `None` for stop, reserved and
    /// out-of-range codes.
    pub fn lookup(code: u8) -> Option<&'static TypeEntry> {
        ENTRIES.get(usize::from(code))?.as_ref()
    }

    /// Shorthand for `lookup(code).map(TypeEntry::wire_type)`.
    pub fn wire_type(code: u8) -> Option<WireType> {
        Self::lookup(code).map(TypeEntry::wire_type)
    }

    /// All registered entries in code order.
    pub fn entries() -> impl Iterator<Item = &'static TypeEntry> {
        ENTRIES.iter().flatten()
    }
}
