//! Recursive struct walker.
//!
//! A struct body on the wire is a run of fields closed by a stop byte:
//!
//! ```text
//! ┌──────────┬────────────┬───────────────────┐
//! │ type: u8 │ field: i16 │ payload (by type) │ ... repeated ...  00 (stop)
//! └──────────┴────────────┴───────────────────┘
//! ```
//!
//! The [`Decoder`] owns everything one decode call needs: the cursor, the
//! struct table, the synthetic-name counter and the current depth. Nothing
//! survives between calls, so two decodes of two buffers both start
//! numbering nested structs from zero.

use tracing::trace;

use crate::config::DecoderConfig;
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::registry::{TypeEntry, TypeRegistry};
use crate::types::{Field, FieldList, StructName, StructTable, Value};

/// Type tag that ends a struct body.
pub const STOP: u8 = 0;

/// Per-call decoding state.
pub(crate) struct Decoder<'a> {
    pub(crate) cursor: ByteCursor<'a>,
    structs: StructTable,
    next_struct: u64,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(buf: &'a [u8], config: &DecoderConfig) -> Self {
        Self {
            cursor: ByteCursor::new(buf),
            structs: StructTable::new(),
            next_struct: 0,
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// Consumes the decoder, handing back every nested struct it found.
    pub(crate) fn into_structs(self) -> StructTable {
        self.structs
    }

    /// Reads a type tag and resolves it through the registry.
    ///
    /// Used for collection element/key/value types, where a stop byte is
    /// just another unknown code.
    pub(crate) fn read_type_entry(&mut self) -> DecodeResult<&'static TypeEntry> {
        let offset = self.cursor.position();
        let code = self.cursor.read_byte()?;
        TypeRegistry::lookup(code).ok_or(DecodeError::UnknownType { code, offset })
    }

    /// Steps one level deeper into a struct or collection.
    pub(crate) fn enter(&mut self) -> DecodeResult<()> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::MaxDepthExceeded {
                max_depth: self.max_depth,
                offset: self.cursor.position(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reads fields until the stop byte and returns them in wire order.
    ///
    /// Any error (including running out of bytes before the stop byte)
    /// is returned as-is; there is no partial result.
    pub(crate) fn read_struct_body(&mut self) -> DecodeResult<FieldList> {
        let mut fields = FieldList::new();
        loop {
            let offset = self.cursor.position();
            let code = self.cursor.read_byte()?;
            if code == STOP {
                return Ok(fields);
            }
            let entry =
                TypeRegistry::lookup(code).ok_or(DecodeError::UnknownType { code, offset })?;
            let id = self.cursor.read_i16()?;
            let value = (entry.read)(self)?;
            trace!(field_id = id, wire_type = %entry.wire_type(), offset, "field");
            fields.push(Field {
                id,
                wire_type: entry.wire_type(),
                value,
            });
        }
    }

    /// Hands out the next synthetic struct name.
    fn next_struct_name(&mut self) -> StructName {
        let name = StructName(self.next_struct);
        self.next_struct += 1;
        name
    }
}

// ---------------------------------------------------------------------------
// Registry readers
// ---------------------------------------------------------------------------
//
// Free functions rather than methods so that they coerce to the
// higher-ranked `ReadFn` pointer stored in the registry.

pub(crate) fn read_bool(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.cursor.read_bool().map(Value::Bool)
}

pub(crate) fn read_byte(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.cursor.read_byte().map(Value::Byte)
}

pub(crate) fn read_double(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.cursor.read_double().map(Value::Double)
}

pub(crate) fn read_i16(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.cursor.read_i16().map(Value::I16)
}

pub(crate) fn read_i32(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.cursor.read_i32().map(Value::I32)
}

pub(crate) fn read_i64(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.cursor.read_i64().map(Value::I64)
}

pub(crate) fn read_string(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.cursor.read_string().map(Value::String)
}

/// Reads a nested struct, files it in the struct table, and returns a
/// reference to it.
///
/// The name is allocated after the body is complete, so structs nested
/// inside this one are numbered before it.
pub(crate) fn read_struct(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.enter()?;
    let fields = d.read_struct_body()?;
    d.leave();

    let name = d.next_struct_name();
    trace!(%name, fields = fields.len(), "nested struct");
    d.structs.insert(name, fields);
    Ok(Value::Struct(name))
}
