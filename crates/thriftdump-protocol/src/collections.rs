//! Readers for the aggregate wire types.
//!
//! ```text
//! list / set:  elem_type: u8 │ count: i32 │ elem × count
//! map:         key_type: u8 │ value_type: u8 │ count: i32 │ (key, value) × count
//! enum:        i32
//! ```
//!
//! Element readers come from the same registry as struct fields, so a
//! list of structs registers each element in the struct table just like a
//! struct-typed field would.

use tracing::trace;

use crate::decoder::Decoder;
use crate::error::DecodeResult;
use crate::types::{ListValue, MapValue, Value};

/// Upper bound for pre-allocation. Every element takes at least one byte
/// on the wire, so a count larger than what is left cannot be honest.
fn capacity_hint(d: &Decoder<'_>, count: usize) -> usize {
    count.min(d.cursor.remaining())
}

fn read_list_value(d: &mut Decoder<'_>) -> DecodeResult<ListValue> {
    let element = d.read_type_entry()?;
    let count = d.cursor.read_length()?;
    trace!(element_type = %element.wire_type(), count, "list/set");

    d.enter()?;
    let mut elements = Vec::with_capacity(capacity_hint(d, count));
    for _ in 0..count {
        elements.push((element.read)(d)?);
    }
    d.leave();

    Ok(ListValue {
        element_type: element.wire_type(),
        elements,
    })
}

pub(crate) fn read_list(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    read_list_value(d).map(Value::List)
}

/// Same layout as a list. Duplicates are not removed.
pub(crate) fn read_set(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    read_list_value(d).map(Value::Set)
}

pub(crate) fn read_map(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    let key = d.read_type_entry()?;
    let value = d.read_type_entry()?;
    let count = d.cursor.read_length()?;
    trace!(key_type = %key.wire_type(), value_type = %value.wire_type(), count, "map");

    d.enter()?;
    let mut entries = Vec::with_capacity(capacity_hint(d, count));
    for _ in 0..count {
        let k = (key.read)(d)?;
        let v = (value.read)(d)?;
        entries.push((k, v));
    }
    d.leave();

    Ok(Value::Map(MapValue {
        key_type: key.wire_type(),
        value_type: value.wire_type(),
        entries,
    }))
}

pub(crate) fn read_enum(d: &mut Decoder<'_>) -> DecodeResult<Value> {
    d.cursor.read_i32().map(Value::Enum)
}
