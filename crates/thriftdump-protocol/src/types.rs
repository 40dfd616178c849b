//! Decoded data model.
//!
//! These are the types a decode produces: the message envelope, its field
//! tree, and the table of nested structs discovered along the way. Nothing
//! here knows how to read bytes; that lives in [`crate::decoder`].
//!
//! ```text
//! Message { version, kind, method_name, sequence_id, fields }
//!                                                      │
//!   Field { id: 1, wire_type: Struct, value: Struct(UnknownStruct0) }
//!                                                      │
//! StructTable ─────────── UnknownStruct0 → [Field, Field, ...]
//! ```

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// WireType
// ---------------------------------------------------------------------------

/// The type tag that precedes every field value on the wire.
///
/// Codes 0 (stop), 1, 5, 7 and 9 are not value types in this protocol
/// version; see [`crate::TypeRegistry`] for the lookup that rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum WireType {
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
    Enum = 16,
}

impl WireType {
    /// The integer code written on the wire.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Lower-case name used in reports (`"i32"`, `"struct"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Double => "double",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::String => "string",
            Self::Struct => "struct",
            Self::Map => "map",
            Self::Set => "set",
            Self::List => "list",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// MessageKind
// ---------------------------------------------------------------------------

/// The message type carried in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Call = 1,
    Reply = 2,
    Oneway = 3,
}

impl MessageKind {
    /// Maps the wire value to a kind, or `None` outside `1..=3`.
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Call),
            2 => Some(Self::Reply),
            3 => Some(Self::Oneway),
            _ => None,
        }
    }

    /// The integer written on the wire.
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Reply => "reply",
            Self::Oneway => "oneway",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// StructName
// ---------------------------------------------------------------------------

/// Synthetic identifier for a nested struct.
///
/// There is no schema to tell us what a nested struct is called, so the
/// decoder numbers them. The number is scoped to one decode call and
/// increases monotonically, so two structs in the same message never share
/// a name. Displays as `UnknownStruct<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructName(pub u64);

impl fmt::Display for StructName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnknownStruct{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A list or set payload.
///
/// Sets are kept in wire order with duplicates intact. Enforcing set
/// semantics is the schema's job, not the decoder's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListValue {
    pub element_type: WireType,
    pub elements: Vec<Value>,
}

impl ListValue {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A map payload, as an ordered list of pairs.
///
/// Wire order is preserved and repeated keys are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    pub key_type: WireType,
    pub value_type: WireType,
    pub entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A decoded field value.
///
/// Nested structs are not embedded: a struct value is a reference to the
/// [`StructTable`] entry holding its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    Byte(u8),
    #[serde(with = "double_repr")]
    Double(f64),
    I16(i16),
    I32(i32),
    I64(i64),
    String(String),
    Struct(StructName),
    Map(MapValue),
    Set(ListValue),
    List(ListValue),
    Enum(i32),
}

impl Value {
    /// The wire type this value was decoded as.
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::Bool(_) => WireType::Bool,
            Self::Byte(_) => WireType::Byte,
            Self::Double(_) => WireType::Double,
            Self::I16(_) => WireType::I16,
            Self::I32(_) => WireType::I32,
            Self::I64(_) => WireType::I64,
            Self::String(_) => WireType::String,
            Self::Struct(_) => WireType::Struct,
            Self::Map(_) => WireType::Map,
            Self::Set(_) => WireType::Set,
            Self::List(_) => WireType::List,
            Self::Enum(_) => WireType::Enum,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) | Self::Enum(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Struct(name) => write!(f, "{name}"),
            Self::List(list) => {
                f.write_str("[")?;
                write_separated(f, &list.elements)?;
                f.write_str("]")
            }
            Self::Set(set) => {
                f.write_str("{")?;
                write_separated(f, &set.elements)?;
                f.write_str("}")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// JSON has no NaN or infinity, so those are written as the strings
/// `"NaN"`, `"inf"` and `"-inf"` (the same spelling `Display` uses).
mod double_repr {
    use serde::de::Error as _;

    use super::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Name(String),
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Name(name) => match name.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                _ => Err(D::Error::custom(format!("invalid double {name:?}"))),
            },
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Fields and structs
// ---------------------------------------------------------------------------

/// One `(field id, type tag, value)` triple from a struct body.
///
/// Field ids are not assumed unique within a struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: i16,
    pub wire_type: WireType,
    pub value: Value,
}

/// The fields of one struct, in wire order.
pub type FieldList = Vec<Field>;

/// Every nested struct found during one decode, keyed by synthetic name.
///
/// Append-only and insertion-ordered. A struct is inserted only after its
/// whole body has been read, so an entry is never referenced before it
/// exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructTable {
    entries: Vec<(StructName, FieldList)>,
}

impl StructTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: StructName, fields: FieldList) {
        self.entries.push((name, fields));
    }

    /// Looks up a struct's fields by synthetic name.
    pub fn get(&self, name: StructName) -> Option<&[Field]> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, fields)| fields.as_slice())
    }

    /// Iterates entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (StructName, &[Field])> {
        self.entries
            .iter()
            .map(|(name, fields)| (*name, fields.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializes as a map from `UnknownStruct<N>` to fields, in discovery order.
impl Serialize for StructTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, fields) in &self.entries {
            map.serialize_entry(&name.to_string(), fields)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A decoded message envelope plus its top-level argument/result struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Raw version word. `-32767` (`0x8001`) for strict binary protocol.
    pub version: i16,
    pub kind: MessageKind,
    pub method_name: String,
    pub sequence_id: i32,
    pub fields: FieldList,
}

// =========================================================================
// Tests
// =========================================================================
