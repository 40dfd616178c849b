//! Schema-less decoder for the Thrift Binary Protocol.
//!
//! Given one raw, unframed message buffer, this crate rebuilds the
//! envelope (version, kind, method, sequence id) and the complete field
//! tree of the argument/result struct without any IDL. Nested structs have
//! no names on the wire, so each one is given a synthetic name
//! (`UnknownStruct0`, `UnknownStruct1`, ...) and listed in a
//! [`StructTable`].
//!
//! - **Cursor** ([`ByteCursor`]): the only code that touches raw bytes.
//! - **Registry** ([`TypeRegistry`]): static type tag → reader table.
//! - **Decoder** ([`decode`], [`decode_with_config`]): envelope, struct
//!   walk, collections.
//! - **Errors** ([`DecodeError`], [`DecodeWarning`]).
//!
//! # Architecture
//!
//! ```text
//! envelope → struct walker → registry → primitive / collection readers → cursor
//!                  ↑                              │
//!                  └────── nested struct ─────────┘
//! ```
//!
//! # Nesting limit
//!
//! The wire format allows arbitrarily deep nesting. This decoder caps it
//! at [`DecoderConfig::max_depth`] and fails with
//! [`DecodeError::MaxDepthExceeded`] past that, so a hostile buffer cannot
//! blow the stack. Well-formed messages within the limit decode exactly as
//! they would without it.

mod collections;
mod config;
mod cursor;
mod decoder;
mod envelope;
mod error;
mod primitives;
mod registry;
mod types;

pub use config::{DEFAULT_MAX_DEPTH, DecoderConfig};
pub use cursor::ByteCursor;
pub use decoder::STOP;
pub use envelope::{DecodedMessage, VERSION_1, decode, decode_with_config};
pub use error::{DecodeError, DecodeResult, DecodeWarning};
pub use registry::{TypeEntry, TypeRegistry};
pub use types::{
    Field, FieldList, ListValue, MapValue, Message, MessageKind, StructName, StructTable, Value,
    WireType,
};
