//! Message envelope: the decode entry point.
//!
//! ```text
//! ┌──────────────┬───────────┬──────────────────────┬─────────────┬─────────────┐
//! │ version: i16 │ kind: i16 │ method: i32 len + b  │ seqid: i32  │ struct body │
//! │ 80 01        │ 00 01     │ 00 00 00 04 "ping"   │ 00 00 00 2a │ ... 00      │
//! └──────────────┴───────────┴──────────────────────┴─────────────┴─────────────┘
//! ```
//!
//! Decoding is a pure function of one buffer. Each call builds its own
//! [`Decoder`], so calls can run on as many threads as the caller likes
//! without any coordination.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::decoder::Decoder;
use crate::error::{DecodeError, DecodeResult, DecodeWarning};
use crate::types::{Message, MessageKind, StructTable};

/// Strict binary protocol version word (`0x8001`) as a signed `i16`.
pub const VERSION_1: i16 = 0x8001_u16 as i16;

/// Everything one decode produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedMessage {
    pub message: Message,
    /// Nested structs in the order their names were assigned.
    pub structs: StructTable,
    /// Recoverable problems noticed along the way.
    pub warnings: Vec<DecodeWarning>,
}

/// Decodes one unframed message with the default [`DecoderConfig`].
///
/// # Errors
/// Any [`DecodeError`] aborts the whole decode. A version word other than
/// [`VERSION_1`] does not; it is recorded in
/// [`DecodedMessage::warnings`] instead.
///
/// ## Example
///
/// ```rust
/// use thriftdump_protocol::{decode, MessageKind};
///
/// let bytes = [
///     0x80, 0x01, 0x00, 0x01, // version, call
///     0x00, 0x00, 0x00, 0x04, b'p', b'i', b'n', b'g',
///     0x00, 0x00, 0x00, 0x2a, // seq id 42
///     0x00, // empty struct
/// ];
/// let decoded = decode(&bytes).unwrap();
/// assert_eq!(decoded.message.kind, MessageKind::Call);
/// assert_eq!(decoded.message.method_name, "ping");
/// assert!(decoded.message.fields.is_empty());
/// ```
pub fn decode(buf: &[u8]) -> DecodeResult<DecodedMessage> {
    decode_with_config(buf, &DecoderConfig::default())
}

/// Decodes one unframed message with an explicit configuration.
pub fn decode_with_config(buf: &[u8], config: &DecoderConfig) -> DecodeResult<DecodedMessage> {
    let mut decoder = Decoder::new(buf, config);
    let mut warnings = Vec::new();

    let version = decoder.cursor.read_i16()?;
    if version != VERSION_1 {
        warn!(
            expected = VERSION_1,
            found = version,
            "unexpected protocol version, decoding anyway"
        );
        warnings.push(DecodeWarning::VersionMismatch {
            expected: VERSION_1,
            found: version,
        });
    }

    let kind_offset = decoder.cursor.position();
    let raw_kind = decoder.cursor.read_i16()?;
    let kind = MessageKind::from_i16(raw_kind).ok_or(DecodeError::UnknownMessageKind {
        kind: raw_kind,
        offset: kind_offset,
    })?;

    let method_name = decoder.cursor.read_string()?;
    let sequence_id = decoder.cursor.read_i32()?;
    let fields = decoder.read_struct_body()?;

    let trailing = decoder.cursor.remaining();
    if trailing > 0 {
        debug!(trailing, "bytes left after top-level struct");
    }

    let structs: StructTable = decoder.into_structs();
    debug!(
        method = %method_name,
        sequence_id,
        %kind,
        fields = fields.len(),
        structs = structs.len(),
        "message decoded"
    );

    Ok(DecodedMessage {
        message: Message {
            version,
            kind,
            method_name,
            sequence_id,
            fields,
        },
        structs,
        warnings,
    })
}
