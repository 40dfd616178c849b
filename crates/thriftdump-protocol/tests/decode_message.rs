//! End-to-end decoding of hand-built binary protocol messages.
//!
//! Messages are assembled byte by byte with the small [`Wire`] helper
//! below. The library has no encoder, so this is the only place bytes
//! are produced.

use thriftdump_protocol::{
    DecodeError, DecodeWarning, DecoderConfig, Field, ListValue, MessageKind, StructName, Value,
    WireType, decode, decode_with_config,
};

// =========================================================================
// Helper
// =========================================================================

#[derive(Default)]
struct Wire(Vec<u8>);

impl Wire {
    fn header(kind: i16, method: &str, seq: i32) -> Self {
        let mut w = Self::default();
        w.i16(-32767).i16(kind).string(method).i32(seq);
        w
    }

    fn byte(&mut self, v: u8) -> &mut Self {
        self.0.push(v);
        self
    }

    fn i16(&mut self, v: i16) -> &mut Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn i32(&mut self, v: i32) -> &mut Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn i64(&mut self, v: i64) -> &mut Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn double(&mut self, v: f64) -> &mut Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn string(&mut self, v: &str) -> &mut Self {
        self.i32(v.len() as i32);
        self.0.extend_from_slice(v.as_bytes());
        self
    }

    /// Field header: type tag + field id.
    fn field(&mut self, wire_type: WireType, id: i16) -> &mut Self {
        self.byte(wire_type.code()).i16(id)
    }

    fn stop(&mut self) -> &mut Self {
        self.byte(0)
    }

    fn bytes(&self) -> &[u8] {
        &self.0
    }
}

fn only_field(fields: &[Field]) -> &Value {
    assert_eq!(fields.len(), 1, "expected exactly one field");
    &fields[0].value
}

// =========================================================================
// Envelope
// =========================================================================

#[test]
fn test_ping_scenario_bytes() {
    let bytes = [
        0x80, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x04, 0x70, 0x69, 0x6e, 0x67, 0x00, 0x00,
        0x00, 0x2a, 0x00,
    ];
    let decoded = decode(&bytes).unwrap();

    assert_eq!(decoded.message.version, -32767);
    assert_eq!(decoded.message.kind, MessageKind::Call);
    assert_eq!(decoded.message.method_name, "ping");
    assert_eq!(decoded.message.sequence_id, 42);
    assert!(decoded.message.fields.is_empty());
}

#[test]
fn test_old_style_version_still_decodes_with_warning() {
    let mut w = Wire::default();
    w.byte(0x00).byte(0x01).i16(2).string("getUser").i32(7);
    w.field(WireType::I32, 1).i32(99).stop();

    let decoded = decode(w.bytes()).unwrap();
    assert_eq!(decoded.message.kind, MessageKind::Reply);
    assert_eq!(decoded.message.method_name, "getUser");
    assert_eq!(decoded.message.sequence_id, 7);
    assert_eq!(only_field(&decoded.message.fields), &Value::I32(99));
    assert!(matches!(
        decoded.warnings.as_slice(),
        [DecodeWarning::VersionMismatch { found: 1, .. }]
    ));
}

// =========================================================================
// Scalars
// =========================================================================

#[test]
fn test_every_scalar_type_in_one_struct() {
    let mut w = Wire::header(1, "scalars", 1);
    w.field(WireType::Bool, 1).byte(1);
    w.field(WireType::Byte, 2).byte(0x7f);
    w.field(WireType::Double, 3).double(-0.5);
    w.field(WireType::I16, 4).i16(i16::MIN);
    w.field(WireType::I32, 5).i32(-1);
    w.field(WireType::I64, 6).i64(i64::MAX);
    w.field(WireType::String, 7).string("hello");
    w.field(WireType::Enum, 8).i32(4);
    w.stop();

    let decoded = decode(w.bytes()).unwrap();
    let values: Vec<&Value> = decoded.message.fields.iter().map(|f| &f.value).collect();
    assert_eq!(
        values,
        vec![
            &Value::Bool(true),
            &Value::Byte(0x7f),
            &Value::Double(-0.5),
            &Value::I16(i16::MIN),
            &Value::I32(-1),
            &Value::I64(i64::MAX),
            &Value::String("hello".into()),
            &Value::Enum(4),
        ]
    );
    for field in &decoded.message.fields {
        assert_eq!(field.wire_type, field.value.wire_type());
    }
}

#[test]
fn test_truncated_string_body_fails_whole_decode() {
    let mut w = Wire::header(1, "m", 1);
    w.field(WireType::String, 1).i32(5);
    w.byte(b'h').byte(b'e').byte(b'l');

    assert!(matches!(
        decode(w.bytes()),
        Err(DecodeError::TruncatedInput {
            needed: 5,
            remaining: 3,
            ..
        })
    ));
}

// =========================================================================
// Struct naming
// =========================================================================

#[test]
fn test_four_nested_structs_get_distinct_monotonic_names() {
    // top { 1: A { 1: B {} }, 2: C { 1: D {} } }
    let mut w = Wire::header(1, "nest", 1);
    w.field(WireType::Struct, 1);
    w.field(WireType::Struct, 1).stop(); // B
    w.stop(); // A
    w.field(WireType::Struct, 2);
    w.field(WireType::Struct, 1).stop(); // D
    w.stop(); // C
    w.stop(); // top

    let decoded = decode(w.bytes()).unwrap();
    let names: Vec<StructName> = decoded.structs.iter().map(|(n, _)| n).collect();
    assert_eq!(
        names,
        vec![StructName(0), StructName(1), StructName(2), StructName(3)]
    );

    // Names are assigned when a struct is complete: inner before outer.
    let top = &decoded.message.fields;
    assert_eq!(top[0].value, Value::Struct(StructName(1)));
    assert_eq!(top[1].value, Value::Struct(StructName(3)));

    let a = decoded.structs.get(StructName(1)).unwrap();
    assert_eq!(only_field(a), &Value::Struct(StructName(0)));
    let c = decoded.structs.get(StructName(3)).unwrap();
    assert_eq!(only_field(c), &Value::Struct(StructName(2)));

    assert!(decoded.structs.get(StructName(0)).unwrap().is_empty());
    assert!(decoded.structs.get(StructName(2)).unwrap().is_empty());
}

#[test]
fn test_every_struct_reference_resolves() {
    let mut w = Wire::header(1, "refs", 1);
    w.field(WireType::List, 1).byte(WireType::Struct.code()).i32(2);
    w.field(WireType::I32, 1).i32(1).stop();
    w.field(WireType::Struct, 9).stop().stop();
    w.field(WireType::Map, 2)
        .byte(WireType::I16.code())
        .byte(WireType::Struct.code())
        .i32(1);
    w.i16(5).stop();
    w.stop();

    let decoded = decode(w.bytes()).unwrap();
    assert_eq!(decoded.structs.len(), 4);

    fn refs(value: &Value, out: &mut Vec<StructName>) {
        match value {
            Value::Struct(name) => out.push(*name),
            Value::List(l) | Value::Set(l) => l.elements.iter().for_each(|v| refs(v, out)),
            Value::Map(m) => m.entries.iter().for_each(|(k, v)| {
                refs(k, out);
                refs(v, out);
            }),
            _ => {}
        }
    }

    let mut names = Vec::new();
    for field in &decoded.message.fields {
        refs(&field.value, &mut names);
    }
    for (_, fields) in decoded.structs.iter() {
        for field in fields {
            refs(&field.value, &mut names);
        }
    }
    for name in names {
        assert!(decoded.structs.get(name).is_some(), "{name} is dangling");
    }
}

#[test]
fn test_separate_decodes_each_start_at_zero() {
    let mut w = Wire::header(1, "again", 1);
    w.field(WireType::Struct, 1).stop().stop();

    let first = decode(w.bytes()).unwrap();
    let second = decode(w.bytes()).unwrap();
    assert_eq!(
        first.message.fields[0].value,
        Value::Struct(StructName(0))
    );
    assert_eq!(first, second);
}

#[test]
fn test_parallel_decodes_share_nothing() {
    let mut w = Wire::header(1, "threads", 1);
    w.field(WireType::Struct, 1).stop();
    w.field(WireType::Struct, 2).stop();
    w.stop();
    let bytes = w.bytes().to_vec();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bytes = bytes.clone();
            std::thread::spawn(move || decode(&bytes).unwrap())
        })
        .collect();

    for handle in handles {
        let decoded = handle.join().unwrap();
        let names: Vec<StructName> = decoded.structs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec![StructName(0), StructName(1)]);
    }
}

// =========================================================================
// Collections
// =========================================================================

#[test]
fn test_list_of_lists() {
    let mut w = Wire::header(1, "grid", 1);
    w.field(WireType::List, 1).byte(WireType::List.code()).i32(2);
    w.byte(WireType::I16.code()).i32(2).i16(1).i16(2);
    w.byte(WireType::I16.code()).i32(0);
    w.stop();

    let decoded = decode(w.bytes()).unwrap();
    assert_eq!(
        only_field(&decoded.message.fields),
        &Value::List(ListValue {
            element_type: WireType::List,
            elements: vec![
                Value::List(ListValue {
                    element_type: WireType::I16,
                    elements: vec![Value::I16(1), Value::I16(2)],
                }),
                Value::List(ListValue {
                    element_type: WireType::I16,
                    elements: vec![],
                }),
            ],
        })
    );
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn test_reserved_type_tag_is_unknown_at_its_offset() {
    let mut w = Wire::header(1, "bad", 1);
    let tag_offset = w.bytes().len();
    w.byte(1).i16(1).i32(0);

    assert_eq!(
        decode(w.bytes()).unwrap_err(),
        DecodeError::UnknownType {
            code: 1,
            offset: tag_offset,
        }
    );
}

#[test]
fn test_unknown_tag_inside_nested_struct_aborts_everything() {
    let mut w = Wire::header(1, "deep", 1);
    w.field(WireType::Struct, 1);
    w.field(WireType::Struct, 1);
    let tag_offset = w.bytes().len();
    w.byte(17).i16(1);

    assert_eq!(
        decode(w.bytes()).unwrap_err(),
        DecodeError::UnknownType {
            code: 17,
            offset: tag_offset,
        }
    );
}

#[test]
fn test_missing_stop_in_nested_struct_is_truncated() {
    let mut w = Wire::header(1, "open", 1);
    w.field(WireType::Struct, 1).field(WireType::Bool, 1).byte(0);

    assert!(matches!(
        decode(w.bytes()),
        Err(DecodeError::TruncatedInput { needed: 1, remaining: 0, .. })
    ));
}

#[test]
fn test_depth_limit_is_configurable() {
    // Three levels of nesting below the top-level struct.
    let mut w = Wire::header(1, "depth", 1);
    w.field(WireType::Struct, 1);
    w.field(WireType::Struct, 1);
    w.field(WireType::Struct, 1).stop();
    w.stop().stop().stop();

    assert!(decode_with_config(w.bytes(), &DecoderConfig::default().with_max_depth(3)).is_ok());
    assert!(matches!(
        decode_with_config(w.bytes(), &DecoderConfig::default().with_max_depth(2)),
        Err(DecodeError::MaxDepthExceeded { max_depth: 2, .. })
    ));
}

#[test]
fn test_hostile_nesting_hits_default_limit() {
    let mut w = Wire::header(1, "bomb", 1);
    for _ in 0..10_000 {
        w.field(WireType::Struct, 1);
    }

    assert!(matches!(
        decode(w.bytes()),
        Err(DecodeError::MaxDepthExceeded { max_depth: 64, .. })
    ));
}
