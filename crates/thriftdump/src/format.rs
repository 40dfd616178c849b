//! Report formats for decoded messages.
//!
//! The decoder hands back a data model ([`DecodedMessage`]); how that is
//! shown to a person is a separate concern. Anything implementing
//! [`ReportFormat`] can turn a decoded message into a string, and callers
//! pick one without caring which.
//!
//! - [`TextFormat`]: the classic aligned text dump, one line per field.
//! - [`JsonFormat`]: pretty JSON of the full data model (needs the
//!   `json` feature, on by default).

use std::str::FromStr;

use thriftdump_protocol::{DecodedMessage, Field};

use crate::ReportError;

/// Renders a decoded message as text.
///
/// `Send + Sync + 'static` so one formatter can be shared by every
/// decode task in a batch.
pub trait ReportFormat: Send + Sync + 'static {
    /// Renders one message.
    ///
    /// # Errors
    /// Returns [`ReportError`] if the backing serializer fails.
    fn render(&self, decoded: &DecodedMessage) -> Result<String, ReportError>;
}

// ---------------------------------------------------------------------------
// TextFormat
// ---------------------------------------------------------------------------

/// Human-readable layout.
///
/// ```text
/// version: -32767
/// type:    1 (call)
/// method:  ping
/// seq id:  42
///
/// Message:
///   id:    1     type: struct     value: UnknownStruct0
///
/// Structs:
/// UnknownStruct0:
///
///   id:    1     type: string     value: "hello"
/// ```
///
/// Decode warnings, if any, follow the header as `warning: ...` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormat;

impl TextFormat {
    fn field_line(field: &Field) -> String {
        format!(
            "\n  id: {:4}     type: {:10} value: {}",
            field.id,
            field.wire_type.name(),
            field.value
        )
    }
}

impl ReportFormat for TextFormat {
    fn render(&self, decoded: &DecodedMessage) -> Result<String, ReportError> {
        let message = &decoded.message;
        let mut out = format!(
            "version: {}\ntype:    {} ({})\nmethod:  {}\nseq id:  {}",
            message.version,
            message.kind.code(),
            message.kind,
            message.method_name,
            message.sequence_id,
        );
        for warning in &decoded.warnings {
            out.push_str(&format!("\nwarning: {warning}"));
        }

        out.push_str("\n\nMessage:");
        for field in &message.fields {
            out.push_str(&Self::field_line(field));
        }

        if !decoded.structs.is_empty() {
            out.push_str("\n\nStructs:");
            for (name, fields) in decoded.structs.iter() {
                out.push_str(&format!("\n{name}:\n"));
                for field in fields {
                    out.push_str(&Self::field_line(field));
                }
            }
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// JsonFormat
// ---------------------------------------------------------------------------

/// Pretty-printed JSON of the whole [`DecodedMessage`].
///
/// Nested structs appear under `"structs"` keyed by synthetic name, in the
/// order they were discovered.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

#[cfg(feature = "json")]
impl ReportFormat for JsonFormat {
    fn render(&self, decoded: &DecodedMessage) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(decoded)?)
    }
}

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

/// Format selector for command-line use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    #[cfg(feature = "json")]
    Json,
}

impl OutputFormat {
    /// Returns the formatter for this selection.
    pub fn formatter(self) -> Box<dyn ReportFormat> {
        match self {
            Self::Text => Box::new(TextFormat),
            #[cfg(feature = "json")]
            Self::Json => Box::new(JsonFormat),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            #[cfg(feature = "json")]
            "json" => Ok(Self::Json),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            #[cfg(feature = "json")]
            Self::Json => f.write_str("json"),
        }
    }
}
