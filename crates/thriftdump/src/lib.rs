//! # thriftdump
//!
//! Inspect raw Thrift Binary Protocol messages without the IDL that
//! produced them.
//!
//! This crate wraps the decoder in [`thriftdump_protocol`] with what a
//! tracer or debugging tool needs around it: reading inputs, rendering
//! reports, and one error type for all of it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use thriftdump::prelude::*;
//!
//! # fn main() -> Result<(), ThriftdumpError> {
//! let decoded = inspect_file("capture.bin", &DecoderConfig::default())?;
//! println!("{}", TextFormat.render(&decoded)?);
//! # Ok(())
//! # }
//! ```

mod error;
mod format;
mod inspect;

pub use error::{ReportError, ThriftdumpError};
#[cfg(feature = "json")]
pub use format::JsonFormat;
pub use format::{OutputFormat, ReportFormat, TextFormat};
pub use inspect::{Inspection, inspect_bytes, inspect_file, inspect_files};

/// Re-export of the decoder crate.
pub use thriftdump_protocol as protocol;

pub mod prelude {
    //! Everything a typical caller needs in one import.

    #[cfg(feature = "json")]
    pub use crate::JsonFormat;
    pub use crate::{
        Inspection, OutputFormat, ReportError, ReportFormat, TextFormat, ThriftdumpError,
        inspect_bytes, inspect_file, inspect_files,
    };
    pub use thriftdump_protocol::{
        DecodeError, DecodeWarning, DecodedMessage, DecoderConfig, Field, Message, MessageKind,
        StructName, StructTable, Value, WireType, decode, decode_with_config,
    };
}
