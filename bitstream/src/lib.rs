//! Byte-level primitives for the buildlink codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for the primitives
//! every build payload is made of: varints, packed boolean [`Flags`] and
//! length-prefixed strings.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked, varints are capped at five bytes.
//! - **No domain knowledge** - This crate knows nothing about builds, slots, or traits.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{ByteReader, ByteWriter, Flags};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_flags(Flags::new().with(2, true), 3).unwrap();
//! writer.write_varu32(300);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert!(reader.read_flags(3).unwrap().get(2));
//! assert_eq!(reader.read_varu32().unwrap(), 300);
//! ```

mod error;
mod flags;
mod reader;
mod writer;

pub use error::{StreamError, StreamResult};
pub use flags::{Flags, MAX_FLAGS};
pub use reader::ByteReader;
pub use writer::ByteWriter;
