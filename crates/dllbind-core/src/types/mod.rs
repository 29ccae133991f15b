//! # Types
//!
//! Value types shared by the decoder, the assembler and the emitter.
//!
//! Everything here is plain data: a closed set of primitives, decoded types
//! carrying pointer depth, and the export record produced for each matching
//! listing line.

pub mod decoded;
pub mod primitive;

// Re-export all public types
pub use decoded::{DecodedExport, DecodedType};
pub use primitive::{Primitive, TYPE_CODES};
