//! # dllbind-core
//!
//! Decorated-name decoding and P/Invoke binding generation for native DLL
//! exports.
//!
//! This crate provides:
//! - Decoding of export-listing lines into typed signatures
//! - Normalization of raw export names into canonical identifiers
//! - Assembly and emission of `DllImport` declarations
//! - Export listing sources (`dumpbin`, native PE reader, captured text)
//! - A TOML manifest describing which classes want which bindings
//!
//! ## Signature Grammar
//!
//! Only free functions with a flat run of primitive parameter types are
//! handled (`?name@@YA<types>@Z`). Everything else in a listing is skipped.
//! See [`symbols`] for the details.

pub mod binding;
pub mod error;
pub mod generator;
pub mod listing;
pub mod manifest;
pub mod prelude;
pub mod symbols;
pub mod types;

// Re-export commonly used types
pub use binding::{BindingDeclaration, BindingTarget, SourceUnit};
pub use error::{BindError, BindResult};
pub use generator::{GenerationReport, Generator};
pub use types::{DecodedExport, DecodedType, Primitive};
