//! # Symbols
//!
//! Decoding of decorated export names and normalization of their identifiers.
//!
//! - [`lexer`]: splits an encoded type run into decoded types
//! - [`signature`]: matches listing lines and builds [`DecodedExport`](crate::types::DecodedExport)s
//! - [`normalize`]: turns raw identifiers into canonical binding names
//!
//! ## Usage
//!
//! ```rust
//! use dllbind_core::symbols::{decode_listing, to_pascal_case};
//!
//! let listing = "    ordinal hint RVA      name\n\
//!                \n          3    2 00001010 ?get_value@@YAHPEAH@Z";
//! let report = decode_listing(listing);
//! assert_eq!(report.exports.len(), 1);
//!
//! let export = &report.exports[0];
//! assert_eq!(to_pascal_case(&export.raw_identifier), "GetValue");
//! assert!(export.requires_unsafe());
//! ```

pub mod lexer;
pub mod normalize;
pub mod signature;

pub use lexer::{lex_type_run, TypeLexer, POINTER_MARKER};
pub use normalize::to_pascal_case;
pub use signature::{decode_line, decode_listing, ExportLine, ListingReport, RejectedLine};
