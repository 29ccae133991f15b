//! Common module for library exports

pub use crate::binding::{assemble, BindingDeclaration, BindingTarget, ScopeBlock, SourceUnit};
pub use crate::error::{BindError, BindResult};
pub use crate::generator::{GenerationReport, Generator};
pub use crate::listing::{ExportSource, ListingKind};
pub use crate::symbols::{decode_line, decode_listing, to_pascal_case, ListingReport};
pub use crate::types::{DecodedExport, DecodedType, Primitive};
