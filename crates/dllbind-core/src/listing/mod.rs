//! # Export Listings
//!
//! Sources of raw export-listing text for a binary.
//!
//! The decoder only needs one line of text per exported symbol. Where that
//! text comes from is up to the [`ExportSource`]:
//!
//! - [`DumpbinSource`]: runs `dumpbin /EXPORTS` and captures its output
//! - [`PeExportSource`]: reads the PE export table directly
//! - [`TextListingSource`]: reads a listing captured earlier
//!
//! All sources capture the full output in memory with one synchronous call.

pub mod dumpbin;
pub mod pe;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::BindResult;

pub use dumpbin::{DumpbinSource, DEFAULT_TOOL};
pub use pe::{PeExportSource, export_lines};

/// Produces the export listing of one binary.
pub trait ExportSource: Send + Sync
{
    /// Capture the full listing for `binary`.
    ///
    /// ## Errors
    ///
    /// Returns an error when the binary cannot be read or the listing cannot be
    /// produced. A listing with no decodable lines is not an error.
    fn listing(&self, binary: &Path) -> BindResult<String>;

    /// Short name used in log events.
    fn name(&self) -> &'static str;
}

/// Listing captured ahead of time; the binary path points at the text file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextListingSource;

impl ExportSource for TextListingSource
{
    fn listing(&self, binary: &Path) -> BindResult<String>
    {
        let text = fs::read_to_string(binary)?;
        debug!(path = %binary.display(), bytes = text.len(), "read captured listing");
        Ok(text)
    }

    fn name(&self) -> &'static str
    {
        "text"
    }
}

/// Selects an [`ExportSource`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind
{
    /// External `dumpbin` tool (default)
    #[default]
    Dumpbin,
    /// Native PE export table reader
    Pe,
    /// Captured listing text file
    Text,
}

impl ListingKind
{
    /// Build the source; `tool` only matters for [`ListingKind::Dumpbin`].
    pub fn source(self, tool: Option<PathBuf>) -> Box<dyn ExportSource>
    {
        match self {
            ListingKind::Dumpbin => Box::new(DumpbinSource::new(tool.unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL)))),
            ListingKind::Pe => Box::new(PeExportSource),
            ListingKind::Text => Box::new(TextListingSource),
        }
    }
}

impl FromStr for ListingKind
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "dumpbin" => Ok(ListingKind::Dumpbin),
            "pe" | "native" => Ok(ListingKind::Pe),
            "text" | "listing" => Ok(ListingKind::Text),
            _ => Err(format!("Unknown listing source: {s}. Use 'dumpbin', 'pe' or 'text'")),
        }
    }
}

impl fmt::Display for ListingKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            ListingKind::Dumpbin => "dumpbin",
            ListingKind::Pe => "pe",
            ListingKind::Text => "text",
        };
        write!(f, "{label}")
    }
}
