//! Signature decoding for export-listing lines.
//!
//! An export listing has one line per exported symbol. Only lines carrying a
//! decorated free-function name are of interest:
//!
//! ```text
//!          12    B 00011023 ?foo@@YAXH@Z = @ILT+30(?foo@@YAXH@Z)
//! ```
//!
//! The grammar picks out the ordinal (`12`), the identifier (`foo`) and the
//! type run between `@@YA` and the terminator (`XH`). `XZ` and `@Z` both end a
//! run and mean the same thing here. Everything else on the line is ignored.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, trace, warn};

use super::lexer::TypeLexer;
use crate::error::{BindError, BindResult};
use crate::types::DecodedExport;

static EXPORT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+).*?\?([_a-zA-Z][_a-zA-Z0-9]*)@@YA([_A-Z]*)(XZ|@Z)").expect("export line pattern is valid")
});

/// Fields captured from a line that matches the export grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLine<'a>
{
    pub ordinal: u32,
    pub identifier: &'a str,
    pub type_run: &'a str,
}

impl<'a> ExportLine<'a>
{
    /// Match `line` against the export grammar.
    ///
    /// Returns `None` for lines that do not match, including lines whose
    /// ordinal does not fit in a `u32`.
    pub fn parse(line: &'a str) -> Option<Self>
    {
        let captures = EXPORT_LINE.captures(line)?;
        let ordinal = captures.get(1)?.as_str().parse().ok()?;
        Some(Self {
            ordinal,
            identifier: captures.get(2)?.as_str(),
            type_run: captures.get(3)?.as_str(),
        })
    }
}

/// Decode one raw listing line.
///
/// ## Returns
///
/// - `Ok(Some(export))` for a line with a usable signature
/// - `Ok(None)` when the line does not match the grammar, or when its type run
///   is empty (there is no return type to bind)
///
/// ## Errors
///
/// `BindError::UnrecognizedTypeCode` when the type run holds a code outside
/// the table. No partial export is produced for such a line.
///
/// ## Example
///
/// ```rust
/// use dllbind_core::symbols::decode_line;
///
/// let export = decode_line("    12    0 00001000 ?foo@@YAXH@Z").unwrap().unwrap();
/// assert_eq!(export.ordinal, 12);
/// assert_eq!(export.raw_identifier, "foo");
/// assert_eq!(export.return_type.to_string(), "void");
/// assert_eq!(export.parameters[0].to_string(), "int");
/// ```
pub fn decode_line(line: &str) -> BindResult<Option<DecodedExport>>
{
    let Some(fields) = ExportLine::parse(line) else {
        return Ok(None);
    };

    let mut lexer = TypeLexer::new(fields.type_run);
    let Some(return_type) = lexer.next_type()? else {
        trace!(identifier = fields.identifier, "empty signature, skipping");
        return Ok(None);
    };

    let mut parameters = Vec::new();
    while let Some(parameter) = lexer.next_type()? {
        parameters.push(parameter);
    }

    Ok(Some(DecodedExport {
        ordinal: fields.ordinal,
        raw_identifier: fields.identifier.to_string(),
        return_type,
        parameters,
    }))
}

/// A listing line that matched the grammar but could not be decoded.
#[derive(Debug)]
pub struct RejectedLine
{
    /// 1-based line number inside the listing.
    pub line_number: usize,
    pub text: String,
    pub error: BindError,
}

/// Outcome of decoding a full listing.
#[derive(Debug, Default)]
pub struct ListingReport
{
    /// Decoded exports, in listing order.
    pub exports: Vec<DecodedExport>,
    /// Lines dropped because their signature could not be decoded.
    pub rejected: Vec<RejectedLine>,
}

impl ListingReport
{
    pub fn is_clean(&self) -> bool
    {
        self.rejected.is_empty()
    }
}

/// Decode every line of a listing.
///
/// Lines are decoded independently and in parallel; the report keeps them in
/// listing order. A line that fails never affects any other line.
pub fn decode_listing(listing: &str) -> ListingReport
{
    let lines: Vec<&str> = listing.lines().collect();
    let outcomes: Vec<(usize, &str, BindResult<Option<DecodedExport>>)> = lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| (index + 1, *line, decode_line(line)))
        .collect();

    let mut report = ListingReport::default();
    for (line_number, line, outcome) in outcomes {
        match outcome {
            Ok(Some(export)) => {
                debug!(
                    ordinal = export.ordinal,
                    identifier = %export.raw_identifier,
                    parameters = export.parameters.len(),
                    "decoded export"
                );
                report.exports.push(export);
            }
            Ok(None) => {}
            Err(error) => {
                warn!(line_number, %error, "skipping export with undecodable signature");
                report.rejected.push(RejectedLine {
                    line_number,
                    text: line.trim().to_string(),
                    error,
                });
            }
        }
    }
    report
}
