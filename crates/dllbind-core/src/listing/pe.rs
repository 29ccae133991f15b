//! Native PE export-table reader.
//!
//! Produces the same shape of listing `dumpbin /EXPORTS` prints, so the rest
//! of the pipeline cannot tell the two sources apart:
//!
//! ```text
//!          1          00001010 ?add@@YAHHH@Z
//!          2          00001020 ?scale@@YAXPEAMM@Z
//!          3                   ?legacy@@YAHXZ (forwarded to other.Legacy)
//!          4          00001030
//! ```
//!
//! Works on any host; no Windows SDK required.

use std::fs;
use std::path::Path;

use object::pe::{ImageNtHeaders32, ImageNtHeaders64};
use object::read::pe::{Export, ExportTarget, ImageNtHeaders, PeFile};
use object::FileKind;
use tracing::debug;

use super::ExportSource;
use crate::error::{BindError, BindResult};

/// Reads exports straight out of a PE32 or PE32+ image.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeExportSource;

impl ExportSource for PeExportSource
{
    fn listing(&self, binary: &Path) -> BindResult<String>
    {
        let data = fs::read(binary)?;
        let kind = FileKind::parse(&*data).map_err(|err| map_object_error(binary, &err))?;
        let lines = match kind {
            FileKind::Pe32 => export_lines::<ImageNtHeaders32>(&data),
            FileKind::Pe64 => export_lines::<ImageNtHeaders64>(&data),
            _ => return Err(BindError::NotPortableExecutable(binary.to_path_buf())),
        }
        .map_err(|err| map_object_error(binary, &err))?;

        debug!(binary = %binary.display(), exports = lines.len(), "read PE export table");
        Ok(lines.join("\n"))
    }

    fn name(&self) -> &'static str
    {
        "pe"
    }
}

/// Render every export of a PE image as one listing line, in ordinal order.
///
/// ## Errors
///
/// Returns the `object` error when the image or its export directory is
/// malformed. An image without an export directory yields no lines.
pub fn export_lines<Pe: ImageNtHeaders>(data: &[u8]) -> object::Result<Vec<String>>
{
    let file = PeFile::<Pe>::parse(data)?;
    let Some(table) = file.export_table()? else {
        return Ok(Vec::new());
    };

    let lines = table.exports()?.iter().map(listing_line).collect();
    Ok(lines)
}

/// Ordinal right-aligned in ten columns, then the RVA (blank for forwarders),
/// then the name when the export has one.
fn listing_line(export: &Export<'_>) -> String
{
    let mut line = match export.target {
        ExportTarget::Address(rva) => format!("{:>10}          {rva:08X}", export.ordinal),
        ExportTarget::ForwardByName(..) | ExportTarget::ForwardByOrdinal(..) => {
            format!("{:>10}{:18}", export.ordinal, "")
        }
    };

    if let Some(name) = export.name {
        line.push(' ');
        line.push_str(&String::from_utf8_lossy(name));
    }

    match export.target {
        ExportTarget::Address(_) => {}
        ExportTarget::ForwardByName(library, symbol) => line.push_str(&format!(
            " (forwarded to {}.{})",
            String::from_utf8_lossy(library),
            String::from_utf8_lossy(symbol)
        )),
        ExportTarget::ForwardByOrdinal(library, ordinal) => {
            line.push_str(&format!(" (forwarded to {}.#{ordinal})", String::from_utf8_lossy(library)));
        }
    }
    line
}

fn map_object_error(binary: &Path, err: &object::Error) -> BindError
{
    BindError::Object(format!("{}: {err}", binary.display()))
}
