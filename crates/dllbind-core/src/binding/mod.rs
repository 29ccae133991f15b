//! # Binding Assembly
//!
//! Turns decoded exports into P/Invoke declarations.
//!
//! Each declaration links by ordinal (`EntryPoint = "#12"`) rather than by the
//! decorated name, so the binding keeps working regardless of how the native
//! compiler decorated the symbol. Parameters carry no names beyond their
//! position (`param1`, `param2`, ...).

pub mod emit;

use std::path::PathBuf;

use crate::symbols::to_pascal_case;
use crate::types::{DecodedExport, DecodedType};

pub use emit::{ScopeBlock, SourceUnit};

/// One class that asked for bindings to one native library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTarget
{
    /// Dot-separated namespace, empty for the global namespace.
    pub namespace: String,
    /// Enclosing class names, outermost first.
    pub nesting: Vec<String>,
    /// Library argument exactly as it should appear in source, quotes included.
    pub library_literal: String,
    /// Resolved library file name.
    pub library: String,
    /// Binary handed to the export-listing source.
    pub binary: PathBuf,
}

impl BindingTarget
{
    /// Name of the generated source unit for this target.
    ///
    /// Only the last path segment of the library name is used, so targets
    /// naming the same file share a unit. Targets whose library has no file
    /// name have no key.
    pub fn output_key(&self) -> Option<String>
    {
        library_file_name(&self.library).map(|file_name| format!("{file_name}.g.cs"))
    }

    /// Fully qualified name of the innermost class, for diagnostics.
    pub fn qualified_name(&self) -> String
    {
        std::iter::once(self.namespace.as_str())
            .filter(|ns| !ns.is_empty())
            .chain(self.nesting.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Last non-empty segment of a library name split on `/` or `\`.
pub fn library_file_name(library: &str) -> Option<&str>
{
    library
        .split(['/', '\\'])
        .filter(|segment| !segment.trim().is_empty())
        .next_back()
}

/// A single generated `extern` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDeclaration
{
    pub ordinal: u32,
    /// Canonical (normalized) name exposed by the binding.
    pub name: String,
    /// Identifier as found in the decorated name.
    pub raw_name: String,
    pub return_type: DecodedType,
    pub parameters: Vec<DecodedType>,
    /// Set when any type in the signature is a pointer.
    pub requires_unsafe: bool,
}

impl BindingDeclaration
{
    pub fn from_export(export: &DecodedExport) -> Self
    {
        Self {
            ordinal: export.ordinal,
            name: to_pascal_case(&export.raw_identifier),
            raw_name: export.raw_identifier.clone(),
            return_type: export.return_type,
            parameters: export.parameters.clone(),
            requires_unsafe: export.requires_unsafe(),
        }
    }

    /// Render the declaration on a single line, without indentation.
    ///
    /// ```rust
    /// use dllbind_core::binding::BindingDeclaration;
    /// use dllbind_core::symbols::decode_line;
    ///
    /// let export = decode_line("7 0 00001000 ?add_ints@@YAHHH@Z").unwrap().unwrap();
    /// let decl = BindingDeclaration::from_export(&export);
    /// assert_eq!(
    ///     decl.render("\"math.dll\""),
    ///     "[DllImport(\"math.dll\", EntryPoint = \"#7\")] public extern static int AddInts(int param1, int param2);"
    /// );
    /// ```
    pub fn render(&self, library_literal: &str) -> String
    {
        let modifiers = if self.requires_unsafe {
            "public unsafe extern static"
        } else {
            "public extern static"
        };
        let parameters = self
            .parameters
            .iter()
            .enumerate()
            .map(|(index, ty)| format!("{ty} param{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "[DllImport({library_literal}, EntryPoint = \"#{}\")] {modifiers} {} {}({parameters});",
            self.ordinal, self.return_type, self.name
        )
    }
}

impl From<&DecodedExport> for BindingDeclaration
{
    fn from(export: &DecodedExport) -> Self
    {
        Self::from_export(export)
    }
}

/// Build declarations for every export, preserving order.
pub fn assemble(exports: &[DecodedExport]) -> Vec<BindingDeclaration>
{
    exports.iter().map(BindingDeclaration::from_export).collect()
}
