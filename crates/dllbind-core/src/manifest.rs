//! # Target Manifest
//!
//! Declares which classes want bindings to which native libraries.
//!
//! ```toml
//! [generator]
//! source = "dumpbin"
//! tool = "C:/VS/bin/dumpbin.exe"
//! out_dir = "generated"
//!
//! [[target]]
//! namespace = "MyApp.Native"
//! class = "Outer.Inner"
//! library = "native.dll"
//! binary = "bin/native.dll"
//! ```
//!
//! `literal` overrides the library argument written into `DllImport` (it
//! defaults to a quoted string literal of `library`). `binary` defaults to
//! `library`; relative paths resolve against the manifest's directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::binding::{library_file_name, BindingTarget};
use crate::error::{BindError, BindResult};
use crate::listing::ListingKind;

/// Parsed manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest
{
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetEntry>,
}

/// `[generator]` table. Command-line flags take precedence over these.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings
{
    pub source: Option<ListingKind>,
    pub tool: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

/// One `[[target]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetEntry
{
    #[serde(default)]
    pub namespace: String,
    /// Dot-separated nested class path, outermost first.
    pub class: String,
    pub library: String,
    pub literal: Option<String>,
    pub binary: Option<PathBuf>,
}

impl Manifest
{
    /// Parse manifest text.
    ///
    /// ## Errors
    ///
    /// `BindError::Manifest` when the text is not valid TOML for this schema.
    pub fn parse(text: &str) -> BindResult<Self>
    {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a manifest file.
    ///
    /// ## Errors
    ///
    /// I/O errors reading the file, or `BindError::Manifest`.
    pub fn load(path: &Path) -> BindResult<Self>
    {
        let text = fs::read_to_string(path)?;
        let manifest = Self::parse(&text)?;
        debug!(path = %path.display(), targets = manifest.targets.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Resolve every entry into a [`BindingTarget`].
    ///
    /// ## Errors
    ///
    /// `BindError::InvalidTarget` for the first entry with an empty class path,
    /// or a library name that is empty or has no file name segment.
    pub fn targets(&self, base_dir: &Path) -> BindResult<Vec<BindingTarget>>
    {
        self.targets.iter().map(|entry| entry.resolve(base_dir)).collect()
    }
}

impl TargetEntry
{
    pub fn resolve(&self, base_dir: &Path) -> BindResult<BindingTarget>
    {
        let nesting: Vec<String> = self
            .class
            .split('.')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if nesting.is_empty() {
            return Err(BindError::InvalidTarget(format!(
                "target for '{}' has no class",
                self.library
            )));
        }
        if self.library.trim().is_empty() {
            return Err(BindError::InvalidTarget(format!("class '{}' has no library", self.class)));
        }
        if library_file_name(&self.library).is_none() {
            return Err(BindError::InvalidTarget(format!(
                "library '{}' of class '{}' has no file name",
                self.library, self.class
            )));
        }

        let binary = self.binary.clone().unwrap_or_else(|| PathBuf::from(&self.library));
        let binary = if binary.is_absolute() { binary } else { base_dir.join(binary) };

        Ok(BindingTarget {
            namespace: self.namespace.trim().to_string(),
            nesting,
            library_literal: self
                .literal
                .clone()
                .unwrap_or_else(|| string_literal(&self.library)),
            library: self.library.clone(),
            binary,
        })
    }
}

/// Quote `value` as a regular C# string literal.
pub fn string_literal(value: &str) -> String
{
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            _ => literal.push(ch),
        }
    }
    literal.push('"');
    literal
}
