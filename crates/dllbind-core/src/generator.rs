//! # Generator
//!
//! Drives the whole pipeline for a set of binding targets:
//!
//! 1. capture the export listing of each target's binary
//! 2. decode the listing into exports
//! 3. assemble declarations and wrap them in the target's scopes
//! 4. group scopes by output key and write one file per key
//!
//! A target that fails (missing binary, tool error) is reported and skipped;
//! the other targets are still generated.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::binding::{assemble, BindingTarget, ScopeBlock, SourceUnit};
use crate::error::{BindError, BindResult};
use crate::listing::ExportSource;
use crate::symbols::{decode_listing, RejectedLine};

/// A target that produced no output.
#[derive(Debug)]
pub struct FailedTarget
{
    pub target: BindingTarget,
    pub error: BindError,
}

/// Result of [`Generator::render_units`].
#[derive(Debug, Default)]
pub struct RenderedUnits
{
    /// Units in order of first appearance of their key.
    pub units: Vec<SourceUnit>,
    /// Listing lines dropped per target, keyed by the target's qualified name.
    pub rejected: Vec<(String, RejectedLine)>,
    pub failed: Vec<FailedTarget>,
}

/// Result of [`Generator::generate`].
#[derive(Debug, Default)]
pub struct GenerationReport
{
    /// Files written, with their declaration counts.
    pub written: Vec<(PathBuf, usize)>,
    pub rejected: Vec<(String, RejectedLine)>,
    pub failed: Vec<FailedTarget>,
}

impl GenerationReport
{
    pub fn is_success(&self) -> bool
    {
        self.failed.is_empty()
    }
}

/// Generates binding sources from export listings.
pub struct Generator
{
    source: Box<dyn ExportSource>,
    out_dir: PathBuf,
}

impl Generator
{
    pub fn new(source: Box<dyn ExportSource>, out_dir: impl Into<PathBuf>) -> Self
    {
        Self {
            source,
            out_dir: out_dir.into(),
        }
    }

    /// Build one scope for `target`.
    ///
    /// ## Errors
    ///
    /// Whatever the export source reports for the target's binary. Undecodable
    /// lines are not errors; they come back in the second tuple element.
    pub fn render_target(&self, target: &BindingTarget) -> BindResult<(ScopeBlock, Vec<RejectedLine>)>
    {
        let listing = self.source.listing(&target.binary)?;
        let report = decode_listing(&listing);
        let declarations = assemble(&report.exports);
        info!(
            target = %target.qualified_name(),
            source = self.source.name(),
            declarations = declarations.len(),
            rejected = report.rejected.len(),
            "assembled bindings"
        );
        Ok((ScopeBlock::new(target, declarations), report.rejected))
    }

    /// Render every target into source units without touching the disk.
    pub fn render_units(&self, targets: &[BindingTarget]) -> RenderedUnits
    {
        let mut rendered = RenderedUnits::default();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        for target in targets {
            let outcome = target
                .output_key()
                .ok_or_else(|| {
                    BindError::InvalidTarget(format!("library '{}' has no file name", target.library))
                })
                .and_then(|key| self.render_target(target).map(|output| (key, output)));

            match outcome {
                Ok((key, (scope, rejected))) => {
                    let index = *index_by_key.entry(key.clone()).or_insert_with(|| {
                        rendered.units.push(SourceUnit::new(key));
                        rendered.units.len() - 1
                    });
                    rendered.units[index].push(scope);
                    let name = target.qualified_name();
                    rendered
                        .rejected
                        .extend(rejected.into_iter().map(|line| (name.clone(), line)));
                }
                Err(err) => {
                    error!(target = %target.qualified_name(), binary = %target.binary.display(), %err, "target failed");
                    rendered.failed.push(FailedTarget {
                        target: target.clone(),
                        error: err,
                    });
                }
            }
        }

        rendered
    }

    /// Render every target and write one file per output key into the output
    /// directory, creating it if needed.
    ///
    /// ## Errors
    ///
    /// I/O errors creating the directory or writing a file. Per-target
    /// failures are reported in [`GenerationReport::failed`] instead.
    pub fn generate(&self, targets: &[BindingTarget]) -> BindResult<GenerationReport>
    {
        let rendered = self.render_units(targets);
        fs::create_dir_all(&self.out_dir)?;

        let mut written = Vec::with_capacity(rendered.units.len());
        for unit in &rendered.units {
            let path = self.out_dir.join(unit.key());
            fs::write(&path, unit.render())?;
            info!(path = %path.display(), declarations = unit.declaration_count(), "wrote bindings");
            written.push((path, unit.declaration_count()));
        }

        if !rendered.failed.is_empty() {
            warn!(failed = rendered.failed.len(), "some targets produced no bindings");
        }

        Ok(GenerationReport {
            written,
            rejected: rendered.rejected,
            failed: rendered.failed,
        })
    }
}
