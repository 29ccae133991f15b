use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use dllbind_core::binding::BindingDeclaration;
use dllbind_core::listing::{ExportSource, ListingKind, PeExportSource, TextListingSource};
use dllbind_core::manifest::Manifest;
use dllbind_core::symbols::{decode_listing, to_pascal_case};
use dllbind_core::{BindResult, Generator};
use dllbind_utils::{LogFormat, LogLevel, info, init_logging, init_logging_with_level};

/// Generate P/Invoke bindings from the decorated exports of a native DLL.
#[derive(Parser, Debug)]
#[command(name = "dllbind")]
#[command(version)]
#[command(about = "Generate P/Invoke bindings from the decorated exports of a native DLL", long_about = None)]
struct Cli
{
    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Generate binding sources for every target in a manifest
    Generate
    {
        /// Path to the target manifest (TOML)
        #[arg(short, long, default_value = "dllbind.toml")]
        manifest: PathBuf,
        /// Output directory (overrides the manifest)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Where export listings come from (overrides the manifest)
        #[arg(short, long, value_enum)]
        source: Option<SourceArg>,
        /// Export listing tool for the dumpbin source (overrides the manifest)
        #[arg(long)]
        tool: Option<PathBuf>,
    },
    /// Decode a captured export listing and print the bindings it yields
    Decode
    {
        /// Listing text file (output of `dumpbin /EXPORTS`)
        listing: PathBuf,
        /// Library literal used in printed declarations
        #[arg(long, default_value = "\"library.dll\"")]
        literal: String,
    },
    /// Print the canonical identifier for each raw name
    Normalize
    {
        /// Raw export names
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the export table of a PE image as listing lines
    Exports
    {
        /// Path to a DLL or EXE
        binary: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceArg
{
    /// Run dumpbin /EXPORTS
    Dumpbin,
    /// Read the PE export table directly
    Pe,
    /// Treat each target binary path as a captured listing
    Text,
}

impl From<SourceArg> for ListingKind
{
    fn from(arg: SourceArg) -> Self
    {
        match arg {
            SourceArg::Dumpbin => ListingKind::Dumpbin,
            SourceArg::Pe => ListingKind::Pe,
            SourceArg::Text => ListingKind::Text,
        }
    }
}

fn main()
{
    let cli = Cli::parse();

    let logging = match cli.log_level.as_deref().map(str::parse::<LogLevel>) {
        Some(Ok(level)) => init_logging_with_level(level, LogFormat::Pretty),
        Some(Err(e)) => {
            eprintln!("{e}");
            process::exit(2);
        }
        None => init_logging(),
    };
    if let Err(e) = logging {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    match run_command(cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but some of its work failed.
fn run_command(command: Commands) -> BindResult<bool>
{
    match command {
        Commands::Generate {
            manifest,
            out_dir,
            source,
            tool,
        } => generate(&manifest, out_dir, source.map(Into::into), tool),
        Commands::Decode { listing, literal } => {
            let text = TextListingSource.listing(&listing)?;
            let report = decode_listing(&text);
            for export in &report.exports {
                println!("{}", BindingDeclaration::from_export(export).render(&literal));
            }
            for rejected in &report.rejected {
                eprintln!("line {}: {} ({})", rejected.line_number, rejected.error, rejected.text);
            }
            Ok(report.is_clean())
        }
        Commands::Normalize { names } => {
            for name in names {
                println!("{}", to_pascal_case(&name));
            }
            Ok(true)
        }
        Commands::Exports { binary } => {
            println!("{}", PeExportSource.listing(&binary)?);
            Ok(true)
        }
    }
}

fn generate(
    manifest_path: &Path,
    out_dir: Option<PathBuf>,
    source: Option<ListingKind>,
    tool: Option<PathBuf>,
) -> BindResult<bool>
{
    let manifest = Manifest::load(manifest_path)?;
    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let targets = manifest.targets(base_dir)?;

    let settings = manifest.generator;
    let kind = source.or(settings.source).unwrap_or_default();
    let out_dir = out_dir
        .or(settings.out_dir.map(|dir| base_dir.join(dir)))
        .unwrap_or_else(|| base_dir.join("generated"));

    info!("Generating {} target(s) with the {} source", targets.len(), kind);
    let generator = Generator::new(kind.source(tool.or(settings.tool)), out_dir);
    let report = generator.generate(&targets)?;

    for (path, count) in &report.written {
        println!("{} ({count} declarations)", path.display());
    }
    for (target, rejected) in &report.rejected {
        eprintln!("{target}: line {}: {}", rejected.line_number, rejected.error);
    }
    for failed in &report.failed {
        eprintln!("{}: {}", failed.target.qualified_name(), failed.error);
    }
    Ok(report.is_success())
}
