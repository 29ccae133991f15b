//! Tests for the generation pipeline using captured listings

use std::fs;
use std::path::Path;

use dllbind_core::binding::BindingTarget;
use dllbind_core::error::BindError;
use dllbind_core::generator::Generator;
use dllbind_core::listing::{DumpbinSource, ExportSource, ListingKind, PeExportSource, TextListingSource};
use dllbind_core::manifest::Manifest;
use pretty_assertions::assert_eq;

const NATIVE_LISTING: &str = "\
    ordinal hint RVA      name

          1    0 00011014 ?add@@YAHHH@Z = @ILT+15(?add@@YAHHH@Z)
          2    1 00011028 ?fill_buffer@@YAXPEAEI@Z = @ILT+35(?fill_buffer@@YAXPEAEI@Z)
          3    2 0001102D ?log_message@@YAXPEBD@Z = @ILT+40(?log_message@@YAXPEBD@Z)
";

const MATH_LISTING: &str = "          7    0 00001000 ?scale@@YANNN@Z\n";

fn write_manifest(dir: &Path, body: &str) -> Manifest
{
    fs::write(dir.join("native.txt"), NATIVE_LISTING).unwrap();
    fs::write(dir.join("math.txt"), MATH_LISTING).unwrap();
    Manifest::parse(body).unwrap()
}

#[test]
fn test_generate_writes_one_file_per_library()
{
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
[[target]]
namespace = "App"
class = "NativeMethods"
library = "native.dll"
binary = "native.txt"

[[target]]
class = "Math"
library = "math.dll"
binary = "math.txt"
"#,
    );
    let targets = manifest.targets(dir.path()).unwrap();
    let out_dir = dir.path().join("generated");

    let generator = Generator::new(Box::new(TextListingSource), &out_dir);
    let report = generator.generate(&targets).unwrap();

    assert!(report.is_success());
    assert_eq!(
        report.written,
        vec![(out_dir.join("native.dll.g.cs"), 2), (out_dir.join("math.dll.g.cs"), 1)]
    );

    let math = fs::read_to_string(out_dir.join("math.dll.g.cs")).unwrap();
    assert_eq!(
        math,
        "using System.Runtime.InteropServices;\n\npartial class Math\n{\n    [DllImport(\"math.dll\", EntryPoint = \"#7\")] public extern static double Scale(double param1, double param2);\n}\n"
    );

    let native = fs::read_to_string(out_dir.join("native.dll.g.cs")).unwrap();
    assert!(native.contains("public unsafe extern static void FillBuffer(byte* param1, uint param2);"));
    assert!(!native.contains("LogMessage"));
}

#[test]
fn test_rejected_lines_are_reported_per_target()
{
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        "[[target]]\nnamespace = \"App\"\nclass = \"NativeMethods\"\nlibrary = \"native.dll\"\nbinary = \"native.txt\"\n",
    );
    let targets = manifest.targets(dir.path()).unwrap();

    let rendered = Generator::new(Box::new(TextListingSource), dir.path()).render_units(&targets);
    assert_eq!(rendered.rejected.len(), 1);
    let (owner, line) = &rendered.rejected[0];
    assert_eq!(owner, "App.NativeMethods");
    assert_eq!(line.line_number, 5);
    assert!(matches!(line.error, BindError::UnrecognizedTypeCode { .. }));
}

#[test]
fn test_targets_sharing_a_library_merge_into_one_unit()
{
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
[[target]]
class = "First"
library = "math.dll"
binary = "math.txt"

[[target]]
namespace = "Other"
class = "Outer.Second"
library = "x64/math.dll"
binary = "math.txt"
"#,
    );
    let targets = manifest.targets(dir.path()).unwrap();

    let rendered = Generator::new(Box::new(TextListingSource), dir.path()).render_units(&targets);
    assert_eq!(rendered.units.len(), 1);

    let unit = &rendered.units[0];
    assert_eq!(unit.key(), "math.dll.g.cs");
    assert_eq!(unit.scopes().len(), 2);
    assert_eq!(unit.declaration_count(), 2);

    let text = unit.render();
    assert_eq!(text.matches("using System.Runtime.InteropServices;").count(), 1);
    assert!(text.contains("partial class First\n"));
    assert!(text.contains("            [DllImport(\"x64/math.dll\", EntryPoint = \"#7\")]"));
}

#[test]
fn test_missing_binary_fails_only_that_target()
{
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
[[target]]
class = "Missing"
library = "gone.dll"
binary = "gone.txt"

[[target]]
class = "Math"
library = "math.dll"
binary = "math.txt"
"#,
    );
    let targets = manifest.targets(dir.path()).unwrap();
    let out_dir = dir.path().join("out");

    let report = Generator::new(Box::new(TextListingSource), &out_dir).generate(&targets).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].target.qualified_name(), "Missing");
    assert!(matches!(report.failed[0].error, BindError::Io(_)));
    assert_eq!(report.written.len(), 1);
    assert!(out_dir.join("math.dll.g.cs").exists());
    assert!(!out_dir.join("gone.dll.g.cs").exists());
}

#[test]
fn test_library_without_file_name_is_not_written()
{
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "");
    let out_dir = dir.path().join("out");
    let rooted = BindingTarget {
        namespace: String::new(),
        nesting: vec!["Rooted".to_string()],
        library_literal: "\"/\"".to_string(),
        library: "/".to_string(),
        binary: dir.path().join("math.txt"),
    };
    let math = BindingTarget {
        namespace: String::new(),
        nesting: vec!["Math".to_string()],
        library_literal: "\"math.dll\"".to_string(),
        library: "math.dll".to_string(),
        binary: dir.path().join("math.txt"),
    };

    let report = Generator::new(Box::new(TextListingSource), &out_dir).generate(&[rooted, math]).unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].target.qualified_name(), "Rooted");
    assert!(matches!(report.failed[0].error, BindError::InvalidTarget(ref msg) if msg.contains("no file name")));
    assert_eq!(report.written, vec![(out_dir.join("math.dll.g.cs"), 1)]);
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 1);
    assert!(!dir.path().join(".g.cs").exists());
}

#[test]
fn test_pe_source_rejects_non_pe_file()
{
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_a_dll.txt");
    fs::write(&path, MATH_LISTING).unwrap();

    assert!(PeExportSource.listing(&path).is_err());
}

#[test]
fn test_missing_listing_tool_is_io_error()
{
    let dir = tempfile::tempdir().unwrap();
    let source = DumpbinSource::new(dir.path().join("no-such-dumpbin"));
    let err = source.listing(Path::new("native.dll")).unwrap_err();
    assert!(matches!(err, BindError::Io(_)));
}

#[test]
fn test_listing_kind_parsing()
{
    assert_eq!("dumpbin".parse::<ListingKind>().unwrap(), ListingKind::Dumpbin);
    assert_eq!("PE".parse::<ListingKind>().unwrap(), ListingKind::Pe);
    assert_eq!("listing".parse::<ListingKind>().unwrap(), ListingKind::Text);
    assert!("objdump".parse::<ListingKind>().is_err());
    assert_eq!(ListingKind::default(), ListingKind::Dumpbin);
    assert_eq!(ListingKind::Text.source(None).name(), "text");
}
