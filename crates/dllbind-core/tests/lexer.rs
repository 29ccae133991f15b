//! Tests for the type-code lexer

use dllbind_core::error::BindError;
use dllbind_core::symbols::{lex_type_run, TypeLexer};
use dllbind_core::types::{DecodedType, Primitive};

fn decoded(run: &str) -> Vec<String>
{
    lex_type_run(run).unwrap().iter().map(ToString::to_string).collect()
}

#[test]
fn test_single_character_codes()
{
    assert_eq!(
        decoded("XDEFGHIMN"),
        vec!["void", "char", "byte", "short", "ushort", "int", "uint", "float", "double"]
    );
}

#[test]
fn test_two_character_codes_decode_as_one_token()
{
    assert_eq!(decoded("_J"), vec!["long"]);
    assert_eq!(decoded("_K_N"), vec!["ulong", "bool"]);
    // `_N` must not be read as an unknown `_` followed by `N` (double)
    assert_eq!(decoded("H_NN"), vec!["int", "bool", "double"]);
}

#[test]
fn test_pointer_depth_counts_markers()
{
    let cases = [("H", 0), ("PEAH", 1), ("PEAPEAH", 2), ("PEAPEAPEAH", 3), ("PEAPEAPEAPEAPEAH", 5)];
    for (run, depth) in cases {
        let types = lex_type_run(run).unwrap();
        assert_eq!(types, vec![DecodedType::new(Primitive::Int, depth)], "run {run}");
    }
}

#[test]
fn test_pointer_to_two_character_code()
{
    assert_eq!(decoded("PEA_JPEAPEA_N"), vec!["long*", "bool**"]);
}

#[test]
fn test_empty_run_yields_no_token()
{
    let mut lexer = TypeLexer::new("");
    assert!(lexer.next_type().unwrap().is_none());
    assert!(lex_type_run("").unwrap().is_empty());
}

#[test]
fn test_cursor_advances_past_each_token()
{
    let mut lexer = TypeLexer::new("PEAD_NX");
    assert_eq!(lexer.next_type().unwrap(), Some(DecodedType::new(Primitive::Char, 1)));
    assert_eq!(lexer.position(), 4);
    assert_eq!(lexer.next_type().unwrap(), Some(DecodedType::value(Primitive::Bool)));
    assert_eq!(lexer.remaining(), "X");
    assert_eq!(lexer.next_type().unwrap(), Some(DecodedType::value(Primitive::Void)));
    assert_eq!(lexer.next_type().unwrap(), None);
}

#[test]
fn test_unrecognized_code_reports_offset()
{
    let err = lex_type_run("HPEAU").unwrap_err();
    match err {
        BindError::UnrecognizedTypeCode { code, offset } => {
            assert_eq!(code, "U");
            assert_eq!(offset, 4);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_dangling_pointer_marker_is_unrecognized()
{
    let err = lex_type_run("HPEA").unwrap_err();
    assert!(matches!(err, BindError::UnrecognizedTypeCode { ref code, offset: 4 } if code.is_empty()));
}

#[test]
fn test_failed_token_leaves_cursor_in_place()
{
    let mut lexer = TypeLexer::new("H_Z");
    assert!(lexer.next_type().unwrap().is_some());
    assert!(lexer.next_type().is_err());
    assert_eq!(lexer.position(), 1);
}
