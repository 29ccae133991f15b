//! Tests for error handling

use dllbind_core::error::{BindError, BindResult};

#[test]
fn test_unrecognized_type_code_display()
{
    let error = BindError::UnrecognizedTypeCode {
        code: "UFoo@@".to_string(),
        offset: 4,
    };
    let message = format!("{}", error);
    assert!(message.contains("UFoo@@"));
    assert!(message.contains("offset 4"));
}

#[test]
fn test_tool_failed_display()
{
    let error = BindError::ToolFailed {
        tool: "dumpbin.exe".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "LINK : fatal error LNK1181".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("dumpbin.exe"));
    assert!(message.contains("LNK1181"));
}

#[test]
fn test_invalid_target_display()
{
    let error = BindError::InvalidTarget("class 'Native' has no library".to_string());
    let message = format!("{}", error);
    assert!(message.contains("Invalid binding target"));
    assert!(message.contains("Native"));
}

#[test]
fn test_io_error_converts()
{
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.dll");
    let error: BindError = io.into();
    match error {
        BindError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_manifest_error_converts()
{
    let parse = toml::from_str::<toml::Table>("not = [valid").unwrap_err();
    let error: BindError = parse.into();
    assert!(format!("{}", error).starts_with("Invalid manifest"));
}

#[test]
fn test_result_type()
{
    let _result: BindResult<()> = Ok(());
    let _error_result: BindResult<()> = Err(BindError::InvalidTarget("x".to_string()));
}
