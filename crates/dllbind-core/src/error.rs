//! # Error Types
//!
//! General error handling for binding generation.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for binding generation
///
/// Not every failure in the pipeline is an error. Listing lines that do not
/// match the export grammar, and lines whose signature decodes to nothing, are
/// skipped silently and never show up here.
///
/// ## Error Categories
///
/// 1. **Signature errors**: UnrecognizedTypeCode (local to one listing line)
/// 2. **Listing errors**: ToolFailed, NotPortableExecutable, Object
/// 3. **Manifest errors**: Manifest, InvalidTarget
/// 4. **I/O errors**: Io
#[derive(Error, Debug)]
pub enum BindError
{
    /// A primitive type code could not be matched at the lexer cursor
    ///
    /// This is fatal for the signature being decoded, and only for that one.
    /// The listing decoder records the failure and moves on to the next line.
    #[error("Unrecognized type code {code:?} at offset {offset}")]
    UnrecognizedTypeCode
    {
        /// Remaining encoded text starting at the failing position
        code: String,
        /// Byte offset of the failing position inside the type run
        offset: usize,
    },

    /// The external export-listing tool could not produce a listing
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed
    {
        /// Tool that was invoked
        tool: String,
        /// Exit status description
        status: String,
        /// Captured standard error (trimmed)
        stderr: String,
    },

    /// The binary handed to the native reader is not a PE image
    #[error("Not a PE image: {}", .0.display())]
    NotPortableExecutable(PathBuf),

    /// The PE image could not be parsed
    #[error("Failed to read export table: {0}")]
    Object(String),

    /// The target manifest is not valid TOML or has the wrong shape
    #[error("Invalid manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    /// A binding target is missing required information
    #[error("Invalid binding target: {0}")]
    InvalidTarget(String),

    /// I/O error (for file operations, process spawning, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, BindError>`
///
/// ```rust
/// use dllbind_core::error::BindResult;
/// fn foo() -> BindResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type BindResult<T> = std::result::Result<T, BindError>;
