//! Type-code lexer for decorated signatures.
//!
//! A decorated name carries its signature as a flat run of type codes, for
//! example `PEAH_NX`. Each token is zero or more pointer markers (`PEA`)
//! followed by one primitive code of one or two characters:
//!
//! - `PEAH`   -> `int*`
//! - `_N`     -> `bool`
//! - `PEAPEAD` -> `char**`
//!
//! Codes are matched longest first. The current table has no single-character
//! code that prefixes a two-character one, but the lexer does not rely on that.

use once_cell::sync::Lazy;

use crate::error::{BindError, BindResult};
use crate::types::{DecodedType, Primitive, TYPE_CODES};

/// Marker adding one level of pointer indirection to the following type.
pub const POINTER_MARKER: &str = "PEA";

/// Code table sorted by descending code length, built on first use.
static CODES_BY_LENGTH: Lazy<Vec<(&'static str, Primitive)>> = Lazy::new(|| {
    let mut codes = TYPE_CODES.to_vec();
    codes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    codes
});

/// Match the longest primitive code that prefixes `input`.
pub fn match_code(input: &str) -> Option<(&'static str, Primitive)>
{
    CODES_BY_LENGTH.iter().copied().find(|(code, _)| input.starts_with(code))
}

/// Cursor over an encoded type run.
///
/// Yields one [`DecodedType`] per token. Hitting an unknown code is an error
/// for the whole run; after reporting it the lexer yields nothing more.
#[derive(Debug, Clone)]
pub struct TypeLexer<'a>
{
    run: &'a str,
    cursor: usize,
    failed: bool,
}

impl<'a> TypeLexer<'a>
{
    pub fn new(run: &'a str) -> Self
    {
        Self {
            run,
            cursor: 0,
            failed: false,
        }
    }

    /// Byte offset of the cursor inside the run.
    pub fn position(&self) -> usize
    {
        self.cursor
    }

    /// Encoded text not consumed yet.
    pub fn remaining(&self) -> &'a str
    {
        &self.run[self.cursor..]
    }

    /// Consume exactly one type token.
    ///
    /// ## Returns
    ///
    /// - `Ok(Some(ty))` when a token was consumed; the cursor moves past it
    /// - `Ok(None)` at the end of the run, which is how iteration ends
    ///
    /// ## Errors
    ///
    /// `BindError::UnrecognizedTypeCode` when no table code matches after the
    /// pointer markers. The cursor does not move in that case.
    pub fn next_type(&mut self) -> BindResult<Option<DecodedType>>
    {
        let rest = self.remaining();
        if rest.is_empty() {
            return Ok(None);
        }

        let mut seek = 0;
        let mut pointer_depth = 0u32;
        while rest[seek..].starts_with(POINTER_MARKER) {
            pointer_depth += 1;
            seek += POINTER_MARKER.len();
        }

        let Some((code, primitive)) = match_code(&rest[seek..]) else {
            return Err(BindError::UnrecognizedTypeCode {
                code: rest[seek..].to_string(),
                offset: self.cursor + seek,
            });
        };

        self.cursor += seek + code.len();
        Ok(Some(DecodedType::new(primitive, pointer_depth)))
    }
}

impl Iterator for TypeLexer<'_>
{
    type Item = BindResult<DecodedType>;

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.failed {
            return None;
        }
        match self.next_type() {
            Ok(ty) => ty.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Decode a whole type run.
///
/// ## Errors
///
/// Fails on the first unrecognized code; nothing decoded before it is returned.
pub fn lex_type_run(run: &str) -> BindResult<Vec<DecodedType>>
{
    TypeLexer::new(run).collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_codes_sorted_longest_first()
    {
        let lengths: Vec<usize> = CODES_BY_LENGTH.iter().map(|(code, _)| code.len()).collect();
        assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(lengths.len(), TYPE_CODES.len());
    }

    #[test]
    fn test_match_code_prefers_two_character_codes()
    {
        assert_eq!(match_code("_NH"), Some(("_N", Primitive::Bool)));
        assert_eq!(match_code("NH"), Some(("N", Primitive::Double)));
        assert_eq!(match_code("_"), None);
    }

    #[test]
    fn test_failed_lexer_is_fused()
    {
        let mut lexer = TypeLexer::new("HQH");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }
}
