//! Identifier normalization.
//!
//! Raw export names come in every style (`my_function_name`,
//! `HTTPServerSocket`, `get value`). Bindings expose them in a single casing
//! convention with one capital per word. The conversion is a fixed sequence of
//! rewrites over each `_`-separated fragment:
//!
//! 1. capitalize a leading lowercase letter (`my` -> `My`)
//! 2. lowercase an all-caps tail after a capital (`ABC` -> `Abc`)
//! 3. capitalize a letter following a digit (`2xx` -> `2Xx`)
//! 4. lowercase an acronym inside a word (`HTTPServer` -> `HttpServer`)
//!
//! The passes only look at casing and digits; they know nothing about words.
//! Order matters, each pass assumes the previous one ran.
//!
//! After the fragments are joined, passes 2 to 4 run again over the whole
//! identifier until it stops changing. Joining can put two capitals side by
//! side (`a_b` -> `A` + `B`), and settling keeps the result a fixed point of
//! [`to_pascal_case`].

/// Upper bound on settling rounds over the joined identifier.
const MAX_SETTLE_ROUNDS: usize = 8;

/// Convert a raw identifier to its canonical form.
///
/// Never fails. Characters outside `[_a-zA-Z0-9]` are dropped, whitespace acts
/// as a word separator, and the empty string maps to itself.
///
/// ```rust
/// use dllbind_core::symbols::to_pascal_case;
///
/// assert_eq!(to_pascal_case("my_function_name"), "MyFunctionName");
/// assert_eq!(to_pascal_case("HTTPServerSocket"), "HttpServerSocket");
/// assert_eq!(to_pascal_case("123"), "123");
/// ```
pub fn to_pascal_case(raw: &str) -> String
{
    let mut joined = Vec::with_capacity(raw.len());
    for mut fragment in fragments(raw) {
        capitalize_leading(&mut fragment);
        joined.extend(rewrite_casing(fragment));
    }

    for _ in 0..MAX_SETTLE_ROUNDS {
        let next = rewrite_casing(joined.clone());
        if next == joined {
            break;
        }
        joined = next;
    }

    // Only ASCII survives separator unification.
    joined.into_iter().map(char::from).collect()
}

/// Split into word fragments over `[a-zA-Z0-9]`.
fn fragments(raw: &str) -> Vec<Vec<u8>>
{
    let mut unified = Vec::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_whitespace() || ch == '_' {
            unified.push(b'_');
        } else if ch.is_ascii_alphanumeric() {
            unified.push(ch as u8);
        }
    }

    unified
        .split(|byte| *byte == b'_')
        .filter(|fragment| !fragment.is_empty())
        .map(<[u8]>::to_vec)
        .collect()
}

fn rewrite_casing(mut word: Vec<u8>) -> Vec<u8>
{
    lower_trailing_acronym(&mut word);
    capitalize_after_digit(&mut word);
    lower_interior_acronyms(word)
}

fn capitalize_leading(word: &mut [u8])
{
    if let Some(first) = word.first_mut() {
        first.make_ascii_uppercase();
    }
}

/// Lowercase the `[A-Z0-9]+` tail that directly follows a capital.
fn lower_trailing_acronym(word: &mut [u8])
{
    let len = word.len();
    let mut start = len;
    while start > 0 && (word[start - 1].is_ascii_uppercase() || word[start - 1].is_ascii_digit()) {
        start -= 1;
    }

    if let Some(from) = (start.max(1)..len).find(|&i| word[i - 1].is_ascii_uppercase()) {
        word[from..].make_ascii_lowercase();
    }
}

fn capitalize_after_digit(word: &mut [u8])
{
    for i in 1..word.len() {
        if word[i - 1].is_ascii_digit() {
            word[i].make_ascii_uppercase();
        }
    }
}

/// Lowercase uppercase runs that sit between a capital and the start of the
/// next word (a capital followed by a lowercase letter) or a digit.
///
/// Matching reads the word as it was on entry; runs never overlap.
fn lower_interior_acronyms(word: Vec<u8>) -> Vec<u8>
{
    let mut out = word.clone();
    let len = word.len();
    let mut i = 1;
    while i < len {
        if word[i - 1].is_ascii_uppercase() && word[i].is_ascii_uppercase() {
            if let Some(end) = interior_run_end(&word, i) {
                out[i..end].make_ascii_lowercase();
                i = end;
                continue;
            }
        }
        i += 1;
    }
    out
}

/// Smallest `end > start` where `word[start..end]` is all capitals and the
/// text at `end` opens a new word or a number.
fn interior_run_end(word: &[u8], start: usize) -> Option<usize>
{
    let mut end = start + 1;
    while end < word.len() {
        let opens_word = word[end].is_ascii_uppercase() && word.get(end + 1).is_some_and(u8::is_ascii_lowercase);
        if opens_word || word[end].is_ascii_digit() {
            return Some(end);
        }
        if !word[end].is_ascii_uppercase() {
            return None;
        }
        end += 1;
    }
    None
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn pass(f: fn(&mut [u8]), input: &str) -> String
    {
        let mut bytes = input.as_bytes().to_vec();
        f(&mut bytes);
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_fragments_unify_separators()
    {
        let parts: Vec<String> = fragments("get  value-of_x\tY")
            .into_iter()
            .map(|f| String::from_utf8(f).unwrap())
            .collect();
        assert_eq!(parts, vec!["get", "valueof", "x", "Y"]);
    }

    #[test]
    fn test_lower_trailing_acronym()
    {
        assert_eq!(pass(lower_trailing_acronym, "ABC"), "Abc");
        assert_eq!(pass(lower_trailing_acronym, "GetID"), "GetId");
        assert_eq!(pass(lower_trailing_acronym, "AB1CD"), "Ab1cd");
        assert_eq!(pass(lower_trailing_acronym, "Value2"), "Value2");
        assert_eq!(pass(lower_trailing_acronym, "A"), "A");
    }

    #[test]
    fn test_capitalize_after_digit()
    {
        assert_eq!(pass(capitalize_after_digit, "2xx"), "2Xx");
        assert_eq!(pass(capitalize_after_digit, "Load2d"), "Load2D");
        assert_eq!(pass(capitalize_after_digit, "123"), "123");
    }

    #[test]
    fn test_lower_interior_acronyms()
    {
        let run = |s: &str| String::from_utf8(lower_interior_acronyms(s.as_bytes().to_vec())).unwrap();
        assert_eq!(run("HTTPServer"), "HttpServer");
        assert_eq!(run("AB1C"), "Ab1C");
        assert_eq!(run("ABCDe"), "AbcDe");
        assert_eq!(run("ABc1"), "ABc1");
    }

    #[test]
    fn test_settling_joins_single_letter_fragments()
    {
        assert_eq!(to_pascal_case("a_b"), "Ab");
        assert_eq!(to_pascal_case("a_b_c"), "Abc");
    }
}
