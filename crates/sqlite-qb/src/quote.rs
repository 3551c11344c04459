//! Text emission helpers: identifier quoting, literal escaping, type names.
//!
//! Every function here writes into a caller-supplied `String` buffer.
//!
//! - Bare identifiers match `[A-Za-z_][A-Za-z0-9_]*` (ASCII only).
//! - Quoted identifiers are wrapped in `"` with inner `"` doubled.
//! - String literals are wrapped in `'` with inner `'` doubled.
//!
//! # Example
//! ```
//! use sqlite_qb::quote;
//!
//! let mut out = String::new();
//! quote::quote_identifier_if_needed(&mut out, "users");
//! out.push(' ');
//! quote::quote_identifier(&mut out, "users");
//! assert_eq!(out, r#"users "users""#);
//! ```

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{QbError, QbResult};

/// Returns `true` if `name` can be written without quotes.
pub fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Write `name` as a quoted identifier.
pub fn quote_identifier(out: &mut String, name: &str) {
    out.push('"');
    out.push_str(&escape_double_quotes(name));
    out.push('"');
}

/// Write `name` bare when possible, quoted otherwise.
pub fn quote_identifier_if_needed(out: &mut String, name: &str) {
    if is_bare_identifier(name) {
        out.push_str(name);
    } else {
        quote_identifier(out, name);
    }
}

/// Write a dotted name such as `"main"."users"."id"`.
///
/// Only a leading run of parts may be `None`; a `None` after a present part,
/// or no present part at all, is an error.
pub fn join_qualified_name(out: &mut String, parts: &[Option<&str>]) -> QbResult<()> {
    let mut started = false;
    for part in parts {
        match part {
            Some(name) => {
                if started {
                    out.push('.');
                }
                quote_identifier(out, name);
                started = true;
            }
            None if started => {
                return Err(QbError::QualifiedName(format!(
                    "missing part after a present one in {parts:?}"
                )));
            }
            None => {}
        }
    }
    if !started {
        return Err(QbError::QualifiedName("all name parts are missing".into()));
    }
    Ok(())
}

/// Double every `'` in `s`.
pub fn escape_single_quotes(s: &str) -> Cow<'_, str> {
    escape_char(s, '\'')
}

/// Double every `"` in `s`.
pub fn escape_double_quotes(s: &str) -> Cow<'_, str> {
    escape_char(s, '"')
}

fn escape_char(s: &str, quote: char) -> Cow<'_, str> {
    if !s.contains(quote) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c == quote {
            escaped.push(quote);
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Write a `'...'` string literal.
pub fn string_literal(out: &mut String, s: &str) {
    out.push('\'');
    out.push_str(&escape_single_quotes(s));
    out.push('\'');
}

/// Write an `X'...'` blob literal.
pub fn blob_literal(out: &mut String, bytes: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    out.reserve(bytes.len() * 2 + 3);
    out.push_str("X'");
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out.push('\'');
}

fn type_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\(\s*[+-]?[0-9]+\s*(,\s*[+-]?[0-9]+)?\)$").expect("invalid built-in type suffix regex")
    })
}

fn type_words_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\s+[A-Za-z][A-Za-z0-9_]*)*$")
            .expect("invalid built-in type name regex")
    })
}

/// Write a column type name such as `VARCHAR(10)` or `"my type"(3, 1)`.
///
/// A trailing precision/scale suffix is kept verbatim; the name part is
/// quoted unless it is a sequence of plain words.
pub fn quote_type_name(out: &mut String, type_text: &str) {
    let (name, suffix) = match type_suffix_re().find(type_text) {
        Some(m) => (&type_text[..m.start()], m.as_str()),
        None => (type_text, ""),
    };
    let name = name.trim();
    if type_words_re().is_match(name) {
        out.push_str(name);
    } else {
        quote_identifier(out, name);
    }
    out.push_str(suffix);
}

/// Run `f`, surrounding its output with parentheses when `flag` is set.
pub fn parenthesize_if<F>(out: &mut String, flag: bool, f: F) -> QbResult<()>
where
    F: FnOnce(&mut String) -> QbResult<()>,
{
    if flag {
        out.push('(');
        f(out)?;
        out.push(')');
        Ok(())
    } else {
        f(out)
    }
}

/// Write `items` separated by `sep`, rendering each with `f`.
pub fn join_with<T, F>(out: &mut String, items: &[T], sep: &str, mut f: F) -> QbResult<()>
where
    F: FnMut(&mut String, &T) -> QbResult<()>,
{
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        f(out, item)?;
    }
    Ok(())
}

/// Write a parenthesized, comma-separated list of always-quoted identifiers.
pub(crate) fn identifier_list(out: &mut String, names: &[String]) {
    out.push('(');
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        quote_identifier(out, name);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut String)) -> String {
        let mut out = String::new();
        f(&mut out);
        out
    }

    #[test]
    fn bare_identifier_rules() {
        assert!(is_bare_identifier("abc"));
        assert!(is_bare_identifier("_a1"));
        assert!(!is_bare_identifier(""));
        assert!(!is_bare_identifier("1x"));
        assert!(!is_bare_identifier("a b"));
        assert!(!is_bare_identifier("a-b"));
        assert!(!is_bare_identifier("größe"));
    }

    #[test]
    fn quote_if_needed_skips_bare_names() {
        assert_eq!(render(|o| quote_identifier_if_needed(o, "abc")), "abc");
        assert_eq!(render(|o| quote_identifier_if_needed(o, "1x")), r#""1x""#);
        assert_eq!(render(|o| quote_identifier_if_needed(o, "")), r#""""#);
    }

    #[test]
    fn quote_always_quotes() {
        assert_eq!(render(|o| quote_identifier(o, "abc")), r#""abc""#);
        assert_eq!(render(|o| quote_identifier(o, r#"a"b"#)), r#""a""b""#);
    }

    #[test]
    fn qualified_name_joins_present_parts() {
        let mut out = String::new();
        join_qualified_name(&mut out, &[None, Some("t"), Some("c")]).unwrap();
        assert_eq!(out, r#""t"."c""#);

        let mut out = String::new();
        join_qualified_name(&mut out, &[Some("main"), Some("t"), Some("c")]).unwrap();
        assert_eq!(out, r#""main"."t"."c""#);
    }

    #[test]
    fn qualified_name_rejects_gaps() {
        let mut out = String::new();
        assert!(join_qualified_name(&mut out, &[Some("main"), None, Some("c")]).is_err());
        assert!(join_qualified_name(&mut out, &[None, None]).is_err());
        assert!(join_qualified_name(&mut out, &[]).is_err());
    }

    #[test]
    fn escape_fast_path_borrows() {
        assert!(matches!(escape_single_quotes("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_single_quotes("it's"), "it''s");
        assert_eq!(escape_double_quotes(r#"say "hi""#), r#"say ""hi"""#);
    }

    #[test]
    fn literals() {
        assert_eq!(render(|o| string_literal(o, "it's")), "'it''s'");
        assert_eq!(render(|o| blob_literal(o, &[0x00, 0xab, 0x7f])), "X'00AB7F'");
        assert_eq!(render(|o| blob_literal(o, &[])), "X''");
    }

    #[test]
    fn type_names() {
        assert_eq!(render(|o| quote_type_name(o, "INTEGER")), "INTEGER");
        assert_eq!(render(|o| quote_type_name(o, "VARCHAR(10)")), "VARCHAR(10)");
        assert_eq!(render(|o| quote_type_name(o, "DECIMAL( 10, -2)")), "DECIMAL( 10, -2)");
        assert_eq!(
            render(|o| quote_type_name(o, "UNSIGNED BIG INT")),
            "UNSIGNED BIG INT"
        );
        assert_eq!(render(|o| quote_type_name(o, "my-type(3)")), r#""my-type"(3)"#);
        assert_eq!(render(|o| quote_type_name(o, "1type")), r#""1type""#);
    }

    #[test]
    fn parenthesize_only_when_flagged() {
        let mut out = String::new();
        parenthesize_if(&mut out, true, |o| {
            o.push('x');
            Ok(())
        })
        .unwrap();
        parenthesize_if(&mut out, false, |o| {
            o.push('y');
            Ok(())
        })
        .unwrap();
        assert_eq!(out, "(x)y");
    }
}
