//! Binding parameter markers (`?`, `?N`, `:name`, `@name`, `$name`).

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::error::{QbError, QbResult};

fn positional_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\?([1-9][0-9]*)?$").expect("invalid built-in parameter regex"))
}

fn named_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[:@$][A-Za-z0-9]+$").expect("invalid built-in parameter regex"))
}

/// Shape of a binding parameter marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `?`
    Anonymous,
    /// `?N`
    Numbered(u32),
    /// `:name`, `@name` or `$name`
    Named,
}

/// Prefix character of a named parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePrefix {
    Colon,
    At,
    Dollar,
}

impl NamePrefix {
    fn as_char(self) -> char {
        match self {
            NamePrefix::Colon => ':',
            NamePrefix::At => '@',
            NamePrefix::Dollar => '$',
        }
    }
}

/// A validated binding parameter marker.
///
/// Values are never bound here; the marker is rendered verbatim so the
/// caller's driver can substitute it at execution time.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BindParam(Arc<str>);

impl BindParam {
    /// Validate and wrap a parameter marker.
    ///
    /// # Example
    /// ```
    /// use sqlite_qb::BindParam;
    ///
    /// assert!(BindParam::new("?1").is_ok());
    /// assert!(BindParam::new(":user").is_ok());
    /// assert!(BindParam::new("?0").is_err());
    /// ```
    pub fn new(text: &str) -> QbResult<Self> {
        if positional_re().is_match(text) || named_re().is_match(text) {
            Ok(Self(Arc::from(text)))
        } else {
            Err(QbError::InvalidParameter(text.to_string()))
        }
    }

    /// The anonymous `?` marker.
    pub fn anonymous() -> Self {
        Self(Arc::from("?"))
    }

    /// A numbered `?N` marker; `n` must be at least 1.
    pub fn numbered(n: u32) -> QbResult<Self> {
        Self::new(&format!("?{n}"))
    }

    /// A named marker such as `:name`.
    pub fn named(prefix: NamePrefix, name: &str) -> QbResult<Self> {
        Self::new(&format!("{}{name}", prefix.as_char()))
    }

    /// The marker text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> ParamKind {
        match self.0.strip_prefix('?') {
            Some("") => ParamKind::Anonymous,
            // Validated at construction; overflowing indexes are still positional.
            Some(digits) => ParamKind::Numbered(digits.parse().unwrap_or(u32::MAX)),
            None => ParamKind::Named,
        }
    }
}

impl fmt::Debug for BindParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BindParam").field(&&*self.0).finish()
    }
}

impl fmt::Display for BindParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_markers() {
        for text in ["?", "?1", "?42", ":name1", "@x", "$y"] {
            let param = BindParam::new(text).unwrap();
            assert_eq!(param.as_str(), text);
        }
    }

    #[test]
    fn rejects_malformed_markers() {
        for text in ["?0", "?01", "", ":", "name", ":a-b", "?x", "#a", ":a b", "??"] {
            let err = BindParam::new(text).unwrap_err();
            assert!(err.is_invalid_parameter(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn kinds() {
        assert_eq!(BindParam::anonymous().kind(), ParamKind::Anonymous);
        assert_eq!(BindParam::numbered(7).unwrap().kind(), ParamKind::Numbered(7));
        assert_eq!(
            BindParam::named(NamePrefix::At, "who").unwrap().kind(),
            ParamKind::Named
        );
        assert!(BindParam::numbered(0).is_err());
    }
}
