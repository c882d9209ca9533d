//! Single-valued header fields.

use std::fmt;

use super::headers::HeaderField;
use super::param::{is_token, is_token_char, ParamSpec};
use crate::render::RenderOptions;

/// Non-negative integer value (Content-Length, Max-Forwards, Expires,
/// Min-Expires, RSeq)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number(pub u32);

impl HeaderField for Number {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{}", self.0)
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self.0 == other.0
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number(n)
    }
}

/// Free text (Subject, Organization, Server, User-Agent)
///
/// Compared byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(pub String);

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl HeaderField for Text {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        w.write_str(&self.0)
    }

    fn is_valid(&self) -> bool {
        !self.0.contains(['\r', '\n'])
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self.0 == other.0
    }
}

/// Single token compared case-insensitively (Priority)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(pub String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl HeaderField for Token {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        w.write_str(&self.0)
    }

    fn is_valid(&self) -> bool {
        is_token(&self.0)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

/// Entity tag of published event state (SIP-ETag, SIP-If-Match)
///
/// Entity tags are opaque and compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag(pub String);

impl EntityTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

impl HeaderField for EntityTag {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        w.write_str(&self.0)
    }

    fn is_valid(&self) -> bool {
        is_token(&self.0)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self.0 == other.0
    }
}

/// `word` characters of RFC 3261
pub(crate) fn is_word_char(c: char) -> bool {
    is_token_char(c)
        || matches!(
            c,
            '(' | ')' | '<' | '>' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '{' | '}'
        )
}

/// Call identifier: `word ["@" word]`, compared exactly
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallId(pub String);

impl CallId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl HeaderField for CallId {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        w.write_str(&self.0)
    }

    fn is_valid(&self) -> bool {
        let mut parts = self.0.splitn(2, '@');
        let word_ok = |s: &str| !s.is_empty() && s.chars().all(is_word_char);
        match (parts.next(), parts.next()) {
            (Some(local), None) => word_ok(local),
            (Some(local), Some(host)) => word_ok(local) && word_ok(host),
            _ => false,
        }
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self.0 == other.0
    }
}

/// MIME-Version: `major.minor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MimeVersion {
    pub major: u32,
    pub minor: u32,
}

impl MimeVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl HeaderField for MimeVersion {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{}.{}", self.major, self.minor)
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self == other
    }
}
