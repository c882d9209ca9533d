//! Comma-separated token lists: option tags, codings, languages, methods,
//! event packages and In-Reply-To call identifiers.

use std::fmt;

use super::headers::field::{lists_equal, write_list};
use super::headers::HeaderField;
use super::param::{is_token, ParamSpec};
use super::scalar::CallId;
use crate::render::RenderOptions;

/// List of tokens compared case-insensitively
///
/// Used for Supported, Require, Proxy-Require, Unsupported,
/// Content-Encoding, Content-Language and Allow-Events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList(pub Vec<String>);

impl TokenList {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Whether `token` is listed (case-insensitive)
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t.eq_ignore_ascii_case(token))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl HeaderField for TokenList {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, t| w.write_str(t))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(|t| is_token(t))
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, |a, b| a.eq_ignore_ascii_case(b))
    }
}

/// Allow: method names, compared case-sensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodList(pub Vec<String>);

impl MethodList {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(methods.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, method: &str) -> bool {
        self.0.iter().any(|m| m == method)
    }
}

impl HeaderField for MethodList {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, m| w.write_str(m))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(|m| is_token(m))
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self.0 == other.0
    }
}

/// In-Reply-To: list of call identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InReplyTo(pub Vec<CallId>);

impl HeaderField for InReplyTo {
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, id| id.write_value(w, opts))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(|id| id.is_valid())
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, |a, b| a.eq_field(b, special))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_list() {
        let list = TokenList::new(["100rel", "Timer"]);
        assert_eq!(list.render_value(), "100rel, Timer");
        assert!(list.contains("timer"));
        assert!(list.eq_field(&TokenList::new(["100REL", "timer"]), &ParamSpec::EMPTY));
        assert!(!list.eq_field(&TokenList::new(["timer", "100rel"]), &ParamSpec::EMPTY));
        assert!(!TokenList::new(["two words"]).is_valid());
    }

    #[test]
    fn test_method_list_is_case_sensitive() {
        let allow = MethodList::new(["INVITE", "ACK"]);
        assert!(allow.allows("INVITE"));
        assert!(!allow.allows("invite"));
        assert!(!allow.eq_field(&MethodList::new(["invite", "ack"]), &ParamSpec::EMPTY));
    }

    #[test]
    fn test_in_reply_to() {
        let irt = InReplyTo(vec![
            CallId::new("70710@saturn.bell-tel.com"),
            CallId::new("17320@saturn.bell-tel.com"),
        ]);
        assert_eq!(
            irt.render_value(),
            "70710@saturn.bell-tel.com, 17320@saturn.bell-tel.com"
        );
        assert!(irt.is_valid());
    }
}
