//! Authentication headers: credentials and challenges (Authorization,
//! Proxy-Authorization, WWW-Authenticate, Proxy-Authenticate) and
//! Authentication-Info.
//!
//! Auth parameters are comma-separated rather than `;`-prefixed. They are
//! written in the same deterministic order as other parameters, with quoted
//! values kept exactly as stored.

use std::fmt;

use super::headers::HeaderField;
use super::param::{is_token, params_equal, quote, unquote, ParamSpec};
use super::values::Values;
use crate::render::RenderOptions;

fn write_auth_params(w: &mut dyn fmt::Write, params: &Values) -> fmt::Result {
    let mut pairs: Vec<(String, &str)> = params
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect();
    pairs.sort();
    for (idx, (name, value)) in pairs.iter().enumerate() {
        if idx > 0 {
            w.write_str(", ")?;
        }
        write!(w, "{}={}", name, value)?;
    }
    Ok(())
}

fn auth_params_valid(params: &Values) -> bool {
    params.iter().all(|(name, value)| is_token(name) && !value.is_empty())
}

/// `scheme auth-param *("," auth-param)`
///
/// Parameter values are stored raw: quoted-string values keep their quotes.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub scheme: String,
    pub params: Values,
}

impl Credentials {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            params: Values::new(),
        }
    }

    /// Digest credentials or challenge
    pub fn digest() -> Self {
        Self::new("Digest")
    }

    /// Adds a parameter, stored verbatim
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    /// Adds a parameter whose value is written as a quoted string
    pub fn with_quoted_param(self, name: impl Into<String>, value: &str) -> Self {
        self.with_param(name, quote(value))
    }

    /// Parameter value with any surrounding quotes removed
    pub fn param(&self, name: &str) -> Option<String> {
        self.params.last(name).map(unquote)
    }

    pub fn realm(&self) -> Option<String> {
        self.param("realm")
    }

    pub fn username(&self) -> Option<String> {
        self.param("username")
    }

    pub fn nonce(&self) -> Option<String> {
        self.param("nonce")
    }
}

impl HeaderField for Credentials {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        w.write_str(&self.scheme)?;
        if !self.params.is_empty() {
            w.write_char(' ')?;
            write_auth_params(w, &self.params)?;
        }
        Ok(())
    }

    fn is_valid(&self) -> bool {
        is_token(&self.scheme) && auth_params_valid(&self.params)
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.scheme.eq_ignore_ascii_case(&other.scheme)
            && params_equal(&self.params, &other.params, special)
    }
}

/// Authentication-Info: comma-separated auth parameters
#[derive(Debug, Clone, Default)]
pub struct AuthenticationInfo {
    pub params: Values,
}

impl AuthenticationInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    pub fn next_nonce(&self) -> Option<String> {
        self.params.last("nextnonce").map(unquote)
    }
}

impl HeaderField for AuthenticationInfo {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write_auth_params(w, &self.params)
    }

    fn is_valid(&self) -> bool {
        auth_params_valid(&self.params)
    }

    fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        params_equal(&self.params, &other.params, special)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::digest()
            .with_quoted_param("username", "bob")
            .with_quoted_param("realm", "biloxi.com")
            .with_quoted_param("nonce", "dcd98b7102dd2f0e8b11d0f600bfb0c093")
            .with_quoted_param("uri", "sip:bob@biloxi.com")
            .with_param("algorithm", "MD5")
    }

    #[test]
    fn test_render_sorted() {
        assert_eq!(
            credentials().render_value(),
            "Digest algorithm=MD5, nonce=\"dcd98b7102dd2f0e8b11d0f600bfb0c093\", \
             realm=\"biloxi.com\", uri=\"sip:bob@biloxi.com\", username=\"bob\""
        );
    }

    #[test]
    fn test_accessors_unquote() {
        let c = credentials();
        assert_eq!(c.username().as_deref(), Some("bob"));
        assert_eq!(c.realm().as_deref(), Some("biloxi.com"));
        assert_eq!(c.param("algorithm").as_deref(), Some("MD5"));
    }

    #[test]
    fn test_equality() {
        let spec = ParamSpec::new(&["realm", "nonce", "username", "uri", "algorithm"]);
        let a = credentials();
        let b = credentials().with_param("algorithm", "md5");
        let c = credentials().with_quoted_param("realm", "BILOXI.COM");
        let mut d = credentials();
        d.params.remove("nonce");
        assert!(a.eq_field(&b, &spec));
        assert!(!a.eq_field(&c, &spec));
        assert!(!a.eq_field(&d, &spec));
    }

    #[test]
    fn test_authentication_info() {
        let info = AuthenticationInfo::new()
            .with_param("nextnonce", quote("47364c23432d2e131a5fb210812c"))
            .with_param("qop", "auth");
        assert_eq!(
            info.render_value(),
            "nextnonce=\"47364c23432d2e131a5fb210812c\", qop=auth"
        );
        assert_eq!(info.next_nonce().as_deref(), Some("47364c23432d2e131a5fb210812c"));
        assert!(info.is_valid());
    }
}
