//! # URI values embedded in headers
//!
//! Address-bearing headers (From, To, Contact, Route, Call-Info, ...) carry a
//! URI. The header model treats it as an opaque value behind the
//! [`UriValue`] trait: it only needs to render, compare, clone and validate
//! it. [`AbsoluteUri`] is the built-in implementation; a richer SIP URI
//! model can be plugged in through [`Uri::new`].
//!
//! ```rust
//! use rvoip_sip_headers::uri::Uri;
//!
//! let a: Uri = "sip:alice@atlanta.com".parse().unwrap();
//! let b: Uri = "SIP:alice@atlanta.com".parse().unwrap();
//! assert_eq!(a, b); // scheme compares case-insensitively
//! assert_eq!(a.to_string(), "sip:alice@atlanta.com");
//! ```

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::render::RenderOptions;

/// Behaviour required from a URI embedded in a header
pub trait UriValue: fmt::Debug + Send + Sync + 'static {
    /// URI scheme (`sip`, `sips`, `tel`, `http`, ...)
    fn scheme(&self) -> &str;

    /// Writes the URI text
    fn write_to(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result;

    /// URI equality
    fn equals(&self, other: &dyn UriValue) -> bool;

    /// Deep copy
    fn clone_box(&self) -> Box<dyn UriValue>;

    /// Syntactic validity
    fn is_valid(&self) -> bool;

    /// Downcasting support for `equals` implementations
    fn as_any(&self) -> &dyn Any;
}

/// Owned, polymorphic URI value
#[derive(Debug)]
pub struct Uri(Box<dyn UriValue>);

impl Uri {
    /// Wraps any [`UriValue`] implementation
    pub fn new(value: impl UriValue) -> Self {
        Uri(Box::new(value))
    }

    /// Parses an absolute URI (`scheme ":" rest`)
    pub fn parse(s: &str) -> Result<Self> {
        AbsoluteUri::from_str(s).map(Uri::new)
    }

    /// URI scheme
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Syntactic validity of the wrapped URI
    pub fn is_valid(&self) -> bool {
        self.0.is_valid()
    }

    /// Writes the URI with the given options
    pub fn write_to(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        self.0.write_to(w, opts)
    }

    /// Borrow the concrete URI type, if it is `T`
    pub fn downcast_ref<T: UriValue>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Borrow the wrapped value
    pub fn value(&self) -> &dyn UriValue {
        self.0.as_ref()
    }
}

impl Clone for Uri {
    fn clone(&self) -> Self {
        Uri(self.0.clone_box())
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.0.equals(other.0.as_ref())
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_to(f, &RenderOptions::default())
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uri::parse(s)
    }
}

/// Scheme-agnostic absolute URI: `scheme ":" rest`
///
/// Equality compares the scheme case-insensitively and the remainder
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteUri {
    scheme: String,
    rest: String,
}

impl AbsoluteUri {
    /// Creates a URI from its scheme and the text after the colon
    pub fn new(scheme: impl Into<String>, rest: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            rest: rest.into(),
        }
    }

    /// Text after `scheme:`
    pub fn rest(&self) -> &str {
        &self.rest
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl UriValue for AbsoluteUri {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn write_to(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{}:{}", self.scheme, self.rest)
    }

    fn equals(&self, other: &dyn UriValue) -> bool {
        match other.as_any().downcast_ref::<AbsoluteUri>() {
            Some(other) => {
                self.scheme.eq_ignore_ascii_case(&other.scheme) && self.rest == other.rest
            }
            None => false,
        }
    }

    fn clone_box(&self) -> Box<dyn UriValue> {
        Box::new(self.clone())
    }

    fn is_valid(&self) -> bool {
        is_scheme(&self.scheme)
            && !self.rest.is_empty()
            && !self
                .rest
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"'))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromStr for AbsoluteUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((scheme, rest)) if !scheme.is_empty() => Ok(AbsoluteUri::new(scheme, rest)),
            _ => Err(Error::MalformedInput(format!("URI without scheme: {:?}", s))),
        }
    }
}
