//! Address-bearing header values: From, To, Reply-To, Refer-To,
//! Referred-By, the Route family and Contact.
//!
//! Addresses always render in name-addr form (`"Name" <uri>;params`) so that
//! URI parameters and header parameters cannot be confused. Display names do
//! not take part in equality.

use std::fmt;

use super::headers::field::{lists_equal, write_list};
use super::headers::HeaderField;
use super::param::{is_token, params_equal, quote, write_params, ParamSpec};
use super::values::Values;
use crate::render::RenderOptions;
use crate::uri::Uri;

/// `[display-name] <uri> *(;param)`
#[derive(Debug, Clone)]
pub struct NameAddr {
    pub display_name: Option<String>,
    pub uri: Uri,
    pub params: Values,
}

impl NameAddr {
    pub fn new(uri: Uri) -> Self {
        Self {
            display_name: None,
            uri,
            params: Values::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    /// The `tag` parameter
    pub fn tag(&self) -> Option<&str> {
        self.params.last("tag")
    }

    pub(crate) fn write_with(
        &self,
        w: &mut dyn fmt::Write,
        opts: &RenderOptions,
        inject_default_q: bool,
    ) -> fmt::Result {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.is_empty()) {
            write!(w, "{} ", quote(name))?;
        }
        w.write_char('<')?;
        self.uri.write_to(w, opts)?;
        w.write_char('>')?;
        write_params(w, &self.params, inject_default_q)
    }
}

impl HeaderField for NameAddr {
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        self.write_with(w, opts, false)
    }

    fn is_valid(&self) -> bool {
        self.uri.is_valid() && self.params.names().all(is_token)
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.uri == other.uri && params_equal(&self.params, &other.params, special)
    }
}

/// Ordered list of addresses (Route, Record-Route, Path)
#[derive(Debug, Clone, Default)]
pub struct AddressList(pub Vec<NameAddr>);

impl AddressList {
    pub fn new(addresses: Vec<NameAddr>) -> Self {
        Self(addresses)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NameAddr> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl HeaderField for AddressList {
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, addr| addr.write_with(w, opts, false))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(NameAddr::is_valid)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, |a, b| a.eq_field(b, special))
    }
}

/// Contact header value: `*` or a list of addresses
#[derive(Debug, Clone)]
pub enum Contact {
    /// `Contact: *`, used to remove all bindings
    Star,
    Addresses(Vec<NameAddr>),
}

impl Contact {
    pub fn addresses(&self) -> &[NameAddr] {
        match self {
            Contact::Star => &[],
            Contact::Addresses(list) => list,
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self, Contact::Star)
    }
}

impl HeaderField for Contact {
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        match self {
            Contact::Star => w.write_char('*'),
            Contact::Addresses(list) => {
                write_list(w, list, |w, addr| addr.write_with(w, opts, opts.default_q))
            }
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            Contact::Star => true,
            Contact::Addresses(list) => list.iter().all(NameAddr::is_valid),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Contact::Addresses(list) if list.is_empty())
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        match (self, other) {
            (Contact::Star, Contact::Star) => true,
            (Contact::Addresses(a), Contact::Addresses(b)) => {
                lists_equal(a, b, |x, y| x.eq_field(y, special))
            }
            _ => false,
        }
    }
}
