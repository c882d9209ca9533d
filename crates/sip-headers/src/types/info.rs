use std::fmt;

use super::headers::field::{lists_equal, write_list};
use super::headers::HeaderField;
use super::param::{is_token, params_equal, write_params, ParamSpec};
use super::values::Values;
use crate::render::RenderOptions;
use crate::uri::Uri;

/// One `<uri>;params` entry of Alert-Info, Call-Info or Error-Info
#[derive(Debug, Clone)]
pub struct Info {
    pub uri: Uri,
    pub params: Values,
}

impl Info {
    pub fn new(uri: Uri) -> Self {
        Self {
            uri,
            params: Values::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    /// Call-Info `purpose` parameter
    pub fn purpose(&self) -> Option<&str> {
        self.params.last("purpose")
    }

    fn write(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        w.write_char('<')?;
        self.uri.write_to(w, opts)?;
        w.write_char('>')?;
        write_params(w, &self.params, false)
    }

    fn is_valid(&self) -> bool {
        self.uri.is_valid() && self.params.names().all(is_token)
    }

    fn same_as(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.uri == other.uri && params_equal(&self.params, &other.params, special)
    }
}

/// Comma-separated list of [`Info`] entries
#[derive(Debug, Clone, Default)]
pub struct InfoList(pub Vec<Info>);

impl InfoList {
    pub fn new(items: Vec<Info>) -> Self {
        Self(items)
    }
}

impl HeaderField for InfoList {
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, info| info.write(w, opts))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(Info::is_valid)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, |a, b| a.same_as(b, special))
    }
}
