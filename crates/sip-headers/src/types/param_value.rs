//! `token *(;param)` values: Content-Disposition, Event,
//! Subscription-State, Session-Expires, Min-SE, and Reason entries.

use std::fmt;

use super::headers::field::{lists_equal, write_list};
use super::headers::HeaderField;
use super::param::{is_token, params_equal, write_params, ParamSpec};
use super::values::Values;
use crate::render::RenderOptions;

/// A token followed by parameters
///
/// The token compares case-insensitively.
#[derive(Debug, Clone)]
pub struct ParamValue {
    pub value: String,
    pub params: Values,
}

impl ParamValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            params: Values::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.last(name)
    }

    /// The leading token parsed as seconds (Session-Expires, Min-SE)
    pub fn seconds(&self) -> Option<u32> {
        self.value.parse().ok()
    }
}

impl HeaderField for ParamValue {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        w.write_str(&self.value)?;
        write_params(w, &self.params, false)
    }

    fn is_valid(&self) -> bool {
        is_token(&self.value) && self.params.names().all(is_token)
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.value.eq_ignore_ascii_case(&other.value)
            && params_equal(&self.params, &other.params, special)
    }
}

/// Reason: protocol tokens with `cause` / `text` parameters
#[derive(Debug, Clone, Default)]
pub struct ReasonList(pub Vec<ParamValue>);

impl ReasonList {
    pub fn new(reasons: Vec<ParamValue>) -> Self {
        Self(reasons)
    }

    /// First reason given for `protocol` (`SIP`, `Q.850`, ...)
    pub fn for_protocol(&self, protocol: &str) -> Option<&ParamValue> {
        self.0.iter().find(|r| r.value.eq_ignore_ascii_case(protocol))
    }
}

impl HeaderField for ReasonList {
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, r| r.write_value(w, opts))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(|r| r.is_valid())
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, |a, b| a.eq_field(b, special))
    }
}
