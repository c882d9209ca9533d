use std::fmt;

use super::headers::HeaderField;
use super::param::{is_token, params_equal, write_params, ParamSpec};
use super::values::Values;
use crate::render::RenderOptions;

/// Content-Type: `type/subtype *(;param)`
///
/// Type and subtype compare case-insensitively.
#[derive(Debug, Clone)]
pub struct MediaType {
    pub mtype: String,
    pub subtype: String,
    pub params: Values,
}

impl MediaType {
    pub fn new(mtype: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            mtype: mtype.into(),
            subtype: subtype.into(),
            params: Values::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    pub fn charset(&self) -> Option<&str> {
        self.params.last("charset")
    }

    /// `type/subtype` without parameters
    pub fn essence(&self) -> String {
        format!("{}/{}", self.mtype, self.subtype).to_ascii_lowercase()
    }
}

impl HeaderField for MediaType {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{}/{}", self.mtype, self.subtype)?;
        write_params(w, &self.params, false)
    }

    fn is_valid(&self) -> bool {
        is_token(&self.mtype) && is_token(&self.subtype) && self.params.names().all(is_token)
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.mtype.eq_ignore_ascii_case(&other.mtype)
            && self.subtype.eq_ignore_ascii_case(&other.subtype)
            && params_equal(&self.params, &other.params, special)
    }
}
