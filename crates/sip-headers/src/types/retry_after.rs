use std::fmt;

use super::headers::HeaderField;
use super::param::{is_token, params_equal, write_params, ParamSpec};
use super::values::Values;
use crate::render::RenderOptions;

/// Retry-After: `delta-seconds [(comment)] *(;param)`
///
/// The comment does not take part in equality.
#[derive(Debug, Clone)]
pub struct RetryAfter {
    pub delay: u32,
    pub comment: Option<String>,
    pub params: Values,
}

impl RetryAfter {
    pub fn new(delay: u32) -> Self {
        Self {
            delay,
            comment: None,
            params: Values::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    /// The `duration` parameter in seconds
    pub fn duration(&self) -> Option<u32> {
        self.params.last("duration").and_then(|d| d.parse().ok())
    }
}

impl HeaderField for RetryAfter {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{}", self.delay)?;
        if let Some(comment) = &self.comment {
            write!(w, " ({})", comment)?;
        }
        write_params(w, &self.params, false)
    }

    fn is_valid(&self) -> bool {
        let comment_ok = self
            .comment
            .as_deref()
            .map_or(true, |c| !c.contains(['(', ')', '\r', '\n']));
        comment_ok && self.params.names().all(is_token)
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.delay == other.delay && params_equal(&self.params, &other.params, special)
    }
}
