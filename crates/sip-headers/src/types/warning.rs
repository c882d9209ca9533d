use std::fmt;

use super::headers::field::{lists_equal, write_list};
use super::headers::HeaderField;
use super::param::{quote, ParamSpec};
use crate::render::RenderOptions;

/// One `warn-code warn-agent "warn-text"` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningValue {
    pub code: u16,
    /// Host[:port] or pseudonym of the agent adding the warning
    pub agent: String,
    /// Unquoted warning text
    pub text: String,
}

impl WarningValue {
    pub fn new(code: u16, agent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code,
            agent: agent.into(),
            text: text.into(),
        }
    }

    /// warn-code is always three digits on the wire
    fn write(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        write!(w, "{:03} {} {}", self.code, self.agent, quote(&self.text))
    }

    fn is_valid(&self) -> bool {
        (100..=999).contains(&self.code)
            && !self.agent.is_empty()
            && !self.agent.contains(|c: char| c.is_whitespace() || c == '"')
            && !self.text.contains(['\r', '\n'])
    }

    fn same_as(&self, other: &Self) -> bool {
        self.code == other.code
            && self.agent.eq_ignore_ascii_case(&other.agent)
            && self.text == other.text
    }
}

/// Warning: list of warning values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warning(pub Vec<WarningValue>);

impl Warning {
    pub fn new(values: Vec<WarningValue>) -> Self {
        Self(values)
    }
}

impl HeaderField for Warning {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, v| v.write(w))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(WarningValue::is_valid)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, WarningValue::same_as)
    }
}
