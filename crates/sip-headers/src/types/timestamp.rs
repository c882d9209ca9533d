use std::fmt;

use super::headers::HeaderField;
use super::param::ParamSpec;
use crate::render::RenderOptions;

/// Timestamp: send time with an optional delay, both in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestamp {
    pub time: f64,
    pub delay: Option<f64>,
}

impl Timestamp {
    pub fn new(time: f64) -> Self {
        Self { time, delay: None }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl HeaderField for Timestamp {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{}", self.time)?;
        if let Some(delay) = self.delay {
            write!(w, " {}", delay)?;
        }
        Ok(())
    }

    fn is_valid(&self) -> bool {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        ok(self.time) && self.delay.map_or(true, ok)
    }

    /// Numeric comparison: `54` and `54.0` are the same timestamp
    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self == other
    }
}
