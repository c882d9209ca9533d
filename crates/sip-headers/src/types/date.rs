use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::headers::HeaderField;
use super::param::ParamSpec;
use crate::error::{Error, Result};
use crate::render::RenderOptions;

const RFC1123_GMT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Date header value (RFC 1123 date, always GMT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SipDate(pub DateTime<Utc>);

impl SipDate {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self(date)
    }

    /// Current time, truncated to whole seconds
    pub fn now() -> Self {
        let now = Utc::now();
        Self(DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now))
    }
}

impl FromStr for SipDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc2822(s.trim())
            .map(|d| SipDate(d.with_timezone(&Utc)))
            .map_err(|e| Error::MalformedInput(format!("invalid SIP date {:?}: {}", s, e)))
    }
}

impl HeaderField for SipDate {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{}", self.0.format(RFC1123_GMT))
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self.0 == other.0
    }
}
