use std::fmt;

use super::headers::HeaderField;
use super::param::{is_token, ParamSpec};
use crate::render::RenderOptions;

/// CSeq: sequence number and request method
///
/// Methods are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CSeq {
    pub seq: u32,
    pub method: String,
}

impl CSeq {
    pub fn new(seq: u32, method: impl Into<String>) -> Self {
        Self {
            seq,
            method: method.into(),
        }
    }
}

impl HeaderField for CSeq {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{} {}", self.seq, self.method)
    }

    fn is_valid(&self) -> bool {
        is_token(&self.method)
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self == other
    }
}

/// RAck: acknowledges a reliable provisional response (RFC 3262)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RAck {
    pub rseq: u32,
    pub cseq: u32,
    pub method: String,
}

impl RAck {
    pub fn new(rseq: u32, cseq: u32, method: impl Into<String>) -> Self {
        Self {
            rseq,
            cseq,
            method: method.into(),
        }
    }
}

impl HeaderField for RAck {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write!(w, "{} {} {}", self.rseq, self.cseq, self.method)
    }

    fn is_valid(&self) -> bool {
        is_token(&self.method)
    }

    fn eq_field(&self, other: &Self, _special: &ParamSpec<'_>) -> bool {
        self == other
    }
}
