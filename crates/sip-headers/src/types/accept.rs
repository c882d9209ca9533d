//! Accept, Accept-Encoding and Accept-Language.
//!
//! Each entry of an accept-style header carries an optional `q` weight.
//! An absent `q` means `1`; with [`RenderOptions::default_q`] it is written
//! out explicitly.
//!
//! For Accept, parameters before the first `q` belong to the media range
//! (`level=1` in `text/html;level=1;q=0.5`) and `q` plus every parameter
//! after it are accept-params. The split is kept across parse and render.

use std::fmt;

use ordered_float::NotNan;

use super::headers::field::{lists_equal, write_list};
use super::headers::HeaderField;
use super::param::{is_token, params_equal, write_params, ParamSpec};
use super::values::Values;
use crate::render::RenderOptions;

/// Explicit `q` weight, when present and within `0..=1`
fn explicit_q(params: &Values) -> Option<NotNan<f32>> {
    params
        .last("q")
        .and_then(|q| q.trim().parse::<f32>().ok())
        .and_then(|q| NotNan::new(q).ok())
        .filter(|q| (0.0..=1.0).contains(&q.into_inner()))
}

fn q_value(params: &Values) -> f32 {
    explicit_q(params).map_or(1.0, NotNan::into_inner)
}

fn valid_q(params: &Values) -> bool {
    params.last("q").map_or(true, |q| {
        q.parse::<f32>()
            .map(|v| (0.0..=1.0).contains(&v))
            .unwrap_or(false)
    })
}

/// One media range of an Accept header
#[derive(Debug, Clone)]
pub struct AcceptRange {
    pub mtype: String,
    pub subtype: String,
    /// Parameters before the first `q`
    pub media_params: Values,
    /// `q` and everything after it
    pub accept_params: Values,
}

impl AcceptRange {
    pub fn new(mtype: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            mtype: mtype.into(),
            subtype: subtype.into(),
            media_params: Values::new(),
            accept_params: Values::new(),
        }
    }

    /// Sets the `q` weight
    pub fn with_q(mut self, q: f32) -> Self {
        self.accept_params.set("q", q.to_string());
        self
    }

    /// Explicit quality weight
    pub fn q(&self) -> Option<NotNan<f32>> {
        explicit_q(&self.accept_params)
    }

    /// Quality weight, `1` when absent or unparsable
    pub fn q_value(&self) -> f32 {
        q_value(&self.accept_params)
    }

    /// Whether this range covers `mtype/subtype`, honouring `*` wildcards
    pub fn matches(&self, mtype: &str, subtype: &str) -> bool {
        let type_ok = self.mtype == "*" || self.mtype.eq_ignore_ascii_case(mtype);
        let subtype_ok = self.subtype == "*" || self.subtype.eq_ignore_ascii_case(subtype);
        type_ok && subtype_ok
    }

    fn write(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        write!(w, "{}/{}", self.mtype, self.subtype)?;
        write_params(w, &self.media_params, false)?;
        write_params(w, &self.accept_params, opts.default_q)
    }

    fn is_valid(&self) -> bool {
        is_token(&self.mtype)
            && is_token(&self.subtype)
            && self.media_params.names().all(is_token)
            && self.accept_params.names().all(is_token)
            && valid_q(&self.accept_params)
    }

    fn same_as(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.mtype.eq_ignore_ascii_case(&other.mtype)
            && self.subtype.eq_ignore_ascii_case(&other.subtype)
            && params_equal(&self.media_params, &other.media_params, special)
            && params_equal(&self.accept_params, &other.accept_params, special)
    }
}

/// Accept: list of media ranges
#[derive(Debug, Clone, Default)]
pub struct Accept(pub Vec<AcceptRange>);

impl Accept {
    pub fn new(ranges: Vec<AcceptRange>) -> Self {
        Self(ranges)
    }

    /// Whether `mtype/subtype` is acceptable. An empty header accepts
    /// everything.
    pub fn accepts(&self, mtype: &str, subtype: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        self.0
            .iter()
            .filter(|r| r.matches(mtype, subtype))
            .any(|r| r.q_value() > 0.0)
    }

    /// Ranges ordered by descending weight, stable for equal weights
    pub fn by_preference(&self) -> Vec<&AcceptRange> {
        let mut ranges: Vec<&AcceptRange> = self.0.iter().collect();
        ranges.sort_by(|a, b| b.q_value().total_cmp(&a.q_value()));
        ranges
    }
}

impl HeaderField for Accept {
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, r| r.write(w, opts))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(AcceptRange::is_valid)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, |a, b| a.same_as(b, special))
    }
}

/// One coding or language range with its parameters
#[derive(Debug, Clone)]
pub struct AcceptItem {
    pub value: String,
    pub params: Values,
}

impl AcceptItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            params: Values::new(),
        }
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.params.set("q", q.to_string());
        self
    }

    pub fn q(&self) -> Option<NotNan<f32>> {
        explicit_q(&self.params)
    }

    pub fn q_value(&self) -> f32 {
        q_value(&self.params)
    }

    pub fn is_wildcard(&self) -> bool {
        self.value == "*"
    }

    fn write(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        w.write_str(&self.value)?;
        write_params(w, &self.params, opts.default_q)
    }

    fn is_valid(&self) -> bool {
        is_token(&self.value) && self.params.names().all(is_token) && valid_q(&self.params)
    }

    fn same_as(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.value.eq_ignore_ascii_case(&other.value)
            && params_equal(&self.params, &other.params, special)
    }
}

/// Accept-Encoding / Accept-Language: list of weighted tokens
#[derive(Debug, Clone, Default)]
pub struct AcceptList(pub Vec<AcceptItem>);

impl AcceptList {
    pub fn new(items: Vec<AcceptItem>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[AcceptItem] {
        &self.0
    }

    /// Whether `value` is acceptable. An explicit entry takes precedence
    /// over `*`; an empty header accepts everything.
    pub fn accepts(&self, value: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        self.0
            .iter()
            .find(|i| i.value.eq_ignore_ascii_case(value))
            .or_else(|| self.0.iter().find(|i| i.is_wildcard()))
            .map_or(false, |i| i.q_value() > 0.0)
    }

    /// Highest-weighted entry of `available`; explicit entries win over `*`
    pub fn best_match<'a, I>(&self, available: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let available: Vec<&'a str> = available.into_iter().collect();
        if self.0.is_empty() {
            return available.first().copied();
        }

        let mut ranked: Vec<&AcceptItem> = self.0.iter().filter(|i| i.q_value() > 0.0).collect();
        ranked.sort_by(|a, b| b.q_value().total_cmp(&a.q_value()));

        for item in ranked.iter().filter(|i| !i.is_wildcard()) {
            if let Some(hit) = available.iter().find(|a| item.value.eq_ignore_ascii_case(a)) {
                return Some(*hit);
            }
        }
        if ranked.iter().any(|i| i.is_wildcard()) {
            return available
                .iter()
                .copied()
                .find(|a| !self.0.iter().any(|i| i.value.eq_ignore_ascii_case(a)));
        }
        None
    }
}

impl HeaderField for AcceptList {
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, item| item.write(w, opts))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(AcceptItem::is_valid)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, |a, b| a.same_as(b, special))
    }
}
