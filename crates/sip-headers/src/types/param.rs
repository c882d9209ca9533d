//! Parameter rendering and RFC 3261 parameter equality.
//!
//! Parameters are rendered in a deterministic order: `q` first, then every
//! other parameter sorted by `(name, value)`. Two [`Values`] holding the same
//! pairs therefore always render the same text, whatever order they were
//! built in.
//!
//! Equality is partial. A parameter present on both sides must match; a
//! *special* parameter (see [`ParamSpec`]) present on one side must be
//! present on the other; any other parameter unique to one side is ignored.
//!
//! ```rust
//! use rvoip_sip_headers::types::{params_equal, render_params, ParamSpec, Values};
//!
//! let a: Values = [("transport", "udp"), ("q", "0.5")].into_iter().collect();
//! let b: Values = [("q", "0.5"), ("transport", "UDP")].into_iter().collect();
//! assert_eq!(render_params(&a, false), ";q=0.5;transport=udp");
//! assert!(params_equal(&a, &b, &ParamSpec::new(&["q"])));
//! ```

use std::fmt;

use super::values::Values;

/// Parameter names that carry equality weight for one header kind
///
/// Names compare case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec<'a> {
    names: &'a [&'a str],
}

impl<'a> ParamSpec<'a> {
    /// No special parameters
    pub const EMPTY: ParamSpec<'static> = ParamSpec { names: &[] };

    pub const fn new(names: &'a [&'a str]) -> Self {
        Self { names }
    }

    /// Whether `name` is special
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.names.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ParamSpec<'_> {
    fn default() -> Self {
        ParamSpec { names: &[] }
    }
}

fn sorted_pairs(values: &Values, inject_default_q: bool) -> Vec<(String, &str)> {
    let mut pairs: Vec<(String, &str)> = values
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect();
    if inject_default_q && !values.has("q") {
        pairs.push(("q".to_string(), "1"));
    }
    pairs.sort_by(|(an, av), (bn, bv)| {
        let a_is_q = an == "q";
        let b_is_q = bn == "q";
        b_is_q
            .cmp(&a_is_q)
            .then_with(|| an.cmp(bn))
            .then_with(|| av.cmp(bv))
    });
    pairs
}

/// Writes `values` as `;name` / `;name=value` segments
pub fn write_params(
    w: &mut dyn fmt::Write,
    values: &Values,
    inject_default_q: bool,
) -> fmt::Result {
    for (name, value) in sorted_pairs(values, inject_default_q) {
        if value.is_empty() {
            write!(w, ";{}", name)?;
        } else {
            write!(w, ";{}={}", name, value)?;
        }
    }
    Ok(())
}

/// Renders `values` to a string; see [`write_params`]
pub fn render_params(values: &Values, inject_default_q: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_params(&mut out, values, inject_default_q);
    out
}

/// Whether `value` is a quoted string
pub fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

/// Token comparison folds case, quoted-string comparison does not
fn values_equal(a: &str, b: &str) -> bool {
    if is_quoted(a) || is_quoted(b) {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

/// Compares two parameter sets under `special`
pub fn params_equal(a: &Values, b: &Values, special: &ParamSpec<'_>) -> bool {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return true,
        (true, false) => return !special.iter().any(|s| b.has(s)),
        (false, true) => return !special.iter().any(|s| a.has(s)),
        (false, false) => {}
    }

    let mut visited: Vec<&str> = Vec::with_capacity(a.len());
    for (name, value) in a.iter() {
        visited.push(name);
        match b.last(name) {
            Some(other) if !values_equal(value, other) => return false,
            Some(_) => {}
            None if special.contains(name) => return false,
            None => {}
        }
    }

    special
        .iter()
        .filter(|s| !visited.iter().any(|v| v.eq_ignore_ascii_case(s)))
        .all(|s| !b.has(s))
}

/// RFC 3261 token character
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '!' | '%' | '*' | '_' | '+' | '`' | '\'' | '~'
        )
}

/// Non-empty run of token characters
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Wraps `s` in double quotes, escaping `"` and `\`
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Strips surrounding quotes and resolves `\` escapes. Unquoted input is
/// returned unchanged.
pub fn unquote(s: &str) -> String {
    if !is_quoted(s) {
        return s.to_string();
    }
    let inner = &s[1..s.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
