//! Via header: one or more hops, each `SIP/2.0/<transport> host[:port]` with
//! parameters.

use std::fmt;

use super::headers::field::{lists_equal, write_list};
use super::headers::HeaderField;
use super::param::{is_token, params_equal, write_params, ParamSpec};
use super::values::Values;
use crate::render::RenderOptions;

/// Magic cookie that RFC 3261 branch identifiers start with
pub const BRANCH_MAGIC_COOKIE: &str = "z9hG4bK";

/// A single Via hop
#[derive(Debug, Clone)]
pub struct ViaHop {
    pub protocol: String,
    pub version: String,
    pub transport: String,
    /// Host name, IPv4 address or bracketed IPv6 reference
    pub host: String,
    pub port: Option<u16>,
    pub params: Values,
}

impl ViaHop {
    /// `SIP/2.0/<transport> host[:port]`
    pub fn new(transport: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            protocol: "SIP".to_string(),
            version: "2.0".to_string(),
            transport: transport.into(),
            host: host.into(),
            port,
            params: Values::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    pub fn with_branch(self, branch: impl Into<String>) -> Self {
        self.with_param("branch", branch)
    }

    pub fn branch(&self) -> Option<&str> {
        self.params.last("branch")
    }

    pub fn received(&self) -> Option<&str> {
        self.params.last("received")
    }

    pub fn rport(&self) -> Option<&str> {
        self.params.last("rport")
    }

    /// Whether the branch carries the RFC 3261 magic cookie
    pub fn has_rfc3261_branch(&self) -> bool {
        self.branch()
            .map_or(false, |b| b.starts_with(BRANCH_MAGIC_COOKIE))
    }

    fn write(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        write!(
            w,
            "{}/{}/{} {}",
            self.protocol, self.version, self.transport, self.host
        )?;
        if let Some(port) = self.port {
            write!(w, ":{}", port)?;
        }
        write_params(w, &self.params, false)
    }

    fn host_is_valid(&self) -> bool {
        let host = self.host.as_str();
        if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            return !inner.is_empty() && inner.chars().all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.');
        }
        !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    }

    fn is_valid(&self) -> bool {
        is_token(&self.protocol)
            && is_token(&self.version)
            && is_token(&self.transport)
            && self.host_is_valid()
            && self.params.names().all(is_token)
    }

    fn same_as(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        self.protocol.eq_ignore_ascii_case(&other.protocol)
            && self.version == other.version
            && self.transport.eq_ignore_ascii_case(&other.transport)
            && self.host.eq_ignore_ascii_case(&other.host)
            && self.port == other.port
            && params_equal(&self.params, &other.params, special)
    }
}

/// Via: ordered list of hops, topmost first
#[derive(Debug, Clone, Default)]
pub struct Via(pub Vec<ViaHop>);

impl Via {
    pub fn new(hops: Vec<ViaHop>) -> Self {
        Self(hops)
    }

    /// Topmost hop
    pub fn top(&self) -> Option<&ViaHop> {
        self.0.first()
    }

    pub fn hops(&self) -> &[ViaHop] {
        &self.0
    }
}

impl HeaderField for Via {
    fn write_value(&self, w: &mut dyn fmt::Write, _opts: &RenderOptions) -> fmt::Result {
        write_list(w, &self.0, |w, hop| hop.write(w))
    }

    fn is_valid(&self) -> bool {
        self.0.iter().all(ViaHop::is_valid)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool {
        lists_equal(&self.0, &other.0, |a, b| a.same_as(b, special))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: ParamSpec<'static> = ParamSpec::new(&["branch", "maddr", "ttl", "received"]);

    #[test]
    fn test_render() {
        let via = Via::new(vec![
            ViaHop::new("UDP", "pc33.atlanta.com", Some(5060)).with_branch("z9hG4bK776asdhds"),
            ViaHop::new("TCP", "[2001:db8::9:1]", None).with_param("rport", ""),
        ]);
        assert_eq!(
            via.render_value(),
            "SIP/2.0/UDP pc33.atlanta.com:5060;branch=z9hG4bK776asdhds, SIP/2.0/TCP [2001:db8::9:1];rport"
        );
        assert!(via.is_valid());
        assert!(via.top().map_or(false, ViaHop::has_rfc3261_branch));
    }

    #[test]
    fn test_branch_is_special() {
        let a = Via::new(vec![ViaHop::new("UDP", "host", None).with_branch("z9hG4bK1")]);
        let b = Via::new(vec![ViaHop::new("udp", "HOST", None)]);
        let c = Via::new(vec![ViaHop::new("udp", "HOST", None).with_branch("z9hG4bK1")]);
        assert!(!a.eq_field(&b, &SPEC));
        assert!(a.eq_field(&c, &SPEC));
    }

    #[test]
    fn test_invalid_host() {
        assert!(!ViaHop::new("UDP", "bad host", None).is_valid());
        assert!(!ViaHop::new("UDP", "", None).is_valid());
        assert!(!ViaHop::new("", "host", None).is_valid());
    }
}
