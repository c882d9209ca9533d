use crate::error::{Error, Result};
use crate::types::param::ParamSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exception table for header names that generic capitalization cannot
/// produce: compact forms and irregular spellings. Keys are matched first as
/// given, then in their generically capitalized form.
const EXCEPTIONS: &[(&str, &str)] = &[
    // Compact forms
    ("A", "Accept-Contact"),
    ("B", "Referred-By"),
    ("C", "Content-Type"),
    ("D", "Request-Disposition"),
    ("E", "Content-Encoding"),
    ("F", "From"),
    ("I", "Call-ID"),
    ("J", "Reject-Contact"),
    ("K", "Supported"),
    ("L", "Content-Length"),
    ("M", "Contact"),
    ("N", "Identity-Info"),
    ("O", "Event"),
    ("R", "Refer-To"),
    ("S", "Subject"),
    ("T", "To"),
    ("U", "Allow-Events"),
    ("V", "Via"),
    ("X", "Session-Expires"),
    ("Y", "Identity"),
    // Irregular capitalization
    ("Call-Id", "Call-ID"),
    ("Cseq", "CSeq"),
    ("Www-Authenticate", "WWW-Authenticate"),
    ("Mime-Version", "MIME-Version"),
    ("Rack", "RAck"),
    ("Rseq", "RSeq"),
    ("Sip-Etag", "SIP-ETag"),
    ("Sip-If-Match", "SIP-If-Match"),
    ("Min-Se", "Min-SE"),
    ("Content-Id", "Content-ID"),
];

fn lookup_exception(name: &str) -> Option<&'static str> {
    EXCEPTIONS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, canonical)| *canonical)
}

/// Upper-cases the first letter and every letter following `-`, lower-cases
/// the rest.
fn capitalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}

/// Canonical display spelling of a header name
///
/// Idempotent and case-insensitive.
///
/// ```rust
/// use rvoip_sip_headers::types::headers::canonicalize;
///
/// assert_eq!(canonicalize("call-id"), "Call-ID");
/// assert_eq!(canonicalize("CALL-ID"), "Call-ID");
/// assert_eq!(canonicalize("i"), "Call-ID");
/// assert_eq!(canonicalize(" x-my-HEADER "), "X-My-Header");
/// ```
pub fn canonicalize(name: &str) -> String {
    let trimmed = name.trim();
    if let Some(canonical) = lookup_exception(trimmed) {
        return canonical.to_string();
    }
    let generic = capitalize(trimmed);
    match lookup_exception(&generic) {
        Some(canonical) => canonical.to_string(),
        None => generic,
    }
}

macro_rules! header_names {
    ($( $(#[$doc:meta])* $variant:ident => $canonical:literal ),* $(,)?) => {
        /// SIP header names
        ///
        /// Known headers are unit variants; anything else is kept in
        /// [`HeaderName::Other`] in its canonicalized spelling. Parsing is
        /// case-insensitive and accepts compact forms.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use rvoip_sip_headers::types::headers::HeaderName;
        /// use std::str::FromStr;
        ///
        /// assert_eq!(HeaderName::from_str("f").unwrap(), HeaderName::From);
        /// assert_eq!(HeaderName::from_str("call-id").unwrap().as_str(), "Call-ID");
        /// assert_eq!(
        ///     HeaderName::from_str("x-custom").unwrap(),
        ///     HeaderName::Other("X-Custom".to_string())
        /// );
        /// ```
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum HeaderName {
            $( $(#[$doc])* $variant, )*
            /// Any other header, canonicalized
            Other(String),
        }

        impl HeaderName {
            /// Canonical spelling for known headers
            pub fn as_static_str(&self) -> Option<&'static str> {
                match self {
                    $( HeaderName::$variant => Some($canonical), )*
                    HeaderName::Other(_) => None,
                }
            }

            fn from_canonical(canonical: String) -> Self {
                match canonical.as_str() {
                    $( $canonical => HeaderName::$variant, )*
                    _ => HeaderName::Other(canonical),
                }
            }
        }
    };
}

header_names! {
    /// Accept: Acceptable media types
    Accept => "Accept",
    /// Accept-Encoding: Acceptable content codings
    AcceptEncoding => "Accept-Encoding",
    /// Accept-Language: Acceptable natural languages
    AcceptLanguage => "Accept-Language",
    /// Alert-Info: Alternative ring tone
    AlertInfo => "Alert-Info",
    /// Allow: Methods supported by the UA
    Allow => "Allow",
    /// Allow-Events: Event packages supported by the UA
    AllowEvents => "Allow-Events",
    /// Authentication-Info: Mutual authentication data
    AuthenticationInfo => "Authentication-Info",
    /// Authorization: Credentials provided by a UA
    Authorization => "Authorization",
    /// Call-ID: Unique identifier for this call
    CallId => "Call-ID",
    /// Call-Info: Additional information about caller or callee
    CallInfo => "Call-Info",
    /// Contact: Where subsequent requests should be sent
    Contact => "Contact",
    /// Content-Disposition: How the message body is interpreted
    ContentDisposition => "Content-Disposition",
    /// Content-Encoding: Codings applied to the body
    ContentEncoding => "Content-Encoding",
    /// Content-Language: Language of the body
    ContentLanguage => "Content-Language",
    /// Content-Length: Size of the message body
    ContentLength => "Content-Length",
    /// Content-Type: Media type of the message body
    ContentType => "Content-Type",
    /// CSeq: Command sequence number
    CSeq => "CSeq",
    /// Date: Date and time of the request or response
    Date => "Date",
    /// Error-Info: Pointer to additional error information
    ErrorInfo => "Error-Info",
    /// Event: Event package for SUBSCRIBE/NOTIFY
    Event => "Event",
    /// Expires: Expiration time for registration or subscription
    Expires => "Expires",
    /// From: Initiator of the request
    From => "From",
    /// In-Reply-To: Call-IDs this call references
    InReplyTo => "In-Reply-To",
    /// Max-Forwards: Limit on the number of proxies or gateways
    MaxForwards => "Max-Forwards",
    /// MIME-Version
    MimeVersion => "MIME-Version",
    /// Min-Expires: Minimum expiration time
    MinExpires => "Min-Expires",
    /// Min-SE: Minimum session interval (RFC 4028)
    MinSE => "Min-SE",
    /// Organization
    Organization => "Organization",
    /// Path: Registration path (RFC 3327)
    Path => "Path",
    /// Priority: Urgency of the request
    Priority => "Priority",
    /// Proxy-Authenticate: Proxy challenge
    ProxyAuthenticate => "Proxy-Authenticate",
    /// Proxy-Authorization: Credentials for a proxy
    ProxyAuthorization => "Proxy-Authorization",
    /// Proxy-Require: Extensions a proxy must support
    ProxyRequire => "Proxy-Require",
    /// RAck: Acknowledges a reliable provisional response (RFC 3262)
    RAck => "RAck",
    /// Reason: Why a request was issued (RFC 3326)
    Reason => "Reason",
    /// Record-Route: Proxies that want to stay in the path
    RecordRoute => "Record-Route",
    /// Refer-To: Target URI in REFER
    ReferTo => "Refer-To",
    /// Referred-By: Identity of the referrer
    ReferredBy => "Referred-By",
    /// Reply-To: Logical return URI
    ReplyTo => "Reply-To",
    /// Require: Extensions the UAS must support
    Require => "Require",
    /// Retry-After: When the service is expected to be available
    RetryAfter => "Retry-After",
    /// Route: Forced route for a request
    Route => "Route",
    /// RSeq: Sequence number of a reliable provisional response
    RSeq => "RSeq",
    /// Server: Software used by the UAS
    Server => "Server",
    /// Session-Expires: Session interval (RFC 4028)
    SessionExpires => "Session-Expires",
    /// SIP-ETag: Entity tag of published state (RFC 3903)
    SipETag => "SIP-ETag",
    /// SIP-If-Match: Entity tag the publication refreshes
    SipIfMatch => "SIP-If-Match",
    /// Subject: Summary of the call
    Subject => "Subject",
    /// Subscription-State: State of a subscription in NOTIFY
    SubscriptionState => "Subscription-State",
    /// Supported: Extensions supported by the UA
    Supported => "Supported",
    /// Timestamp: When the request was sent
    Timestamp => "Timestamp",
    /// To: Logical recipient of the request
    To => "To",
    /// Unsupported: Extensions not supported by the UAS
    Unsupported => "Unsupported",
    /// User-Agent: Software used by the UAC
    UserAgent => "User-Agent",
    /// Via: Path taken by the request so far
    Via => "Via",
    /// Warning: Additional response status information
    Warning => "Warning",
    /// WWW-Authenticate: Challenge for authentication
    WwwAuthenticate => "WWW-Authenticate",
}

const DIGEST_PARAMS: &[&str] = &[
    "realm",
    "nonce",
    "opaque",
    "algorithm",
    "qop",
    "username",
    "uri",
    "response",
    "cnonce",
    "nc",
    "stale",
    "domain",
    "nextnonce",
    "rspauth",
];

impl HeaderName {
    /// Builds a header name from any spelling. Empty input maps to
    /// `Other("")`; use [`FromStr`] to reject it.
    pub fn new(name: &str) -> Self {
        HeaderName::from_canonical(canonicalize(name))
    }

    /// Returns the canonical name of the header
    pub fn as_str(&self) -> &str {
        match self {
            HeaderName::Other(s) => s,
            known => known.as_static_str().unwrap_or_default(),
        }
    }

    /// Single-letter compact form, when the header has one
    pub fn compact_str(&self) -> Option<&'static str> {
        match self {
            HeaderName::CallId => Some("i"),
            HeaderName::Contact => Some("m"),
            HeaderName::ContentEncoding => Some("e"),
            HeaderName::ContentLength => Some("l"),
            HeaderName::ContentType => Some("c"),
            HeaderName::Event => Some("o"),
            HeaderName::From => Some("f"),
            HeaderName::ReferTo => Some("r"),
            HeaderName::ReferredBy => Some("b"),
            HeaderName::SessionExpires => Some("x"),
            HeaderName::Subject => Some("s"),
            HeaderName::Supported => Some("k"),
            HeaderName::To => Some("t"),
            HeaderName::AllowEvents => Some("u"),
            HeaderName::Via => Some("v"),
            _ => None,
        }
    }

    /// Compact form if one exists, canonical name otherwise
    pub fn compact_or_canonical(&self) -> &str {
        self.compact_str().unwrap_or_else(|| self.as_str())
    }

    /// Parameters whose presence matters for equality of this header kind
    pub fn special_params(&self) -> ParamSpec<'static> {
        match self {
            HeaderName::From | HeaderName::To => ParamSpec::new(&["tag"]),
            HeaderName::Contact => ParamSpec::new(&["q", "expires"]),
            HeaderName::Via => ParamSpec::new(&["branch", "maddr", "ttl", "received"]),
            HeaderName::Accept | HeaderName::AcceptEncoding | HeaderName::AcceptLanguage => {
                ParamSpec::new(&["q"])
            }
            HeaderName::ContentType => ParamSpec::new(&["charset"]),
            HeaderName::ContentDisposition => ParamSpec::new(&["handling"]),
            HeaderName::Event => ParamSpec::new(&["id"]),
            HeaderName::SubscriptionState => {
                ParamSpec::new(&["reason", "expires", "retry-after"])
            }
            HeaderName::RetryAfter => ParamSpec::new(&["duration"]),
            HeaderName::CallInfo => ParamSpec::new(&["purpose"]),
            HeaderName::SessionExpires => ParamSpec::new(&["refresher"]),
            HeaderName::ReferredBy => ParamSpec::new(&["cid"]),
            HeaderName::Reason => ParamSpec::new(&["cause", "text"]),
            HeaderName::Authorization
            | HeaderName::ProxyAuthorization
            | HeaderName::WwwAuthenticate
            | HeaderName::ProxyAuthenticate
            | HeaderName::AuthenticationInfo => ParamSpec::new(DIGEST_PARAMS),
            _ => ParamSpec::EMPTY,
        }
    }

    /// Whether an empty value is syntactically allowed for this header
    pub fn allows_empty(&self) -> bool {
        matches!(
            self,
            HeaderName::Accept
                | HeaderName::AcceptEncoding
                | HeaderName::AcceptLanguage
                | HeaderName::Allow
                | HeaderName::Supported
                | HeaderName::Subject
                | HeaderName::Organization
        )
    }

    /// Whether this is an extension header
    pub fn is_other(&self) -> bool {
        matches!(self, HeaderName::Other(_))
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(Error::MalformedInput(
                "Empty header name is not allowed".to_string(),
            ));
        }
        Ok(HeaderName::new(s))
    }
}

impl From<&str> for HeaderName {
    fn from(s: &str) -> Self {
        HeaderName::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_name_from_str() {
        assert_eq!(HeaderName::from_str("Via").unwrap(), HeaderName::Via);
        assert_eq!(HeaderName::from_str("v").unwrap(), HeaderName::Via);
        assert_eq!(HeaderName::from_str("To").unwrap(), HeaderName::To);
        assert_eq!(HeaderName::from_str("t").unwrap(), HeaderName::To);
        assert_eq!(HeaderName::from_str("cSeq").unwrap(), HeaderName::CSeq);
        assert_eq!(HeaderName::from_str("sip-etag").unwrap(), HeaderName::SipETag);

        let custom = HeaderName::from_str("X-Custom").unwrap();
        assert!(matches!(custom, HeaderName::Other(s) if s == "X-Custom"));

        assert!(HeaderName::from_str("").is_err());
        assert!(HeaderName::from_str("  ").is_err());

        assert_eq!(HeaderName::from_str("session-expires").unwrap(), HeaderName::SessionExpires);
        assert_eq!(HeaderName::from_str("x").unwrap(), HeaderName::SessionExpires);
    }

    #[test]
    fn test_canonicalize_irregular() {
        assert_eq!(canonicalize("call-id"), "Call-ID");
        assert_eq!(canonicalize("CALL-ID"), "Call-ID");
        assert_eq!(canonicalize("i"), "Call-ID");
        assert_eq!(canonicalize("I"), "Call-ID");
        assert_eq!(canonicalize("www-authenticate"), "WWW-Authenticate");
        assert_eq!(canonicalize("SIP-IF-MATCH"), "SIP-If-Match");
        assert_eq!(canonicalize("min-se"), "Min-SE");
        assert_eq!(canonicalize("rack"), "RAck");
        assert_eq!(canonicalize("cseq"), "CSeq");
    }

    #[test]
    fn test_canonicalize_generic() {
        assert_eq!(canonicalize("  content-type "), "Content-Type");
        assert_eq!(canonicalize("X-FOO-bar"), "X-Foo-Bar");
        assert_eq!(canonicalize("p-asserted-identity"), "P-Asserted-Identity");
    }

    #[test]
    fn test_canonicalize_idempotent_on_table() {
        for (key, canonical) in EXCEPTIONS {
            assert_eq!(canonicalize(canonical), *canonical, "{}", key);
            assert_eq!(canonicalize(&canonicalize(key)), canonicalize(key));
        }
    }

    #[test]
    fn test_known_names_roundtrip() {
        for name in ["Accept", "Call-ID", "CSeq", "MIME-Version", "RSeq", "WWW-Authenticate"] {
            let parsed = HeaderName::new(name);
            assert!(!parsed.is_other(), "{}", name);
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_compact_names() {
        assert_eq!(HeaderName::CallId.compact_str(), Some("i"));
        assert_eq!(HeaderName::CSeq.compact_str(), None);
        assert_eq!(HeaderName::CSeq.compact_or_canonical(), "CSeq");
        for name in [HeaderName::Via, HeaderName::From, HeaderName::Contact, HeaderName::AllowEvents] {
            let compact = name.compact_str().unwrap();
            assert_eq!(HeaderName::new(compact), name);
        }
    }

    #[test]
    fn test_special_params() {
        assert!(HeaderName::From.special_params().contains("TAG"));
        assert!(HeaderName::Via.special_params().contains("branch"));
        assert!(HeaderName::Subject.special_params().is_empty());
        assert!(HeaderName::Other("X-A".into()).special_params().is_empty());
    }
}
