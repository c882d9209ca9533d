use std::any::Any;
use std::fmt;

use super::custom::{CustomHeader, OpaqueHeader};
use super::field::HeaderField;
use super::header_name::HeaderName;
use crate::render::{with_buffer, RenderOptions};
use crate::types::accept::{Accept, AcceptList};
use crate::types::address::{AddressList, Contact, NameAddr};
use crate::types::auth::{AuthenticationInfo, Credentials};
use crate::types::cseq::{CSeq, RAck};
use crate::types::date::SipDate;
use crate::types::info::InfoList;
use crate::types::media_type::MediaType;
use crate::types::param_value::{ParamValue, ReasonList};
use crate::types::retry_after::RetryAfter;
use crate::types::scalar::{CallId, EntityTag, MimeVersion, Number, Text, Token};
use crate::types::timestamp::Timestamp;
use crate::types::token_list::{InReplyTo, MethodList, TokenList};
use crate::types::via::Via;
use crate::types::warning::Warning;

macro_rules! typed_headers {
    ($( $variant:ident($ty:ty) ),* $(,)?) => {
        /// A parsed SIP header
        ///
        /// One arm per known header kind, each holding its value type, plus
        /// [`TypedHeader::Custom`] for values built by runtime-registered
        /// parsers and [`TypedHeader::Other`] for unregistered extension
        /// headers kept verbatim.
        #[derive(Debug, Clone)]
        pub enum TypedHeader {
            $( $variant($ty), )*
            /// Extension header produced by a registered builder
            Custom(Box<dyn CustomHeader>),
            /// Unregistered extension header
            Other(OpaqueHeader),
        }

        impl TypedHeader {
            /// Header name
            pub fn name(&self) -> HeaderName {
                match self {
                    $( TypedHeader::$variant(_) => HeaderName::$variant, )*
                    TypedHeader::Custom(h) => HeaderName::new(h.name()),
                    TypedHeader::Other(h) => h.name().clone(),
                }
            }

            /// Writes the header value (no name prefix)
            pub fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
                match self {
                    $( TypedHeader::$variant(v) => v.write_value(w, opts), )*
                    TypedHeader::Custom(h) => h.write_value(w, opts),
                    TypedHeader::Other(h) => h.write_value(w),
                }
            }

            /// Syntactic validity of the header
            ///
            /// An empty value is valid only for the kinds that allow one.
            pub fn is_valid(&self) -> bool {
                match self {
                    $( TypedHeader::$variant(v) => {
                        if v.is_empty() {
                            HeaderName::$variant.allows_empty()
                        } else {
                            v.is_valid()
                        }
                    } )*
                    TypedHeader::Custom(h) => h.is_valid(),
                    TypedHeader::Other(h) => h.is_valid(),
                }
            }
        }

        impl PartialEq for TypedHeader {
            fn eq(&self, other: &Self) -> bool {
                match (self, other) {
                    $( (TypedHeader::$variant(a), TypedHeader::$variant(b)) => {
                        a.eq_field(b, &HeaderName::$variant.special_params())
                    } )*
                    (TypedHeader::Custom(a), TypedHeader::Custom(b)) => a.equals(&**b),
                    (TypedHeader::Other(a), TypedHeader::Other(b)) => a.equals(b),
                    _ => false,
                }
            }
        }
    };
}

typed_headers! {
    Accept(Accept),
    AcceptEncoding(AcceptList),
    AcceptLanguage(AcceptList),
    AlertInfo(InfoList),
    Allow(MethodList),
    AllowEvents(TokenList),
    AuthenticationInfo(AuthenticationInfo),
    Authorization(Credentials),
    CallId(CallId),
    CallInfo(InfoList),
    Contact(Contact),
    ContentDisposition(ParamValue),
    ContentEncoding(TokenList),
    ContentLanguage(TokenList),
    ContentLength(Number),
    ContentType(MediaType),
    CSeq(CSeq),
    Date(SipDate),
    ErrorInfo(InfoList),
    Event(ParamValue),
    Expires(Number),
    From(NameAddr),
    InReplyTo(InReplyTo),
    MaxForwards(Number),
    MimeVersion(MimeVersion),
    MinExpires(Number),
    MinSE(ParamValue),
    Organization(Text),
    Path(AddressList),
    Priority(Token),
    ProxyAuthenticate(Credentials),
    ProxyAuthorization(Credentials),
    ProxyRequire(TokenList),
    RAck(RAck),
    Reason(ReasonList),
    RecordRoute(AddressList),
    ReferTo(NameAddr),
    ReferredBy(NameAddr),
    ReplyTo(NameAddr),
    Require(TokenList),
    RetryAfter(RetryAfter),
    Route(AddressList),
    RSeq(Number),
    Server(Text),
    SessionExpires(ParamValue),
    SipETag(EntityTag),
    SipIfMatch(EntityTag),
    Subject(Text),
    SubscriptionState(ParamValue),
    Supported(TokenList),
    Timestamp(Timestamp),
    To(NameAddr),
    Unsupported(TokenList),
    UserAgent(Text),
    Via(Via),
    Warning(Warning),
    WwwAuthenticate(Credentials),
}

impl TypedHeader {
    /// Canonical header name
    pub fn canonical_name(&self) -> String {
        self.name().as_str().to_string()
    }

    /// Compact header name, or the canonical one when no compact form exists
    pub fn compact_name(&self) -> String {
        self.name().compact_or_canonical().to_string()
    }

    /// Writes `"<name>: <value>"`
    pub fn render_to(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        self.render_to_with(w, &RenderOptions::default())
    }

    /// Writes `"<name>: <value>"` with the given options
    pub fn render_to_with(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result {
        let name = self.name();
        let label = if opts.compact {
            name.compact_or_canonical()
        } else {
            name.as_str()
        };
        write!(w, "{}: ", label)?;
        self.write_value(w, opts)
    }

    /// Renders the full header line (without CRLF)
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    /// Renders the full header line with the given options
    ///
    /// The line is built in a pooled buffer and copied out once at its final
    /// length. Callers that already own a sink should use
    /// [`render_to_with`](Self::render_to_with).
    pub fn render_with(&self, opts: &RenderOptions) -> String {
        with_buffer(|buf| {
            // Writing into a String cannot fail
            let _ = self.render_to_with(buf, opts);
            String::from(buf.as_str())
        })
    }

    /// Renders the value only
    pub fn render_value(&self) -> String {
        self.render_value_with(&RenderOptions::default())
    }

    /// Renders the value only, with the given options
    pub fn render_value_with(&self, opts: &RenderOptions) -> String {
        with_buffer(|buf| {
            let _ = self.write_value(buf, opts);
            String::from(buf.as_str())
        })
    }

    /// Borrow the value of a custom header as `T`
    pub fn as_custom<T: CustomHeader>(&self) -> Option<&T> {
        match self {
            TypedHeader::Custom(h) => {
                let any: &dyn Any = h.as_any();
                any.downcast_ref::<T>()
            }
            _ => None,
        }
    }

    /// Borrow the opaque fallback, if this header is one
    pub fn as_opaque(&self) -> Option<&OpaqueHeader> {
        match self {
            TypedHeader::Other(h) => Some(h),
            _ => None,
        }
    }
}

impl fmt::Display for TypedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_to(f)
    }
}

/// Rendering and validity for a header that may be absent
///
/// An absent header renders as the empty string and is never valid.
///
/// ```rust
/// use rvoip_sip_headers::prelude::*;
///
/// let missing: Option<TypedHeader> = None;
/// assert_eq!(missing.render(), "");
/// assert!(!missing.is_valid());
/// ```
pub trait HeaderOptionExt {
    fn render(&self) -> String;
    fn render_value(&self) -> String;
    fn is_valid(&self) -> bool;
}

impl HeaderOptionExt for Option<TypedHeader> {
    fn render(&self) -> String {
        self.as_ref().render()
    }

    fn render_value(&self) -> String {
        self.as_ref().render_value()
    }

    fn is_valid(&self) -> bool {
        self.as_ref().is_valid()
    }
}

impl HeaderOptionExt for Option<&TypedHeader> {
    fn render(&self) -> String {
        self.map(TypedHeader::render).unwrap_or_default()
    }

    fn render_value(&self) -> String {
        self.map(TypedHeader::render_value).unwrap_or_default()
    }

    fn is_valid(&self) -> bool {
        self.map(TypedHeader::is_valid).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uri::Uri;

    fn from(tag: Option<&str>) -> TypedHeader {
        let mut addr = NameAddr::new(Uri::parse("sip:alice@atlanta.com").unwrap());
        if let Some(tag) = tag {
            addr.params.set("tag", tag);
        }
        TypedHeader::From(addr)
    }

    #[test]
    fn test_render_and_names() {
        let h = from(Some("1928301774"));
        assert_eq!(h.canonical_name(), "From");
        assert_eq!(h.compact_name(), "f");
        assert_eq!(h.render(), "From: <sip:alice@atlanta.com>;tag=1928301774");
        assert_eq!(h.render_with(&RenderOptions::compact()), "f: <sip:alice@atlanta.com>;tag=1928301774");
        assert_eq!(h.render_value(), "<sip:alice@atlanta.com>;tag=1928301774");
        assert_eq!(h.to_string(), h.render());
    }

    #[test]
    fn test_render_copies_out_at_final_length() {
        let h = from(Some("1928301774"));
        let line = h.render();
        assert_eq!(line.capacity(), line.len());
        let value = h.render_value();
        assert_eq!(value.capacity(), value.len());

        let mut sink = String::new();
        h.render_to(&mut sink).unwrap();
        assert_eq!(sink, line);
    }

    #[test]
    fn test_equality_respects_special_params() {
        assert_eq!(from(Some("a")), from(Some("A")));
        assert_ne!(from(Some("a")), from(None));
        assert_ne!(from(Some("a")), from(Some("b")));
        assert_eq!(from(None), from(None));
    }

    #[test]
    fn test_equality_requires_same_kind() {
        let to = match from(None) {
            TypedHeader::From(addr) => TypedHeader::To(addr),
            other => other,
        };
        assert_ne!(from(None), to);
    }

    #[test]
    fn test_empty_value_validity() {
        assert!(TypedHeader::Supported(TokenList::default()).is_valid());
        assert!(!TypedHeader::Require(TokenList::default()).is_valid());
        assert!(TypedHeader::Require(TokenList::new(["100rel"])).is_valid());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = from(Some("abc"));
        let mut copy = original.clone();
        if let TypedHeader::From(addr) = &mut copy {
            addr.params.set("tag", "xyz");
            addr.params.set("extra", "");
        }
        assert_eq!(original.render_value(), "<sip:alice@atlanta.com>;tag=abc");
        assert_ne!(original, copy);
    }

    #[test]
    fn test_absent_header() {
        let none: Option<&TypedHeader> = None;
        assert_eq!(none.render(), "");
        assert_eq!(none.render_value(), "");
        assert!(!none.is_valid());

        let some = Some(from(None));
        assert!(some.is_valid());
        assert_eq!(HeaderOptionExt::render(&some), "From: <sip:alice@atlanta.com>");
    }

    #[test]
    fn test_opaque_renders_canonical_name() {
        let h = TypedHeader::Other(OpaqueHeader::new("x-custom", "abc"));
        assert_eq!(h.render(), "X-Custom: abc");
        assert_eq!(h.name(), HeaderName::Other("X-Custom".into()));
        assert!(h.as_opaque().is_some());
    }
}
