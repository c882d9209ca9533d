//! Builders turning syntax-tree nodes into typed headers.
//!
//! Every known header kind has one builder keyed by its root label. Builders
//! read children by label, keep parameter values raw (quotes included) and
//! parse URIs through [`Uri::parse`]. Free text (display names, comments,
//! Text headers) has its line folds collapsed to a single SP; extension
//! header values stay verbatim.

use std::str::FromStr;

use tracing::{debug, trace};

use super::registry::ParserRegistry;
use super::syntax::{NodeRef, EXTENSION_HEADER};
use super::whitespace::unfold;
use crate::error::{Error, Result};
use crate::types::headers::{HeaderName, OpaqueHeader, TypedHeader};
use crate::types::param::unquote;
use crate::types::{
    Accept, AcceptItem, AcceptList, AcceptRange, AddressList, AuthenticationInfo, CSeq, CallId,
    Contact, Credentials, EntityTag, InReplyTo, Info, InfoList, MediaType, MethodList,
    MimeVersion, NameAddr, Number, ParamValue, RAck, ReasonList, RetryAfter, SipDate, Text,
    Timestamp, Token, TokenList, Values, Via, ViaHop, Warning, WarningValue,
};
use crate::uri::Uri;

fn required<'a>(node: NodeRef<'a>, label: &str) -> Result<NodeRef<'a>> {
    node.child(label).ok_or_else(|| {
        Error::MalformedInput(format!("{} node without {}", node.label(), label))
    })
}

fn required_text<'a>(node: NodeRef<'a>, label: &str) -> Result<&'a str> {
    required(node, label).map(|n| n.text())
}

fn number<T: FromStr>(text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| Error::MalformedInput(format!("number out of range: {:?}", text)))
}

fn float(text: &str) -> Result<f64> {
    text.parse()
        .map_err(|_| Error::MalformedInput(format!("invalid number: {:?}", text)))
}

/// `(name, value)` of one `generic-param` or `auth-param` node; flag
/// parameters get an empty value
fn param_pair<'a>(param: NodeRef<'a>) -> (&'a str, &'a str) {
    (
        param.child_text("pname").unwrap_or_default(),
        param.child_text("pvalue").unwrap_or_default(),
    )
}

fn params_of(node: NodeRef<'_>, label: &str) -> Values {
    let mut values = Values::new();
    for param in node.children(label) {
        let (name, value) = param_pair(param);
        values.append(name, value);
    }
    values
}

fn generic_params(node: NodeRef<'_>) -> Values {
    params_of(node, "generic-param")
}

fn uri(node: NodeRef<'_>) -> Result<Uri> {
    Uri::parse(required_text(node, "uri")?)
}

fn tokens(node: NodeRef<'_>) -> Vec<String> {
    node.children("token").map(|t| t.text().to_string()).collect()
}

fn name_addr(node: NodeRef<'_>) -> Result<NameAddr> {
    let mut addr = NameAddr::new(uri(node)?);
    addr.display_name = node
        .child_text("display-name")
        .map(|name| unquote(&unfold(name)));
    addr.params = generic_params(node);
    Ok(addr)
}

fn addresses(node: NodeRef<'_>) -> Result<Vec<NameAddr>> {
    node.children("address").map(name_addr).collect()
}

fn infos(node: NodeRef<'_>) -> Result<InfoList> {
    node.children("info")
        .map(|info| {
            let mut item = Info::new(uri(info)?);
            item.params = generic_params(info);
            Ok(item)
        })
        .collect::<Result<Vec<_>>>()
        .map(InfoList)
}

/// Media range of an Accept header
///
/// Parameters up to the first `q` are media parameters; `q` and everything
/// after it are accept parameters, even names that look like media
/// parameters.
fn accept_range(node: NodeRef<'_>) -> Result<AcceptRange> {
    let mut range = AcceptRange::new(
        required_text(node, "m-type")?,
        required_text(node, "m-subtype")?,
    );
    let mut seen_q = false;
    for param in node.children("generic-param") {
        let (name, value) = param_pair(param);
        seen_q |= name.eq_ignore_ascii_case("q");
        if seen_q {
            range.accept_params.append(name, value);
        } else {
            range.media_params.append(name, value);
        }
    }
    Ok(range)
}

fn accept_items(node: NodeRef<'_>) -> Result<AcceptList> {
    node.children("range")
        .map(|range| {
            let mut item = AcceptItem::new(required_text(range, "token")?);
            item.params = generic_params(range);
            Ok(item)
        })
        .collect::<Result<Vec<_>>>()
        .map(AcceptList)
}

fn param_value(node: NodeRef<'_>) -> Result<ParamValue> {
    let mut value = ParamValue::new(required_text(node, "token")?);
    value.params = generic_params(node);
    Ok(value)
}

fn via_hop(node: NodeRef<'_>) -> Result<ViaHop> {
    let port = node.child_text("port").map(number::<u16>).transpose()?;
    let mut hop = ViaHop::new(
        required_text(node, "transport")?,
        required_text(node, "host")?,
        port,
    );
    hop.protocol = required_text(node, "protocol-name")?.to_string();
    hop.version = required_text(node, "protocol-version")?.to_string();
    hop.params = generic_params(node);
    Ok(hop)
}

fn warning_value(node: NodeRef<'_>) -> Result<WarningValue> {
    Ok(WarningValue::new(
        number(required_text(node, "warn-code")?)?,
        required_text(node, "warn-agent")?,
        unquote(&unfold(required_text(node, "warn-text")?)),
    ))
}

fn credentials(node: NodeRef<'_>) -> Result<Credentials> {
    let mut creds = Credentials::new(required_text(node, "scheme")?);
    creds.params = params_of(node, "auth-param");
    Ok(creds)
}

fn retry_after(node: NodeRef<'_>) -> Result<RetryAfter> {
    let mut retry = RetryAfter::new(number(required_text(node, "number")?)?);
    retry.comment = node.child_text("comment").map(|c| unfold(c).into_owned());
    retry.params = generic_params(node);
    Ok(retry)
}

fn timestamp(node: NodeRef<'_>) -> Result<Timestamp> {
    let mut ts = Timestamp::new(float(required_text(node, "number")?)?);
    ts.delay = node.child_text("delay").map(float).transpose()?;
    Ok(ts)
}

fn numbers(node: NodeRef<'_>) -> Result<Vec<u32>> {
    node.children("number").map(|n| number(n.text())).collect()
}

fn pair_of(node: NodeRef<'_>) -> Result<(u32, u32)> {
    match numbers(node)?.as_slice() {
        [a, b] => Ok((*a, *b)),
        _ => Err(Error::MalformedInput(format!(
            "{} needs two numbers",
            node.label()
        ))),
    }
}

fn text(node: NodeRef<'_>) -> Text {
    Text::new(unfold(node.child_text("text").unwrap_or_default()))
}

fn extension(node: NodeRef<'_>, registry: &ParserRegistry) -> Result<TypedHeader> {
    let name = required_text(node, "header-name")?;
    let value = node.child_text("header-value").unwrap_or_default();

    if let Some(builder) = registry.lookup(name) {
        trace!(header = name, "dispatching to registered parser");
        if let Some(header) = builder(node) {
            return Ok(header);
        }
        debug!(header = name, "registered parser declined header");
    }

    debug!(header = name, "keeping extension header opaque");
    Ok(TypedHeader::Other(OpaqueHeader::new(name, value)))
}

/// Builds a typed header from the root node of a syntax tree
///
/// Extension headers are handed to the builder registered for their name in
/// `registry`, falling back to [`OpaqueHeader`] with the raw name and value.
pub fn build_from_node(node: NodeRef<'_>, registry: &ParserRegistry) -> Result<TypedHeader> {
    use HeaderName as H;
    use TypedHeader as T;

    if node.label() == EXTENSION_HEADER {
        return extension(node, registry);
    }
    trace!(header = node.label(), "building header");

    let header = match HeaderName::new(node.label()) {
        H::Accept => T::Accept(Accept(
            node.children("range")
                .map(accept_range)
                .collect::<Result<_>>()?,
        )),
        H::AcceptEncoding => T::AcceptEncoding(accept_items(node)?),
        H::AcceptLanguage => T::AcceptLanguage(accept_items(node)?),
        H::AlertInfo => T::AlertInfo(infos(node)?),
        H::Allow => T::Allow(MethodList(tokens(node))),
        H::AllowEvents => T::AllowEvents(TokenList(tokens(node))),
        H::AuthenticationInfo => T::AuthenticationInfo(AuthenticationInfo {
            params: params_of(node, "auth-param"),
        }),
        H::Authorization => T::Authorization(credentials(node)?),
        H::CallId => T::CallId(CallId::new(required_text(node, "callid")?)),
        H::CallInfo => T::CallInfo(infos(node)?),
        H::Contact => T::Contact(if node.child("star").is_some() {
            Contact::Star
        } else {
            Contact::Addresses(addresses(node)?)
        }),
        H::ContentDisposition => T::ContentDisposition(param_value(node)?),
        H::ContentEncoding => T::ContentEncoding(TokenList(tokens(node))),
        H::ContentLanguage => T::ContentLanguage(TokenList(tokens(node))),
        H::ContentLength => T::ContentLength(Number(number(required_text(node, "number")?)?)),
        H::ContentType => {
            let mut media = MediaType::new(
                required_text(node, "m-type")?,
                required_text(node, "m-subtype")?,
            );
            media.params = generic_params(node);
            T::ContentType(media)
        }
        H::CSeq => T::CSeq(CSeq::new(
            number(required_text(node, "number")?)?,
            required_text(node, "method")?,
        )),
        H::Date => T::Date(SipDate::from_str(required_text(node, "date")?)?),
        H::ErrorInfo => T::ErrorInfo(infos(node)?),
        H::Event => T::Event(param_value(node)?),
        H::Expires => T::Expires(Number(number(required_text(node, "number")?)?)),
        H::From => T::From(name_addr(required(node, "address")?)?),
        H::InReplyTo => T::InReplyTo(InReplyTo(
            node.children("callid").map(|c| CallId::new(c.text())).collect(),
        )),
        H::MaxForwards => T::MaxForwards(Number(number(required_text(node, "number")?)?)),
        H::MimeVersion => {
            let (major, minor) = pair_of(node)?;
            T::MimeVersion(MimeVersion::new(major, minor))
        }
        H::MinExpires => T::MinExpires(Number(number(required_text(node, "number")?)?)),
        H::MinSE => T::MinSE(param_value(node)?),
        H::Organization => T::Organization(text(node)),
        H::Path => T::Path(AddressList(addresses(node)?)),
        H::Priority => T::Priority(Token::new(required_text(node, "token")?)),
        H::ProxyAuthenticate => T::ProxyAuthenticate(credentials(node)?),
        H::ProxyAuthorization => T::ProxyAuthorization(credentials(node)?),
        H::ProxyRequire => T::ProxyRequire(TokenList(tokens(node))),
        H::RAck => {
            let (rseq, cseq) = pair_of(node)?;
            T::RAck(RAck::new(rseq, cseq, required_text(node, "method")?))
        }
        H::Reason => T::Reason(ReasonList(
            node.children("reason-value")
                .map(param_value)
                .collect::<Result<_>>()?,
        )),
        H::RecordRoute => T::RecordRoute(AddressList(addresses(node)?)),
        H::ReferTo => T::ReferTo(name_addr(required(node, "address")?)?),
        H::ReferredBy => T::ReferredBy(name_addr(required(node, "address")?)?),
        H::ReplyTo => T::ReplyTo(name_addr(required(node, "address")?)?),
        H::Require => T::Require(TokenList(tokens(node))),
        H::RetryAfter => T::RetryAfter(retry_after(node)?),
        H::Route => T::Route(AddressList(addresses(node)?)),
        H::RSeq => T::RSeq(Number(number(required_text(node, "number")?)?)),
        H::Server => T::Server(text(node)),
        H::SessionExpires => T::SessionExpires(param_value(node)?),
        H::SipETag => T::SipETag(EntityTag::new(required_text(node, "token")?)),
        H::SipIfMatch => T::SipIfMatch(EntityTag::new(required_text(node, "token")?)),
        H::Subject => T::Subject(text(node)),
        H::SubscriptionState => T::SubscriptionState(param_value(node)?),
        H::Supported => T::Supported(TokenList(tokens(node))),
        H::Timestamp => T::Timestamp(timestamp(node)?),
        H::To => T::To(name_addr(required(node, "address")?)?),
        H::Unsupported => T::Unsupported(TokenList(tokens(node))),
        H::UserAgent => T::UserAgent(text(node)),
        H::Via => T::Via(Via(
            node.children("via-parm")
                .map(via_hop)
                .collect::<Result<_>>()?,
        )),
        H::Warning => T::Warning(Warning(
            node.children("warning-value")
                .map(warning_value)
                .collect::<Result<_>>()?,
        )),
        H::WwwAuthenticate => T::WwwAuthenticate(credentials(node)?),
        H::Other(name) => {
            return Err(Error::MalformedInput(format!(
                "no builder for node labeled {}",
                name
            )))
        }
    };
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::syntax::parse_tree;

    fn build(line: &str) -> TypedHeader {
        let tree = parse_tree(line).unwrap();
        build_from_node(tree.root(), &ParserRegistry::new()).unwrap()
    }

    #[test]
    fn test_accept_q_separates_media_and_accept_params() {
        // Everything from the first `q` on is an accept-param.
        let header = build("Accept: text/html;level=1;q=0.5;charset=utf-8");
        let TypedHeader::Accept(accept) = header else {
            panic!("expected Accept");
        };
        let range = &accept.0[0];
        assert_eq!(range.media_params.last("level"), Some("1"));
        assert!(!range.media_params.has("charset"));
        assert_eq!(range.accept_params.last("q"), Some("0.5"));
        assert_eq!(range.accept_params.last("charset"), Some("utf-8"));
    }

    #[test]
    fn test_address_builders() {
        let TypedHeader::To(to) = build("To: \"Bob \\\"B\\\"\" <sip:bob@biloxi.com>;tag=a6c85cf") else {
            panic!("expected To");
        };
        assert_eq!(to.display_name.as_deref(), Some("Bob \"B\""));
        assert_eq!(to.tag(), Some("a6c85cf"));
        assert_eq!(to.uri.to_string(), "sip:bob@biloxi.com");

        let TypedHeader::Contact(contact) = build("m: *") else {
            panic!("expected Contact");
        };
        assert!(contact.is_star());
    }

    #[test]
    fn test_folded_free_text_is_collapsed() {
        let TypedHeader::From(from) = build("From: Alice\r\n Smith <sip:alice@atlanta.com>;tag=1")
        else {
            panic!("expected From");
        };
        assert_eq!(from.display_name.as_deref(), Some("Alice Smith"));

        let TypedHeader::Subject(subject) = build("Subject: lunch\r\n\ttomorrow") else {
            panic!("expected Subject");
        };
        assert_eq!(subject.as_str(), "lunch tomorrow");

        let TypedHeader::RetryAfter(retry) = build("Retry-After: 18000 (in a\r\n meeting)") else {
            panic!("expected Retry-After");
        };
        assert_eq!(retry.comment.as_deref(), Some("in a meeting"));

        let TypedHeader::Other(opaque) = build("X-Custom: a\r\n b") else {
            panic!("expected extension header");
        };
        assert_eq!(opaque.raw_value(), "a\r\n b");
    }

    #[test]
    fn test_via_builder() {
        let TypedHeader::Via(via) =
            build("Via: SIP/2.0/UDP pc33.atlanta.com:5066;branch=z9hG4bK776asdhds;rport")
        else {
            panic!("expected Via");
        };
        let hop = via.top().unwrap();
        assert_eq!(hop.protocol, "SIP");
        assert_eq!(hop.version, "2.0");
        assert_eq!(hop.port, Some(5066));
        assert_eq!(hop.branch(), Some("z9hG4bK776asdhds"));
        assert_eq!(hop.rport(), Some(""));
    }

    #[test]
    fn test_credentials_keep_quotes() {
        let TypedHeader::Authorization(creds) = build(
            "Authorization: Digest username=\"alice\", realm=\"atlanta.com\", algorithm=MD5",
        ) else {
            panic!("expected Authorization");
        };
        assert_eq!(creds.params.last("username"), Some("\"alice\""));
        assert_eq!(creds.username().as_deref(), Some("alice"));
        assert_eq!(creds.params.last("algorithm"), Some("MD5"));
    }

    #[test]
    fn test_number_overflow_is_malformed() {
        let tree = parse_tree("Content-Length: 99999999999").unwrap();
        let err = build_from_node(tree.root(), &ParserRegistry::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_extension_falls_back_to_opaque() {
        let header = build("X-Custom: abc\r\n\tqwe");
        let opaque = header.as_opaque().unwrap();
        assert_eq!(opaque.raw_name(), "X-Custom");
        assert_eq!(opaque.raw_value(), "abc\r\n\tqwe");
    }

    #[test]
    fn test_extension_uses_registry() {
        let registry = ParserRegistry::new();
        registry.register("x-priority", |node| {
            Some(TypedHeader::Priority(Token::new(node.child_text("header-value")?)))
        });
        registry.register("x-declined", |_| None);

        let tree = parse_tree("X-Priority: urgent").unwrap();
        let header = build_from_node(tree.root(), &registry).unwrap();
        assert_eq!(header, TypedHeader::Priority(Token::new("urgent")));

        let tree = parse_tree("X-Declined: 1").unwrap();
        let header = build_from_node(tree.root(), &registry).unwrap();
        assert!(header.as_opaque().is_some());
    }
}
