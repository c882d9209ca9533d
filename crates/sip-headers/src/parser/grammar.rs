//! nom grammar for SIP header lines.
//!
//! The grammar works on raw bytes and produces a [`Node`] tree whose spans
//! are byte offsets into the original line. Each known header kind has a
//! value rule; everything else becomes an `extension-header` node carrying
//! the raw name and value.

use std::ops::Range;

use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while, take_while1, take_while_m_n},
    character::complete::{digit0, digit1},
    combinator::{opt, recognize, verify},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use super::separators::{colon, comma, equal, hcolon, laquot, raquot, semi, slash};
use super::syntax::{Node, EXTENSION_HEADER};
use super::whitespace::{lws, sws};
use super::ParseResult;
use crate::error::{Error, Result};
use crate::types::headers::HeaderName;
use crate::types::param::is_token_char;
use crate::types::scalar::is_word_char;

fn is_token_byte(b: u8) -> bool {
    is_token_char(char::from(b))
}

fn is_word_byte(b: u8) -> bool {
    is_word_char(char::from(b))
}

fn is_qdtext_byte(b: u8) -> bool {
    !matches!(b, b'"' | b'\\' | b'\r' | b'\n')
}

fn is_host_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'.'
}

/// token = 1*(alphanum / "-" / "." / "!" / "%" / "*" / "_" / "+" / "`" / "'" / "~")
pub fn token(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(is_token_byte)(input)
}

/// callid = word [ "@" word ]
pub fn callid(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(
        take_while1(is_word_byte),
        opt(pair(tag(b"@"), take_while1(is_word_byte))),
    ))(input)
}

/// quoted-string, quotes included
pub fn quoted_string(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((
        tag(b"\""),
        many0(alt((
            take_while1(is_qdtext_byte),
            recognize(pair(tag(b"\\"), take(1usize))),
        ))),
        tag(b"\""),
    )))(input)
}

/// IPv6reference = "[" IPv6address "]"
pub fn ipv6_reference(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(delimited(
        tag(b"["),
        take_while1(|b: u8| b.is_ascii_hexdigit() || b == b':' || b == b'.'),
        tag(b"]"),
    ))(input)
}

/// gen-value = token / host / quoted-string
pub fn gen_value(input: &[u8]) -> ParseResult<&[u8]> {
    alt((token, ipv6_reference, quoted_string))(input)
}

fn host(input: &[u8]) -> ParseResult<&[u8]> {
    alt((ipv6_reference, take_while1(is_host_byte)))(input)
}

fn decimal(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(digit1, opt(pair(tag(b"."), digit0))))(input)
}

fn uri_in_brackets(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(|b: u8| b != b'>' && !b.is_ascii_whitespace())(input)
}

/// Bare URI in addr-spec form: parameters after it belong to the header
fn addr_spec_uri(input: &[u8]) -> ParseResult<&[u8]> {
    verify(
        take_while1(|b: u8| {
            !matches!(b, b';' | b',' | b'<' | b'>' | b'"') && !b.is_ascii_whitespace()
        }),
        |s: &[u8]| s.contains(&b':'),
    )(input)
}

fn display_name(input: &[u8]) -> ParseResult<&[u8]> {
    alt((quoted_string, recognize(pair(token, many0(pair(lws, token))))))(input)
}

/// Header grammar over one line of text
pub struct Grammar<'a> {
    src: &'a [u8],
}

impl<'a> Grammar<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self { src }
    }

    fn off(&self, s: &[u8]) -> usize {
        (s.as_ptr() as usize).saturating_sub(self.src.as_ptr() as usize)
    }

    fn range(&self, s: &[u8]) -> Range<usize> {
        let start = self.off(s);
        start..start + s.len()
    }

    /// Span from the start of `from` up to the start of `rest`
    fn between(&self, from: &[u8], rest: &[u8]) -> Range<usize> {
        self.off(from)..self.off(rest)
    }

    fn leaf(&self, label: &'static str, s: &[u8]) -> Node {
        Node::leaf(label, self.range(s))
    }

    fn leaf_with(
        &self,
        label: &'static str,
        input: &'a [u8],
        mut parser: impl FnMut(&'a [u8]) -> ParseResult<'a, &'a [u8]>,
    ) -> ParseResult<'a, Node> {
        let (rest, s) = parser(input)?;
        Ok((rest, self.leaf(label, s)))
    }

    /// Parses the whole line into a tree rooted at the header
    pub fn header(&self) -> Result<Node> {
        let src = self.src;
        let end = src
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |p| p + 1);
        let start = src[..end]
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(end);
        let line = &src[start..end];
        if line.is_empty() {
            return Err(Error::EmptyInput);
        }

        let (rest, name) = token(line)?;
        let (value, _) = hcolon(rest)?;
        let header_name = HeaderName::new(&String::from_utf8_lossy(name));

        match header_name.as_static_str() {
            Some(label) => {
                let children = self.value(&header_name, value)?;
                Ok(Node::branch(label, self.range(value), children))
            }
            None => Ok(Node::branch(
                EXTENSION_HEADER,
                self.range(value),
                vec![self.leaf("header-name", name), self.leaf("header-value", value)],
            )),
        }
    }

    fn value(&self, name: &HeaderName, input: &'a [u8]) -> Result<Vec<Node>> {
        use HeaderName as H;

        let (rest, nodes) = match name {
            H::Accept => self.list0(input, |i| self.media_range(i)),
            H::AcceptEncoding | H::AcceptLanguage => self.list0(input, |i| self.accept_item(i)),
            H::AlertInfo | H::CallInfo | H::ErrorInfo => self.list1(input, |i| self.info(i)),
            H::Allow | H::Supported => self.list0(input, |i| self.leaf_with("token", i, token)),
            H::AllowEvents
            | H::ContentEncoding
            | H::ContentLanguage
            | H::ProxyRequire
            | H::Require
            | H::Unsupported => self.list1(input, |i| self.leaf_with("token", i, token)),
            H::AuthenticationInfo => self.list1(input, |i| self.auth_param(i)),
            H::Authorization
            | H::ProxyAuthorization
            | H::WwwAuthenticate
            | H::ProxyAuthenticate => self.credentials(input),
            H::CallId => self.single(self.leaf_with("callid", input, callid)),
            H::InReplyTo => self.list1(input, |i| self.leaf_with("callid", i, callid)),
            H::Contact => self.contact(input),
            H::ContentDisposition
            | H::Event
            | H::SubscriptionState
            | H::SessionExpires
            | H::MinSE => self.param_value(input),
            H::ContentLength | H::Expires | H::MaxForwards | H::MinExpires | H::RSeq => {
                self.single(self.leaf_with("number", input, digit1))
            }
            H::ContentType => self.media_type(input),
            H::CSeq => self.cseq(input),
            H::RAck => self.rack(input),
            H::Date => self.single(self.leaf_with("date", input, take_while1(|_: u8| true))),
            H::From | H::To | H::ReplyTo | H::ReferTo | H::ReferredBy => {
                self.single(self.address(input))
            }
            H::Path | H::Route | H::RecordRoute => self.list1(input, |i| self.address(i)),
            H::MimeVersion => self.mime_version(input),
            H::Organization | H::Server | H::Subject | H::UserAgent => self.text(input),
            H::Priority | H::SipETag | H::SipIfMatch => {
                self.single(self.leaf_with("token", input, token))
            }
            H::Reason => self.list1(input, |i| self.reason_value(i)),
            H::RetryAfter => self.retry_after(input),
            H::Timestamp => self.timestamp(input),
            H::Via => self.list1(input, |i| self.via_parm(i)),
            H::Warning => self.list1(input, |i| self.warning_value(i)),
            H::Other(_) => Ok((&input[input.len()..], Vec::new())),
        }?;

        if !rest.is_empty() {
            return Err(Error::MalformedInput(format!(
                "unexpected {:?} in {} header",
                String::from_utf8_lossy(&rest[..rest.len().min(32)]),
                name
            )));
        }
        Ok(nodes)
    }

    fn single(&self, parsed: ParseResult<'a, Node>) -> ParseResult<'a, Vec<Node>> {
        parsed.map(|(rest, node)| (rest, vec![node]))
    }

    fn list1(
        &self,
        input: &'a [u8],
        item: impl FnMut(&'a [u8]) -> ParseResult<'a, Node>,
    ) -> ParseResult<'a, Vec<Node>> {
        separated_list1(comma, item)(input)
    }

    fn list0(
        &self,
        input: &'a [u8],
        item: impl FnMut(&'a [u8]) -> ParseResult<'a, Node>,
    ) -> ParseResult<'a, Vec<Node>> {
        if input.is_empty() {
            return Ok((input, Vec::new()));
        }
        self.list1(input, item)
    }

    /// generic-param = token [ EQUAL gen-value ]
    fn generic_param(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, name) = token(input)?;
        let (rest, value) = opt(preceded(equal, gen_value))(rest)?;
        let mut children = vec![self.leaf("pname", name)];
        if let Some(value) = value {
            children.push(self.leaf("pvalue", value));
        }
        Ok((rest, Node::branch("generic-param", self.between(input, rest), children)))
    }

    /// *( SEMI generic-param )
    fn params(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        many0(preceded(semi, |i| self.generic_param(i)))(input)
    }

    fn address(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, mut children) = alt((|i| self.name_addr(i), |i| self.addr_spec(i)))(input)?;
        let (rest, params) = self.params(rest)?;
        children.extend(params);
        Ok((rest, Node::branch("address", self.between(input, rest), children)))
    }

    /// [ display-name ] LAQUOT addr-spec RAQUOT
    fn name_addr(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, display) = opt(terminated(display_name, sws))(input)?;
        let (rest, uri) = delimited(laquot, uri_in_brackets, raquot)(rest)?;
        let mut children = Vec::with_capacity(2);
        if let Some(display) = display {
            children.push(self.leaf("display-name", display));
        }
        children.push(self.leaf("uri", uri));
        Ok((rest, children))
    }

    fn addr_spec(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, uri) = addr_spec_uri(input)?;
        Ok((rest, vec![self.leaf("uri", uri)]))
    }

    fn contact(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        if input == b"*" {
            return Ok((&input[1..], vec![self.leaf("star", input)]));
        }
        self.list1(input, |i| self.address(i))
    }

    /// "<" absoluteURI ">" *( SEMI generic-param )
    fn info(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, uri) = delimited(tag(b"<"), uri_in_brackets, raquot)(input)?;
        let (rest, params) = self.params(rest)?;
        let mut children = vec![self.leaf("uri", uri)];
        children.extend(params);
        Ok((rest, Node::branch("info", self.between(input, rest), children)))
    }

    fn media_type_parts(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, (mtype, _, subtype)) = tuple((token, slash, token))(input)?;
        let (rest, params) = self.params(rest)?;
        let mut children = vec![self.leaf("m-type", mtype), self.leaf("m-subtype", subtype)];
        children.extend(params);
        Ok((rest, children))
    }

    fn media_type(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        self.media_type_parts(input)
    }

    fn media_range(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, children) = self.media_type_parts(input)?;
        Ok((rest, Node::branch("range", self.between(input, rest), children)))
    }

    fn accept_item(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, value) = token(input)?;
        let (rest, params) = self.params(rest)?;
        let mut children = vec![self.leaf("token", value)];
        children.extend(params);
        Ok((rest, Node::branch("range", self.between(input, rest), children)))
    }

    fn param_value(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, value) = token(input)?;
        let (rest, params) = self.params(rest)?;
        let mut children = vec![self.leaf("token", value)];
        children.extend(params);
        Ok((rest, children))
    }

    fn reason_value(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, children) = self.param_value(input)?;
        Ok((rest, Node::branch("reason-value", self.between(input, rest), children)))
    }

    fn cseq(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, (seq, _, method)) = tuple((digit1, lws, token))(input)?;
        Ok((rest, vec![self.leaf("number", seq), self.leaf("method", method)]))
    }

    fn rack(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, (rseq, _, cseq, _, method)) =
            tuple((digit1, lws, digit1, lws, token))(input)?;
        Ok((
            rest,
            vec![
                self.leaf("number", rseq),
                self.leaf("number", cseq),
                self.leaf("method", method),
            ],
        ))
    }

    fn timestamp(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, time) = decimal(input)?;
        let (rest, delay) = opt(preceded(lws, decimal))(rest)?;
        let mut children = vec![self.leaf("number", time)];
        if let Some(delay) = delay {
            children.push(self.leaf("delay", delay));
        }
        Ok((rest, children))
    }

    fn mime_version(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, (major, _, minor)) = tuple((digit1, tag(b"."), digit1))(input)?;
        Ok((rest, vec![self.leaf("number", major), self.leaf("number", minor)]))
    }

    fn text(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        if input.is_empty() {
            return Ok((input, Vec::new()));
        }
        let (rest, text) = take_while(|_: u8| true)(input)?;
        Ok((rest, vec![self.leaf("text", text)]))
    }

    /// delta-seconds [ comment ] *( SEMI retry-param )
    fn retry_after(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, delay) = digit1(input)?;
        let (rest, comment) = opt(preceded(
            sws,
            delimited(tag(b"("), take_while(|b: u8| b != b')'), tag(b")")),
        ))(rest)?;
        let (rest, params) = self.params(rest)?;
        let mut children = vec![self.leaf("number", delay)];
        if let Some(comment) = comment {
            children.push(self.leaf("comment", comment));
        }
        children.extend(params);
        Ok((rest, children))
    }

    /// sent-protocol LWS sent-by *( SEMI via-params )
    fn via_parm(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, (name, _, version, _, transport, _, host, port)) = tuple((
            token,
            slash,
            token,
            slash,
            token,
            lws,
            host,
            opt(preceded(colon, digit1)),
        ))(input)?;
        let (rest, params) = self.params(rest)?;
        let mut children = vec![
            self.leaf("protocol-name", name),
            self.leaf("protocol-version", version),
            self.leaf("transport", transport),
            self.leaf("host", host),
        ];
        if let Some(port) = port {
            children.push(self.leaf("port", port));
        }
        children.extend(params);
        Ok((rest, Node::branch("via-parm", self.between(input, rest), children)))
    }

    /// warn-code SP warn-agent SP warn-text
    fn warning_value(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, (code, _, agent, _, text)) = tuple((
            take_while_m_n(3, 3, |b: u8| b.is_ascii_digit()),
            lws,
            take_while1(|b: u8| !b.is_ascii_whitespace() && b != b'"' && b != b','),
            lws,
            quoted_string,
        ))(input)?;
        Ok((
            rest,
            Node::branch(
                "warning-value",
                self.between(input, rest),
                vec![
                    self.leaf("warn-code", code),
                    self.leaf("warn-agent", agent),
                    self.leaf("warn-text", text),
                ],
            ),
        ))
    }

    /// auth-param = token EQUAL ( token / quoted-string )
    fn auth_param(&self, input: &'a [u8]) -> ParseResult<'a, Node> {
        let (rest, (name, _, value)) = tuple((token, equal, alt((quoted_string, token))))(input)?;
        Ok((
            rest,
            Node::branch(
                "auth-param",
                self.between(input, rest),
                vec![self.leaf("pname", name), self.leaf("pvalue", value)],
            ),
        ))
    }

    /// auth-scheme [ LWS auth-param *( COMMA auth-param ) ]
    fn credentials(&self, input: &'a [u8]) -> ParseResult<'a, Vec<Node>> {
        let (rest, scheme) = token(input)?;
        let (rest, params) = opt(preceded(
            lws,
            separated_list1(comma, |i| self.auth_param(i)),
        ))(rest)?;
        let mut children = vec![self.leaf("scheme", scheme)];
        children.extend(params.unwrap_or_default());
        Ok((rest, children))
    }
}
