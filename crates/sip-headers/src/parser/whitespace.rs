//! RFC 3261 linear whitespace, including header line folding.

use std::borrow::Cow;

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{opt, recognize},
    multi::{many0, many1},
    sequence::pair,
};

use super::ParseResult;

/// Parses a single whitespace character (SP or HTAB)
pub fn wsp(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(alt((tag(b" "), tag(b"\t"))))(input)
}

/// Parses optional whitespace (0 or more SP or HTAB)
pub fn owsp(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(many0(wsp))(input)
}

/// Parses CRLF (accepts \r\n or just \n)
pub fn crlf(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(alt((tag(b"\r\n"), tag(b"\n"))))(input)
}

/// LWS = [*WSP CRLF] 1*WSP
///
/// A CRLF followed by whitespace continues the same header line.
pub fn lws(input: &[u8]) -> ParseResult<&[u8]> {
    alt((
        recognize(pair(pair(owsp, crlf), many1(wsp))),
        recognize(many1(wsp)),
    ))(input)
}

/// SWS = [LWS]
pub fn sws(input: &[u8]) -> ParseResult<&[u8]> {
    opt(lws)(input).map(|(rem, val)| (rem, val.unwrap_or(&[])))
}

fn is_lws_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Replaces every folded whitespace run with a single SP
///
/// Runs without a line break are kept as written.
pub fn unfold(text: &str) -> Cow<'_, str> {
    if !text.contains(['\r', '\n']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(is_lws_char) {
        out.push_str(&rest[..start]);
        let run = &rest[start..];
        let len = run.find(|c: char| !is_lws_char(c)).unwrap_or(run.len());
        if run[..len].contains(['\r', '\n']) {
            out.push(' ');
        } else {
            out.push_str(&run[..len]);
        }
        rest = &run[len..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wsp() {
        let (rem, val) = wsp(b"\trest").unwrap();
        assert_eq!(rem, b"rest");
        assert_eq!(val, b"\t");
        assert!(wsp(b"").is_err());
        assert!(wsp(b"a").is_err());
    }

    #[test]
    fn test_lws_folding() {
        let (rem, val) = lws(b" \r\n\trest").unwrap();
        assert_eq!(rem, b"rest");
        assert_eq!(val, b" \r\n\t");

        let (rem, val) = lws(b"\n rest").unwrap();
        assert_eq!(rem, b"rest");
        assert_eq!(val, b"\n ");

        // CRLF without continuation whitespace ends the header
        assert!(lws(b"\r\nrest").is_err());
    }

    #[test]
    fn test_sws() {
        let (rem, val) = sws(b"rest").unwrap();
        assert_eq!(rem, b"rest");
        assert_eq!(val, b"");

        let (rem, val) = sws(b"  rest").unwrap();
        assert_eq!(rem, b"rest");
        assert_eq!(val, b"  ");
    }

    #[test]
    fn test_unfold() {
        assert!(matches!(unfold("lunch  tomorrow"), Cow::Borrowed("lunch  tomorrow")));
        assert_eq!(unfold("lunch\r\n\ttomorrow"), "lunch tomorrow");
        assert_eq!(unfold("Alice \r\n  Smith\n Jr"), "Alice Smith Jr");
        assert_eq!(unfold("a  b\r\n c"), "a  b c");
    }
}
