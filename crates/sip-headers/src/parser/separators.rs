//! RFC 3261 separators, each surrounded by optional whitespace.

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::recognize,
    multi::many0,
    sequence::{pair, tuple},
};

use super::whitespace::sws;
use super::ParseResult;

/// HCOLON = *( SP / HTAB ) ":" SWS
pub fn hcolon(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((many0(alt((tag(b" "), tag(b"\t")))), tag(b":"), sws)))(input)
}

pub fn slash(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b"/"), sws)))(input)
}

pub fn equal(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b"="), sws)))(input)
}

pub fn comma(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b","), sws)))(input)
}

pub fn semi(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b";"), sws)))(input)
}

pub fn colon(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b":"), sws)))(input)
}

/// LAQUOT = SWS "<"
pub fn laquot(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(sws, tag(b"<")))(input)
}

/// RAQUOT = ">" SWS
pub fn raquot(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(tag(b">"), sws))(input)
}
