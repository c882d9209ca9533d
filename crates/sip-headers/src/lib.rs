//! Typed SIP header model for rvoip
//!
//! This crate turns individual SIP header lines into typed values and back.
//! Every header kind of RFC 3261 and its common extensions has its own value
//! type behind the [`TypedHeader`] enum; unrecognized extension headers are
//! either built by a runtime-registered parser or kept verbatim.
//!
//! Header names are canonicalized (`call-id`, `CALL-ID` and `i` all become
//! `Call-ID`), parameters render in a deterministic order, and equality
//! follows SIP's rules for tokens, quoted strings and per-header special
//! parameters.
//!
//! ```rust
//! use rvoip_sip_headers::prelude::*;
//!
//! let header = parse_header("accept-language: da, en-gb;q=0.8, en;q=0.7").unwrap();
//! assert_eq!(header.name(), HeaderName::AcceptLanguage);
//! assert_eq!(header.render(), "Accept-Language: da, en-gb;q=0.8, en;q=0.7");
//!
//! let via = parse_header("v: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds").unwrap();
//! assert_eq!(
//!     via.render_with(&RenderOptions::compact()),
//!     "v: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds"
//! );
//! ```

pub mod error;
pub mod json;
pub mod parser;
pub mod render;
pub mod types;
pub mod uri;

pub use error::{Error, Result};
pub use json::{from_json, from_json_as, to_json};
pub use parser::{
    parse_header, parse_headers, register_parser, unregister_parser, HeaderParser, ParserRegistry,
};
pub use render::RenderOptions;
pub use types::headers::{
    canonicalize, CustomHeader, HeaderField, HeaderName, HeaderOptionExt, OpaqueHeader,
    TypedHeader,
};
pub use types::{ParamSpec, Values};
pub use uri::{AbsoluteUri, Uri, UriValue};

pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::json::{from_json, from_json_as, to_json};
    pub use crate::parser::{
        parse_header, parse_headers, register_parser, unregister_parser, HeaderParser, NodeRef,
        ParserRegistry,
    };
    pub use crate::render::RenderOptions;
    pub use crate::types::headers::{
        canonicalize, CustomHeader, HeaderField, HeaderName, HeaderOptionExt, OpaqueHeader,
        TypedHeader,
    };
    pub use crate::types::*;
    pub use crate::uri::{AbsoluteUri, Uri, UriValue};
}
