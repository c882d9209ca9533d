//! Header value types and the parameter machinery they share.

pub mod accept;
pub mod address;
pub mod auth;
pub mod cseq;
pub mod date;
pub mod headers;
pub mod info;
pub mod media_type;
pub mod param;
pub mod param_value;
pub mod retry_after;
pub mod scalar;
pub mod timestamp;
pub mod token_list;
pub mod values;
pub mod via;
pub mod warning;

pub use accept::{Accept, AcceptItem, AcceptList, AcceptRange};
pub use address::{AddressList, Contact, NameAddr};
pub use auth::{AuthenticationInfo, Credentials};
pub use cseq::{CSeq, RAck};
pub use date::SipDate;
pub use info::{Info, InfoList};
pub use media_type::MediaType;
pub use param::{params_equal, render_params, write_params, ParamSpec};
pub use param_value::{ParamValue, ReasonList};
pub use retry_after::RetryAfter;
pub use scalar::{CallId, EntityTag, MimeVersion, Number, Text, Token};
pub use timestamp::Timestamp;
pub use token_list::{InReplyTo, MethodList, TokenList};
pub use values::Values;
pub use via::{Via, ViaHop};
pub use warning::{Warning, WarningValue};
