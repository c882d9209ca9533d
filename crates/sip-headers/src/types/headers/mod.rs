//! The header contract: names, the value trait, and the [`TypedHeader`] sum
//! type.

pub mod custom;
pub mod field;
pub mod header_name;
pub mod typed_header;

pub use custom::{CustomHeader, OpaqueHeader};
pub use field::HeaderField;
pub use header_name::{canonicalize, HeaderName};
pub use typed_header::{HeaderOptionExt, TypedHeader};
