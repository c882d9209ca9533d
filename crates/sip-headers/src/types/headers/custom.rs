//! Extension headers: runtime-registered custom values and the opaque
//! fallback.

use std::any::Any;
use std::fmt;

use super::header_name::HeaderName;
use crate::render::RenderOptions;
use crate::types::param::is_token;

/// Value produced by a builder registered through
/// [`register_parser`](crate::parser::register_parser)
///
/// Implementors must be cheap to clone through [`clone_box`](Self::clone_box)
/// and compare through [`equals`](Self::equals), typically by downcasting
/// `other.as_any()` to their own type.
pub trait CustomHeader: fmt::Debug + Send + Sync + 'static {
    /// Header name, in any spelling; it is canonicalized for rendering
    fn name(&self) -> &str;

    /// Writes the header value
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result;

    fn is_valid(&self) -> bool {
        true
    }

    fn equals(&self, other: &dyn CustomHeader) -> bool;

    fn clone_box(&self) -> Box<dyn CustomHeader>;

    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn CustomHeader> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Unregistered extension header, kept verbatim
///
/// The raw value is stored exactly as received, including any line folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueHeader {
    raw_name: String,
    name: HeaderName,
    value: String,
}

impl OpaqueHeader {
    pub fn new(raw_name: impl Into<String>, value: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        Self {
            name: HeaderName::new(&raw_name),
            raw_name,
            value: value.into(),
        }
    }

    /// Header name as it appeared on the wire
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    /// Header value as it appeared on the wire
    pub fn raw_value(&self) -> &str {
        &self.value
    }

    pub(crate) fn write_value(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        w.write_str(&self.value)
    }

    pub(crate) fn is_valid(&self) -> bool {
        is_token(&self.raw_name)
    }

    /// Same canonical name and byte-identical value
    pub(crate) fn equals(&self, other: &OpaqueHeader) -> bool {
        self.name == other.name && self.value == other.value
    }
}
