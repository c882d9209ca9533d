use std::fmt;

use crate::render::RenderOptions;
use crate::types::param::ParamSpec;

/// Behaviour shared by every header value type
///
/// [`TypedHeader`](super::TypedHeader) dispatches to these methods for each of
/// its arms; the header name itself is written by the enum.
pub trait HeaderField: fmt::Debug + Clone {
    /// Writes the value part of the header (everything after `": "`)
    fn write_value(&self, w: &mut dyn fmt::Write, opts: &RenderOptions) -> fmt::Result;

    /// Syntactic validity of the value
    fn is_valid(&self) -> bool;

    /// Whether the value carries nothing (an empty list or empty text)
    fn is_empty(&self) -> bool {
        false
    }

    /// Semantic equality, comparing embedded parameters under `special`
    fn eq_field(&self, other: &Self, special: &ParamSpec<'_>) -> bool;

    /// Renders the value with default options
    fn render_value(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_value(&mut out, &RenderOptions::default());
        out
    }
}

/// Writes `items` separated by `", "`
pub(crate) fn write_list<T>(
    w: &mut dyn fmt::Write,
    items: &[T],
    mut write_item: impl FnMut(&mut dyn fmt::Write, &T) -> fmt::Result,
) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            w.write_str(", ")?;
        }
        write_item(w, item)?;
    }
    Ok(())
}

/// Positional list equality
pub(crate) fn lists_equal<T>(a: &[T], b: &[T], mut eq: impl FnMut(&T, &T) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| eq(x, y))
}
