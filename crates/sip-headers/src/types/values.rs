//! # Header parameter container
//!
//! [`Values`] is the ordered, multi-valued map that backs every `;name=value`
//! parameter list in the header model. Names compare case-insensitively but
//! keep the spelling they were first stored with. Each name owns a non-empty
//! history of raw values; the most recent one is authoritative.
//!
//! ```rust
//! use rvoip_sip_headers::types::Values;
//!
//! let mut params = Values::new();
//! params.set("Tag", "a6c85cf");
//! params.append("tag", "1928301774");
//! params.set("lr", "");
//!
//! assert_eq!(params.last("TAG"), Some("1928301774"));
//! assert_eq!(params.get("tag").unwrap().len(), 2);
//! assert_eq!(params.names().collect::<Vec<_>>(), vec!["Tag", "lr"]);
//! assert!(params.has("lr"));
//! ```

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    values: Vec<String>,
}

/// Ordered multi-valued parameter map with case-insensitive names
///
/// Names iterate in first-insertion order. An empty string is a legal value
/// (a flag parameter such as `;lr`) and is distinct from absence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values {
    entries: Vec<Entry>,
}

impl Values {
    /// Creates an empty container
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Replaces the whole history of `name` with `value`
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                entry.values.clear();
                entry.values.push(value);
            }
            None => self.entries.push(Entry {
                name,
                values: vec![value],
            }),
        }
        self
    }

    /// Adds `value` to the history of `name`
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].values.push(value),
            None => self.entries.push(Entry {
                name,
                values: vec![value],
            }),
        }
        self
    }

    /// Most recent value of `name`
    pub fn last(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|idx| self.entries[idx].values.last())
            .map(String::as_str)
    }

    /// Full value history of `name`, oldest first
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name)
            .map(|idx| self.entries[idx].values.as_slice())
    }

    /// Whether `name` is present
    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes `name` and its history, returning the history
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name)
            .map(|idx| self.entries.remove(idx).values)
    }

    /// Removes the most recent value of `name`. The name disappears with its
    /// last value.
    pub fn pop(&mut self, name: &str) -> Option<String> {
        let idx = self.position(name)?;
        let value = self.entries[idx].values.pop();
        if self.entries[idx].values.is_empty() {
            self.entries.remove(idx);
        }
        value
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored names, in their first-seen spelling
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// `(name, last value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().filter_map(|e| {
            e.values
                .last()
                .map(|v| (e.name.as_str(), v.as_str()))
        })
    }

    /// Drops every parameter
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        values.extend(iter);
        values
    }
}

impl<K, V> Extend<(K, V)> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.append(k, v);
        }
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::param::write_params(f, self, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_history() {
        let mut v = Values::new();
        v.append("branch", "z9hG4bK1");
        v.append("branch", "z9hG4bK2");
        v.set("BRANCH", "z9hG4bK3");
        assert_eq!(v.get("branch").unwrap(), ["z9hG4bK3".to_string()]);
        assert_eq!(v.names().collect::<Vec<_>>(), vec!["branch"]);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut v = Values::new();
        v.append("x", "1").append("X", "2").append("x", "3");
        assert_eq!(v.get("x").unwrap(), ["1", "2", "3"]);
        assert_eq!(v.last("x"), Some("3"));
    }

    #[test]
    fn test_first_seen_casing_is_kept() {
        let mut v = Values::new();
        v.set("Expires", "60");
        v.set("expires", "120");
        assert_eq!(v.names().collect::<Vec<_>>(), vec!["Expires"]);
        assert_eq!(v.last("EXPIRES"), Some("120"));
    }

    #[test]
    fn test_empty_value_is_not_absence() {
        let mut v = Values::new();
        v.set("lr", "");
        assert!(v.has("lr"));
        assert_eq!(v.last("lr"), Some(""));
        assert!(!v.has("maddr"));
        assert_eq!(v.last("maddr"), None);
    }

    #[test]
    fn test_pop_removes_name_with_last_value() {
        let mut v = Values::new();
        v.append("a", "1").append("a", "2");
        assert_eq!(v.pop("a"), Some("2".to_string()));
        assert!(v.has("a"));
        assert_eq!(v.pop("A"), Some("1".to_string()));
        assert!(!v.has("a"));
        assert_eq!(v.pop("a"), None);
        assert!(v.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut v: Values = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(v.remove("A"), Some(vec!["1".to_string()]));
        assert_eq!(v.len(), 1);
        assert_eq!(v.remove("a"), None);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = Values::new();
        original.set("tag", "abc");
        let mut copy = original.clone();
        copy.set("tag", "xyz");
        copy.append("tag", "more");
        copy.set("new", "1");
        assert_eq!(original.last("tag"), Some("abc"));
        assert_eq!(original.get("tag").unwrap().len(), 1);
        assert!(!original.has("new"));
    }

    #[test]
    fn test_iter_yields_last_values() {
        let v: Values = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        let pairs: Vec<_> = v.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }
}
