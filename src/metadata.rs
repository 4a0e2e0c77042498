//! Instance metadata carried in TXT records (RFC 6763 section 6).

use std::collections::{hash_map, HashMap};

/// Key/value attributes of a service instance.
///
/// A key present without `=` maps to `None` ("attribute present, no value"),
/// which is distinct from `key=` mapping to `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    attributes: HashMap<String, Option<String>>,
}

impl Metadata {
    /// Parses TXT character strings into attributes.
    ///
    /// The key is everything up to the first `=`. Later duplicates replace
    /// earlier ones. Strings with an empty key are skipped.
    pub fn parse<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut attributes = HashMap::new();
        for raw in strings {
            let text = String::from_utf8_lossy(raw.as_ref());
            let (key, value) = match text.split_once('=') {
                Some((key, value)) => (key, Some(value.to_string())),
                None => (&*text, None),
            };
            if key.is_empty() {
                #[cfg(feature = "log")]
                tracing::trace!(string = %text, "Skipping TXT string without a key");
                continue;
            }
            attributes.insert(key.to_string(), value);
        }
        Self { attributes }
    }

    /// Looks up an attribute. The outer `Option` says whether the key is
    /// present at all, the inner one whether it carries a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.attributes.get(key).map(Option::as_deref)
    }

    /// Whether the attribute is present, with or without a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates over all attributes, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Option<String>> {
        self.attributes.iter()
    }

    /// Consumes the metadata, returning the underlying map.
    pub fn into_inner(self) -> HashMap<String, Option<String>> {
        self.attributes
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a Option<String>);
    type IntoIter = hash_map::Iter<'a, String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_empty_and_absent_are_distinct() {
        let data = Metadata::parse(["txtvers=1", "foo=bar", "baz=", "wombat"]);
        assert_eq!(data.len(), 4);
        assert_eq!(data.get("txtvers"), Some(Some("1")));
        assert_eq!(data.get("foo"), Some(Some("bar")));
        assert_eq!(data.get("baz"), Some(Some("")));
        assert_eq!(data.get("wombat"), Some(None));
        assert_eq!(data.get("missing"), None);
    }

    #[test]
    fn splits_on_first_equals() {
        let data = Metadata::parse(["something=\"funny\"", "path=/a=b"]);
        assert_eq!(data.get("something"), Some(Some("\"funny\"")));
        assert_eq!(data.get("path"), Some(Some("/a=b")));
    }

    #[test]
    fn last_duplicate_wins() {
        let data = Metadata::parse(["foo=1", "foo", "foo=3"]);
        assert_eq!(data.get("foo"), Some(Some("3")));

        let data = Metadata::parse(["foo=1", "foo"]);
        assert_eq!(data.get("foo"), Some(None));
    }

    #[test]
    fn keyless_strings_skipped() {
        let data = Metadata::parse(["", "=orphan", "ok=yes"]);
        assert_eq!(data.len(), 1);
        assert!(data.contains_key("ok"));
    }

    #[test]
    fn raw_bytes() {
        let data = Metadata::parse([b"bin=\xff".to_vec()]);
        assert_eq!(data.get("bin"), Some(Some("\u{fffd}")));
    }
}
