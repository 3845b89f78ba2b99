use regex::Regex;
use serde::Serialize;

use crate::error::Result;

/// Attributes parsed from one metadata tag, in order of first appearance.
///
/// A repeated key keeps its original position and takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    fields: Vec<(String, String)>,
}

impl MetadataRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, overwriting in place if already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parser for single-tag metadata files such as
/// `<text id="rstl_1665_0001" year="1665" title='Of a ...'>`.
pub struct MetadataParser {
    re_attribute: Regex,
}

impl MetadataParser {
    /// Constructs a new `MetadataParser` with its attribute pattern compiled.
    ///
    /// # Errors
    ///
    /// Returns `ScitextError::RegexError` if the pattern fails to compile
    /// (should never happen with the static pattern defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_attribute: Regex::new(r#"(\S+)=["']([^"']*)["']"#)?,
        })
    }

    /// Extract every `key="value"` or `key='value'` pair from `content`.
    ///
    /// Surrounding whitespace, angle brackets and spaces are stripped
    /// before matching. Content with no attributes yields an empty record.
    pub fn parse(&self, content: &str) -> MetadataRecord {
        let body = content
            .trim()
            .trim_matches(|c: char| matches!(c, '<' | '>' | ' '));

        let mut record = MetadataRecord::new();
        for caps in self.re_attribute.captures_iter(body) {
            record.insert(&caps[1], &caps[2]);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> MetadataParser {
        MetadataParser::new().unwrap()
    }

    #[test]
    fn test_parse_mixed_quotes() {
        let record = parser().parse(
            r#"<text id="rstl_1665_0001" year="1665" title='Of a Spot in Jupiter'>"#,
        );
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("id"), Some("rstl_1665_0001"));
        assert_eq!(record.get("year"), Some("1665"));
        assert_eq!(record.get("title"), Some("Of a Spot in Jupiter"));
    }

    #[test]
    fn test_tag_name_is_not_an_attribute() {
        let record = parser().parse(r#"<text id="a">"#);
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["id"]);
    }

    #[test]
    fn test_empty_value() {
        let record = parser().parse(r#"<text author="" id="x">"#);
        assert_eq!(record.get("author"), Some(""));
    }

    #[test]
    fn test_repeated_key_keeps_position_takes_last_value() {
        let record = parser().parse(r#"<text a="1" b="2" a="3">"#);
        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_surrounding_whitespace_and_newlines() {
        let record = parser().parse("\n  <text\n  id=\"z\"\n  year=\"1700\" >\n");
        assert_eq!(record.get("id"), Some("z"));
        assert_eq!(record.get("year"), Some("1700"));
    }

    #[test]
    fn test_no_attributes() {
        assert!(parser().parse("<text>").is_empty());
        assert!(parser().parse("").is_empty());
    }

    #[test]
    fn test_unicode_values() {
        let record = parser().parse(r#"<text author="Müller, Jöns Jacob">"#);
        assert_eq!(record.get("author"), Some("Müller, Jöns Jacob"));
    }
}
