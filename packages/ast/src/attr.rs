use serde::{Deserialize, Serialize};

/// Attribute triple attached to code blocks, divs and headers.
///
/// On the wire this is `["id", ["class", ...], [["key", "value"], ...]]`.
/// Keys are not guaranteed unique; lookups always take the first match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr(pub String, pub Vec<String>, pub Vec<(String, String)>);

impl Attr {
    pub fn new(
        identifier: impl Into<String>,
        classes: Vec<String>,
        key_values: Vec<(String, String)>,
    ) -> Self {
        Self(identifier.into(), classes, key_values)
    }

    /// Attributes with no identifier, classes or key-values
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.1.push(class.into());
        self
    }

    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.2.push((key.into(), value.into()));
        self
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn classes(&self) -> &[String] {
        &self.1
    }

    pub fn key_values(&self) -> &[(String, String)] {
        &self.2
    }

    /// Exact-match class membership
    pub fn has_class(&self, class: &str) -> bool {
        self.1.iter().any(|c| c == class)
    }

    /// Value of the first key-value pair with this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.2
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
