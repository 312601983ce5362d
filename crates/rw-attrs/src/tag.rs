//! Markup element attribute access.
//!
//! The attribute modifier only needs read/write access to the attributes of
//! an element; [`Tag`] captures that capability so any tree implementation
//! can be processed. [`Element`] is the attribute bag used by this crate.

use std::collections::HashMap;
use std::fmt::Write;

use serde::Deserialize;

/// Read/write access to the attributes of a markup element.
///
/// Setting an attribute that already exists overwrites it; removing an
/// attribute that does not exist is a no-op.
pub trait Tag {
    /// Current value of an attribute, `None` if the attribute is not present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Set an attribute, replacing any previous value.
    fn set_attribute(&mut self, name: &str, value: String);

    /// Remove an attribute.
    fn remove_attribute(&mut self, name: &str);
}

/// How attribute names are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCase {
    /// Names are stored verbatim (XML dialects).
    Sensitive,
    /// Names are lowercased on every access (HTML).
    #[default]
    Insensitive,
}

impl AttributeCase {
    /// Normalize an attribute name according to this policy.
    #[must_use]
    pub fn normalize(self, name: &str) -> String {
        match self {
            Self::Sensitive => name.to_owned(),
            Self::Insensitive => name.to_ascii_lowercase(),
        }
    }
}

/// Element node with its attributes.
///
/// # Example
///
/// ```
/// use rw_attrs::{AttributeCase, Element, Tag};
///
/// let mut div = Element::new("div", AttributeCase::Insensitive).with_attribute("CLASS", "btn");
/// assert_eq!(div.attribute("class"), Some("btn"));
///
/// div.set_attribute("id", "main".to_owned());
/// assert_eq!(div.to_start_tag(), r#"<div class="btn" id="main">"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    case: AttributeCase,
    attrs: HashMap<String, String>,
}

impl Element {
    /// Create an element without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, case: AttributeCase) -> Self {
        Self {
            name: name.into(),
            case,
            attrs: HashMap::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value.into());
        self
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute name case policy.
    #[must_use]
    pub fn case(&self) -> AttributeCase {
        self.case
    }

    /// Whether the attribute is present (possibly with an empty value).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Number of attributes.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attrs.len()
    }

    /// Attributes sorted by name.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&str, &str)> {
        let mut attrs: Vec<_> = self
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        attrs.sort_unstable_by_key(|(k, _)| *k);
        attrs
    }

    /// Render the opening tag with attributes sorted by name.
    #[must_use]
    pub fn to_start_tag(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 2 + self.attrs.len() * 16);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in self.attributes() {
            // Writing to a String cannot fail
            let _ = write!(out, r#" {key}="{}""#, escape_attr(value));
        }
        out.push('>');
        out
    }
}

impl Tag for Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        match self.case {
            AttributeCase::Sensitive => self.attrs.get(name),
            AttributeCase::Insensitive => self.attrs.get(&name.to_ascii_lowercase()),
        }
        .map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        self.attrs.insert(self.case.normalize(name), value);
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attrs.remove(&self.case.normalize(name));
    }
}

/// Escape an attribute value for a double-quoted attribute.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
