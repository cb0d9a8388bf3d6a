//! Keyed node: `<key>name</key>` followed by the value elements.

use crate::render::plist::{escape, pad};
use crate::tree::node::{IntoElements, flatten, remove_matching, same_members};
use crate::tree::{Element, Node};

/// A key label plus its value sequence. Usually the sequence holds a single
/// node; composites and the document root rely on that.
#[derive(Debug, Clone)]
pub struct Pair {
    key: String,
    values: Vec<Element>,
}

impl Pair {
    /// `key` must not be empty; option constructors take it from
    /// `OptionKey`, and the config loader rejects empty dict keys.
    pub fn new(key: impl Into<String>, values: impl IntoElements) -> Self {
        let key = key.into();
        debug_assert!(!key.is_empty(), "pair key must not be empty");
        Self {
            key,
            values: flatten(values),
        }
    }

    pub fn string(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(key, Node::string(text))
    }

    pub fn integer(key: impl Into<String>, n: i64) -> Self {
        Self::new(key, Node::integer(n))
    }

    pub fn boolean(key: impl Into<String>, flag: bool) -> Self {
        Self::new(key, Node::boolean(flag))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[Element] {
        &self.values
    }

    /// The first value, when it is a node.
    pub fn value_node(&self) -> Option<&Node> {
        match self.values.first() {
            Some(Element::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub fn value_node_mut(&mut self) -> Option<&mut Node> {
        match self.values.first_mut() {
            Some(Element::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Replace the whole value sequence.
    pub fn set_value(&mut self, values: impl IntoElements) {
        self.values = flatten(values);
    }

    pub fn add(&mut self, values: impl IntoElements) -> Vec<Element> {
        let added = flatten(values);
        self.values.extend(added.iter().cloned());
        added
    }

    pub fn remove(&mut self, values: impl IntoElements) -> usize {
        remove_matching(&mut self.values, flatten(values))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when no value would render, so the key is suppressed too.
    pub(crate) fn is_blank(&self) -> bool {
        self.values.iter().all(Element::is_blank)
    }

    /// An empty pair renders nothing, key included.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    pub(crate) fn write(&self, out: &mut String, depth: usize) {
        if self.is_blank() {
            return;
        }
        pad(out, depth);
        out.push_str(&format!("<key>{}</key>\n", escape(&self.key)));
        for value in &self.values {
            value.write(out, depth);
        }
    }
}

impl PartialEq for Pair {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && same_members(&self.values, &other.values)
    }
}
