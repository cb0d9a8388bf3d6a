//! Double-layer container: a key whose single value is an outer collection
//! (array or dict) of uniform inner elements.
//!
//! Mutations go to the outer collection, never to the key's own value list.
//! The wrapper type `W` decides how a caller-supplied item becomes an inner
//! element.

use crate::render::plist::{escape, pad};
use crate::tree::{Element, Node, Pair, Tag};
use std::fmt;
use std::marker::PhantomData;

/// Turns an item into the inner element stored in a composite.
pub trait Wrap {
    type Item;

    fn wrap(item: Self::Item) -> Element;
}

pub struct Composite<W: Wrap> {
    key: String,
    outer: Node,
    _inner: PhantomData<W>,
}

impl<W: Wrap> Composite<W> {
    pub fn new<I>(key: impl Into<String>, outer: Tag, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<W::Item>,
    {
        let key = key.into();
        debug_assert!(!key.is_empty(), "composite key must not be empty");
        let mut composite = Self {
            key,
            outer: Node::new(outer, ()),
            _inner: PhantomData,
        };
        composite.add(items);
        composite
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn outer(&self) -> &Node {
        &self.outer
    }

    pub fn len(&self) -> usize {
        self.outer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    /// Wrap and append `items`. Entries that would render nothing, such as
    /// an empty calendar predicate, are skipped so `len()` matches the output.
    pub fn add<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<W::Item>,
    {
        let key = &self.key;
        let wrapped: Vec<Element> = items
            .into_iter()
            .map(|i| W::wrap(i.into()))
            .filter(|element| {
                let blank = element.is_blank();
                if blank {
                    tracing::trace!(%key, "skipped entry that renders nothing");
                }
                !blank
            })
            .collect();
        self.outer.add(wrapped);
    }

    /// Remove inner elements equal to the wrapped `items`.
    pub fn remove<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<W::Item>,
    {
        let wrapped: Vec<Element> = items.into_iter().map(|i| W::wrap(i.into())).collect();
        self.outer.remove(wrapped)
    }

    /// Remove keyed inner elements by key, whatever their value.
    pub fn remove_key(&mut self, key: &str) -> usize {
        let before = self.outer.len();
        self.outer
            .retain(|c| !matches!(c, Element::Pair(p) if p.key() == key));
        before - self.outer.len()
    }

    pub fn clear(&mut self) {
        self.outer.clear();
    }

    /// An empty composite renders nothing; a key with no value is not valid
    /// plist content.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    pub(crate) fn write(&self, out: &mut String, depth: usize) {
        if self.outer.is_empty() {
            return;
        }
        pad(out, depth);
        out.push_str(&format!("<key>{}</key>\n", escape(&self.key)));
        self.outer.write(out, depth);
    }
}

impl<W: Wrap> From<Composite<W>> for Pair {
    fn from(composite: Composite<W>) -> Self {
        if composite.outer.is_empty() {
            return Pair::new(composite.key, ());
        }
        Pair::new(composite.key, composite.outer)
    }
}

impl<W: Wrap> Clone for Composite<W> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            outer: self.outer.clone(),
            _inner: PhantomData,
        }
    }
}

impl<W: Wrap> fmt::Debug for Composite<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("key", &self.key)
            .field("outer", &self.outer)
            .finish()
    }
}

impl<W: Wrap> PartialEq for Composite<W> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.outer == other.outer
    }
}

/// Inner `<string>` nodes.
pub struct Strings;

impl Wrap for Strings {
    type Item = String;

    fn wrap(item: String) -> Element {
        Element::Node(Node::string(item))
    }
}

/// A boolean entry in a dict, e.g. a job label mapped to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub key: String,
    pub value: bool,
}

impl From<&str> for Flag {
    fn from(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: true,
        }
    }
}

impl From<String> for Flag {
    fn from(key: String) -> Self {
        Self { key, value: true }
    }
}

impl<K: Into<String>> From<(K, bool)> for Flag {
    fn from((key, value): (K, bool)) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Inner boolean pairs.
pub struct Flags;

impl Wrap for Flags {
    type Item = Flag;

    fn wrap(item: Flag) -> Element {
        Element::Pair(Pair::boolean(item.key, item.value))
    }
}

/// A string entry in a dict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Entry {
    fn from((key, value): (K, V)) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Inner string pairs.
pub struct Entries;

impl Wrap for Entries {
    type Item = Entry;

    fn wrap(item: Entry) -> Element {
        Element::Pair(Pair::string(item.key, item.value))
    }
}

/// Inner integer pairs.
pub struct IntegerEntries;

impl Wrap for IntegerEntries {
    type Item = (String, i64);

    fn wrap((key, n): (String, i64)) -> Element {
        Element::Pair(Pair::integer(key, n))
    }
}
