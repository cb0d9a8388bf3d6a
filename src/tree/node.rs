//! Node: a tag plus an ordered list of children, and the element enum that
//! lets a child be a leaf, a node or a keyed pair.

use crate::render::plist::{escape, pad};
use crate::tree::{Pair, Tag, Value};

/// One child of a node or pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Leaf(Value),
    Node(Node),
    Pair(Pair),
}

impl Element {
    /// Serialize this element on its own, dispatching on its shape.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    pub(crate) fn write(&self, out: &mut String, depth: usize) {
        match self {
            Element::Leaf(value) => {
                pad(out, depth);
                out.push_str(&escape(&value.to_string()));
                out.push('\n');
            }
            Element::Node(node) => node.write(out, depth),
            Element::Pair(pair) => pair.write(out, depth),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Element::Leaf(_))
    }

    /// True when this element would serialize to nothing.
    pub(crate) fn is_blank(&self) -> bool {
        match self {
            Element::Leaf(_) => false,
            Element::Node(node) => node.is_empty(),
            Element::Pair(pair) => pair.is_blank(),
        }
    }

    pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Value>) {
        match self {
            Element::Leaf(value) => out.push(value),
            Element::Node(node) => node.children.iter().for_each(|c| c.collect_leaves(out)),
            Element::Pair(pair) => pair.values().iter().for_each(|c| c.collect_leaves(out)),
        }
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Element::Leaf(value)
    }
}

impl From<Node> for Element {
    fn from(node: Node) -> Self {
        Element::Node(node)
    }
}

impl From<Pair> for Element {
    fn from(pair: Pair) -> Self {
        Element::Pair(pair)
    }
}

/// Anything that can be spread into a flat list of elements.
///
/// Sequences (`Vec`, arrays, `Option`) are flattened recursively; strings,
/// integers, nodes and pairs are atomic.
pub trait IntoElements {
    fn push_into(self, out: &mut Vec<Element>);
}

/// Flatten `items` into a single ordered list.
pub fn flatten(items: impl IntoElements) -> Vec<Element> {
    let mut out = Vec::new();
    items.push_into(&mut out);
    out
}

impl IntoElements for Element {
    fn push_into(self, out: &mut Vec<Element>) {
        out.push(self);
    }
}

impl IntoElements for Value {
    fn push_into(self, out: &mut Vec<Element>) {
        out.push(Element::Leaf(self));
    }
}

impl IntoElements for Node {
    fn push_into(self, out: &mut Vec<Element>) {
        out.push(Element::Node(self));
    }
}

impl IntoElements for Pair {
    fn push_into(self, out: &mut Vec<Element>) {
        out.push(Element::Pair(self));
    }
}

impl IntoElements for &str {
    fn push_into(self, out: &mut Vec<Element>) {
        out.push(Element::Leaf(self.into()));
    }
}

impl IntoElements for String {
    fn push_into(self, out: &mut Vec<Element>) {
        out.push(Element::Leaf(self.into()));
    }
}

impl IntoElements for i64 {
    fn push_into(self, out: &mut Vec<Element>) {
        out.push(Element::Leaf(self.into()));
    }
}

impl IntoElements for i32 {
    fn push_into(self, out: &mut Vec<Element>) {
        out.push(Element::Leaf(self.into()));
    }
}

impl IntoElements for () {
    fn push_into(self, _out: &mut Vec<Element>) {}
}

impl<T: IntoElements> IntoElements for Vec<T> {
    fn push_into(self, out: &mut Vec<Element>) {
        for item in self {
            item.push_into(out);
        }
    }
}

impl<T: IntoElements, const N: usize> IntoElements for [T; N] {
    fn push_into(self, out: &mut Vec<Element>) {
        for item in self {
            item.push_into(out);
        }
    }
}

impl<T: IntoElements> IntoElements for Option<T> {
    fn push_into(self, out: &mut Vec<Element>) {
        if let Some(item) = self {
            item.push_into(out);
        }
    }
}

/// A tagged container.
///
/// Equality ignores child order and duplicates: two nodes are equal when
/// their tags match and each child of one has an equal child in the other.
#[derive(Debug, Clone)]
pub struct Node {
    tag: Tag,
    children: Vec<Element>,
}

impl Node {
    pub fn new(tag: Tag, children: impl IntoElements) -> Self {
        Self {
            tag,
            children: flatten(children),
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(Tag::String, Value::Text(text.into()))
    }

    pub fn integer(n: i64) -> Self {
        Self::new(Tag::Integer, Value::Integer(n))
    }

    pub fn boolean(flag: bool) -> Self {
        Self::new(Tag::Boolean, flag.to_string())
    }

    pub fn array(children: impl IntoElements) -> Self {
        Self::new(Tag::Array, children)
    }

    pub fn dict(children: impl IntoElements) -> Self {
        Self::new(Tag::Dict, children)
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append the flattened `values`; returns what was appended.
    pub fn add(&mut self, values: impl IntoElements) -> Vec<Element> {
        let added = flatten(values);
        self.children.extend(added.iter().cloned());
        added
    }

    /// Remove every child equal to any of the flattened `values`.
    ///
    /// Returns how many children were dropped. A value with no match is
    /// ignored.
    pub fn remove(&mut self, values: impl IntoElements) -> usize {
        remove_matching(&mut self.children, flatten(values))
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&Element) -> bool) {
        self.children.retain(keep);
    }

    /// All leaf values reachable from this node, depth first.
    pub fn leaves(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        self.children.iter().for_each(|c| c.collect_leaves(&mut out));
        out
    }

    /// Compare only the sets of reachable leaves, ignoring tags, keys and
    /// shape.
    pub fn same_leaves(&self, other: &Node) -> bool {
        let mine = self.leaves();
        let theirs = other.leaves();
        mine.iter().all(|v| theirs.contains(v)) && theirs.iter().all(|v| mine.contains(v))
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    pub(crate) fn write(&self, out: &mut String, depth: usize) {
        match self.children.as_slice() {
            [] => {}
            [Element::Leaf(flag), ..] if self.tag == Tag::Boolean => {
                pad(out, depth);
                out.push_str(&format!("<{}/>\n", flag));
            }
            [Element::Leaf(value)] => {
                pad(out, depth);
                out.push_str(&format!(
                    "<{tag}>{}</{tag}>\n",
                    escape(&value.to_string()),
                    tag = self.tag
                ));
            }
            children => {
                pad(out, depth);
                out.push_str(&format!("<{}>\n", self.tag));
                for child in children {
                    child.write(out, depth + 1);
                }
                pad(out, depth);
                out.push_str(&format!("</{}>\n", self.tag));
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && same_members(&self.children, &other.children)
    }
}

/// Set equality over element slices.
pub(crate) fn same_members(a: &[Element], b: &[Element]) -> bool {
    a.iter().all(|x| b.contains(x)) && b.iter().all(|y| a.contains(y))
}

pub(crate) fn remove_matching(children: &mut Vec<Element>, targets: Vec<Element>) -> usize {
    let before = children.len();
    for target in &targets {
        let len = children.len();
        children.retain(|c| c != target);
        if children.len() == len {
            tracing::trace!(?target, "remove matched nothing");
        }
    }
    before - children.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_node_serializes_to_nothing() {
        assert_eq!(Node::array(()).serialize(), "");
    }

    #[test]
    fn single_leaf_is_inline() {
        assert_eq!(Node::string("job").serialize(), "<string>job</string>\n");
        assert_eq!(Node::integer(600).serialize(), "<integer>600</integer>\n");
    }

    #[test]
    fn booleans_self_close() {
        assert_eq!(Node::boolean(true).serialize(), "<true/>\n");
        assert_eq!(Node::boolean(false).serialize(), "<false/>\n");
    }

    #[test]
    fn multiple_children_use_block_form() {
        let node = Node::array(vec![Node::string("a"), Node::string("b")]);
        assert_eq!(
            node.serialize(),
            "<array>\n    <string>a</string>\n    <string>b</string>\n</array>\n"
        );
    }

    #[test]
    fn single_nested_child_uses_block_form() {
        let node = Node::array(Node::string("only"));
        assert_eq!(node.serialize(), "<array>\n    <string>only</string>\n</array>\n");
    }

    #[test]
    fn bare_leaves_inside_a_block_print_one_per_line() {
        let node = Node::new(Tag::Custom("list".to_string()), vec!["x", "y"]);
        assert_eq!(node.serialize(), "<list>\n    x\n    y\n</list>\n");
    }

    #[test]
    fn multi_line_text_is_not_reindented() {
        let node = Node::array(vec![Node::string("-c"), Node::string("echo a\necho b")]);
        assert_eq!(
            node.serialize(),
            "<array>\n    <string>-c</string>\n    <string>echo a\necho b</string>\n</array>\n"
        );
        let nested = Node::dict(Pair::string("Script", "one\n  two\n"));
        assert!(nested.serialize().contains("<string>one\n  two\n</string>\n"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(
            Node::string("a<b & c").serialize(),
            "<string>a&lt;b &amp; c</string>\n"
        );
    }

    #[test]
    fn nested_sequences_are_flattened() {
        let node = Node::array(vec![
            vec![Element::from(Node::string("a"))],
            vec![Element::from(Node::string("b")), Element::from(Node::string("c"))],
        ]);
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn add_returns_flattened_values() {
        let mut node = Node::array(());
        let added = node.add([Node::string("a"), Node::string("b")]);
        assert_eq!(added.len(), 2);
        assert_eq!(node.len(), 2);
    }

    #[test]
    fn remove_drops_every_match() {
        let mut node = Node::array(vec![
            Node::string("a"),
            Node::string("b"),
            Node::string("a"),
        ]);
        assert_eq!(node.remove(Node::string("a")), 2);
        assert_eq!(node.children(), &[Element::Node(Node::string("b"))]);
    }

    #[test]
    fn remove_without_match_is_a_no_op() {
        let mut node = Node::array(Node::string("a"));
        assert_eq!(node.remove(Node::string("zzz")), 0);
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn clear_empties_children() {
        let mut node = Node::dict(Pair::string("Label", "job"));
        node.clear();
        assert!(node.is_empty());
    }

    #[test]
    fn equality_ignores_order_and_duplicates() {
        let a = Node::array(vec![Node::string("x"), Node::string("y")]);
        let b = Node::array(vec![Node::string("y"), Node::string("x"), Node::string("y")]);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_sees_keys_and_tags() {
        let month = Node::dict(Pair::integer("Month", 1));
        let day = Node::dict(Pair::integer("Day", 1));
        assert_ne!(month, day);
        assert!(month.same_leaves(&day));
        assert_ne!(Node::string("1"), Node::array("1"));
    }

    #[test]
    fn leaves_descend_through_pairs() {
        let node = Node::dict(vec![Pair::string("A", "x"), Pair::integer("B", 2)]);
        let leaves: Vec<String> = node.leaves().iter().map(|v| v.to_string()).collect();
        assert_eq!(leaves, vec!["x", "2"]);
    }
}
