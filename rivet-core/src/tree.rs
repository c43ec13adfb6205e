//! In-memory document tree.
//!
//! Stands in for a browser document where none exists: server-side callers and
//! unit tests build markup with [`Node`] and mount it exactly like the DOM.

use std::{
    cell::{Ref, RefCell},
    fmt::{self, Write},
    rc::{Rc, Weak},
};

use indexmap::IndexMap;

use crate::{selector::Selector, source};

const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

enum NodeKind {
    Document,
    Element {
        name: String,
        attrs: RefCell<IndexMap<String, String>>,
    },
    Text(String),
}

#[derive(Clone)]
pub struct Node(Rc<RawNode>);

struct RawNode {
    kind: NodeKind,
    parent: RefCell<Option<Weak<RawNode>>>,
    children: RefCell<Vec<Node>>,
}

impl Node {
    // Node Creation //

    fn create(kind: NodeKind) -> Self {
        let raw = RawNode {
            kind,
            parent: RefCell::default(),
            children: RefCell::default(),
        };
        Self(Rc::new(raw))
    }

    pub fn document() -> Self {
        Self::create(NodeKind::Document)
    }

    pub fn element(name: impl Into<String>) -> Self {
        Self::create(NodeKind::Element {
            name: name.into(),
            attrs: RefCell::default(),
        })
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::create(NodeKind::Text(value.into()))
    }

    pub fn with_attr(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key.into(), value.into());
        self
    }

    pub fn with_child(self, child: Self) -> Self {
        self.insert(&child);
        self
    }

    pub fn with_children<I>(self, children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        for child in children {
            self.insert(&child);
        }
        self
    }

    // Containers //

    /// Appends `child`, detaching it from its previous parent first.
    ///
    /// # Panics
    ///
    /// When `self` is a text node, or when `child` is `self` or one of its ancestors.
    pub fn insert(&self, child: &Self) {
        if matches!(self.0.kind, NodeKind::Text(_)) {
            self.expect_kind(Expect::Container);
        }

        if self.is_inclusive_descendant_of(child) {
            panic!("insertion target is a descendant of the inserted node");
        }

        if let Some(parent) = child.parent() {
            parent.remove(child);
        }

        child.0.parent.replace(Some(Rc::downgrade(&self.0)));
        self.0.children.borrow_mut().push(child.clone());
    }

    pub fn remove(&self, child: &Self) {
        let mut children = self.0.children.borrow_mut();
        let index = children
            .iter()
            .position(|node| node == child)
            .expect("removal node not a child of self");

        child.0.parent.replace(None);
        children.remove(index);
    }

    // Elements //

    pub fn attr(&self, key: &str) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.kind {
            attrs.borrow().get(key).cloned()
        } else {
            None
        }
    }

    pub fn set_attr(&self, key: String, value: String) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.kind {
            attrs.borrow_mut().insert(key, value)
        } else {
            self.expect_kind(Expect::Element);
        }
    }

    pub fn remove_attr(&self, key: &str) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.kind {
            attrs.borrow_mut().shift_remove(key)
        } else {
            self.expect_kind(Expect::Element);
        }
    }

    pub fn element_name(&self) -> Option<&str> {
        if let NodeKind::Element { name, .. } = &self.0.kind {
            Some(name)
        } else {
            None
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.0.kind, NodeKind::Element { .. })
    }

    // Traversal //

    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().as_ref().and_then(Weak::upgrade).map(Self)
    }

    pub fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    pub fn children_ref(&self) -> Ref<'_, Vec<Self>> {
        self.0.children.borrow()
    }

    /// Descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<Self> {
        let mut out = vec![];
        self.collect_descendants(&mut out);
        out
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    // Internal //

    fn is_inclusive_descendant_of(&self, other: &Self) -> bool {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if node == *other {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn collect_descendants(&self, out: &mut Vec<Self>) {
        for child in &*self.children_ref() {
            if child.is_element() {
                out.push(child.clone());
                child.collect_descendants(out);
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        match &self.0.kind {
            NodeKind::Text(content) => out.push_str(content),
            NodeKind::Document | NodeKind::Element { .. } => {
                for child in &*self.children_ref() {
                    child.collect_text(out);
                }
            }
        }
    }

    fn expect_kind(&self, kind: Expect) -> ! {
        let expected = match kind {
            Expect::Container => "container",
            Expect::Element => "element",
        };
        let found = match &self.0.kind {
            NodeKind::Document => "document",
            NodeKind::Element { .. } => "element",
            NodeKind::Text(_) => "text",
        };

        panic!("expected {}, found {}", expected, found);
    }

    fn render<W: Write>(&self, w: &mut W) -> fmt::Result {
        match &self.0.kind {
            NodeKind::Element { name, attrs } => {
                write!(w, "<{name}")?;
                for (key, value) in &*attrs.borrow() {
                    write!(w, " {key}=\"")?;
                    html_escape(w, value)?;
                    w.write_char('"')?;
                }

                if VOID.contains(&name.as_str()) {
                    w.write_str(" />")
                } else {
                    w.write_char('>')?;
                    self.render_children(w)?;
                    write!(w, "</{name}>")
                }
            }
            NodeKind::Text(content) => html_escape(w, content),
            NodeKind::Document => self.render_children(w),
        }
    }

    fn render_children<W: Write>(&self, w: &mut W) -> fmt::Result {
        for child in &*self.children_ref() {
            child.render(w)?;
        }
        Ok(())
    }
}

impl source::Element for Node {
    fn attr(&self, name: &str) -> Option<String> {
        Self::attr(self, name)
    }
}

impl source::Scope for Node {
    type Element = Self;

    fn query_all(&self, selector: &Selector<'_>) -> Vec<Self> {
        let mut matches = self.descendants();
        matches.retain(|node| selector.matches(node));
        matches
    }
}

impl Eq for Node {}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Renders the node's outer HTML.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({self})")
    }
}

enum Expect {
    Container,
    Element,
}

// See https://cheatsheetseries.owasp.org/cheatsheets/Cross_Site_Scripting_Prevention_Cheat_Sheet.html#output-encoding-for-html-contexts
fn html_escape<W: Write>(w: &mut W, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => w.write_str("&amp;")?,
            '<' => w.write_str("&lt;")?,
            '>' => w.write_str("&gt;")?,
            '"' => w.write_str("&quot;")?,
            '\'' => w.write_str("&#x27;")?,
            _ => w.write_char(c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Node;
    use crate::{Scope, Selector};

    #[test]
    fn renders_outer_html() {
        let node = Node::element("div")
            .with_attr("data-props", r#"{"a":"<b>"}"#)
            .with_child(Node::element("br"))
            .with_child(Node::text("Tom & Jerry"));

        assert_eq!(
            node.to_string(),
            r#"<div data-props="{&quot;a&quot;:&quot;&lt;b&gt;&quot;}"><br />Tom &amp; Jerry</div>"#
        );
    }

    #[test]
    fn descendants_in_document_order() {
        let a = Node::element("a");
        let b = Node::element("b");
        let c = Node::element("c");
        let root = Node::element("div")
            .with_child(a.clone().with_child(b.clone()))
            .with_child(Node::text("skip"))
            .with_child(c.clone());

        assert_eq!(root.descendants(), vec![a, b, c]);
        assert_eq!(root.text_content(), "skip");
    }

    #[test]
    fn query_excludes_self() {
        let inner = Node::element("span").with_attr("data-ref", "x");
        let root = Node::element("div")
            .with_attr("data-ref", "x")
            .with_child(inner.clone());

        assert_eq!(root.query_all(&Selector::Has("data-ref")), vec![inner]);
    }

    #[test]
    fn reinsertion_moves_node() {
        let child = Node::element("span");
        let first = Node::element("div").with_child(child.clone());
        let second = Node::element("div").with_child(child.clone());

        assert!(first.children().is_empty());
        assert_eq!(second.children(), vec![child.clone()]);
        assert_eq!(child.parent(), Some(second));
    }

    #[test]
    fn attribute_edits() {
        let node = Node::element("ul")
            .with_attr("data-mounts", "list")
            .with_children((0..3).map(|_| Node::element("li")));

        assert_eq!(node.element_name(), Some("ul"));
        assert_eq!(node.children().len(), 3);
        assert_eq!(node.remove_attr("data-mounts").as_deref(), Some("list"));
        assert_eq!(node.attr("data-mounts"), None);
        assert_eq!(Node::text("x").element_name(), None);
    }

    #[test]
    #[should_panic(expected = "insertion target is a descendant of the inserted node")]
    fn rejects_insertion_into_self() {
        let node = Node::element("div");
        node.insert(&node);
    }

    #[test]
    #[should_panic(expected = "insertion target is a descendant of the inserted node")]
    fn rejects_insertion_into_descendant() {
        let leaf = Node::element("span");
        let root = Node::element("div").with_child(Node::element("p").with_child(leaf.clone()));
        leaf.insert(&root);
    }

    #[test]
    #[should_panic(expected = "expected element, found text")]
    fn text_has_no_attributes() {
        Node::text("hi").set_attr("id".into(), "x".into());
    }
}
