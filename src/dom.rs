//! DOM adapter
//!
//! The classifiers only need a handful of capabilities from a parsed page:
//! an element's tag name, its attributes, its parent, and its child nodes.
//! [`ElementNode`] captures exactly that, so location and structure
//! inspection are written once as upward/downward walks and work with any
//! tree that can provide them. [`dom_query::NodeRef`] is the implementation
//! used in practice.

pub use dom_query::{Document, NodeRef, Selection};

/// Minimal node-with-parent abstraction over a parsed document.
///
/// Implementors represent both element and non-element nodes; non-element
/// nodes (text, comments) report `None` for [`ElementNode::element_name`].
pub trait ElementNode: Sized {
    /// Lowercase tag name, or `None` for non-element nodes.
    fn element_name(&self) -> Option<String>;

    /// Attribute value, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Parent element. `None` at the root of the tree.
    fn parent_element(&self) -> Option<Self>;

    /// All direct child nodes, text nodes included.
    fn child_nodes(&self) -> Vec<Self>;

    /// Ancestors ordered from nearest to furthest.
    fn element_ancestors(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = self.parent_element();
        while let Some(node) = current {
            current = node.parent_element();
            out.push(node);
        }
        out
    }

    /// Whitespace-separated tokens of the `class` attribute.
    fn class_list(&self) -> Vec<String> {
        self.attribute("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Whether any descendant element has one of the given tag names.
    fn has_descendant_named(&self, tags: &[&str]) -> bool {
        let mut stack = self.child_nodes();
        while let Some(node) = stack.pop() {
            if node
                .element_name()
                .is_some_and(|name| tags.contains(&name.as_str()))
            {
                return true;
            }
            stack.extend(node.child_nodes());
        }
        false
    }

    /// Whether any ancestor element has one of the given tag names.
    fn has_ancestor_named(&self, tags: &[&str]) -> bool {
        self.element_ancestors().iter().any(|a| {
            a.element_name()
                .is_some_and(|name| tags.contains(&name.as_str()))
        })
    }
}

impl ElementNode for NodeRef<'_> {
    fn element_name(&self) -> Option<String> {
        if !self.is_element() {
            return None;
        }
        self.node_name().map(|name| name.to_ascii_lowercase())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attr(name).map(|v| v.to_string())
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().filter(NodeRef::is_element)
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.children()
    }
}

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Visible text of a node: every descendant text node trimmed, empty pieces
/// dropped, the rest joined without a separator.
///
/// Markup like `<span>IR</span>\n<span>情報</span>` reads as `IR情報`.
#[must_use]
pub fn visible_text(node: &NodeRef) -> String {
    let mut out = String::new();
    for text_node in node.descendants() {
        if text_node.is_text() {
            out.push_str(text_node.text().trim());
        }
    }
    out
}

/// Text of the document `<title>`, if any.
#[must_use]
pub fn title(doc: &Document) -> Option<String> {
    let sel = doc.select("title");
    let node = sel.nodes().first()?;
    let text = visible_text(node);
    (!text.is_empty()).then_some(text)
}
