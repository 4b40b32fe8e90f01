// ABOUTME: Owned markup tree in the text/tail model, built from scraper's parsed HTML document.
// ABOUTME: Each element keeps the text before its first child and the tail text that follows it.

use ego_tree::iter::Children;
use scraper::{ElementRef, Html, Node};

/// An element of a parsed page.
///
/// `text` is the character data before the first child element. The
/// character data following an element, up to its next sibling element,
/// belongs to that element as its `tail`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub tail: String,
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: String::new(),
            tail: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    /// Value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

// Deeply nested pages would overflow the stack with the default recursive drop.
impl Drop for MarkupNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// An element being converted, with the document children not yet visited.
type OpenElement<'a> = (MarkupNode, Children<'a, Node>);

/// Parses an HTML document and returns its `<html>` element.
///
/// Comments are dropped and the text on both sides of them is joined.
pub fn parse_markup(html: &str) -> MarkupNode {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let mut open: Vec<OpenElement> = vec![(shallow_copy(root), root.children())];
    let mut finished = None;
    while let Some((node, children)) = open.last_mut() {
        match children.next() {
            Some(child) => match child.value() {
                Node::Text(text) => match node.children.last_mut() {
                    Some(last) => last.tail.push_str(text),
                    None => node.text.push_str(text),
                },
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        open.push((shallow_copy(el), el.children()));
                    }
                }
                _ => {}
            },
            None => {
                if let Some((done, _)) = open.pop() {
                    match open.last_mut() {
                        Some((parent, _)) => parent.children.push(done),
                        None => finished = Some(done),
                    }
                }
            }
        }
    }
    finished.unwrap_or_default()
}

/// Tag and attributes of `element`, without content.
fn shallow_copy(element: ElementRef) -> MarkupNode {
    let value = element.value();
    let mut node = MarkupNode::element(value.name());
    node.attributes = value
        .attrs()
        .map(|(name, val)| (name.to_string(), val.to_string()))
        .collect();
    node
}
