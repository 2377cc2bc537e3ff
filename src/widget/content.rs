//! Content: the closed set of things a label, cell or Item can hold.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::dom::{DomHandle, NodeId, INNER_HTML};
use crate::error::{KitError, Result};

use super::traits::Widget;

/// Displayable payload: plain text, a number, or a nested widget.
#[derive(Clone, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Widget(Arc<dyn Widget>),
}

impl Content {
    /// Variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Empty => "empty",
            Content::Text(_) => "text",
            Content::Integer(_) => "integer",
            Content::Widget(_) => "widget",
        }
    }

    /// Replace the children of `node` with this content.
    ///
    /// Text and numbers become the node's `innerHTML`; a widget is rendered
    /// and appended.
    pub fn write_into(&self, dom: &DomHandle, node: NodeId) {
        match self {
            Content::Empty => dom.set_property(node, INNER_HTML, ""),
            Content::Text(text) => dom.set_property(node, INNER_HTML, text),
            Content::Integer(n) => dom.set_property(node, INNER_HTML, &n.to_string()),
            Content::Widget(widget) => {
                dom.set_property(node, INNER_HTML, "");
                let child = widget.render(dom);
                dom.append_child(node, child);
            }
        }
    }

    /// Render as a standalone node: the widget's own root, or a `div`
    /// holding the text.
    pub fn render(&self, dom: &DomHandle) -> NodeId {
        match self {
            Content::Widget(widget) => widget.render(dom),
            other => {
                let node = dom.create_node("div");
                other.write_into(dom, node);
                node
            }
        }
    }

    /// Total order over scalar content: empty, then integers, then text.
    ///
    /// Widgets have no order and yield `UnsupportedContent`.
    pub fn compare(&self, other: &Content, context: &'static str) -> Result<Ordering> {
        Ok(self.sort_key(context)?.cmp(&other.sort_key(context)?))
    }

    fn sort_key(&self, context: &'static str) -> Result<SortKey<'_>> {
        match self {
            Content::Empty => Ok(SortKey::Empty),
            Content::Integer(n) => Ok(SortKey::Integer(*n)),
            Content::Text(text) => Ok(SortKey::Text(text)),
            Content::Widget(_) => Err(KitError::UnsupportedContent {
                kind: self.kind(),
                context,
            }),
        }
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Empty,
    Integer(i64),
    Text(&'a str),
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Empty => f.write_str("Empty"),
            Content::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Content::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Content::Widget(w) => f.debug_tuple("Widget").field(&w.widget_type()).finish(),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<i64> for Content {
    fn from(n: i64) -> Self {
        Content::Integer(n)
    }
}

impl From<i32> for Content {
    fn from(n: i32) -> Self {
        Content::Integer(i64::from(n))
    }
}

impl<W: Widget + 'static> From<Arc<W>> for Content {
    fn from(widget: Arc<W>) -> Self {
        Content::Widget(widget)
    }
}

impl From<Arc<dyn Widget>> for Content {
    fn from(widget: Arc<dyn Widget>) -> Self {
        Content::Widget(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, DomAdapter};

    struct Badge;

    impl Widget for Badge {
        fn widget_type(&self) -> &str {
            "Badge"
        }

        fn render(&self, dom: &DomHandle) -> NodeId {
            dom.create_node("span")
        }
    }

    fn doc() -> (Arc<Document>, DomHandle) {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        (doc, dom)
    }

    #[test]
    fn conversions() {
        assert!(matches!(Content::from("a"), Content::Text(ref s) if s == "a"));
        assert!(matches!(Content::from(3), Content::Integer(3)));
        assert!(matches!(Content::from(Arc::new(Badge)), Content::Widget(_)));
        assert!(matches!(Content::default(), Content::Empty));
    }

    #[test]
    fn write_text_and_number() {
        let (doc, dom) = doc();
        let node = dom.create_node("td");
        Content::from("cell").write_into(&dom, node);
        assert_eq!(doc.to_html(node), "<td>cell</td>");
        Content::from(42).write_into(&dom, node);
        assert_eq!(doc.to_html(node), "<td>42</td>");
    }

    #[test]
    fn write_widget_replaces_previous() {
        let (doc, dom) = doc();
        let node = dom.create_node("td");
        let badge = Content::from(Arc::new(Badge));
        badge.write_into(&dom, node);
        badge.write_into(&dom, node);
        assert_eq!(doc.to_html(node), "<td><span></span></td>");
    }

    #[test]
    fn render_wraps_text_in_div() {
        let (doc, dom) = doc();
        let node = Content::from("hi").render(&dom);
        assert_eq!(doc.to_html(node), "<div>hi</div>");
    }

    #[test]
    fn compare_scalars() {
        let a = Content::from("apple");
        let b = Content::from("banana");
        assert_eq!(a.compare(&b, "test").unwrap(), Ordering::Less);
        assert_eq!(
            Content::from(10).compare(&a, "test").unwrap(),
            Ordering::Less
        );
        assert_eq!(
            Content::Empty.compare(&Content::from(-5), "test").unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn compare_widget_is_unsupported() {
        let w = Content::from(Arc::new(Badge));
        let err = w.compare(&Content::Empty, "table sort").unwrap_err();
        assert_eq!(
            err,
            KitError::UnsupportedContent {
                kind: "widget",
                context: "table sort"
            }
        );
    }
}
