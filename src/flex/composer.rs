//! Layout composer: Container and Items to one live subtree.
//!
//! ```text
//! div#<container>
//! ├── style            (innerHTML = Container::css())
//! ├── div#<item 1>     (+ "hidden" when hidden)
//! │   └── <payload>    (+ "expand-width" / "expand-height")
//! └── div#<item 2> ...
//! ```

use tracing::debug;

use crate::dom::{DomHandle, NodeId, INNER_HTML};
use crate::widget::Widget;

use super::container::Container;

impl Container {
    /// Build the container subtree and return its root `div`.
    ///
    /// Each call creates new nodes and re-targets every Item's visibility at
    /// the new wrappers.
    pub fn render(&self, dom: &DomHandle) -> NodeId {
        let root = dom.create_node("div");
        dom.set_attribute(root, "id", self.id());

        let style = dom.create_node("style");
        dom.set_property(style, INNER_HTML, &self.css());
        dom.append_child(root, style);

        for item in self.items() {
            let wrapper = item.mount(dom);
            dom.append_child(root, wrapper);
        }
        debug!(container = self.id(), items = self.items().len(), "rendered container");
        root
    }

    /// Replace the body's content with this container, edge to edge.
    ///
    /// Padding and margin are forced to `0px` in the base set first.
    pub fn render_to_body(&mut self, dom: &DomHandle) -> NodeId {
        self.attributes.set(&[], |a| {
            a.padding = "0px".to_owned();
            a.margin = "0px".to_owned();
        });
        let body = dom.body();
        dom.set_property(body, INNER_HTML, "");
        let root = self.render(dom);
        dom.append_child(body, root);
        root
    }
}

impl Widget for Container {
    fn widget_type(&self) -> &str {
        "Container"
    }

    fn render(&self, dom: &DomHandle) -> NodeId {
        Container::render(self, dom)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dom::{Document, DomAdapter};
    use crate::flex::{FlexWrap, IdAllocator, Item, HIDDEN_CLASS};
    use pretty_assertions::assert_eq;

    fn setup() -> (Arc<IdAllocator>, Arc<Document>, DomHandle) {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        (IdAllocator::new(), doc, dom)
    }

    #[test]
    fn render_structure() {
        let (ids, doc, dom) = setup();
        let item = Item::new(&ids, "hello");
        let item_id = item.id().to_owned();
        let c = Container::new(&ids).wrap(FlexWrap::Wrap).append(item);
        let root = c.render(&dom);

        let children = dom.children(root);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.get(children[0]).unwrap().tag, "style");
        assert_eq!(dom.property(children[0], INNER_HTML), Some(c.css()));
        assert_eq!(dom.attribute(children[1], "id"), Some(item_id.clone()));
        assert_eq!(
            doc.to_html(children[1]),
            format!("<div id=\"{item_id}\"><div>hello</div></div>")
        );
    }

    #[test]
    fn hidden_item_renders_with_class() {
        let (ids, _, dom) = setup();
        let item = Arc::new(Item::new(&ids, "x"));
        item.hide();
        let c = Container::new(&ids).append(item.clone());
        let root = c.render(&dom);
        let wrapper = dom.children(root)[1];
        assert!(dom.has_class(wrapper, HIDDEN_CLASS));
        item.show();
        assert!(!dom.has_class(wrapper, HIDDEN_CLASS));
    }

    #[test]
    fn nested_container_as_payload() {
        let (ids, doc, dom) = setup();
        let inner = Container::new(&ids);
        let inner_id = inner.id().to_owned();
        let outer = Container::new(&ids).append(Item::new(&ids, Arc::new(inner)));
        let root = outer.render(&dom);
        let wrapper = dom.children(root)[1];
        let payload = dom.children(wrapper)[0];
        assert_eq!(dom.attribute(payload, "id"), Some(inner_id));
        assert_eq!(doc.get(payload).unwrap().tag, "div");
    }

    #[test]
    fn render_to_body_clears_and_zeroes_edges() {
        let (ids, _, dom) = setup();
        let stale = dom.create_node("p");
        dom.append_child(dom.body(), stale);

        let mut c = Container::new(&ids).padding("8px");
        let root = c.render_to_body(&dom);
        assert_eq!(dom.children(dom.body()), vec![root]);
        assert!(c.css().contains("{display:flex;padding:0px;margin:0px;}"));
    }
}
