//! In-memory host document backed by a slotmap arena.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SecondaryMap, SlotMap};

use super::adapter::{DomAdapter, INNER_HTML};
use super::node::{EventHandler, Listener, ListenerId, NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// Arena holding every node ever created in a [`Document`].
///
/// Parent/child relationships live in secondary maps so detaching and
/// re-attaching a node is O(siblings) and lookup is O(1). Detached nodes
/// stay in the arena: widgets keep their ids across wrap/unwrap moves.
#[derive(Debug, Default)]
pub(crate) struct Tree {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    listeners: SlotMap<ListenerId, NodeId>,
}

impl Tree {
    fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Detach `node` from its parent, if any. Returns the former parent.
    fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        let old_parent = self.parent.remove(node)?;
        if let Some(siblings) = self.children.get_mut(old_parent) {
            siblings.retain(|&child| child != node);
        }
        Some(old_parent)
    }

    /// Whether `candidate` is `node` itself or one of its ancestors.
    fn is_self_or_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent.get(id).copied();
        }
        false
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, position: Option<usize>) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            tracing::warn!("attach on unknown node ignored");
            return;
        }
        if self.is_self_or_ancestor(child, parent) {
            tracing::warn!("refusing to attach a node inside its own subtree");
            return;
        }
        self.detach(child);
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            match position {
                Some(index) if index <= siblings.len() => siblings.insert(index, child),
                _ => siblings.push(child),
            }
        }
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Free every child subtree of `id`.
    fn clear_children(&mut self, id: NodeId) {
        let kids = self
            .children
            .get_mut(id)
            .map(std::mem::take)
            .unwrap_or_default();
        for kid in kids {
            self.remove(kid);
        }
    }

    /// Remove a node and all its descendants, with their listeners.
    ///
    /// Returns how many nodes were freed.
    fn remove(&mut self, id: NodeId) -> usize {
        if !self.nodes.contains_key(id) {
            return 0;
        }
        self.detach(id);

        let mut to_remove = VecDeque::from([id]);
        let mut freed = 0;
        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            if let Some(data) = self.nodes.remove(current) {
                for listener in &data.listeners {
                    self.listeners.remove(listener.id);
                }
                freed += 1;
            }
        }
        freed
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub(crate) fn walk_depth_first_from(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };
        let mut attributes = data.attributes.clone();
        if !data.classes.is_empty() {
            attributes.insert("class".to_owned(), data.classes.join(" "));
        }
        out.push('<');
        out.push_str(&data.tag);
        for (name, value) in &attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        if let Some(text) = data.properties.get(INNER_HTML) {
            out.push_str(text);
        }
        for &child in self.children(node) {
            self.write_html(child, out);
        }
        out.push_str("</");
        out.push_str(&data.tag);
        out.push('>');
    }
}

/// An in-memory document implementing [`DomAdapter`].
///
/// Construction builds the `html > (head, body)` skeleton. Event handlers run
/// outside the document lock, so a handler may freely mutate widgets that
/// render into this same document.
#[derive(Debug)]
pub struct Document {
    tree: Mutex<Tree>,
    html: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Document {
    /// Create an empty document with `<html>`, `<head>` and `<body>`.
    pub fn new() -> Self {
        let mut tree = Tree::default();
        let html = tree.insert(NodeData::new("html"));
        let head = tree.insert(NodeData::new("head"));
        let body = tree.insert(NodeData::new("body"));
        tree.attach(html, head, None);
        tree.attach(html, body, None);
        Self {
            tree: Mutex::new(tree),
            html,
            head,
            body,
        }
    }

    /// Create a document already wrapped for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of a node's data.
    pub fn get(&self, id: NodeId) -> Option<NodeData> {
        self.tree.lock().nodes.get(id).cloned()
    }

    /// Whether the arena holds a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.lock().nodes.contains_key(id)
    }

    /// Number of nodes ever created and still in the arena.
    pub fn len(&self) -> usize {
        self.tree.lock().nodes.len()
    }

    /// Never true in practice: the html/head/body skeleton is created with the document.
    pub fn is_empty(&self) -> bool {
        self.tree.lock().nodes.is_empty()
    }

    /// Fire `event` on `node`, running every subscribed handler in order.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, node: NodeId, event: &str) -> usize {
        let handlers = self
            .tree
            .lock()
            .nodes
            .get(node)
            .map(|data| data.handlers(event))
            .unwrap_or_default();
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        self.tree.lock().walk_depth_first_from(start)
    }

    /// Serialize the subtree at `node`.
    ///
    /// Attributes are emitted sorted by name with `class` taken from the class
    /// list; `innerHTML` text precedes child elements.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree.lock().write_html(node, &mut out);
        out
    }

    pub(crate) fn with_tree<T>(&self, f: impl FnOnce(&Tree) -> T) -> T {
        f(&self.tree.lock())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl DomAdapter for Document {
    fn create_node(&self, tag: &str) -> NodeId {
        self.tree.lock().insert(NodeData::new(tag))
    }

    fn set_property(&self, node: NodeId, name: &str, value: &str) {
        let mut tree = self.tree.lock();
        if name == INNER_HTML {
            tree.clear_children(node);
        }
        match tree.nodes.get_mut(node) {
            Some(data) => {
                data.properties.insert(name.to_owned(), value.to_owned());
            }
            None => tracing::warn!(property = name, "set_property on unknown node"),
        }
    }

    fn property(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .lock()
            .nodes
            .get(node)
            .and_then(|data| data.properties.get(name).cloned())
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        match self.tree.lock().nodes.get_mut(node) {
            Some(data) => {
                data.attributes.insert(name.to_owned(), value.to_owned());
            }
            None => tracing::warn!(attribute = name, "set_attribute on unknown node"),
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .lock()
            .nodes
            .get(node)
            .and_then(|data| data.attributes.get(name).cloned())
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        self.tree.lock().attach(parent, child, None);
    }

    fn insert_before(&self, parent: NodeId, new_node: NodeId, reference: NodeId) {
        let mut tree = self.tree.lock();
        if tree.is_self_or_ancestor(new_node, parent) {
            tracing::warn!("refusing to insert a node inside its own subtree");
            return;
        }
        // Detach first so the reference index is taken after any self-move.
        tree.detach(new_node);
        let position = tree.children(parent).iter().position(|&c| c == reference);
        if position.is_none() {
            tracing::warn!("insert_before reference is not a child; appending");
        }
        tree.attach(parent, new_node, position);
    }

    fn remove_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.lock();
        if tree.parent.get(child) == Some(&parent) {
            tree.detach(child);
        } else {
            tracing::warn!("remove_child on a node that is not a child");
        }
    }

    fn remove_node(&self, node: NodeId) {
        let freed = self.tree.lock().remove(node);
        tracing::trace!(freed, "removed subtree");
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.lock().parent.get(node).copied()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.lock().children(node).to_vec()
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(data) = self.tree.lock().nodes.get_mut(node) {
            data.add_class(class);
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(data) = self.tree.lock().nodes.get_mut(node) {
            data.remove_class(class);
        }
    }

    fn toggle_class(&self, node: NodeId, class: &str) {
        if let Some(data) = self.tree.lock().nodes.get_mut(node) {
            data.toggle_class(class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .lock()
            .nodes
            .get(node)
            .is_some_and(|data| data.has_class(class))
    }

    fn subscribe(&self, node: NodeId, event: &str, handler: EventHandler) -> ListenerId {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(node) {
            tracing::warn!(event, "subscribe on unknown node");
            return ListenerId::default();
        }
        let id = tree.listeners.insert(node);
        if let Some(data) = tree.nodes.get_mut(node) {
            data.listeners.push(Listener {
                id,
                event: event.to_owned(),
                handler,
            });
        }
        id
    }

    fn unsubscribe(&self, node: NodeId, listener: ListenerId) {
        let mut tree = self.tree.lock();
        tree.listeners.remove(listener);
        if let Some(data) = tree.nodes.get_mut(node) {
            data.listeners.retain(|l| l.id != listener);
        }
    }

    fn document_element(&self) -> NodeId {
        self.html
    }

    fn head(&self) -> NodeId {
        self.head
    }

    fn body(&self) -> NodeId {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Build a small tree under body:
    /// ```text
    ///      body
    ///     /    \
    ///    a      b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Document, NodeId, NodeId, NodeId, NodeId) {
        let doc = Document::new();
        let a = doc.create_node("div");
        let b = doc.create_node("div");
        let c = doc.create_node("span");
        let d = doc.create_node("span");
        doc.append_child(doc.body(), a);
        doc.append_child(doc.body(), b);
        doc.append_child(a, c);
        doc.append_child(a, d);
        (doc, a, b, c, d)
    }

    #[test]
    fn skeleton() {
        let doc = Document::new();
        assert_eq!(doc.children(doc.document_element()), vec![doc.head(), doc.body()]);
        assert_eq!(doc.parent(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.len(), 3);
        assert!(!doc.is_empty());
    }

    #[test]
    fn append_and_parent() {
        let (doc, a, b, c, d) = build_tree();
        assert_eq!(doc.children(doc.body()), vec![a, b]);
        assert_eq!(doc.children(a), vec![c, d]);
        assert_eq!(doc.parent(c), Some(a));
    }

    #[test]
    fn append_moves_existing_child() {
        let (doc, a, b, c, d) = build_tree();
        doc.append_child(b, c);
        assert_eq!(doc.children(a), vec![d]);
        assert_eq!(doc.children(b), vec![c]);
        assert_eq!(doc.parent(c), Some(b));
    }

    #[test]
    fn insert_before_positions_node() {
        let (doc, a, _b, c, d) = build_tree();
        let e = doc.create_node("em");
        doc.insert_before(a, e, d);
        assert_eq!(doc.children(a), vec![c, e, d]);
    }

    #[test]
    fn insert_before_self_move_within_parent() {
        let (doc, a, _b, c, d) = build_tree();
        doc.insert_before(a, d, c);
        assert_eq!(doc.children(a), vec![d, c]);
    }

    #[test]
    fn insert_before_unknown_reference_appends() {
        let (doc, a, b, c, d) = build_tree();
        let e = doc.create_node("em");
        doc.insert_before(a, e, b);
        assert_eq!(doc.children(a), vec![c, d, e]);
    }

    #[test]
    fn remove_child_detaches_but_keeps_node() {
        let (doc, a, _b, c, d) = build_tree();
        doc.remove_child(a, c);
        assert_eq!(doc.children(a), vec![d]);
        assert_eq!(doc.parent(c), None);
        assert!(doc.contains(c));
    }

    #[test]
    fn remove_child_wrong_parent_is_noop() {
        let (doc, a, b, c, _d) = build_tree();
        doc.remove_child(b, c);
        assert_eq!(doc.parent(c), Some(a));
    }

    #[test]
    fn cannot_attach_ancestor_into_descendant() {
        let (doc, a, _b, c, _d) = build_tree();
        doc.append_child(c, a);
        assert_eq!(doc.parent(a), Some(doc.body()));
        assert_eq!(doc.parent(c), Some(a));
    }

    #[test]
    fn inner_html_replaces_children() {
        let (doc, a, _b, c, _d) = build_tree();
        doc.set_property(a, INNER_HTML, "text");
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.parent(c), None);
        assert!(!doc.contains(c));
        assert_eq!(doc.property(a, INNER_HTML).as_deref(), Some("text"));
    }

    #[test]
    fn remove_node_frees_subtree_and_listeners() {
        let (doc, a, b, c, d) = build_tree();
        doc.subscribe(c, "click", Arc::new(|| {}));
        let before = doc.len();
        doc.remove_node(a);
        assert_eq!(doc.len(), before - 3);
        assert!(!doc.contains(c) && !doc.contains(d));
        assert_eq!(doc.children(doc.body()), vec![b]);
        assert_eq!(doc.with_tree(|tree| tree.listeners.len()), 0);
        // Second removal is a no-op.
        doc.remove_node(a);
        assert_eq!(doc.len(), before - 3);
    }

    #[test]
    fn repeated_inner_html_keeps_arena_bounded() {
        let doc = Document::new();
        let list = doc.create_node("ul");
        for round in 0..50 {
            doc.set_property(list, INNER_HTML, "");
            for _ in 0..=round % 5 {
                let item = doc.create_node("li");
                doc.subscribe(item, "click", Arc::new(|| {}));
                doc.append_child(list, item);
            }
        }
        assert!(doc.len() <= 3 + 1 + 5);
        assert!(doc.with_tree(|tree| tree.listeners.len()) <= 5);
    }

    #[test]
    fn subscribe_on_unknown_node_is_inert() {
        let doc = Document::new();
        let node = doc.create_node("p");
        doc.remove_node(node);
        let listener = doc.subscribe(node, "click", Arc::new(|| {}));
        assert_eq!(listener, ListenerId::default());
        assert_eq!(doc.with_tree(|tree| tree.listeners.len()), 0);
        assert_eq!(doc.dispatch(node, "click"), 0);
    }

    #[test]
    fn classes_through_adapter() {
        let (doc, a, ..) = build_tree();
        doc.add_class(a, "hidden");
        assert!(doc.has_class(a, "hidden"));
        doc.toggle_class(a, "hidden");
        assert!(!doc.has_class(a, "hidden"));
        doc.toggle_class(a, "hidden");
        doc.remove_class(a, "hidden");
        assert!(!doc.has_class(a, "hidden"));
    }

    #[test]
    fn dispatch_runs_handlers_in_order() {
        let doc = Document::new();
        let button = doc.create_node("button");
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        doc.subscribe(
            button,
            "click",
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(doc.dispatch(button, "click"), 1);
        assert_eq!(doc.dispatch(button, "input"), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let doc = Document::new();
        let button = doc.create_node("button");
        let listener = doc.subscribe(button, "click", Arc::new(|| {}));
        doc.unsubscribe(button, listener);
        assert_eq!(doc.dispatch(button, "click"), 0);
        // Second unsubscribe is a no-op.
        doc.unsubscribe(button, listener);
    }

    #[test]
    fn handler_may_reenter_document() {
        let doc = Arc::new(Document::new());
        let button = doc.create_node("button");
        let inner = Arc::clone(&doc);
        doc.subscribe(
            button,
            "click",
            Arc::new(move || inner.add_class(button, "clicked")),
        );
        doc.dispatch(button, "click");
        assert!(doc.has_class(button, "clicked"));
    }

    #[test]
    fn to_html_serializes_subtree() {
        let doc = Document::new();
        let div = doc.create_node("div");
        doc.set_attribute(div, "id", "abc");
        doc.add_class(div, "uk-inline");
        let span = doc.create_node("span");
        doc.set_property(span, INNER_HTML, "hi");
        doc.append_child(div, span);
        assert_eq!(
            doc.to_html(div),
            r#"<div class="uk-inline" id="abc"><span>hi</span></div>"#
        );
    }

    #[test]
    fn walk_depth_first() {
        let (doc, a, b, c, d) = build_tree();
        assert_eq!(doc.walk_depth_first(doc.body()), vec![doc.body(), a, c, d, b]);
    }

    #[test]
    fn get_returns_snapshot() {
        let (doc, a, ..) = build_tree();
        doc.set_attribute(a, "id", "x");
        let data = doc.get(a).unwrap();
        assert_eq!(data.tag, "div");
        assert_eq!(data.id(), Some("x"));
    }
}
