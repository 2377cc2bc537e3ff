//! The host document seam.
//!
//! Every widget talks to the host exclusively through [`DomAdapter`]. A browser
//! binding maps [`NodeId`]s onto real elements; [`Document`](super::Document)
//! is the in-memory implementation used headlessly and in tests.

use std::sync::Arc;

use super::node::{EventHandler, ListenerId, NodeId};

/// Property that replaces a node's children with the given text.
pub const INNER_HTML: &str = "innerHTML";

/// Operations the toolkit needs from a host document.
///
/// All methods take `&self`: implementations synchronize internally, so a
/// single handle can be shared by every widget that rendered into it.
/// Operations on unknown nodes are no-ops.
pub trait DomAdapter: Send + Sync {
    /// Create a detached element.
    fn create_node(&self, tag: &str) -> NodeId;

    /// Set an object property. Setting [`INNER_HTML`] destroys existing children.
    fn set_property(&self, node: NodeId, name: &str, value: &str);

    /// Read back an object property.
    fn property(&self, node: NodeId, name: &str) -> Option<String>;

    /// Set a markup attribute.
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    /// Read back a markup attribute.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Append `child` as the last child of `parent`, detaching it first.
    fn append_child(&self, parent: NodeId, child: NodeId);

    /// Insert `new_node` into `parent` directly before `reference`.
    fn insert_before(&self, parent: NodeId, new_node: NodeId, reference: NodeId);

    /// Detach `child` from `parent`. The node stays valid and can be reinserted.
    fn remove_child(&self, parent: NodeId, child: NodeId);

    /// Destroy `node` and its subtree, detaching it first. Ids of destroyed
    /// nodes become unknown; hosts with their own garbage collection may
    /// only detach.
    fn remove_node(&self, node: NodeId);

    /// The node's parent, if attached.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// The node's children, in order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn add_class(&self, node: NodeId, class: &str);
    fn remove_class(&self, node: NodeId, class: &str);
    fn toggle_class(&self, node: NodeId, class: &str);
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Subscribe `handler` to `event` on `node`.
    fn subscribe(&self, node: NodeId, event: &str, handler: EventHandler) -> ListenerId;

    /// Drop a subscription. No-op if it is already gone.
    fn unsubscribe(&self, node: NodeId, listener: ListenerId);

    /// The `<html>` element.
    fn document_element(&self) -> NodeId;

    /// The `<head>` element.
    fn head(&self) -> NodeId;

    /// The `<body>` element.
    fn body(&self) -> NodeId;
}

/// Shared handle to a host document.
pub type DomHandle = Arc<dyn DomAdapter>;
