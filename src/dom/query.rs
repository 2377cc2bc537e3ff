//! Document queries: by id, class, tag; generic predicate matching.
//!
//! Queries walk the attached tree from `<html>` in document order, so nodes
//! that were detached (an unwrapped icon wrapper, a cleared table row) are
//! never returned.

use super::node::{NodeData, NodeId};
use super::tree::Document;

impl Document {
    /// Find the first attached node whose `id` attribute matches.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_all(|data| data.id() == Some(id)).into_iter().next()
    }

    /// Find all attached nodes that have the given class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all attached nodes with the given tag name.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|data| data.tag == tag)
    }

    /// Find all attached nodes matching an arbitrary predicate, in document order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        let html = crate::dom::DomAdapter::document_element(self);
        self.with_tree(|tree| {
            tree.walk_depth_first_from(html)
                .into_iter()
                .filter(|&id| tree.nodes.get(id).is_some_and(&predicate))
                .collect()
        })
    }
}
