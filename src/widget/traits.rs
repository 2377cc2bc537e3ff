//! Widget trait: the single "renders to a live node" capability.
//!
//! Every widget (and every layout Container) implements [`Widget`]. Widgets
//! are shared through `Arc` so application code keeps a handle for mutations
//! after the tree that embeds them has been rendered.

use crate::dom::{DomHandle, NodeId};

/// Core trait implemented by all widgets.
///
/// `render` builds a fresh concrete node tree on every call and returns its
/// root. Each call replaces the widget's live reference; the node produced by
/// an earlier call is left where it is and is no longer updated. Detaching it
/// is the caller's job.
pub trait Widget: Send + Sync {
    /// Type name, used in logs and snapshots (e.g. "Button").
    fn widget_type(&self) -> &str;

    /// Build the concrete nodes in `dom` and return the root.
    fn render(&self, dom: &DomHandle) -> NodeId;
}
