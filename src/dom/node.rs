//! Node types: NodeId, ListenerId, NodeData.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a document node. Copy, lightweight (u64).
    pub struct NodeId;

    /// Handle returned by an event subscription, used to unsubscribe.
    pub struct ListenerId;
}

/// Callback invoked when a subscribed event fires on a node.
pub type EventHandler = Arc<dyn Fn() + Send + Sync>;

/// One event subscription on a node.
#[derive(Clone)]
pub struct Listener {
    pub id: ListenerId,
    pub event: String,
    pub handler: EventHandler,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// Data associated with a single document node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Element tag name (e.g. "div", "input").
    pub tag: String,
    /// Class list, in insertion order.
    pub classes: Vec<String>,
    /// Markup attributes (`setAttribute`).
    pub attributes: BTreeMap<String, String>,
    /// Object properties (`node[name] = value`).
    pub properties: BTreeMap<String, String>,
    /// Event subscriptions, in subscription order.
    pub listeners: Vec<Listener>,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and nothing else set.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// The `id` attribute, if set.
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    /// Handlers subscribed to `event`, in subscription order.
    pub fn handlers(&self, event: &str) -> Vec<EventHandler> {
        self.listeners
            .iter()
            .filter(|l| l.event == event)
            .map(|l| Arc::clone(&l.handler))
            .collect()
    }
}
