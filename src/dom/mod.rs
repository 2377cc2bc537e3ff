//! Host document seam: the adapter trait plus an in-memory slotmap document.

pub mod adapter;
pub mod node;
pub mod query;
pub mod tree;

pub use adapter::{DomAdapter, DomHandle, INNER_HTML};
pub use node::{EventHandler, ListenerId, NodeData, NodeId};
pub use tree::Document;
