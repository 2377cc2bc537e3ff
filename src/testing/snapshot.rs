//! Snapshot rendering helpers.
//!
//! Generated identifiers are random, so [`redact_ids`] swaps them for stable
//! placeholders before a snapshot is compared.

use std::sync::Arc;

use crate::dom::{Document, DomHandle};
use crate::widget::Widget;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// An in-memory document plus the adapter handle widgets render into.
pub struct Headless {
    pub doc: Arc<Document>,
    pub dom: DomHandle,
}

impl Headless {
    /// Serialized `<body>`.
    pub fn body_html(&self) -> String {
        self.doc.to_html(self.dom.body())
    }

    /// Serialized `<head>`.
    pub fn head_html(&self) -> String {
        self.doc.to_html(self.dom.head())
    }
}

/// A fresh headless document.
pub fn headless() -> Headless {
    let doc = Document::shared();
    let dom: DomHandle = doc.clone();
    Headless { doc, dom }
}

/// Render `widget` into a fresh document and serialize its root.
///
/// # Examples
///
/// ```ignore
/// let button = Button::new();
/// button.label("OK");
/// assert_eq!(render_to_html(&button), r#"<button class="uk-button uk-button-default">OK</button>"#);
/// ```
pub fn render_to_html(widget: &dyn Widget) -> String {
    let h = headless();
    let root = widget.render(&h.dom);
    h.doc.to_html(root)
}

/// Replace each identifier in `ids` with `[id0]`, `[id1]`, ... in order.
pub fn redact_ids(text: &str, ids: &[&str]) -> String {
    ids.iter()
        .enumerate()
        .fold(text.to_owned(), |acc, (i, id)| acc.replace(id, &format!("[id{i}]")))
}

// ===========================================================================
// Tests
// ===========================================================================
