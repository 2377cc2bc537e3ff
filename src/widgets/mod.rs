//! Built-in widgets (UIkit class vocabulary).
//!
//! - [`Button`]: labelled button with style, size, click handler
//! - [`Icon`]: UIkit icon, clickable
//! - [`Textbox`]: single-line input, optional leading icon
//! - [`Textarea`]: multi-line input
//! - [`Table`]: caption, header, rows, footer, column sort
//! - [`Html`]: raw markup
//! - [`Form`]: labelled fields
//!
//! Every widget wraps one [`LiveCell`](crate::widget::LiveCell). Setters take
//! `&self` and return `&Self`, so a widget shared through `Arc` can be chained
//! before and after it is rendered.

pub mod button;
pub mod form;
pub mod html;
pub mod icon;
pub mod table;
pub mod textarea;
pub mod textbox;

pub use button::{Button, ButtonSize, ButtonStyle};
pub use form::Form;
pub use html::Html;
pub use icon::{Icon, IconType};
pub use table::{SortOrder, Table, TableStyle};
pub use textarea::{Resize, Textarea};
pub use textbox::{FieldState, Textbox};

use std::sync::Arc;

use crate::dom::{DomHandle, EventHandler, ListenerId, NodeId};

pub(crate) const CLICK: &str = "click";
pub(crate) const INPUT: &str = "input";

/// Wrap a closure as a shareable handler.
pub(crate) fn handler(f: impl Fn() + Send + Sync + 'static) -> EventHandler {
    Arc::new(f)
}

/// Swap the subscription held in `listener` for `handler`.
pub(crate) fn rebind(
    dom: &DomHandle,
    node: NodeId,
    event: &str,
    listener: &mut Option<ListenerId>,
    handler: Option<&EventHandler>,
) {
    if let Some(old) = listener.take() {
        dom.unsubscribe(node, old);
    }
    if let Some(handler) = handler {
        *listener = Some(dom.subscribe(node, event, Arc::clone(handler)));
    }
}
