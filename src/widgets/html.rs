//! Html widget: a `div` holding caller-supplied markup.

use std::sync::{Arc, Weak};

use crate::dom::{DomAdapter, DomHandle, NodeId, INNER_HTML};
use crate::widget::{LiveCell, LiveRef, Widget};

struct HtmlLive {
    dom: Weak<dyn DomAdapter>,
    div: NodeId,
}

impl LiveRef for HtmlLive {
    fn root(&self) -> NodeId {
        self.div
    }
}

fn apply_markup(markup: &str, live: &mut HtmlLive) {
    if let Some(dom) = live.dom.upgrade() {
        dom.set_property(live.div, INNER_HTML, markup);
    }
}

/// Raw markup. Not escaped.
#[derive(Default)]
pub struct Html {
    cell: LiveCell<String, HtmlLive>,
}

impl Html {
    /// Wrap `markup` in a `div`.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            cell: LiveCell::new(markup.into()),
        }
    }

    /// Replace the markup.
    pub fn set(&self, markup: impl Into<String>) -> &Self {
        let markup = markup.into();
        self.cell.update(|m| *m = markup, |m, live| apply_markup(m, live));
        self
    }

    /// The current markup.
    pub fn markup(&self) -> String {
        self.cell.read(String::clone)
    }
}

impl Widget for Html {
    fn widget_type(&self) -> &str {
        "Html"
    }

    fn render(&self, dom: &DomHandle) -> NodeId {
        self.cell.render(
            |_| HtmlLive {
                dom: Arc::downgrade(dom),
                div: dom.create_node("div"),
            },
            |m, live| apply_markup(m, live),
        )
    }
}
