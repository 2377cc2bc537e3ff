//! Textarea widget: a multi-line UIkit input.

use std::sync::{Arc, Weak};

use crate::dom::{DomAdapter, DomHandle, EventHandler, ListenerId, NodeId};
use crate::widget::{LiveCell, LiveRef, Widget};

use super::textbox::FieldState;
use super::{handler, rebind, INPUT};

/// Which edges the user may drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resize {
    Vertical,
    Horizontal,
    Both,
    #[default]
    None,
}

impl Resize {
    /// The CSS `resize` keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Resize::Vertical => "vertical",
            Resize::Horizontal => "horizontal",
            Resize::Both => "both",
            Resize::None => "none",
        }
    }
}

#[derive(Default)]
struct TextareaState {
    state: FieldState,
    resize: Resize,
    hidden: bool,
    on_input: Option<EventHandler>,
}

struct TextareaLive {
    dom: Weak<dyn DomAdapter>,
    textarea: NodeId,
    listener: Option<ListenerId>,
}

impl LiveRef for TextareaLive {
    fn root(&self) -> NodeId {
        self.textarea
    }
}

fn cleanup_state(s: &TextareaState, live: &mut TextareaLive) {
    if let Some(dom) = live.dom.upgrade() {
        s.state.cleanup(&dom, live.textarea);
    }
}

fn apply_state(s: &TextareaState, live: &mut TextareaLive) {
    if let Some(dom) = live.dom.upgrade() {
        s.state.apply(&dom, live.textarea);
    }
}

fn apply_resize(s: &TextareaState, live: &mut TextareaLive) {
    if let Some(dom) = live.dom.upgrade() {
        let style = format!("resize:{};", s.resize.keyword());
        dom.set_attribute(live.textarea, "style", &style);
    }
}

fn apply_hidden(s: &TextareaState, live: &mut TextareaLive) {
    if let Some(dom) = live.dom.upgrade() {
        let kind = if s.hidden { "password" } else { "text" };
        dom.set_property(live.textarea, "type", kind);
    }
}

fn apply_on_input(s: &TextareaState, live: &mut TextareaLive) {
    if let Some(dom) = live.dom.upgrade() {
        rebind(&dom, live.textarea, INPUT, &mut live.listener, s.on_input.as_ref());
    }
}

/// A multi-line UIkit input. Not resizable unless asked.
#[derive(Default)]
pub struct Textarea {
    cell: LiveCell<TextareaState, TextareaLive>,
}

impl Textarea {
    /// Create an empty, non-resizable textarea.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the validation state.
    pub fn state(&self, state: FieldState) -> &Self {
        self.cell.replace(cleanup_state, |s| s.state = state, apply_state);
        self
    }

    /// Set which edges can be dragged.
    pub fn resize(&self, resize: Resize) -> &Self {
        self.cell.update(|s| s.resize = resize, apply_resize);
        self
    }

    /// Sets the node's `type` property to `password` or `text`.
    pub fn hidden(&self, hidden: bool) -> &Self {
        self.cell.update(|s| s.hidden = hidden, apply_hidden);
        self
    }

    /// Set the input handler, replacing any previous one.
    pub fn on_input(&self, f: impl Fn() + Send + Sync + 'static) -> &Self {
        let f = handler(f);
        self.cell.update(|s| s.on_input = Some(f), apply_on_input);
        self
    }

    /// Remove the input handler.
    pub fn clear_on_input(&self) -> &Self {
        self.cell.update(|s| s.on_input = None, apply_on_input);
        self
    }

    /// Current text; empty before render.
    pub fn value(&self) -> String {
        self.cell
            .apply_if_live(|_, live| {
                live.dom
                    .upgrade()
                    .and_then(|dom| dom.property(live.textarea, "value"))
            })
            .flatten()
            .unwrap_or_default()
    }
}

impl Widget for Textarea {
    fn widget_type(&self) -> &str {
        "Textarea"
    }

    fn render(&self, dom: &DomHandle) -> NodeId {
        self.cell.render(
            |_| {
                let textarea = dom.create_node("textarea");
                dom.add_class(textarea, "uk-textarea");
                TextareaLive {
                    dom: Arc::downgrade(dom),
                    textarea,
                    listener: None,
                }
            },
            |s, live| {
                apply_state(s, live);
                apply_hidden(s, live);
                apply_resize(s, live);
                apply_on_input(s, live);
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn default_render() {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        let t = Textarea::new();
        let node = t.render(&dom);
        assert_eq!(
            doc.to_html(node),
            "<textarea class=\"uk-textarea\" style=\"resize:none;\"></textarea>"
        );
    }

    #[test]
    fn live_updates() {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        let t = Textarea::new();
        let node = t.render(&dom);

        t.resize(Resize::Both).state(FieldState::Success);
        assert_eq!(dom.attribute(node, "style").as_deref(), Some("resize:both;"));
        assert!(dom.has_class(node, "uk-form-success"));

        t.state(FieldState::Regular);
        assert!(!dom.has_class(node, "uk-form-success"));

        dom.set_property(node, "value", "notes");
        assert_eq!(t.value(), "notes");
    }

    #[test]
    fn input_handler_bound_at_render() {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        let t = Textarea::new();
        t.on_input(|| {});
        let node = t.render(&dom);
        assert_eq!(doc.dispatch(node, INPUT), 1);
        t.clear_on_input();
        assert_eq!(doc.dispatch(node, INPUT), 0);
    }
}
