//! Textbox widget: a UIkit text input with an optional leading icon.
//!
//! The icon is drawn by wrapping the input:
//!
//! ```text
//! div.uk-inline (style="width:100%;")
//! ├── span.uk-form-icon (uk-icon="icon: user")
//! └── input.uk-input
//! ```
//!
//! Setting or clearing the icon after render moves the existing input node
//! in or out of a wrapper at the same position in its parent. The input
//! node itself is never recreated.

use std::sync::{Arc, Weak};

use tracing::trace;

use crate::dom::{DomAdapter, DomHandle, EventHandler, ListenerId, NodeId};
use crate::widget::{LiveCell, LiveRef, Widget};

use super::icon::IconType;
use super::{handler, rebind, INPUT};

/// Validation state shared by the form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Regular,
    Danger,
    Success,
    Disabled,
}

impl FieldState {
    /// The UIkit class for this state. `Disabled` uses a property instead.
    pub fn class(self) -> Option<&'static str> {
        match self {
            FieldState::Danger => Some("uk-form-danger"),
            FieldState::Success => Some("uk-form-success"),
            FieldState::Regular | FieldState::Disabled => None,
        }
    }

    pub(crate) fn cleanup(self, dom: &DomHandle, node: NodeId) {
        match self {
            FieldState::Disabled => dom.set_property(node, "disabled", "false"),
            other => {
                if let Some(class) = other.class() {
                    dom.remove_class(node, class);
                }
            }
        }
    }

    pub(crate) fn apply(self, dom: &DomHandle, node: NodeId) {
        match self {
            FieldState::Disabled => dom.set_property(node, "disabled", "true"),
            other => {
                if let Some(class) = other.class() {
                    dom.add_class(node, class);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// State / live record
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TextboxState {
    state: FieldState,
    hidden: bool,
    icon: IconType,
    on_input: Option<EventHandler>,
}

struct TextboxLive {
    dom: Weak<dyn DomAdapter>,
    input: NodeId,
    wrapper: Option<NodeId>,
    listener: Option<ListenerId>,
}

impl LiveRef for TextboxLive {
    fn root(&self) -> NodeId {
        self.wrapper.unwrap_or(self.input)
    }
}

fn cleanup_state(s: &TextboxState, live: &mut TextboxLive) {
    if let Some(dom) = live.dom.upgrade() {
        s.state.cleanup(&dom, live.input);
    }
}

fn apply_state(s: &TextboxState, live: &mut TextboxLive) {
    if let Some(dom) = live.dom.upgrade() {
        s.state.apply(&dom, live.input);
    }
}

fn apply_hidden(s: &TextboxState, live: &mut TextboxLive) {
    if let Some(dom) = live.dom.upgrade() {
        let kind = if s.hidden { "password" } else { "text" };
        dom.set_property(live.input, "type", kind);
    }
}

/// Move the input back to the wrapper's place and drop the wrapper.
fn unwrap_icon(_: &TextboxState, live: &mut TextboxLive) {
    let Some(wrapper) = live.wrapper.take() else {
        return;
    };
    let Some(dom) = live.dom.upgrade() else {
        return;
    };
    match dom.parent(wrapper) {
        Some(parent) => dom.insert_before(parent, live.input, wrapper),
        None => dom.remove_child(wrapper, live.input),
    }
    dom.remove_node(wrapper);
    trace!("textbox icon unwrapped");
}

/// Put a wrapper where the input is and move the input into it.
fn wrap_icon(s: &TextboxState, live: &mut TextboxLive) {
    if s.icon.is_none() {
        return;
    }
    let Some(dom) = live.dom.upgrade() else {
        return;
    };
    let icon = dom.create_node("span");
    dom.add_class(icon, "uk-form-icon");
    dom.set_attribute(icon, "uk-icon", &s.icon.attribute());

    let wrapper = dom.create_node("div");
    dom.add_class(wrapper, "uk-inline");
    // A wrapped input no longer fills the line by itself.
    dom.set_attribute(wrapper, "style", "width:100%;");
    dom.append_child(wrapper, icon);

    if let Some(parent) = dom.parent(live.input) {
        dom.insert_before(parent, wrapper, live.input);
    }
    dom.append_child(wrapper, live.input);
    live.wrapper = Some(wrapper);
    trace!(icon = %s.icon, "textbox icon wrapped");
}

fn apply_on_input(s: &TextboxState, live: &mut TextboxLive) {
    if let Some(dom) = live.dom.upgrade() {
        rebind(&dom, live.input, INPUT, &mut live.listener, s.on_input.as_ref());
    }
}

// ---------------------------------------------------------------------------
// Textbox
// ---------------------------------------------------------------------------

/// A single-line UIkit input.
///
/// # Examples
///
/// ```ignore
/// let user = Arc::new(Textbox::new());
/// user.icon(IconType::User).state(FieldState::Success);
/// ```
#[derive(Default)]
pub struct Textbox {
    cell: LiveCell<TextboxState, TextboxLive>,
}

impl Textbox {
    /// Create an empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the validation state.
    pub fn state(&self, state: FieldState) -> &Self {
        self.cell.replace(cleanup_state, |s| s.state = state, apply_state);
        self
    }

    /// Mask the input as a password field.
    pub fn hidden(&self, hidden: bool) -> &Self {
        self.cell.update(|s| s.hidden = hidden, apply_hidden);
        self
    }

    /// Set the leading icon; [`IconType::None`] removes it.
    ///
    /// Any existing wrapper is removed first, so repeating a call never
    /// stacks wrappers.
    pub fn icon(&self, icon: IconType) -> &Self {
        self.cell.replace(unwrap_icon, |s| s.icon = icon, wrap_icon);
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

    /// Current text of the live input; empty before render.
    pub fn value(&self) -> String {
        self.cell
            .apply_if_live(|_, live| {
                live.dom
                    .upgrade()
                    .and_then(|dom| dom.property(live.input, "value"))
            })
            .flatten()
            .unwrap_or_default()
    }

    /// The live input node, if rendered.
    pub fn input_node(&self) -> Option<NodeId> {
        self.cell.read_live(|live| live.input)
    }

    /// The live icon wrapper, if rendered with an icon.
    pub fn wrapper_node(&self) -> Option<NodeId> {
        self.cell.read_live(|live| live.wrapper).flatten()
    }
}

impl Widget for Textbox {
    fn widget_type(&self) -> &str {
        "Textbox"
    }

    fn render(&self, dom: &DomHandle) -> NodeId {
        self.cell.render(
            |_| {
                let input = dom.create_node("input");
                dom.set_property(input, "type", "text");
                dom.add_class(input, "uk-input");
                TextboxLive {
                    dom: Arc::downgrade(dom),
                    input,
                    wrapper: None,
                    listener: None,
                }
            },
            |s, live| {
                apply_state(s, live);
                apply_hidden(s, live);
                wrap_icon(s, live);
                apply_on_input(s, live);
            },
        )
    }
}

// ===========================================================================
// Tests
// ===========================================================================
