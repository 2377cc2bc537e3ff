//! Button widget: a UIkit `button` with a label and an optional click handler.

use std::sync::{Arc, Weak};

use tracing::debug;

use crate::dom::{DomAdapter, DomHandle, EventHandler, ListenerId, NodeId};
use crate::widget::{Content, LiveCell, LiveRef, Widget};

use super::{handler, rebind, CLICK};

const FILL_WIDTH_CLASS: &str = "uk-width-1-1";

// ---------------------------------------------------------------------------
// Style and size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    #[default]
    Default,
    Primary,
    Secondary,
    Danger,
    Text,
    Link,
}

impl ButtonStyle {
    /// The UIkit modifier class.
    pub fn class(self) -> &'static str {
        match self {
            ButtonStyle::Default => "uk-button-default",
            ButtonStyle::Primary => "uk-button-primary",
            ButtonStyle::Secondary => "uk-button-secondary",
            ButtonStyle::Danger => "uk-button-danger",
            ButtonStyle::Text => "uk-button-text",
            ButtonStyle::Link => "uk-button-link",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    /// Medium is UIkit's unmarked size.
    pub fn class(self) -> Option<&'static str> {
        match self {
            ButtonSize::Small => Some("uk-button-small"),
            ButtonSize::Medium => None,
            ButtonSize::Large => Some("uk-button-large"),
        }
    }
}

// ---------------------------------------------------------------------------
// State / live record
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ButtonState {
    label: Content,
    style: ButtonStyle,
    size: ButtonSize,
    fill_width: bool,
    on_click: Option<EventHandler>,
}

struct ButtonLive {
    dom: Weak<dyn DomAdapter>,
    button: NodeId,
    listener: Option<ListenerId>,
}

impl LiveRef for ButtonLive {
    fn root(&self) -> NodeId {
        self.button
    }
}

fn apply_label(s: &ButtonState, live: &mut ButtonLive) {
    if let Some(dom) = live.dom.upgrade() {
        s.label.write_into(&dom, live.button);
    }
}

fn cleanup_style(s: &ButtonState, live: &mut ButtonLive) {
    if let Some(dom) = live.dom.upgrade() {
        dom.remove_class(live.button, s.style.class());
    }
}

fn apply_style(s: &ButtonState, live: &mut ButtonLive) {
    if let Some(dom) = live.dom.upgrade() {
        dom.add_class(live.button, s.style.class());
    }
}

fn cleanup_size(s: &ButtonState, live: &mut ButtonLive) {
    if let (Some(dom), Some(class)) = (live.dom.upgrade(), s.size.class()) {
        dom.remove_class(live.button, class);
    }
}

fn apply_size(s: &ButtonState, live: &mut ButtonLive) {
    if let (Some(dom), Some(class)) = (live.dom.upgrade(), s.size.class()) {
        dom.add_class(live.button, class);
    }
}

fn apply_fill_width(s: &ButtonState, live: &mut ButtonLive) {
    let Some(dom) = live.dom.upgrade() else {
        return;
    };
    if s.fill_width {
        dom.add_class(live.button, FILL_WIDTH_CLASS);
    } else {
        dom.remove_class(live.button, FILL_WIDTH_CLASS);
    }
}

fn apply_on_click(s: &ButtonState, live: &mut ButtonLive) {
    if let Some(dom) = live.dom.upgrade() {
        rebind(&dom, live.button, CLICK, &mut live.listener, s.on_click.as_ref());
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A UIkit button.
///
/// # Examples
///
/// ```ignore
/// let save = Arc::new(Button::new());
/// save.label("Save").style(ButtonStyle::Primary).on_click(|| println!("saved"));
/// ```
#[derive(Default)]
pub struct Button {
    cell: LiveCell<ButtonState, ButtonLive>,
}

impl Button {
    /// Create an unlabelled default button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label: text, a number, or a nested widget.
    pub fn label(&self, label: impl Into<Content>) -> &Self {
        let label = label.into();
        self.cell.update(|s| s.label = label, apply_label);
        self
    }

    /// Swap the style class.
    pub fn style(&self, style: ButtonStyle) -> &Self {
        self.cell.replace(cleanup_style, |s| s.style = style, apply_style);
        self
    }

    /// Swap the size class.
    pub fn size(&self, size: ButtonSize) -> &Self {
        self.cell.replace(cleanup_size, |s| s.size = size, apply_size);
        self
    }

    /// Stretch the button to the full width of its parent.
    pub fn fill_width(&self, fill: bool) -> &Self {
        self.cell.update(|s| s.fill_width = fill, apply_fill_width);
        self
    }

    /// Set the click handler, replacing any previous one.
    pub fn on_click(&self, f: impl Fn() + Send + Sync + 'static) -> &Self {
        let f = handler(f);
        self.cell.update(|s| s.on_click = Some(f), apply_on_click);
        self
    }

    /// Remove the click handler.
    pub fn clear_on_click(&self) -> &Self {
        self.cell.update(|s| s.on_click = None, apply_on_click);
        self
    }

    /// The style last set.
    pub fn current_style(&self) -> ButtonStyle {
        self.cell.read(|s| s.style)
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn render(&self, dom: &DomHandle) -> NodeId {
        debug!("rendering button");
        self.cell.render(
            |_| {
                let button = dom.create_node("button");
                dom.add_class(button, "uk-button");
                ButtonLive {
                    dom: Arc::downgrade(dom),
                    button,
                    listener: None,
                }
            },
            |s, live| {
                apply_label(s, live);
                apply_style(s, live);
                apply_size(s, live);
                apply_fill_width(s, live);
                apply_on_click(s, live);
            },
        )
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::dom::Document;

    fn setup() -> (Arc<Document>, DomHandle) {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        (doc, dom)
    }

    #[test]
    fn render_reflects_pre_render_state() {
        let (doc, dom) = setup();
        let b = Button::new();
        b.label("Go").style(ButtonStyle::Primary).size(ButtonSize::Large);
        let node = b.render(&dom);
        assert_eq!(
            doc.to_html(node),
            "<button class=\"uk-button uk-button-primary uk-button-large\">Go</button>"
        );
    }

    #[test]
    fn style_swap_after_render() {
        let (_, dom) = setup();
        let b = Button::new();
        let node = b.render(&dom);
        assert!(dom.has_class(node, "uk-button-default"));
        b.style(ButtonStyle::Danger);
        assert!(!dom.has_class(node, "uk-button-default"));
        assert!(dom.has_class(node, "uk-button-danger"));
        assert_eq!(b.current_style(), ButtonStyle::Danger);
    }

    #[test]
    fn medium_size_has_no_class() {
        let (_, dom) = setup();
        let b = Button::new();
        b.size(ButtonSize::Small);
        let node = b.render(&dom);
        b.size(ButtonSize::Medium);
        assert!(!dom.has_class(node, "uk-button-small"));
        assert_eq!(ButtonSize::Medium.class(), None);
    }

    #[test]
    fn fill_width_toggles() {
        let (_, dom) = setup();
        let b = Button::new();
        let node = b.render(&dom);
        b.fill_width(true);
        assert!(dom.has_class(node, FILL_WIDTH_CLASS));
        b.fill_width(false);
        assert!(!dom.has_class(node, FILL_WIDTH_CLASS));
    }

    #[test]
    fn click_handler_replaced_not_stacked() {
        let (doc, dom) = setup();
        let hits = Arc::new(AtomicUsize::new(0));
        let b = Button::new();
        let node = b.render(&dom);

        let h = hits.clone();
        b.on_click(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        let h = hits.clone();
        b.on_click(move || {
            h.fetch_add(10, Ordering::SeqCst);
        });
        assert_eq!(doc.dispatch(node, CLICK), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 10);

        b.clear_on_click();
        assert_eq!(doc.dispatch(node, CLICK), 0);
    }

    #[test]
    fn concurrent_style_swaps_leave_one_class() {
        let (_, dom) = setup();
        let b = Arc::new(Button::new());
        let node = b.render(&dom);
        let styles = [
            ButtonStyle::Primary,
            ButtonStyle::Secondary,
            ButtonStyle::Danger,
            ButtonStyle::Link,
        ];

        let handles: Vec<_> = styles
            .into_iter()
            .map(|style| {
                let b = Arc::clone(&b);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        b.style(style).style(ButtonStyle::Default).style(style);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let current = b.current_style();
        let present: Vec<_> = styles
            .iter()
            .chain([&ButtonStyle::Default, &ButtonStyle::Text])
            .filter(|s| dom.has_class(node, s.class()))
            .collect();
        assert_eq!(present, vec![&current]);
    }

    #[test]
    fn label_can_be_a_widget() {
        let (doc, dom) = setup();
        let inner = Arc::new(Button::new());
        inner.label("in");
        let b = Button::new();
        b.label(inner);
        let node = b.render(&dom);
        assert!(doc.to_html(node).contains("<button class=\"uk-button uk-button-default\">in</button>"));
    }
}
