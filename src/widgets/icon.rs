//! Icon widget: a UIkit icon `span`, optionally clickable.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::dom::{DomAdapter, DomHandle, EventHandler, ListenerId, NodeId};
use crate::widget::{LiveCell, LiveRef, Widget};

use super::{handler, rebind, CLICK};

const ICON_BUTTON_CLASS: &str = "uk-icon-button";

/// A UIkit icon name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconType {
    #[default]
    None,
    User,
    Lock,
    /// Any other UIkit icon name.
    Custom(String),
}

impl IconType {
    /// The UIkit icon name, empty for `None`.
    pub fn name(&self) -> &str {
        match self {
            IconType::None => "",
            IconType::User => "user",
            IconType::Lock => "lock",
            IconType::Custom(name) => name,
        }
    }

    /// Whether no icon is selected.
    pub fn is_none(&self) -> bool {
        self.name().is_empty()
    }

    /// Value of the `uk-icon` attribute.
    pub fn attribute(&self) -> String {
        format!("icon: {}", self.name())
    }
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Default)]
struct IconState {
    icon: IconType,
    on_click: Option<EventHandler>,
}

struct IconLive {
    dom: Weak<dyn DomAdapter>,
    span: NodeId,
    listener: Option<ListenerId>,
}

impl LiveRef for IconLive {
    fn root(&self) -> NodeId {
        self.span
    }
}

fn apply_type(s: &IconState, live: &mut IconLive) {
    if let Some(dom) = live.dom.upgrade() {
        dom.set_attribute(live.span, "uk-icon", &s.icon.attribute());
    }
}

fn apply_on_click(s: &IconState, live: &mut IconLive) {
    let Some(dom) = live.dom.upgrade() else {
        return;
    };
    rebind(&dom, live.span, CLICK, &mut live.listener, s.on_click.as_ref());
    if s.on_click.is_some() {
        dom.add_class(live.span, ICON_BUTTON_CLASS);
    } else {
        dom.remove_class(live.span, ICON_BUTTON_CLASS);
    }
}

/// A UIkit icon. Gains the icon-button look while it has a click handler.
#[derive(Default)]
pub struct Icon {
    cell: LiveCell<IconState, IconLive>,
}

impl Icon {
    /// Create an icon of the given type.
    pub fn new(icon: IconType) -> Self {
        Self {
            cell: LiveCell::new(IconState {
                icon,
                on_click: None,
            }),
        }
    }

    /// Change the icon.
    pub fn icon_type(&self, icon: IconType) -> &Self {
        self.cell.update(|s| s.icon = icon, apply_type);
        self
    }

    /// Set the click handler and show the icon as a button.
    pub fn on_click(&self, f: impl Fn() + Send + Sync + 'static) -> &Self {
        let f = handler(f);
        self.cell.update(|s| s.on_click = Some(f), apply_on_click);
        self
    }

    /// Remove the click handler and the button look.
    pub fn clear_on_click(&self) -> &Self {
        self.cell.update(|s| s.on_click = None, apply_on_click);
        self
    }
}

impl Widget for Icon {
    fn widget_type(&self) -> &str {
        "Icon"
    }

    fn render(&self, dom: &DomHandle) -> NodeId {
        self.cell.render(
            |_| IconLive {
                dom: Arc::downgrade(dom),
                span: dom.create_node("span"),
                listener: None,
            },
            |s, live| {
                apply_type(s, live);
                apply_on_click(s, live);
            },
        )
    }
}
