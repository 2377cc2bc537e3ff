//! Flex Item: one child slot of a Container.
//!
//! An Item carries its own responsive attribute set, the payload it wraps,
//! two expand flags, and a visibility flag that stays live after render.

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use tracing::trace;

use crate::dom::{DomAdapter, DomHandle, NodeId};
use crate::error::Result;
use crate::widget::{Content, LiveCell, LiveRef};

use super::attributes::{Breakpoint, FlexAlignment, ItemAttributes, Responsive};
use super::id::{IdAllocator, Identifier};
use super::serialize::{rule_set, BreakpointDefaults};

/// Class that hides an Item's wrapper.
pub const HIDDEN_CLASS: &str = "hidden";
/// Class added to the payload root by [`Item::expand_width`].
pub const EXPAND_WIDTH_CLASS: &str = "expand-width";
/// Class added to the payload root by [`Item::expand_height`].
pub const EXPAND_HEIGHT_CLASS: &str = "expand-height";

// ---------------------------------------------------------------------------
// Live wrapper
// ---------------------------------------------------------------------------

/// The rendered wrapper `div` of an Item.
///
/// Holds the document weakly: once the host document is gone, visibility
/// changes stop reaching it.
struct ItemLive {
    dom: Weak<dyn DomAdapter>,
    wrapper: NodeId,
}

impl LiveRef for ItemLive {
    fn root(&self) -> NodeId {
        self.wrapper
    }
}

fn apply_hidden(hidden: &bool, live: &mut ItemLive) {
    let Some(dom) = live.dom.upgrade() else {
        return;
    };
    trace!(hidden, "item visibility");
    if *hidden {
        dom.add_class(live.wrapper, HIDDEN_CLASS);
    } else {
        dom.remove_class(live.wrapper, HIDDEN_CLASS);
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A flex child wrapping one payload.
///
/// Layout setters consume and return the Item, so they are used while
/// building. Visibility methods take `&self` and work before and after the
/// owning Container renders.
///
/// # Examples
///
/// ```ignore
/// let ids = IdAllocator::new();
/// let item = Item::new(&ids, "hello").grow(1).basis_at("50%", &[Breakpoint::Medium]);
/// ```
pub struct Item {
    id: Identifier,
    owner: OnceLock<String>,
    attributes: Responsive<ItemAttributes>,
    expand_width: bool,
    expand_height: bool,
    content: Content,
    visibility: LiveCell<bool, ItemLive>,
}

impl Item {
    /// Create an Item around `content`.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot produce a fresh identifier.
    pub fn new(ids: &Arc<IdAllocator>, content: impl Into<Content>) -> Self {
        match Self::try_new(ids, content) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create an Item, reporting identifier exhaustion instead of panicking.
    pub fn try_new(ids: &Arc<IdAllocator>, content: impl Into<Content>) -> Result<Self> {
        Ok(Self {
            id: ids.allocate()?,
            owner: OnceLock::new(),
            attributes: Responsive::new(),
            expand_width: false,
            expand_height: false,
            content: content.into(),
            visibility: LiveCell::new(false),
        })
    }

    /// Selector identifier of the wrapper `div`.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Identifier of the Container this Item was appended to.
    pub fn owner(&self) -> Option<&str> {
        self.owner.get().map(String::as_str)
    }

    /// Record the owning Container. Only the first call sticks.
    pub(crate) fn adopt(&self, container: &str) -> bool {
        self.owner.set(container.to_owned()).is_ok()
    }

    /// The wrapped payload.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Base and per-breakpoint attributes.
    pub fn attributes(&self) -> &Responsive<ItemAttributes> {
        &self.attributes
    }

    // -- layout setters ----------------------------------------------------

    /// Set `background-color` in the base rule.
    pub fn background(self, value: impl Into<String>) -> Self {
        self.background_at(value, &[])
    }

    /// Set `background-color` at the given breakpoints.
    pub fn background_at(mut self, value: impl Into<String>, at: &[Breakpoint]) -> Self {
        let value = value.into();
        self.attributes.set(at, |a| a.background = value.clone());
        self
    }

    /// Set `border` in the base rule.
    pub fn border(self, value: impl Into<String>) -> Self {
        self.border_at(value, &[])
    }

    /// Set `border` at the given breakpoints.
    pub fn border_at(mut self, value: impl Into<String>, at: &[Breakpoint]) -> Self {
        let value = value.into();
        self.attributes.set(at, |a| a.border = value.clone());
        self
    }

    /// Set `padding` in the base rule.
    pub fn padding(self, value: impl Into<String>) -> Self {
        self.padding_at(value, &[])
    }

    /// Set `padding` at the given breakpoints.
    pub fn padding_at(mut self, value: impl Into<String>, at: &[Breakpoint]) -> Self {
        let value = value.into();
        self.attributes.set(at, |a| a.padding = value.clone());
        self
    }

    /// Set `margin` in the base rule.
    pub fn margin(self, value: impl Into<String>) -> Self {
        self.margin_at(value, &[])
    }

    /// Set `margin` at the given breakpoints.
    pub fn margin_at(mut self, value: impl Into<String>, at: &[Breakpoint]) -> Self {
        let value = value.into();
        self.attributes.set(at, |a| a.margin = value.clone());
        self
    }

    /// Flex order. Zero means unset.
    pub fn order(self, value: i32) -> Self {
        self.order_at(value, &[])
    }

    /// Set `order` at the given breakpoints.
    pub fn order_at(mut self, value: i32, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.order = value);
        self
    }

    /// Set `flex-grow`. Zero is omitted.
    pub fn grow(self, value: u32) -> Self {
        self.grow_at(value, &[])
    }

    /// Set `flex-grow` at the given breakpoints.
    pub fn grow_at(mut self, value: u32, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.grow = value);
        self
    }

    /// Set `flex-shrink`. Zero is omitted.
    pub fn shrink(self, value: u32) -> Self {
        self.shrink_at(value, &[])
    }

    /// Set `flex-shrink` at the given breakpoints.
    pub fn shrink_at(mut self, value: u32, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.shrink = value);
        self
    }

    /// Set `flex-basis`. `auto` is omitted.
    pub fn basis(self, value: impl Into<String>) -> Self {
        self.basis_at(value, &[])
    }

    /// Set `flex-basis` at the given breakpoints.
    pub fn basis_at(mut self, value: impl Into<String>, at: &[Breakpoint]) -> Self {
        let value = value.into();
        self.attributes.set(at, |a| a.basis = value.clone());
        self
    }

    /// Set `align-self`. `Auto` is omitted.
    pub fn align_self(self, value: FlexAlignment) -> Self {
        self.align_self_at(value, &[])
    }

    /// Set `align-self` at the given breakpoints.
    pub fn align_self_at(mut self, value: FlexAlignment, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.align_self = value);
        self
    }

    /// Stretch the payload over both axes of the wrapper.
    pub fn expand(self) -> Self {
        self.expand_width().expand_height()
    }

    /// Stretch the payload to the wrapper's width.
    pub fn expand_width(mut self) -> Self {
        self.expand_width = true;
        self
    }

    /// Stretch the payload to the wrapper's height.
    pub fn expand_height(mut self) -> Self {
        self.expand_height = true;
        self
    }

    // -- visibility --------------------------------------------------------

    /// Hide the Item. Applied to the live wrapper if already rendered.
    pub fn hide(&self) -> &Self {
        self.visibility.update(|h| *h = true, apply_hidden);
        self
    }

    /// Show the Item. Applied to the live wrapper if already rendered.
    pub fn show(&self) -> &Self {
        self.visibility.update(|h| *h = false, apply_hidden);
        self
    }

    /// Flip visibility.
    pub fn toggle(&self) -> &Self {
        self.visibility.update(|h| *h = !*h, apply_hidden);
        self
    }

    /// Whether the Item is currently hidden.
    pub fn is_hidden(&self) -> bool {
        self.visibility.read(|h| *h)
    }

    /// This Item's rule set: base rule plus breakpoint at-rules.
    pub fn css(&self) -> String {
        rule_set(self.id(), "", &self.attributes, BreakpointDefaults::Omit)
    }

    /// Render the payload inside a fresh wrapper and record the wrapper.
    pub(crate) fn mount(&self, dom: &DomHandle) -> NodeId {
        let payload = self.content.render(dom);
        if self.expand_width {
            dom.add_class(payload, EXPAND_WIDTH_CLASS);
        }
        if self.expand_height {
            dom.add_class(payload, EXPAND_HEIGHT_CLASS);
        }

        self.visibility.render(
            |_| {
                let wrapper = dom.create_node("div");
                dom.set_attribute(wrapper, "id", self.id());
                dom.append_child(wrapper, payload);
                ItemLive {
                    dom: Arc::downgrade(dom),
                    wrapper,
                }
            },
            apply_hidden,
        )
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id())
            .field("owner", &self.owner())
            .field("content", &self.content)
            .field("hidden", &self.is_hidden())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use pretty_assertions::assert_eq;

    fn setup() -> (Arc<IdAllocator>, Arc<Document>, DomHandle) {
        let doc = Document::shared();
        let dom: DomHandle = doc.clone();
        (IdAllocator::new(), doc, dom)
    }

    #[test]
    fn default_item_css_has_empty_body() {
        let (ids, _, _) = setup();
        let item = Item::new(&ids, "x");
        assert_eq!(item.css(), format!("#{} {{}}\n", item.id()));
    }

    #[test]
    fn grow_and_breakpoint_basis() {
        let (ids, _, _) = setup();
        let item = Item::new(&ids, "x")
            .grow(1)
            .basis_at("100%", &[Breakpoint::Small]);
        let id = item.id().to_owned();
        assert_eq!(
            item.css(),
            format!(
                "#{id} {{flex-grow:1;}}\n\
                 @media all and (min-width: 600px) {{ #{id} {{flex-basis:100%;}}}}\n"
            )
        );
    }

    #[test]
    fn order_and_align_self() {
        let (ids, _, _) = setup();
        let item = Item::new(&ids, "x").order(3).align_self(FlexAlignment::Center);
        assert!(item.css().contains("{order:3;align-self:center;}"));
    }

    #[test]
    fn hide_before_render_is_honoured_at_mount() {
        let (ids, doc, dom) = setup();
        let item = Item::new(&ids, "x");
        item.hide();
        assert!(item.is_hidden());
        let wrapper = item.mount(&dom);
        assert!(dom.has_class(wrapper, HIDDEN_CLASS));
        assert_eq!(
            doc.to_html(wrapper),
            format!("<div class=\"hidden\" id=\"{}\"><div>x</div></div>", item.id())
        );
    }

    #[test]
    fn visibility_after_render() {
        let (ids, _, dom) = setup();
        let item = Item::new(&ids, "x");
        let wrapper = item.mount(&dom);
        assert!(!dom.has_class(wrapper, HIDDEN_CLASS));

        item.hide();
        assert!(dom.has_class(wrapper, HIDDEN_CLASS));
        item.show();
        assert!(!dom.has_class(wrapper, HIDDEN_CLASS));
        item.toggle().toggle();
        assert!(!dom.has_class(wrapper, HIDDEN_CLASS));
        item.toggle();
        assert!(dom.has_class(wrapper, HIDDEN_CLASS));
    }

    #[test]
    fn concurrent_toggles_keep_flag_and_class_in_step() {
        let (ids, _, dom) = setup();
        let item = Arc::new(Item::new(&ids, "x"));
        let wrapper = item.mount(&dom);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let item = Arc::clone(&item);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        item.toggle();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(!item.is_hidden());
        assert_eq!(dom.has_class(wrapper, HIDDEN_CLASS), item.is_hidden());
        item.toggle();
        assert_eq!(dom.has_class(wrapper, HIDDEN_CLASS), item.is_hidden());
    }

    #[test]
    fn expand_classes_on_payload() {
        let (ids, _, dom) = setup();
        let item = Item::new(&ids, "x").expand();
        let wrapper = item.mount(&dom);
        let payload = dom.children(wrapper)[0];
        assert!(dom.has_class(payload, EXPAND_WIDTH_CLASS));
        assert!(dom.has_class(payload, EXPAND_HEIGHT_CLASS));
    }

    #[test]
    fn dropped_document_makes_visibility_inert() {
        let (ids, _, _) = setup();
        let item = Item::new(&ids, "x");
        {
            let doc = Document::shared();
            let dom: DomHandle = doc;
            item.mount(&dom);
        }
        item.hide();
        assert!(item.is_hidden());
    }

    #[test]
    fn drop_releases_identifier() {
        let (ids, _, _) = setup();
        let item = Item::new(&ids, "x");
        let id = item.id().to_owned();
        assert!(ids.is_live(&id));
        drop(item);
        assert!(!ids.is_live(&id));
    }

    #[test]
    fn adopt_only_once() {
        let (ids, _, _) = setup();
        let item = Item::new(&ids, "x");
        assert!(item.adopt("first"));
        assert!(!item.adopt("second"));
        assert_eq!(item.owner(), Some("first"));
    }
}
