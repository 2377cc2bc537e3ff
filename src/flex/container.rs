//! Flex Container: an ordered row/column of Items with its own stylesheet.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

use super::attributes::{
    Breakpoint, ContainerAttributes, FlexAlignment, FlexDirection, FlexWrap, Responsive,
};
use super::id::{IdAllocator, Identifier};
use super::item::Item;
use super::serialize::{rule_set, BreakpointDefaults};

/// Declaration every container rule opens with.
const DISPLAY_FLEX: &str = "display:flex;";

/// A flexbox container.
///
/// Setters consume and return the Container. Each has an `_at` form taking
/// the breakpoints to write; an empty slice, or [`Breakpoint::Base`], writes
/// the base attribute set.
///
/// # Examples
///
/// ```ignore
/// let ids = IdAllocator::new();
/// let row = Container::new(&ids)
///     .wrap(FlexWrap::Wrap)
///     .justify_content_at(FlexAlignment::SpaceBetween, &[Breakpoint::Large])
///     .append(Item::new(&ids, "hello").grow(1));
/// ```
pub struct Container {
    id: Identifier,
    items: Vec<Arc<Item>>,
    pub(super) attributes: Responsive<ContainerAttributes>,
    breakpoint_defaults: BreakpointDefaults,
}

impl Container {
    /// Create an empty container.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot produce a fresh identifier.
    pub fn new(ids: &Arc<IdAllocator>) -> Self {
        match Self::try_new(ids) {
            Ok(container) => container,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a container, reporting identifier exhaustion instead of panicking.
    pub fn try_new(ids: &Arc<IdAllocator>) -> Result<Self> {
        Ok(Self {
            id: ids.allocate()?,
            items: Vec::new(),
            attributes: Responsive::new(),
            breakpoint_defaults: BreakpointDefaults::Omit,
        })
    }

    /// Selector identifier of the root `div`.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Children in insertion order.
    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    /// Base and per-breakpoint attributes.
    pub fn attributes(&self) -> &Responsive<ContainerAttributes> {
        &self.attributes
    }

    /// Append a child. Insertion order is render and stylesheet order.
    pub fn append(mut self, item: impl Into<Arc<Item>>) -> Self {
        let item = item.into();
        if !item.adopt(self.id()) {
            debug!(item = item.id(), container = self.id(), "item already owned");
        }
        self.items.push(item);
        self
    }

    /// Emit `flex-direction` and `flex-wrap` in every breakpoint at-rule,
    /// even at their defaults, as the legacy generator did.
    pub fn keep_breakpoint_defaults(mut self) -> Self {
        self.breakpoint_defaults = BreakpointDefaults::Keep;
        self
    }

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

    /// Set `flex-wrap`. `NoWrap` is omitted.
    pub fn wrap(self, value: FlexWrap) -> Self {
        self.wrap_at(value, &[])
    }

    /// Set `flex-wrap` at the given breakpoints.
    pub fn wrap_at(mut self, value: FlexWrap, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.wrap = value);
        self
    }

    /// Set `flex-direction`. `Row` is omitted.
    pub fn direction(self, value: FlexDirection) -> Self {
        self.direction_at(value, &[])
    }

    /// Set `flex-direction` at the given breakpoints.
    pub fn direction_at(mut self, value: FlexDirection, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.direction = value);
        self
    }

    /// Set `justify-content`.
    pub fn justify_content(self, value: FlexAlignment) -> Self {
        self.justify_content_at(value, &[])
    }

    /// Set `justify-content` at the given breakpoints.
    pub fn justify_content_at(mut self, value: FlexAlignment, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.justify_content = value);
        self
    }

    /// Set `align-items`.
    pub fn align_items(self, value: FlexAlignment) -> Self {
        self.align_items_at(value, &[])
    }

    /// Set `align-items` at the given breakpoints.
    pub fn align_items_at(mut self, value: FlexAlignment, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.align_items = value);
        self
    }

    /// Set `align-content`.
    pub fn align_content(self, value: FlexAlignment) -> Self {
        self.align_content_at(value, &[])
    }

    /// Set `align-content` at the given breakpoints.
    pub fn align_content_at(mut self, value: FlexAlignment, at: &[Breakpoint]) -> Self {
        self.attributes.set(at, |a| a.align_content = value);
        self
    }

    /// The full stylesheet: this container's rules, then every Item's in
    /// insertion order.
    pub fn css(&self) -> String {
        let mut css = rule_set(
            self.id(),
            DISPLAY_FLEX,
            &self.attributes,
            self.breakpoint_defaults,
        );
        for item in &self.items {
            css.push_str(&item.css());
        }
        css
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id())
            .field("items", &self.items)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
