//! Responsive flex layout: identifiers, attributes, CSS, Containers and Items.

pub mod attributes;
pub mod base;
pub mod composer;
pub mod container;
pub mod id;
pub mod item;
pub mod serialize;

pub use attributes::{
    Breakpoint, ContainerAttributes, FlexAlignment, FlexDirection, FlexWrap, ItemAttributes,
    Responsive,
};
pub use base::{install_base_styles, FLEX_CSS, SCROLLBAR_CSS};
pub use container::Container;
pub use id::{AllocatorConfig, IdAllocator, Identifier};
pub use item::{Item, EXPAND_HEIGHT_CLASS, EXPAND_WIDTH_CLASS, HIDDEN_CLASS};
pub use serialize::BreakpointDefaults;
