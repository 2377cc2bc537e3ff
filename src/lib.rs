//! # flexkit
//!
//! A programmatic flexbox UI toolkit. Layouts are described as containers and
//! items with per-breakpoint attributes; flexkit generates the matching CSS
//! and keeps rendered widgets in sync with later state changes.
//!
//! Rendering goes through the [`dom::DomAdapter`] seam, so the same widgets
//! drive a browser binding or the in-memory [`dom::Document`] used in tests.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: adapter trait plus a slotmap-backed in-memory document
//! - **[`flex`]**: identifiers, responsive attributes, CSS generation, containers and items
//! - **[`widget`]**: widget trait, live cell lifecycle, content union
//! - **[`widgets`]**: UIkit-styled Button, Icon, Textbox, Textarea, Table, Form, Html
//! - **[`app`]**: theme, title, favicon and view navigation
//! - **[`testing`]**: headless rendering helpers for snapshot tests
//!
//! ```ignore
//! use flexkit::prelude::*;
//!
//! let ids = IdAllocator::new();
//! let row = Container::new(&ids)
//!     .wrap(FlexWrap::Wrap)
//!     .append(Item::new(&ids, "left").grow(1))
//!     .append(Item::new(&ids, "right"));
//! println!("{}", row.css());
//! ```

pub mod error;

// Host seam
pub mod dom;

// Layout
pub mod flex;

// Widget system
pub mod widget;
pub mod widgets;

// Application
pub mod app;

// Test support
pub mod testing;

pub use error::{KitError, Result};

/// Common imports for building an application.
pub mod prelude {
    pub use crate::app::{App, AppConfig, Theme};
    pub use crate::dom::{Document, DomAdapter, DomHandle, NodeId};
    pub use crate::error::{KitError, Result};
    pub use crate::flex::{
        Breakpoint, Container, FlexAlignment, FlexDirection, FlexWrap, IdAllocator, Item,
    };
    pub use crate::widget::{Content, Widget};
    pub use crate::widgets::{
        Button, ButtonSize, ButtonStyle, FieldState, Form, Html, Icon, IconType, Resize,
        SortOrder, Table, TableStyle, Textarea, Textbox,
    };
}
