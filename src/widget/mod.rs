//! Widget system: render capability, lifecycle cell, content union.

pub mod content;
pub mod lifecycle;
pub mod traits;

pub use content::Content;
pub use lifecycle::{LiveCell, LiveRef};
pub use traits::Widget;
