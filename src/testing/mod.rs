//! Headless testing helpers.
//!
//! Render widgets into a fresh in-memory [`Document`](crate::dom::Document)
//! and read the result back as HTML for snapshot-style assertions.

pub mod snapshot;

pub use snapshot::{headless, redact_ids, render_to_html, Headless};
