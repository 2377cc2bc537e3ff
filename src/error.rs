//! Crate error type.

/// Errors surfaced by the toolkit.
///
/// Most of these are programmer errors: the infallible constructors and
/// builders turn them into panics carrying the same message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KitError {
    #[error("error generating unique id: no free id after {retries} attempts")]
    AllocationExhausted { retries: usize },
    #[error("invalid allocator config: {0}")]
    InvalidConfig(String),
    #[error("unsupported {kind} content in {context}")]
    UnsupportedContent {
        kind: &'static str,
        context: &'static str,
    },
    #[error("view '{0}' does already exist")]
    DuplicateView(String),
    #[error("view '{0}' does not exist")]
    UnknownView(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KitError>;
