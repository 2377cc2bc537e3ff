//! Widget lifecycle: logical state plus an optional live reference.
//!
//! A [`LiveCell`] is the one lock every stateful widget is built around. It
//! holds the widget's logical attributes and, once rendered, the record of
//! concrete nodes those attributes were applied to.
//!
//! - Before render, setters only touch the logical state.
//! - `render` builds a new live record, applies every attribute once, and
//!   returns the root node, all under the lock.
//! - After render, setters update the state and push the change straight to
//!   the live nodes under that same lock.

use parking_lot::Mutex;

use crate::dom::NodeId;

/// A record of rendered nodes that can name its root.
pub trait LiveRef {
    fn root(&self) -> NodeId;
}

struct Slot<S, R> {
    state: S,
    live: Option<R>,
}

/// Lock-guarded `(state, live reference)` pair.
pub struct LiveCell<S, R> {
    slot: Mutex<Slot<S, R>>,
}

impl<S, R: LiveRef> LiveCell<S, R> {
    /// Create an unrendered cell.
    pub fn new(state: S) -> Self {
        Self {
            slot: Mutex::new(Slot { state, live: None }),
        }
    }

    /// Change the logical state, then apply it to the live record if any.
    pub fn update(&self, change: impl FnOnce(&mut S), apply: impl FnOnce(&S, &mut R)) {
        let mut guard = self.slot.lock();
        let slot = &mut *guard;
        change(&mut slot.state);
        if let Some(live) = slot.live.as_mut() {
            apply(&slot.state, live);
        }
    }

    /// Undo the current visual state, change, then apply the new one.
    ///
    /// Used where applying is not idempotent on its own: swapping one class
    /// for another, or wrapping a node that may already be wrapped.
    pub fn replace(
        &self,
        cleanup: impl FnOnce(&S, &mut R),
        change: impl FnOnce(&mut S),
        apply: impl FnOnce(&S, &mut R),
    ) {
        let mut guard = self.slot.lock();
        let slot = &mut *guard;
        if let Some(live) = slot.live.as_mut() {
            cleanup(&slot.state, live);
        }
        change(&mut slot.state);
        if let Some(live) = slot.live.as_mut() {
            apply(&slot.state, live);
        }
    }

    /// Run `f` against the live record only. No-op before render.
    pub fn apply_if_live<T>(&self, f: impl FnOnce(&S, &mut R) -> T) -> Option<T> {
        let mut guard = self.slot.lock();
        let Slot { state, live } = &mut *guard;
        live.as_mut().map(|live| f(state, live))
    }

    /// Build a new live record, sync every attribute onto it, return its root.
    ///
    /// Any previous record is replaced, not merged.
    pub fn render(&self, build: impl FnOnce(&S) -> R, sync: impl FnOnce(&S, &mut R)) -> NodeId {
        let mut guard = self.slot.lock();
        let slot = &mut *guard;
        let live = slot.live.insert(build(&slot.state));
        sync(&slot.state, live);
        live.root()
    }

    /// Read the logical state.
    pub fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.slot.lock().state)
    }

    /// Read the live record, if rendered.
    pub fn read_live<T>(&self, f: impl FnOnce(&R) -> T) -> Option<T> {
        self.slot.lock().live.as_ref().map(f)
    }

    /// Whether `render` has been called.
    pub fn is_rendered(&self) -> bool {
        self.slot.lock().live.is_some()
    }
}

impl<S: Default, R: LiveRef> Default for LiveCell<S, R> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
