//! Identifier allocation for CSS selectors.
//!
//! An [`IdAllocator`] is an explicit, shareable service: every Container and
//! Item draws its selector id from one, and the id returns to the pool when
//! its [`Identifier`] is dropped. Tests build their own allocators and never
//! observe each other's ids.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;

use crate::error::{KitError, Result};

/// Shape of generated identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Characters drawn from. Must be non-empty.
    pub alphabet: Vec<char>,
    /// Identifier length. Must be non-zero.
    pub length: usize,
    /// Candidate draws before giving up.
    pub retries: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            alphabet: ('a'..='z').collect(),
            length: 8,
            retries: 100,
        }
    }
}

impl AllocatorConfig {
    /// Create the default config (`a`-`z`, length 8, 100 retries).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alphabet (builder).
    pub fn with_alphabet(mut self, alphabet: &str) -> Self {
        self.alphabet = alphabet.chars().collect();
        self
    }

    /// Set the identifier length (builder).
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the retry budget (builder).
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(KitError::InvalidConfig("alphabet is empty".into()));
        }
        if self.length == 0 {
            return Err(KitError::InvalidConfig("length is zero".into()));
        }
        Ok(())
    }
}

/// Hands out identifiers unique among all currently-live ones.
#[derive(Debug)]
pub struct IdAllocator {
    config: AllocatorConfig,
    live: Mutex<HashSet<String>>,
}

impl IdAllocator {
    /// Create an allocator with the default config.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            config: AllocatorConfig::default(),
            live: Mutex::new(HashSet::new()),
        })
    }

    /// Create an allocator with a custom config.
    pub fn with_config(config: AllocatorConfig) -> Result<Arc<Self>> {
        config.validate()?;
        Ok(Arc::new(Self {
            config,
            live: Mutex::new(HashSet::new()),
        }))
    }

    /// The config this allocator draws with.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Draw a fresh identifier.
    ///
    /// The check-and-insert runs under one lock so two concurrent callers can
    /// never both claim the same candidate.
    pub fn allocate(self: &Arc<Self>) -> Result<Identifier> {
        let mut rng = rand::thread_rng();
        let mut live = self.live.lock();
        for _ in 0..self.config.retries {
            let candidate = self.draw(&mut rng);
            if live.insert(candidate.clone()) {
                tracing::trace!(id = %candidate, "allocated id");
                return Ok(Identifier {
                    value: candidate,
                    allocator: Arc::clone(self),
                });
            }
        }
        tracing::debug!(live = live.len(), "id allocation exhausted");
        Err(KitError::AllocationExhausted {
            retries: self.config.retries,
        })
    }

    /// Return `id` to the pool. No-op if it is not live.
    pub fn release(&self, id: &str) {
        self.live.lock().remove(id);
    }

    /// Whether `id` is currently allocated.
    pub fn is_live(&self, id: &str) -> bool {
        self.live.lock().contains(id)
    }

    /// Number of currently allocated ids.
    pub fn live_count(&self) -> usize {
        self.live.lock().len()
    }

    fn draw(&self, rng: &mut impl Rng) -> String {
        let alphabet = &self.config.alphabet;
        (0..self.config.length)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect()
    }
}

/// An allocated identifier. Released back to its allocator on drop.
pub struct Identifier {
    value: String,
    allocator: Arc<IdAllocator>,
}

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Drop for Identifier {
    fn drop(&mut self) {
        self.allocator.release(&self.value);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier").field(&self.value).finish()
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}
