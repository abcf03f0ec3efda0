//! Cyclic rotation over a fixed set of candidates.

use crate::error::{FdfsError, Result};

/// Endless round-robin over a non-empty, immutable list.
///
/// Not synchronized; each download owns its own instance.
#[derive(Debug, Clone)]
pub struct Circle<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> Circle<T> {
    /// Builds a rotator that starts at the first item.
    pub fn new(items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(FdfsError::Config(
                "cannot rotate over an empty endpoint set".to_string(),
            ));
        }
        Ok(Self { items, cursor: 0 })
    }

    /// Returns the current item and moves to the next one, wrapping around.
    pub fn advance(&mut self) -> &T {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.items.len();
        &self.items[index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
