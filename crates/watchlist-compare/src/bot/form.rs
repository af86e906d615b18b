//! The three-slot compare form

use crate::error::{CompareError, Result};
use crate::resolver::MAX_COMPARE_SYMBOLS;

/// Input slots of the compare panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareForm {
    slots: [String; MAX_COMPARE_SYMBOLS],
}

impl CompareForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a 1-based slot number to an index
    fn index(slot: usize) -> Result<usize> {
        if (1..=MAX_COMPARE_SYMBOLS).contains(&slot) {
            Ok(slot - 1)
        } else {
            Err(CompareError::InvalidSlot(slot))
        }
    }

    /// Text in a 1-based slot
    pub fn get(&self, slot: usize) -> Result<&str> {
        Ok(&self.slots[Self::index(slot)?])
    }

    /// Replace the text of a 1-based slot
    pub fn set(&mut self, slot: usize, text: impl Into<String>) -> Result<()> {
        self.slots[Self::index(slot)?] = text.into();
        Ok(())
    }

    /// Put `symbol` into the first blank slot, or over the last one when full
    ///
    /// Returns the 1-based slot that was written.
    pub fn fill_next(&mut self, symbol: impl Into<String>) -> usize {
        let index = self
            .slots
            .iter()
            .position(|s| s.trim().is_empty())
            .unwrap_or(MAX_COMPARE_SYMBOLS - 1);
        self.slots[index] = symbol.into();
        index + 1
    }

    /// Exchange the first two slots
    pub fn swap(&mut self) {
        self.slots.swap(0, 1);
    }

    /// Blank every slot
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Raw slot values, in order, for the comparator
    pub fn inputs(&self) -> &[String] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.trim().is_empty())
    }
}
