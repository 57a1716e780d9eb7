//! A single-slot cache that keeps the most recent value.

use std::any::type_name;
use thiserror::Error;

/// The slot has never been filled or was taken out.
#[derive(Error, Debug)]
#[error("Slot [{title}] is empty")]
pub struct SlotError {
    title: &'static str,
}

/// An `Option` that is overwritten on every update and
/// returns `Error` when read before the first value arrives.
#[derive(Debug)]
pub struct Slot<T> {
    title: &'static str,
    value: Option<T>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Slot<T> {
    /// Create a new instance.
    pub fn empty() -> Self {
        Self {
            title: type_name::<T>(),
            value: None,
        }
    }

    /// Checks if the slot is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Checks if the slot is filled.
    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    /// Puts a value to the slot and returns the replaced one.
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.value.replace(value)
    }

    /// Take a value out.
    pub fn take(&mut self) -> Result<T, SlotError> {
        self.value.take().ok_or(SlotError { title: self.title })
    }

    /// Clone the value and keep it in the slot.
    pub fn cloned(&self) -> Result<T, SlotError>
    where
        T: Clone,
    {
        self.value.clone().ok_or(SlotError { title: self.title })
    }
}
