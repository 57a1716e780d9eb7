//! Labels of generation runs.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A label of a run used for all log lines around it.
#[derive(Debug, Clone)]
pub struct Label {
    name: Arc<String>,
}

impl Label {
    /// Creates a new label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::new(name.into()),
        }
    }

    /// Creates a new label by stacking the existent and a new value.
    pub fn stack(&self, name: &str) -> Self {
        let name = format!("{}::{}", self.name, name);
        Self {
            name: Arc::new(name),
        }
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        self.name.as_ref()
    }
}

impl Deref for Label {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.name
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}
