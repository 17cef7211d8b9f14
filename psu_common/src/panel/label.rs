//! Bounded-length operator-visible text.

use crate::consts::TITLE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Title text with a fixed upper bound of [`TITLE_CAPACITY`] bytes.
///
/// Length is checked when the value enters the process (deserialisation or
/// [`Label::new`]); an over-long title is a configuration error, never a
/// silent truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(heapless::String<TITLE_CAPACITY>);

impl Label {
    /// Build a label, rejecting text longer than [`TITLE_CAPACITY`] bytes.
    pub fn new(text: &str) -> Result<Self, String> {
        let mut inner = heapless::String::new();
        inner.push_str(text).map_err(|_| {
            format!(
                "title {:?} is {} bytes long, limit is {}",
                text,
                text.len(),
                TITLE_CAPACITY
            )
        })?;
        Ok(Self(inner))
    }

    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Label {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0.as_str().to_owned()
    }
}

impl Deref for Label {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
