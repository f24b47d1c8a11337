//! Tri-state field for partial updates.
//!
//! A JSON body can omit a field, send it as `null`, or send a value. Plain
//! `Option<T>` collapses the first two; `Patch<T>` keeps them apart so that
//! "leave unchanged" and "clear" are different requests.
//!
//! Fields must carry `#[serde(default)]` so that omission yields
//! [`Patch::Missing`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field absent from the payload: keep the stored value.
    Missing,
    /// Field present as `null`: clear the stored value.
    Null,
    /// Field present with a value: overwrite.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> Patch<T> {
    /// `None` when missing, `Some(None)` when null, `Some(Some(v))` otherwise.
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Self::Missing => None,
            Self::Null => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }

    /// Resolve against the currently stored value.
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Missing => current,
            Self::Null => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl Patch<String> {
    /// Treat a whitespace-only value as a request to clear.
    pub fn blank_as_null(self) -> Self {
        match self {
            Self::Value(v) if v.trim().is_empty() => Self::Null,
            other => other,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Self::Value(v),
            None => Self::Null,
        })
    }
}
