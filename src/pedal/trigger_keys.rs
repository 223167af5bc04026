use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Error;
use crate::keyboard;

/// The keys which toggle the pedal.
///
/// Entries keep the order and the casing they were stored with,
/// but lookups are case insensitive.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerKeys(SmallVec<[String; 4]>);

impl TriggerKeys {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` is one of the trigger keys.
    ///
    /// `name` is expected to be normalized already.
    pub fn matches(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }

        self.0.iter().position(|key| keyboard::normalize(key) == name)
    }

    /// Adds a key.
    ///
    /// Returns `false` if the key was already present.
    pub fn add(&mut self, name: &str) -> Result<bool, Error> {
        let name = keyboard::normalize(name);
        if name.is_empty() {
            return Err(Error::EmptyKeyName);
        }

        if self.matches(&name) {
            return Ok(false);
        }

        self.0.push(name);

        Ok(true)
    }

    /// Removes a key, returning the entry as it was stored.
    pub fn remove(&mut self, name: &str) -> Result<String, Error> {
        let name = keyboard::normalize(name);
        let idx = self.position(&name).ok_or(Error::NotFound(name))?;

        Ok(self.0.remove(idx))
    }
}

impl<S: Into<String>> FromIterator<S> for TriggerKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TriggerKeys(iter.into_iter().map(Into::into).collect())
    }
}
