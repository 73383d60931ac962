//! Intent Slots

use std::collections::HashMap;

/// Flat mapping from slot name to the value the user spoke.
///
/// Slots the platform declared without a value have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots(HashMap<String, String>);

impl Slots {
    /// Value of a slot, if it was filled.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether a slot was filled.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for Slots
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for Slots {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}
