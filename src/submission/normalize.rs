//! Raw form data to snapshot normalization

use indexmap::IndexMap;

/// Separator used when a key carries several values
pub const MULTI_VALUE_SEPARATOR: &str = ", ";

/// The finalized, normalized answers of a session.
///
/// Keys keep the order in which they were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    values: IndexMap<String, String>,
}

impl Snapshot {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key` when present and non-empty
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs ready for form-urlencoded serialization
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        normalize(iter)
    }
}

/// Collapse raw `(key, value)` entries into a snapshot.
///
/// Entries sharing a key are joined with `", "` in encounter order; single
/// entries pass through unchanged.
pub fn normalize<K, V, I>(raw: I) -> Snapshot
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in raw {
        grouped.entry(key.into()).or_default().push(value.into());
    }

    let values = grouped
        .into_iter()
        .map(|(key, values)| (key, values.join(MULTI_VALUE_SEPARATOR)))
        .collect();

    Snapshot { values }
}
