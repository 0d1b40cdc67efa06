use std::collections::HashSet;
use std::hash::Hash;

use crate::article::FieldLookup;

/// Keep the first record seen for each distinct key, preserving order.
///
/// Records whose key is `None` all share one key, so only the first of
/// them survives.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> Option<K>,
{
    let mut seen: HashSet<Option<K>> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// [`dedup_by_key`] on a named string field, compared exactly.
pub fn dedup_by_field<T: FieldLookup>(items: Vec<T>, field: &str) -> Vec<T> {
    dedup_by_key(items, |item| item.field(field).map(str::to_owned))
}
