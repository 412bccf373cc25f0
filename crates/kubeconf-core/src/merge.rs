//! Name-keyed dedup for the `clusters`, `users` and `contexts` lists.
//!
//! Merging is a two step unpack/pack: entries go into a name -> spec map, where
//! a later entry replaces the value of an earlier one but keeps its position,
//! then the map is packed back into a list of named records.

use indexmap::IndexMap;

/// A list entry of the form `{name, <kind>: spec}`.
pub trait NamedEntry: Sized {
    type Spec;

    fn name(&self) -> &str;
    fn into_parts(self) -> (String, Self::Spec);
    fn from_parts(name: String, spec: Self::Spec) -> Self;
}

/// Collapses duplicate names; the last value wins, the first position is kept.
pub fn merge_by_name<V>(entries: impl IntoIterator<Item = (String, V)>) -> Vec<(String, V)> {
    let mut merged: IndexMap<String, V> = IndexMap::new();
    for (name, value) in entries {
        merged.insert(name, value);
    }
    merged.into_iter().collect()
}

pub fn unpack<E: NamedEntry>(entries: impl IntoIterator<Item = E>) -> IndexMap<String, E::Spec> {
    entries.into_iter().map(NamedEntry::into_parts).collect()
}

pub fn pack<E: NamedEntry>(map: impl IntoIterator<Item = (String, E::Spec)>) -> Vec<E> {
    map.into_iter().map(|(name, spec)| E::from_parts(name, spec)).collect()
}

pub fn merge_entries<E: NamedEntry>(entries: impl IntoIterator<Item = E>) -> Vec<E> {
    pack(merge_by_name(entries.into_iter().map(NamedEntry::into_parts)))
}
