//! Grouping helpers that keep first-seen order, so detector output is
//! deterministic for a given document.

use std::hash::Hash;

use hashbrown::HashMap;

/// Values grouped by key, groups ordered by the first appearance of their key.
#[derive(Debug)]
pub struct FirstSeenGroups<K, V> {
    index: HashMap<K, usize>,
    groups: Vec<(K, Vec<V>)>,
}

impl<K, V> Default for FirstSeenGroups<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<K, V> FirstSeenGroups<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&idx) => self.groups[idx].1.push(value),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![value]));
            }
        }
    }

    /// Groups with at least `min_len` members, in first-seen order.
    pub fn into_groups_of_at_least(self, min_len: usize) -> impl Iterator<Item = (K, Vec<V>)> {
        self.groups
            .into_iter()
            .filter(move |(_, members)| members.len() >= min_len)
    }
}

impl<K, V> FromIterator<(K, V)> for FirstSeenGroups<K, V>
where
    K: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (key, value) in iter {
            groups.push(key, value);
        }
        groups
    }
}

/// The most frequent item and its count. Ties go to the item seen first.
pub fn most_common<T, I>(items: I) -> Option<(T, usize)>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let groups: FirstSeenGroups<T, ()> = items.into_iter().map(|item| (item, ())).collect();
    let mut best: Option<(T, usize)> = None;
    for (item, members) in groups.groups {
        if best.as_ref().is_none_or(|(_, count)| members.len() > *count) {
            best = Some((item, members.len()));
        }
    }
    best
}
