use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use std::{borrow::Borrow, collections::hash_map::Entry, hash::Hash};

/// A many-to-many relation kept as a pair of inverse multimaps.
///
/// Every `source -> target` link is stored both in the forward map (keyed by
/// source) and in the reverse map (keyed by target). Keys never map to an
/// empty set: removing the last link of a key removes the key.
#[derive(Debug)]
pub(crate) struct Relation<S, T> {
    forward: HashMap<S, HashSet<T>>,
    reverse: HashMap<T, HashSet<S>>,
}

// === impl Relation ===

impl<S, T> Default for Relation<S, T> {
    fn default() -> Self {
        Self {
            forward: HashMap::default(),
            reverse: HashMap::default(),
        }
    }
}

impl<S, T> Relation<S, T>
where
    S: Clone + Eq + Hash,
    T: Clone + Eq + Hash,
{
    /// Links `source` to `target`.
    ///
    /// Returns false if the link already existed.
    pub(crate) fn insert(&mut self, source: S, target: T) -> bool {
        if !self
            .forward
            .entry(source.clone())
            .or_default()
            .insert(target.clone())
        {
            return false;
        }
        self.reverse.entry(target).or_default().insert(source);
        true
    }

    /// Iterates over the targets linked from `source`.
    pub(crate) fn targets<Q>(&self, source: &Q) -> impl Iterator<Item = &T> + '_
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(source).into_iter().flat_map(|set| set.iter())
    }

    /// Iterates over the sources linked to `target`.
    pub(crate) fn sources<Q>(&self, target: &Q) -> impl Iterator<Item = &S> + '_
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.reverse.get(target).into_iter().flat_map(|set| set.iter())
    }

    /// Removes every link pointing at `target`.
    ///
    /// Returns the number of links removed.
    pub(crate) fn remove_target<Q>(&mut self, target: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(sources) = self.reverse.remove(target) else {
            return 0;
        };
        for source in sources.iter() {
            if let Entry::Occupied(mut entry) = self.forward.entry(source.clone()) {
                entry.get_mut().remove(target);
                if entry.get().is_empty() {
                    entry.remove();
                }
            }
        }
        sources.len()
    }

    /// The number of links in the relation.
    pub(crate) fn len(&self) -> usize {
        self.forward.values().map(|set| set.len()).sum()
    }

    #[cfg(test)]
    pub(crate) fn forward(&self) -> std::collections::BTreeMap<S, std::collections::BTreeSet<T>>
    where
        S: Ord,
        T: Ord,
    {
        sorted(&self.forward)
    }

    #[cfg(test)]
    pub(crate) fn reverse(&self) -> std::collections::BTreeMap<T, std::collections::BTreeSet<S>>
    where
        S: Ord,
        T: Ord,
    {
        sorted(&self.reverse)
    }

    /// Asserts that both maps describe the same links and hold no empty keys.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self)
    where
        S: std::fmt::Debug,
        T: std::fmt::Debug,
    {
        for (source, targets) in self.forward.iter() {
            assert!(!targets.is_empty(), "empty forward key {source:?}");
            for target in targets.iter() {
                assert!(
                    self.reverse
                        .get(target)
                        .is_some_and(|sources| sources.contains(source)),
                    "missing reverse link {target:?} -> {source:?}"
                );
            }
        }
        for (target, sources) in self.reverse.iter() {
            assert!(!sources.is_empty(), "empty reverse key {target:?}");
            for source in sources.iter() {
                assert!(
                    self.forward
                        .get(source)
                        .is_some_and(|targets| targets.contains(target)),
                    "missing forward link {source:?} -> {target:?}"
                );
            }
        }
    }
}

#[cfg(test)]
fn sorted<K, V>(
    map: &HashMap<K, HashSet<V>>,
) -> std::collections::BTreeMap<K, std::collections::BTreeSet<V>>
where
    K: Clone + Ord,
    V: Clone + Ord,
{
    map.iter()
        .map(|(k, vs)| (k.clone(), vs.iter().cloned().collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::{btreemap, btreeset};

    fn relation(links: &[(&str, &str)]) -> Relation<String, String> {
        let mut rel = Relation::default();
        for (s, t) in links {
            rel.insert(s.to_string(), t.to_string());
        }
        rel
    }

    #[test]
    fn insert_is_idempotent() {
        let mut rel = relation(&[("ing1", "h1")]);
        assert!(!rel.insert("ing1".to_string(), "h1".to_string()));
        assert_eq!(rel.len(), 1);
        assert_eq!(rel.forward(), btreemap! {"ing1".to_string() => btreeset! {"h1".to_string()}});
        assert_eq!(rel.reverse(), btreemap! {"h1".to_string() => btreeset! {"ing1".to_string()}});
        rel.assert_consistent();
    }

    #[test]
    fn lookups() {
        let rel = relation(&[("ing1", "h1"), ("ing1", "h2"), ("ing2", "h1")]);

        let mut targets = rel.targets("ing1").collect::<Vec<_>>();
        targets.sort();
        assert_eq!(targets, ["h1", "h2"]);

        let mut sources = rel.sources("h1").collect::<Vec<_>>();
        sources.sort();
        assert_eq!(sources, ["ing1", "ing2"]);

        assert_eq!(rel.targets("ing3").count(), 0);
        assert_eq!(rel.sources("h3").count(), 0);
    }

    #[test]
    fn remove_target_drops_empty_keys() {
        let mut rel = relation(&[("ing1", "h1"), ("ing1", "h2"), ("ing2", "h1")]);

        assert_eq!(rel.remove_target("h1"), 2);
        assert_eq!(rel.forward(), btreemap! {"ing1".to_string() => btreeset! {"h2".to_string()}});
        assert_eq!(rel.reverse(), btreemap! {"h2".to_string() => btreeset! {"ing1".to_string()}});
        rel.assert_consistent();

        assert_eq!(rel.remove_target("h1"), 0);
        assert_eq!(rel.remove_target("h2"), 1);
        assert!(rel.forward().is_empty());
        assert!(rel.reverse().is_empty());
        assert_eq!(rel.len(), 0);
    }
}
