use crate::relation::Relation;
use ahash::AHashMap as HashMap;
use ingress_converter_core::{ResourceType, TargetKind};
use std::{borrow::Borrow, hash::Hash};

/// Resource types that may contribute to a hostname.
pub(crate) const HOSTNAME_SOURCES: &[ResourceType] = &[
    ResourceType::Ingress,
    ResourceType::IngressClass,
    ResourceType::ConfigMap,
    ResourceType::Service,
    ResourceType::Secret,
];

/// Resource types that may contribute to a backend.
pub(crate) const BACKEND_SOURCES: &[ResourceType] = &[
    ResourceType::Ingress,
    ResourceType::Secret,
    ResourceType::Pod,
];

pub(crate) const USERLIST_SOURCES: &[ResourceType] = &[ResourceType::Secret];

pub(crate) const STORAGE_SOURCES: &[ResourceType] = &[ResourceType::Ingress];

/// Resource types that may be referenced by a hostname before they exist.
pub(crate) const MISSING_HOSTNAME_SOURCES: &[ResourceType] = &[
    ResourceType::IngressClass,
    ResourceType::ConfigMap,
    ResourceType::Service,
    ResourceType::Secret,
];

pub(crate) const MISSING_BACKEND_SOURCES: &[ResourceType] = &[ResourceType::Secret];

/// All relations from resources to one kind of target, one per source type.
///
/// The set of source types is fixed at construction. Tracking a link from any
/// other source type is a programming error and panics.
#[derive(Debug)]
pub(crate) struct Links<T> {
    target: TargetKind,
    by_source: HashMap<ResourceType, Relation<String, T>>,
}

// === impl Links ===

impl<T> Links<T>
where
    T: Clone + Eq + Hash,
{
    pub(crate) fn new(target: TargetKind, sources: &[ResourceType]) -> Self {
        Self {
            target,
            by_source: sources
                .iter()
                .map(|rt| (*rt, Relation::default()))
                .collect(),
        }
    }

    /// Links the named resource to `target`, returning false if the link
    /// already existed.
    ///
    /// # Panics
    ///
    /// If `rtype` cannot contribute to this kind of target.
    pub(crate) fn insert(&mut self, rtype: ResourceType, name: impl ToString, target: T) -> bool {
        let kind = self.target;
        let relation = self
            .by_source
            .get_mut(&rtype)
            .unwrap_or_else(|| panic!("{rtype} resources cannot be linked to a {kind}"));
        relation.insert(name.to_string(), target)
    }

    /// Iterates over the targets linked from the named resource.
    ///
    /// Source types that cannot contribute to this kind of target have no
    /// links.
    pub(crate) fn targets<'a>(
        &'a self,
        rtype: ResourceType,
        name: &'a str,
    ) -> impl Iterator<Item = &'a T> + 'a {
        self.by_source
            .get(&rtype)
            .into_iter()
            .flat_map(move |relation| relation.targets(name))
    }

    /// Iterates over the names of resources of `rtype` linked to `target`.
    pub(crate) fn sources<'a, Q>(
        &'a self,
        rtype: ResourceType,
        target: &'a Q,
    ) -> impl Iterator<Item = &'a String> + 'a
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_source
            .get(&rtype)
            .into_iter()
            .flat_map(move |relation| relation.sources(target))
    }

    /// Removes every link to `target`, whatever its source type.
    ///
    /// Returns the number of links removed.
    pub(crate) fn remove<Q>(&mut self, target: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_source
            .values_mut()
            .map(|relation| relation.remove_target(target))
            .sum()
    }

    /// Iterates over the number of links held for each source type.
    pub(crate) fn sizes(&self) -> impl Iterator<Item = (ResourceType, usize)> + '_ {
        self.by_source.iter().map(|(rt, relation)| (*rt, relation.len()))
    }

    pub(crate) fn kind(&self) -> TargetKind {
        self.target
    }

    #[cfg(test)]
    pub(crate) fn relation(&self, rtype: ResourceType) -> &Relation<String, T> {
        &self.by_source[&rtype]
    }
}
