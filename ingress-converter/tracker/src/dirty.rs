use crate::{links::Links, BackendId, ResourceType, Tracker};
use ahash::AHashSet as HashSet;
use std::collections::VecDeque;

/// Resources that changed since the last conversion, by type.
///
/// Names are whatever the converter uses to track resources, usually `namespace/name` for
/// namespaced resources.
#[derive(Clone, Debug, Default)]
pub struct Changes {
    pub removed_ingresses: Vec<String>,
    /// New ingresses are converted in full and do not dirty anything by themselves.
    pub added_ingresses: Vec<String>,

    pub removed_ingress_classes: Vec<String>,
    pub added_ingress_classes: Vec<String>,

    pub removed_config_maps: Vec<String>,
    pub added_config_maps: Vec<String>,

    pub removed_services: Vec<String>,
    pub added_services: Vec<String>,

    pub removed_secrets: Vec<String>,
    pub added_secrets: Vec<String>,

    /// Removed pods shrink their backend's endpoint list and are not tracked.
    pub added_pods: Vec<String>,
}

/// Everything that must be rebuilt after a set of [`Changes`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyLinks {
    pub ingresses: HashSet<String>,
    pub hostnames: HashSet<String>,
    pub backends: HashSet<BackendId>,
    pub userlists: HashSet<String>,
    pub storages: HashSet<String>,
}

/// A node of the ingress/hostname/backend graph waiting to be expanded.
enum Pending {
    Ingress(String),
    Hostname(String),
    Backend(BackendId),
}

// === impl Changes ===

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.added_ingresses.is_empty() && self.lists().all(|(_, names)| names.is_empty())
    }

    /// Resources of each type whose links need to be rebuilt, removed or added.
    fn changed(&self) -> impl Iterator<Item = (ResourceType, &String)> + '_ {
        self.lists().flat_map(|(rt, names)| names.iter().map(move |n| (rt, n)))
    }

    /// Resources of each type that were added and may satisfy a missing link.
    fn added(&self) -> impl Iterator<Item = (ResourceType, &String)> + '_ {
        [
            (ResourceType::IngressClass, &self.added_ingress_classes),
            (ResourceType::ConfigMap, &self.added_config_maps),
            (ResourceType::Service, &self.added_services),
            (ResourceType::Secret, &self.added_secrets),
        ]
        .into_iter()
        .flat_map(|(rt, names)| names.iter().map(move |n| (rt, n)))
    }

    fn lists(&self) -> impl Iterator<Item = (ResourceType, &Vec<String>)> + '_ {
        [
            (ResourceType::Ingress, &self.removed_ingresses),
            (ResourceType::IngressClass, &self.removed_ingress_classes),
            (ResourceType::IngressClass, &self.added_ingress_classes),
            (ResourceType::ConfigMap, &self.removed_config_maps),
            (ResourceType::ConfigMap, &self.added_config_maps),
            (ResourceType::Service, &self.removed_services),
            (ResourceType::Service, &self.added_services),
            (ResourceType::Secret, &self.removed_secrets),
            (ResourceType::Secret, &self.added_secrets),
            (ResourceType::Pod, &self.added_pods),
        ]
        .into_iter()
    }
}

// === impl DirtyLinks ===

impl DirtyLinks {
    pub fn is_empty(&self) -> bool {
        self.ingresses.is_empty()
            && self.hostnames.is_empty()
            && self.backends.is_empty()
            && self.userlists.is_empty()
            && self.storages.is_empty()
    }

    /// Adds every target linked from a changed resource.
    fn extend_from(
        &mut self,
        rtype: ResourceType,
        name: &str,
        hostnames: &Links<String>,
        backends: &Links<BackendId>,
    ) {
        self.hostnames.extend(hostnames.targets(rtype, name).cloned());
        self.backends.extend(backends.targets(rtype, name).cloned());
    }
}

// === impl Tracker ===

impl Tracker {
    /// Computes the ingresses and artifacts that need to be rebuilt after `changes`.
    ///
    /// Removed ingresses are always dirty. Every other changed resource dirties the artifacts it
    /// is linked to, and added resources also dirty the artifacts that were waiting for them.
    /// Dirtiness then spreads across ingresses that share a hostname or a backend until no new
    /// ingress, hostname or backend is found. Finally, dirty ingresses dirty their storages.
    ///
    /// User lists and storages never dirty anything else.
    pub fn dirty_links(&self, changes: &Changes) -> DirtyLinks {
        let mut dirty = DirtyLinks::default();

        dirty
            .ingresses
            .extend(changes.removed_ingresses.iter().cloned());

        for (rtype, name) in changes.changed() {
            if rtype == ResourceType::Ingress {
                continue;
            }
            dirty.extend_from(rtype, name, &self.hostnames, &self.backends);
            dirty
                .userlists
                .extend(self.userlists.targets(rtype, name).cloned());
        }

        for (rtype, name) in changes.added() {
            dirty.extend_from(rtype, name, &self.missing_hostnames, &self.missing_backends);
        }

        self.spread(&mut dirty);

        for ingress in dirty.ingresses.iter() {
            dirty
                .storages
                .extend(self.storages.targets(ResourceType::Ingress, ingress).cloned());
        }

        tracing::debug!(
            ingresses = dirty.ingresses.len(),
            hostnames = dirty.hostnames.len(),
            backends = dirty.backends.len(),
            userlists = dirty.userlists.len(),
            storages = dirty.storages.len(),
            "computed dirty links"
        );
        dirty
    }

    /// Expands the dirty ingresses, hostnames and backends to everything connected to them
    /// through ingress links.
    fn spread(&self, dirty: &mut DirtyLinks) {
        let mut pending = dirty
            .ingresses
            .iter()
            .cloned()
            .map(Pending::Ingress)
            .chain(dirty.hostnames.iter().cloned().map(Pending::Hostname))
            .chain(dirty.backends.iter().cloned().map(Pending::Backend))
            .collect::<VecDeque<_>>();

        while let Some(next) = pending.pop_front() {
            match next {
                Pending::Ingress(ingress) => {
                    for hostname in self.hostnames.targets(ResourceType::Ingress, &ingress) {
                        if dirty.hostnames.insert(hostname.clone()) {
                            pending.push_back(Pending::Hostname(hostname.clone()));
                        }
                    }
                    for backend in self.backends.targets(ResourceType::Ingress, &ingress) {
                        if dirty.backends.insert(backend.clone()) {
                            pending.push_back(Pending::Backend(backend.clone()));
                        }
                    }
                }
                Pending::Hostname(hostname) => {
                    for ingress in self.hostnames.sources(ResourceType::Ingress, hostname.as_str()) {
                        if dirty.ingresses.insert(ingress.clone()) {
                            pending.push_back(Pending::Ingress(ingress.clone()));
                        }
                    }
                }
                Pending::Backend(backend) => {
                    for ingress in self.backends.sources(ResourceType::Ingress, &backend) {
                        if dirty.ingresses.insert(ingress.clone()) {
                            pending.push_back(Pending::Ingress(ingress.clone()));
                        }
                    }
                }
            }
        }
    }
}
