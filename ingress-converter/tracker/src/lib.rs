//! Ingress converter dependency tracker
//!
//! The converter turns cluster resources into a load balancer configuration made of hostnames
//! (virtual hosts), backends, user lists and storages (external files such as certificates).
//! While converting, it records which resources each of these artifacts was built from:
//!
//! ```text
//! [ Ingress ] ──┬──> [ Hostname ] <── [ IngressClass | ConfigMap | Service | Secret ]
//!               ├──> [ Backend  ] <── [ Secret | Pod ]
//!               └──> [ Storage  ]     [ Secret ] ──> [ Userlist ]
//! ```
//!
//! When resources change, [`Tracker::dirty_links`] walks these links backwards to find the
//! artifacts that need to be rebuilt. Ingresses sharing a hostname or a backend configure it
//! together, so the walk fans out across every ingress connected through a shared hostname or
//! backend.
//!
//! A resource referenced before it exists is tracked as a *missing* link. Adding that resource
//! later dirties whatever referenced it.
//!
//! Artifacts that leave the desired configuration are purged with the `delete_*` methods so that
//! the tracker does not grow across the lifetime of the controller.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod delete;
mod dirty;
mod links;
pub mod metrics;
mod relation;
mod track;

#[cfg(test)]
mod tests;

pub use self::dirty::{Changes, DirtyLinks};
pub use ingress_converter_core::{BackendId, ResourceType, TargetKind};

use self::links::Links;
use parking_lot::RwLock;
use std::sync::Arc;

pub type SharedTracker = Arc<RwLock<Tracker>>;

/// Holds every link recorded by the converter.
///
/// The tracker is not internally synchronized: conversion passes, dirty-link queries and deletes
/// must not interleave. Use [`Tracker::shared`] when the tracker is owned by more than one task.
#[derive(Debug)]
pub struct Tracker {
    hostnames: Links<String>,
    backends: Links<BackendId>,
    userlists: Links<String>,
    storages: Links<String>,

    /// Hostnames that reference resources that did not exist when they were converted.
    missing_hostnames: Links<String>,

    /// Backends that reference resources that did not exist when they were converted.
    missing_backends: Links<BackendId>,
}

// === impl Tracker ===

impl Tracker {
    pub fn new() -> Self {
        Self {
            hostnames: Links::new(TargetKind::Hostname, links::HOSTNAME_SOURCES),
            backends: Links::new(TargetKind::Backend, links::BACKEND_SOURCES),
            userlists: Links::new(TargetKind::Userlist, links::USERLIST_SOURCES),
            storages: Links::new(TargetKind::Storage, links::STORAGE_SOURCES),
            missing_hostnames: Links::new(TargetKind::Hostname, links::MISSING_HOSTNAME_SOURCES),
            missing_backends: Links::new(TargetKind::Backend, links::MISSING_BACKEND_SOURCES),
        }
    }

    pub fn shared() -> SharedTracker {
        Arc::new(RwLock::new(Self::new()))
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
