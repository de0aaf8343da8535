//! Records links while the converter builds the configuration.
//!
//! The converter decides whether a referenced resource exists: links to existing resources are
//! recorded with `track_*`, links to resources that could not be found with `track_missing_on_*`.
//!
//! Every method panics if `rtype` cannot contribute to the target kind. The valid combinations
//! are fixed by the converter and never depend on cluster state.

use crate::{BackendId, ResourceType, Tracker};

impl Tracker {
    /// Links a resource to the hostname it helped configure.
    ///
    /// Valid for `Ingress`, `IngressClass`, `ConfigMap`, `Service` and `Secret` resources.
    pub fn track_hostname(
        &mut self,
        rtype: ResourceType,
        name: impl ToString,
        hostname: impl ToString,
    ) {
        let name = name.to_string();
        let hostname = hostname.to_string();
        if self.hostnames.insert(rtype, &name, hostname.clone()) {
            tracing::trace!(%rtype, %name, %hostname, "tracking hostname");
        }
    }

    /// Links a resource to the backend it helped configure.
    ///
    /// Valid for `Ingress`, `Secret` and `Pod` resources.
    pub fn track_backend(&mut self, rtype: ResourceType, name: impl ToString, backend: BackendId) {
        let name = name.to_string();
        let id = backend.to_string();
        if self.backends.insert(rtype, &name, backend) {
            tracing::trace!(%rtype, %name, backend = %id, "tracking backend");
        }
    }

    /// Links a secret to the user list it holds.
    pub fn track_userlist(
        &mut self,
        rtype: ResourceType,
        name: impl ToString,
        userlist: impl ToString,
    ) {
        let name = name.to_string();
        let userlist = userlist.to_string();
        if self.userlists.insert(rtype, &name, userlist.clone()) {
            tracing::trace!(%rtype, %name, %userlist, "tracking userlist");
        }
    }

    /// Links an ingress to a storage it references.
    pub fn track_storage(&mut self, rtype: ResourceType, name: impl ToString, storage: impl ToString) {
        let name = name.to_string();
        let storage = storage.to_string();
        if self.storages.insert(rtype, &name, storage.clone()) {
            tracing::trace!(%rtype, %name, %storage, "tracking storage");
        }
    }

    /// Records that `hostname` references a resource that does not exist yet.
    ///
    /// Valid for `IngressClass`, `ConfigMap`, `Service` and `Secret` resources.
    pub fn track_missing_on_hostname(
        &mut self,
        rtype: ResourceType,
        name: impl ToString,
        hostname: impl ToString,
    ) {
        let name = name.to_string();
        let hostname = hostname.to_string();
        if self.missing_hostnames.insert(rtype, &name, hostname.clone()) {
            tracing::trace!(%rtype, %name, %hostname, "tracking missing resource on hostname");
        }
    }

    /// Records that `backend` references a resource that does not exist yet.
    ///
    /// Valid for `Secret` resources.
    pub fn track_missing_on_backend(
        &mut self,
        rtype: ResourceType,
        name: impl ToString,
        backend: BackendId,
    ) {
        let name = name.to_string();
        let id = backend.to_string();
        if self.missing_backends.insert(rtype, &name, backend) {
            tracing::trace!(%rtype, %name, backend = %id, "tracking missing resource on backend");
        }
    }
}
