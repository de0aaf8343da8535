use crate::{links::Links, BackendId, Tracker};
use std::{borrow::Borrow, hash::Hash};

impl Tracker {
    /// Forgets every link, tracked or missing, to the given hostnames.
    pub fn delete_hostnames<I>(&mut self, hostnames: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for hostname in hostnames {
            let hostname = hostname.as_ref();
            purge(&mut self.hostnames, hostname);
            purge(&mut self.missing_hostnames, hostname);
        }
    }

    /// Forgets every link, tracked or missing, to the given backends.
    pub fn delete_backends<I>(&mut self, backends: I)
    where
        I: IntoIterator,
        I::Item: Borrow<BackendId>,
    {
        for backend in backends {
            let backend = backend.borrow();
            purge(&mut self.backends, backend);
            purge(&mut self.missing_backends, backend);
        }
    }

    /// Forgets every link to the given user lists.
    pub fn delete_userlists<I>(&mut self, userlists: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for userlist in userlists {
            purge(&mut self.userlists, userlist.as_ref());
        }
    }

    /// Forgets every link to the given storages.
    pub fn delete_storages<I>(&mut self, storages: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for storage in storages {
            purge(&mut self.storages, storage.as_ref());
        }
    }
}

fn purge<T, Q>(links: &mut Links<T>, target: &Q)
where
    T: Clone + Eq + Hash + Borrow<Q>,
    Q: Hash + Eq + std::fmt::Debug + ?Sized,
{
    let removed = links.remove(target);
    if removed > 0 {
        tracing::debug!(kind = %links.kind(), ?target, removed, "deleted links");
    }
}
