use crate::{relation::Relation, BackendId, ResourceType, Tracker};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Debug,
};
use tracing::Level;


fn back1() -> BackendId {
    BackendId::new("default", "svc1", "8080")
}

fn back2() -> BackendId {
    BackendId::new("default", "svc2", "8080")
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .try_init()
        .ok();
}

/// Links to record on a fresh tracker.
#[derive(Default)]
struct Tracked {
    hostnames: Vec<(ResourceType, &'static str, &'static str)>,
    backends: Vec<(ResourceType, &'static str, BackendId)>,
    userlists: Vec<(ResourceType, &'static str, &'static str)>,
    storages: Vec<(ResourceType, &'static str, &'static str)>,
    missing_hostnames: Vec<(ResourceType, &'static str, &'static str)>,
    missing_backends: Vec<(ResourceType, &'static str, BackendId)>,
}

impl Tracked {
    fn tracker(self) -> Tracker {
        init_tracing();
        let mut tracker = Tracker::new();
        for (rtype, name, hostname) in self.hostnames {
            tracker.track_hostname(rtype, name, hostname);
        }
        for (rtype, name, backend) in self.backends {
            tracker.track_backend(rtype, name, backend);
        }
        for (rtype, name, userlist) in self.userlists {
            tracker.track_userlist(rtype, name, userlist);
        }
        for (rtype, name, storage) in self.storages {
            tracker.track_storage(rtype, name, storage);
        }
        for (rtype, name, hostname) in self.missing_hostnames {
            tracker.track_missing_on_hostname(rtype, name, hostname);
        }
        for (rtype, name, backend) in self.missing_backends {
            tracker.track_missing_on_backend(rtype, name, backend);
        }
        tracker
    }
}

/// Asserts that `relation` holds exactly the `(source, target)` links given, in both directions.
#[track_caller]
fn assert_links<T>(relation: &Relation<String, T>, expected: &[(&str, T)])
where
    T: Clone + Debug + Ord + std::hash::Hash,
{
    let mut forward = BTreeMap::<String, BTreeSet<T>>::new();
    let mut reverse = BTreeMap::<T, BTreeSet<String>>::new();
    for (source, target) in expected {
        forward
            .entry(source.to_string())
            .or_default()
            .insert(target.clone());
        reverse
            .entry(target.clone())
            .or_default()
            .insert(source.to_string());
    }
    pretty_assertions::assert_eq!(relation.forward(), forward);
    pretty_assertions::assert_eq!(relation.reverse(), reverse);
    relation.assert_consistent();
}
