use std::{fmt, str::FromStr};

/// The kind of cluster resource a tracked link originates from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Ingress,
    IngressClass,
    ConfigMap,
    Service,
    Secret,
    Pod,
}

/// The kind of configuration artifact derived from cluster resources.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetKind {
    /// A virtual host, identified by its hostname.
    Hostname,
    /// A backend group, identified by a [`BackendId`](crate::BackendId).
    Backend,
    /// An authentication user list.
    Userlist,
    /// A reference to an external file, e.g. a certificate.
    Storage,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown resource type: {0}")]
pub struct InvalidResourceType(String);

// === impl ResourceType ===

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        Self::Ingress,
        Self::IngressClass,
        Self::ConfigMap,
        Self::Service,
        Self::Secret,
        Self::Pod,
    ];

    /// The Kubernetes kind name of the resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingress => "Ingress",
            Self::IngressClass => "IngressClass",
            Self::ConfigMap => "ConfigMap",
            Self::Service => "Service",
            Self::Secret => "Secret",
            Self::Pod => "Pod",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = InvalidResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rt| rt.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidResourceType(s.to_string()))
    }
}

// === impl TargetKind ===

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::Backend => "backend",
            Self::Userlist => "userlist",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_resource_type() {
        for rt in ResourceType::ALL {
            assert_eq!(rt.to_string().parse::<ResourceType>(), Ok(rt), "{rt}");
        }
        assert_eq!("configmap".parse::<ResourceType>(), Ok(ResourceType::ConfigMap));
        assert_eq!(
            "Endpoints".parse::<ResourceType>(),
            Err(InvalidResourceType("Endpoints".to_string()))
        );
    }
}
