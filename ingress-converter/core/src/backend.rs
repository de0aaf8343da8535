use std::{fmt, str::FromStr};

/// Identifies a backend group by the service and port it was derived from.
///
/// Backends are compared by value: two ids built independently from the same
/// namespace, name and port are the same backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackendId {
    pub namespace: String,
    pub name: String,
    /// Port number or port name, as referenced by the ingress.
    pub port: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid backend id: {0:?}; expected <namespace>_<name>_<port>")]
pub struct InvalidBackendId(String);

// === impl BackendId ===

impl BackendId {
    pub fn new(namespace: impl ToString, name: impl ToString, port: impl ToString) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            port: port.to_string(),
        }
    }

    /// Returns true for the zero id, which converters use as "no backend".
    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.name.is_empty() && self.port.is_empty()
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.namespace, self.name, self.port)
    }
}

/// Parses the `<namespace>_<name>_<port>` form produced by `Display`.
///
/// Namespaces, names and port names are DNS labels and never contain `_`.
impl FromStr for BackendId {
    type Err = InvalidBackendId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('_');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(ns), Some(name), Some(port), None)
                if !ns.is_empty() && !name.is_empty() && !port.is_empty() =>
            {
                Ok(Self::new(ns, name, port))
            }
            _ => Err(InvalidBackendId(s.to_string())),
        }
    }
}
