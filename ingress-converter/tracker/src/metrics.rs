use crate::{links::Links, SharedTracker};
use prometheus_client::{
    collector::Collector,
    encoding::{DescriptorEncoder, EncodeMetric, MetricEncoder},
    metrics::{gauge::ConstGauge, MetricType},
    registry::Registry,
};
use std::hash::Hash;

#[derive(Debug)]
struct Instrumented(SharedTracker);

/// Exposes the number of links held by the tracker.
pub fn register(reg: &mut Registry, tracker: SharedTracker) {
    reg.register_collector(Box::new(Instrumented(tracker)));
}

impl Collector for Instrumented {
    fn encode(&self, mut encoder: DescriptorEncoder<'_>) -> Result<(), std::fmt::Error> {
        let this = self.0.read();

        let mut links_encoder = encoder.encode_descriptor(
            "tracker_links",
            "The number of links from resources to configuration artifacts",
            None,
            MetricType::Gauge,
        )?;
        encode_sizes(&mut links_encoder, &this.hostnames)?;
        encode_sizes(&mut links_encoder, &this.backends)?;
        encode_sizes(&mut links_encoder, &this.userlists)?;
        encode_sizes(&mut links_encoder, &this.storages)?;

        let mut missing_encoder = encoder.encode_descriptor(
            "tracker_missing_links",
            "The number of links from configuration artifacts to resources that do not exist",
            None,
            MetricType::Gauge,
        )?;
        encode_sizes(&mut missing_encoder, &this.missing_hostnames)?;
        encode_sizes(&mut missing_encoder, &this.missing_backends)?;

        Ok(())
    }
}

fn encode_sizes<T>(
    encoder: &mut MetricEncoder<'_>,
    links: &Links<T>,
) -> Result<(), std::fmt::Error>
where
    T: Clone + Eq + Hash,
{
    let target = links.kind();
    for (source, size) in links.sizes() {
        let labels = vec![("target", target.as_str()), ("source", source.as_str())];
        let gauge = ConstGauge::new(size as i64);
        gauge.encode(encoder.encode_family(&labels)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendId, ResourceType, Tracker};

    #[test]
    fn encodes_link_counts() {
        let tracker = Tracker::shared();
        {
            let mut t = tracker.write();
            t.track_hostname(ResourceType::Ingress, "default/ing1", "domain1.local");
            t.track_hostname(ResourceType::Ingress, "default/ing2", "domain1.local");
            t.track_backend(
                ResourceType::Pod,
                "default/pod1",
                BackendId::new("default", "svc1", "8080"),
            );
            t.track_missing_on_hostname(ResourceType::Secret, "default/secret1", "domain1.local");
        }

        let mut reg = Registry::default();
        register(&mut reg, tracker);
        let mut out = String::new();
        prometheus_client::encoding::text::encode(&mut out, &reg).unwrap();

        assert!(
            out.contains(r#"tracker_links{target="hostname",source="Ingress"} 2"#),
            "{out}"
        );
        assert!(
            out.contains(r#"tracker_links{target="backend",source="Pod"} 1"#),
            "{out}"
        );
        assert!(
            out.contains(r#"tracker_links{target="userlist",source="Secret"} 0"#),
            "{out}"
        );
        assert!(
            out.contains(r#"tracker_missing_links{target="hostname",source="Secret"} 1"#),
            "{out}"
        );
    }
}
