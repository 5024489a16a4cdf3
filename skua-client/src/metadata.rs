use skua_protocol::MetadataResponse;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cached view of which broker leads which partition. Routing decisions
/// read this; the cluster refreshes it when it ages out or a request hits
/// a stale-leader error.
#[derive(Debug)]
pub struct MetadataCache {
    brokers: HashMap<u32, String>,                // broker id -> host:port
    leaders: HashMap<String, HashMap<u32, u32>>,  // topic -> partition -> broker id
    refreshed_at: Option<Instant>,
    max_age: Duration,
}

impl MetadataCache {
    pub fn new(max_age: Duration) -> MetadataCache {
        MetadataCache {
            brokers: HashMap::new(),
            leaders: HashMap::new(),
            refreshed_at: None,
            max_age,
        }
    }

    pub fn is_stale(&self) -> bool {
        match self.refreshed_at {
            Some(at) => at.elapsed() > self.max_age,
            None => true,
        }
    }

    /// Force a refresh before the next routing decision.
    pub fn invalidate(&mut self) {
        self.refreshed_at = None;
    }

    pub fn apply(&mut self, response: &MetadataResponse) {
        self.brokers = response
            .brokers
            .iter()
            .map(|b| (b.id, format!("{}:{}", b.host, b.port)))
            .collect();

        self.leaders.clear();
        for t in &response.topics {
            let partitions = self.leaders.entry(t.topic.clone()).or_default();
            for p in &t.partitions {
                // a partition in a transient error state keeps its previous
                // leader out of the map until the next refresh
                if p.error.is_ok() {
                    partitions.insert(p.partition, p.leader);
                }
            }
        }
        self.refreshed_at = Some(Instant::now());
    }

    pub fn leader_for(&self, topic: &str, partition: u32) -> Option<u32> {
        self.leaders
            .get(topic)
            .and_then(|partitions| partitions.get(&partition))
            .copied()
    }

    pub fn broker_addr(&self, id: u32) -> Option<&str> {
        self.brokers.get(&id).map(|s| s.as_str())
    }

    pub fn any_broker(&self) -> Option<u32> {
        self.brokers.keys().min().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skua_protocol::{BrokerMeta, ErrorCode, PartitionMeta, TopicMeta};

    fn sample_response() -> MetadataResponse {
        MetadataResponse {
            brokers: vec![
                BrokerMeta {
                    id: 0,
                    host: "b0".into(),
                    port: 9092,
                },
                BrokerMeta {
                    id: 1,
                    host: "b1".into(),
                    port: 9092,
                },
            ],
            topics: vec![TopicMeta {
                topic: "orders".into(),
                partitions: vec![
                    PartitionMeta {
                        partition: 0,
                        leader: 1,
                        error: ErrorCode::None,
                    },
                    PartitionMeta {
                        partition: 1,
                        leader: 0,
                        error: ErrorCode::LeaderNotAvailable,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_fresh_cache_is_stale_until_applied() {
        let mut cache = MetadataCache::new(Duration::from_secs(300));
        assert!(cache.is_stale());

        cache.apply(&sample_response());
        assert!(!cache.is_stale());

        cache.invalidate();
        assert!(cache.is_stale());
    }

    #[test]
    fn test_leader_lookup_skips_errored_partitions() {
        let mut cache = MetadataCache::new(Duration::from_secs(300));
        cache.apply(&sample_response());

        assert_eq!(cache.leader_for("orders", 0), Some(1));
        assert_eq!(cache.leader_for("orders", 1), None);
        assert_eq!(cache.leader_for("unknown", 0), None);
        assert_eq!(cache.broker_addr(1), Some("b1:9092"));
    }
}
