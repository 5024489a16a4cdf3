use crate::admin::Admin;
use crate::cluster::Cluster;
use crate::config::{ClientConfig, ClusterOverrides};
use crate::consumer::Consumer;
use crate::producer::Producer;
use crate::store::{shared_store, SharedOffsetStore};
use skua_protocol::IsolationLevel;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ConsumerOptions {
    /// Maps to `IsolationLevel::ReadUncommitted` on the consumer's
    /// cluster; the default is read-committed.
    pub read_uncommitted: bool,
    pub metadata_max_age: Option<Duration>,
    pub max_in_flight_requests: Option<usize>,
}

/// Entry point. Owns the committed-offset store and hands every
/// producer/consumer/admin its own cluster wired to that one store, so an
/// offset reset in one component is visible to the others.
pub struct Skua {
    config: ClientConfig,
    offsets: SharedOffsetStore,
}

impl Skua {
    pub fn new(config: ClientConfig) -> Skua {
        Skua {
            config,
            offsets: shared_store(),
        }
    }

    fn create_cluster(&self, overrides: ClusterOverrides) -> Arc<Cluster> {
        Arc::new(Cluster::new(
            self.config.clone(),
            overrides,
            Arc::clone(&self.offsets),
        ))
    }

    pub fn producer(&self) -> Producer {
        Producer::new(self.create_cluster(ClusterOverrides::default()))
    }

    pub fn consumer(&self, group_id: impl Into<String>, opts: ConsumerOptions) -> Consumer {
        let isolation_level = if opts.read_uncommitted {
            IsolationLevel::ReadUncommitted
        } else {
            IsolationLevel::ReadCommitted
        };

        let cluster = self.create_cluster(ClusterOverrides {
            metadata_max_age: opts.metadata_max_age,
            max_in_flight_requests: opts.max_in_flight_requests,
            isolation_level: Some(isolation_level),
            ..ClusterOverrides::default()
        });
        Consumer::new(cluster, group_id.into())
    }

    pub fn admin(&self) -> Admin {
        Admin::new(self.create_cluster(ClusterOverrides {
            allow_auto_topic_creation: Some(false),
            ..ClusterOverrides::default()
        }))
    }
}
