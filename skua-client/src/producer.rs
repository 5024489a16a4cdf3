use crate::cluster::Cluster;
use crate::error::ClientError;
use skua_protocol::{ProduceAck, Record};
use std::sync::Arc;

/// Thin produce facade over a cluster handle. Batching and compression
/// live above this layer.
pub struct Producer {
    cluster: Arc<Cluster>,
}

impl Producer {
    pub(crate) fn new(cluster: Arc<Cluster>) -> Producer {
        Producer { cluster }
    }

    pub async fn connect(&self) -> Result<(), ClientError> {
        self.cluster.connect().await
    }

    pub async fn disconnect(&self) {
        self.cluster.disconnect().await
    }

    pub async fn send(
        &self,
        topic: &str,
        partition: u32,
        records: Vec<Record>,
    ) -> Result<ProduceAck, ClientError> {
        self.cluster.produce(topic, partition, records).await
    }
}
