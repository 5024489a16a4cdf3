use crate::cluster::Cluster;
use crate::error::ClientError;
use crate::resolver::resolve_offsets;
use crate::store::CommittedOffsets;
use skua_protocol::{ListOffsetsTopic, OffsetValue, PartitionOffset, TopicOffsets};
use std::sync::Arc;

/// Administrative surface over the same shared cluster state. An offset
/// reset done here is immediately visible to consumers built from the
/// same client.
pub struct Admin {
    cluster: Arc<Cluster>,
}

impl Admin {
    pub(crate) fn new(cluster: Arc<Cluster>) -> Admin {
        Admin { cluster }
    }

    pub async fn connect(&self) -> Result<(), ClientError> {
        self.cluster.connect().await
    }

    pub async fn disconnect(&self) {
        self.cluster.disconnect().await
    }

    /// Broker-confirmed earliest or latest offsets for the partitions.
    pub async fn fetch_topic_offsets(
        &self,
        topic: &str,
        partitions: Vec<u32>,
        from_beginning: bool,
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        self.cluster
            .fetch_topics_offset(&[ListOffsetsTopic {
                topic: topic.to_string(),
                partitions,
                from_beginning,
            }])
            .await
    }

    /// Resets a group's committed offsets for a topic, broker first and
    /// then the shared store.
    pub async fn set_offsets(
        &self,
        group: &str,
        topic: &str,
        offsets: &[(u32, u64)],
    ) -> Result<(), ClientError> {
        let topics = vec![TopicOffsets::new(
            topic,
            offsets
                .iter()
                .map(|&(partition, offset)| PartitionOffset {
                    partition,
                    offset: OffsetValue::At(offset),
                })
                .collect(),
        )];
        self.cluster.offset_commit(group, &topics).await?;
        self.cluster.commit_resolved(group, &topics).await;
        Ok(())
    }

    /// Resolves a group's offset list the same way a joining consumer
    /// would, recording the result in the shared store.
    pub async fn resolve_offsets(
        &self,
        group: &str,
        consumer_offsets: Vec<TopicOffsets>,
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        resolve_offsets(self.cluster.as_ref(), group, consumer_offsets).await
    }

    pub async fn committed_offsets(&self, group: &str) -> CommittedOffsets {
        self.cluster.committed_offsets(group).await
    }
}
