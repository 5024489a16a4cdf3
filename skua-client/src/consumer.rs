use crate::cluster::Cluster;
use crate::error::ClientError;
use crate::resolver::resolve_offsets;
use crate::store::CommittedOffsets;
use skua_protocol::{
    FetchResponse, OffsetFetchTopic, OffsetValue, PartitionOffset, TopicOffsets,
};
use std::sync::Arc;
use tracing::info;

/// One group member's view of the cluster. Offset resolution runs on
/// every (re)join; fetching and committing use the resolved positions.
pub struct Consumer {
    cluster: Arc<Cluster>,
    group_id: String,
}

impl Consumer {
    pub(crate) fn new(cluster: Arc<Cluster>, group_id: String) -> Consumer {
        Consumer { cluster, group_id }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub async fn connect(&self) -> Result<(), ClientError> {
        self.cluster.connect().await
    }

    pub async fn disconnect(&self) {
        self.cluster.disconnect().await
    }

    /// Joins the group for the given assignment: seeds desired offsets
    /// from the broker's committed state (uncommitted partitions come back
    /// invalid, mapped to earliest when `from_beginning`), then resolves
    /// them to concrete starting positions. A failure here aborts the
    /// join; the shared store is left untouched.
    pub async fn join(
        &self,
        assignment: &[(String, Vec<u32>)],
        from_beginning: bool,
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        let topics: Vec<OffsetFetchTopic> = assignment
            .iter()
            .map(|(topic, partitions)| OffsetFetchTopic {
                topic: topic.clone(),
                partitions: partitions.clone(),
            })
            .collect();

        let committed = self.cluster.offset_fetch(&self.group_id, &topics).await?;

        let desired = committed
            .into_iter()
            .map(|t| TopicOffsets {
                partitions: t
                    .partitions
                    .into_iter()
                    .map(|p| PartitionOffset {
                        partition: p.partition,
                        offset: match p.offset {
                            OffsetValue::Invalid if from_beginning => OffsetValue::Earliest,
                            other => other,
                        },
                    })
                    .collect(),
                topic: t.topic,
            })
            .collect();

        let resolved = self.resolve_starting_offsets(desired).await?;
        info!(group = %self.group_id, topics = resolved.len(), "group join resolved starting offsets");
        Ok(resolved)
    }

    /// Resolve the group's desired starting offsets. Invoked once per
    /// membership change with whatever mix of concrete and sentinel
    /// offsets the caller currently wants.
    pub async fn resolve_starting_offsets(
        &self,
        desired: Vec<TopicOffsets>,
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        resolve_offsets(self.cluster.as_ref(), &self.group_id, desired).await
    }

    pub async fn fetch(
        &self,
        topic: &str,
        partition: u32,
        offset: u64,
        max_bytes: u32,
    ) -> Result<FetchResponse, ClientError> {
        self.cluster
            .fetch_records(topic, partition, offset, max_bytes)
            .await
    }

    /// Write-through commit: broker first, then the shared store, so a
    /// broker failure leaves the local view unchanged.
    pub async fn commit(
        &self,
        topic: &str,
        partition: u32,
        offset: u64,
    ) -> Result<(), ClientError> {
        let topics = vec![TopicOffsets::new(
            topic,
            vec![PartitionOffset {
                partition,
                offset: OffsetValue::At(offset),
            }],
        )];
        self.cluster.offset_commit(&self.group_id, &topics).await?;
        self.cluster.commit_resolved(&self.group_id, &topics).await;
        Ok(())
    }

    pub async fn committed(&self) -> CommittedOffsets {
        self.cluster.committed_offsets(&self.group_id).await
    }
}
