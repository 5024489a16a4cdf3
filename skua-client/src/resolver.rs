use crate::error::ClientError;
use crate::initialize::initialize_consumer_offsets;
use crate::store::SharedOffsetStore;
use skua_protocol::{ListOffsetsTopic, OffsetValue, TopicOffsets};
use std::future::Future;
use tracing::debug;

/// The slice of cluster behavior offset resolution needs. `Cluster`
/// implements it for real; tests drive the resolver with a scripted stub.
pub trait OffsetsCluster {
    fn fetch_topics_offset(
        &self,
        requests: &[ListOffsetsTopic],
    ) -> impl Future<Output = Result<Vec<TopicOffsets>, ClientError>> + Send;

    fn offset_store(&self) -> &SharedOffsetStore;
}

/// Reconciles a consumer group's requested starting offsets into concrete
/// committed positions.
///
/// Partitions whose offset is still a sentinel or invalid are fetched from
/// the cluster in one batched request (earliest or latest per topic); the
/// results are stitched back over the caller's list and the final,
/// fully-concrete set is folded into the group's committed-offset store.
/// An input with nothing to resolve makes no network call at all. Fetch
/// failures propagate untouched and leave the store exactly as it was.
pub async fn resolve_offsets<C: OffsetsCluster>(
    cluster: &C,
    group_id: &str,
    consumer_offsets: Vec<TopicOffsets>,
) -> Result<Vec<TopicOffsets>, ClientError> {
    let unresolved: Vec<ListOffsetsTopic> = consumer_offsets
        .iter()
        .map(|t| ListOffsetsTopic {
            topic: t.topic.clone(),
            partitions: t
                .partitions
                .iter()
                .filter(|p| p.offset.needs_resolution())
                .map(|p| p.partition)
                .collect(),
            // earliest wins for the whole topic, even when other
            // partitions in it are already concrete
            from_beginning: t
                .partitions
                .iter()
                .any(|p| p.offset == OffsetValue::Earliest),
        })
        .filter(|t| !t.partitions.is_empty())
        .collect();

    let consumer_offsets = if unresolved.is_empty() {
        consumer_offsets
    } else {
        debug!(
            group = %group_id,
            topics = unresolved.len(),
            "fetching broker offsets for unresolved partitions"
        );
        let topic_offsets = cluster.fetch_topics_offset(&unresolved).await?;
        initialize_consumer_offsets(&consumer_offsets, &topic_offsets)
    };

    // every partition must be concrete before anything reaches the store
    for t in &consumer_offsets {
        for p in &t.partitions {
            if !p.offset.is_concrete() {
                return Err(ClientError::IncompleteResolution {
                    topic: t.topic.clone(),
                    partition: p.partition,
                });
            }
        }
    }

    cluster
        .offset_store()
        .lock()
        .await
        .merge_topics(group_id, &consumer_offsets);

    Ok(consumer_offsets)
}
