use crate::broker::BrokerConnection;
use crate::config::{ClientConfig, ClusterOverrides};
use crate::error::ClientError;
use crate::metadata::MetadataCache;
use crate::retry::Backoff;
use crate::store::{CommittedOffsets, SharedOffsetStore};
use skua_protocol::{
    ApiKey, FetchRequest, FetchResponse, IsolationLevel, ListOffsetsRequest, ListOffsetsTopic,
    MetadataRequest, MetadataResponse, OffsetCommitRequest, OffsetFetchRequest, OffsetFetchTopic,
    OffsetFetchResponse, OffsetValue, PartitionOffset, ProduceAck, ProduceRequest, Record,
    TopicOffsets,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info, warn};

/// A handle on one broker cluster: connection pool, metadata cache, retry
/// policy and the committed-offset store shared with every other cluster
/// built from the same client.
pub struct Cluster {
    config: ClientConfig,
    isolation_level: IsolationLevel,
    metadata: Mutex<MetadataCache>,
    pool: Mutex<HashMap<u32, BrokerConnection>>,
    in_flight: Option<Arc<Semaphore>>,
    offsets: SharedOffsetStore,
}

impl Cluster {
    pub fn new(
        mut config: ClientConfig,
        overrides: ClusterOverrides,
        offsets: SharedOffsetStore,
    ) -> Cluster {
        if let Some(age) = overrides.metadata_max_age {
            config.metadata_max_age = age;
        }
        if let Some(auto) = overrides.allow_auto_topic_creation {
            config.allow_auto_topic_creation = auto;
        }
        if let Some(cap) = overrides.max_in_flight_requests {
            config.max_in_flight_requests = Some(cap);
        }
        let isolation_level = overrides.isolation_level.unwrap_or_default();

        Cluster {
            metadata: Mutex::new(MetadataCache::new(config.metadata_max_age)),
            pool: Mutex::new(HashMap::new()),
            in_flight: config
                .max_in_flight_requests
                .map(|cap| Arc::new(Semaphore::new(cap))),
            isolation_level,
            offsets,
            config,
        }
    }

    pub fn isolation_level(&self) -> IsolationLevel {
        self.isolation_level
    }

    pub fn offset_store(&self) -> &SharedOffsetStore {
        &self.offsets
    }

    pub async fn connect(&self) -> Result<(), ClientError> {
        self.refresh_metadata().await?;
        info!(client_id = %self.config.client_id, "cluster connected");
        Ok(())
    }

    pub async fn disconnect(&self) {
        self.pool.lock().await.clear();
        debug!("cluster connections dropped");
    }

    /// Bootstrap or re-fetch the topic/leader map, trying each seed broker
    /// in turn until one answers.
    pub async fn refresh_metadata(&self) -> Result<(), ClientError> {
        if self.config.brokers.is_empty() {
            return Err(ClientError::NoBrokers);
        }

        let mut last: Option<ClientError> = None;
        for addr in &self.config.brokers {
            match self.metadata_from(addr).await {
                Ok(response) => {
                    debug!(
                        seed = %addr,
                        brokers = response.brokers.len(),
                        topics = response.topics.len(),
                        "metadata refreshed"
                    );
                    self.metadata.lock().await.apply(&response);
                    return Ok(());
                }
                Err(e) => {
                    warn!(seed = %addr, error = %e, "metadata fetch from seed failed");
                    last = Some(e);
                }
            }
        }
        Err(last.unwrap_or(ClientError::NoBrokers))
    }

    async fn metadata_from(&self, addr: &str) -> Result<MetadataResponse, ClientError> {
        let mut conn = BrokerConnection::connect(addr, self.config.connection_timeout).await?;
        let request = MetadataRequest {
            topics: vec![],
            allow_auto_topic_creation: self.config.allow_auto_topic_creation,
        };
        let data = conn
            .send(ApiKey::Metadata, request.serialize(), self.config.request_timeout)
            .await?;
        Ok(MetadataResponse::deserialize(data)?)
    }

    async fn ensure_metadata(&self) -> Result<(), ClientError> {
        let stale = self.metadata.lock().await.is_stale();
        if stale {
            self.refresh_metadata().await?;
        }
        Ok(())
    }

    /// Routes one request to a broker over its pooled connection. A failed
    /// connection is dropped from the pool so the next attempt re-dials.
    async fn send_to(
        &self,
        broker_id: u32,
        api_key: ApiKey,
        data: bytes::Bytes,
    ) -> Result<bytes::Bytes, ClientError> {
        let addr = {
            let meta = self.metadata.lock().await;
            meta.broker_addr(broker_id)
                .ok_or(ClientError::UnknownBroker(broker_id))?
                .to_string()
        };

        let _permit = match &self.in_flight {
            Some(semaphore) => Some(
                semaphore
                    .acquire()
                    .await
                    .map_err(|_| ClientError::Disconnected)?,
            ),
            None => None,
        };

        let pooled = self.pool.lock().await.remove(&broker_id);
        let mut conn = match pooled {
            Some(conn) => conn,
            None => BrokerConnection::connect(&addr, self.config.connection_timeout).await?,
        };

        match conn.send(api_key, data, self.config.request_timeout).await {
            Ok(response) => {
                self.pool.lock().await.insert(broker_id, conn);
                Ok(response)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves every requested partition to a broker-confirmed offset
    /// (earliest or latest per the topic's `from_beginning`). Transient
    /// broker and stale-metadata failures are retried here, with a
    /// metadata refresh between attempts; the resolver above never
    /// retries. The result covers every requested partition or the call
    /// fails.
    pub async fn fetch_topics_offset(
        &self,
        requests: &[ListOffsetsTopic],
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        let mut backoff = Backoff::new(&self.config.retry);
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.try_fetch_topics_offset(requests).await {
                Ok(resolved) => return Ok(resolved),
                Err(e) if e.is_retriable() => match backoff.next_delay() {
                    Some(delay) => {
                        warn!(
                            attempt = attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "offset fetch failed, will refresh metadata and retry"
                        );
                        tokio::time::sleep(delay).await;
                        self.metadata.lock().await.invalidate();
                        self.refresh_metadata().await?;
                    }
                    None => {
                        return Err(ClientError::RetriesExhausted {
                            attempts,
                            last: Box::new(e),
                        })
                    }
                },
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_fetch_topics_offset(
        &self,
        requests: &[ListOffsetsTopic],
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        self.ensure_metadata().await?;

        // group requested partitions by leader broker
        let mut by_broker: HashMap<u32, Vec<ListOffsetsTopic>> = HashMap::new();
        {
            let meta = self.metadata.lock().await;
            for t in requests {
                for &partition in &t.partitions {
                    let leader =
                        meta.leader_for(&t.topic, partition)
                            .ok_or_else(|| ClientError::NoLeader {
                                topic: t.topic.clone(),
                                partition,
                            })?;
                    let topics = by_broker.entry(leader).or_default();
                    match topics.iter_mut().find(|x| x.topic == t.topic) {
                        Some(x) => x.partitions.push(partition),
                        None => topics.push(ListOffsetsTopic {
                            topic: t.topic.clone(),
                            partitions: vec![partition],
                            from_beginning: t.from_beginning,
                        }),
                    }
                }
            }
        }

        let mut resolved: HashMap<String, HashMap<u32, u64>> = HashMap::new();
        for (broker_id, topics) in by_broker {
            let request = ListOffsetsRequest {
                isolation_level: self.isolation_level,
                topics,
            };
            let data = self
                .send_to(broker_id, ApiKey::ListOffsets, request.serialize())
                .await?;
            let response = skua_protocol::ListOffsetsResponse::deserialize(data)?;

            for t in response.topics {
                for p in t.partitions {
                    if !p.error.is_ok() {
                        return Err(ClientError::Broker {
                            topic: t.topic.clone(),
                            partition: p.partition,
                            code: p.error,
                        });
                    }
                    resolved
                        .entry(t.topic.clone())
                        .or_default()
                        .insert(p.partition, p.offset);
                }
            }
        }

        // reassemble in request order; a hole in the response is fatal
        let mut out = Vec::with_capacity(requests.len());
        for t in requests {
            let by_partition = resolved.get(&t.topic);
            let mut partitions = Vec::with_capacity(t.partitions.len());
            for &partition in &t.partitions {
                let offset = by_partition
                    .and_then(|m| m.get(&partition))
                    .copied()
                    .ok_or_else(|| ClientError::IncompleteResolution {
                        topic: t.topic.clone(),
                        partition,
                    })?;
                partitions.push(PartitionOffset {
                    partition,
                    offset: OffsetValue::At(offset),
                });
            }
            out.push(TopicOffsets {
                topic: t.topic.clone(),
                partitions,
            });
        }
        Ok(out)
    }

    /// Snapshot of the group's section of the shared committed-offset
    /// store.
    pub async fn committed_offsets(&self, group: &str) -> CommittedOffsets {
        self.offsets.lock().await.committed(group)
    }

    /// Folds fully-resolved offsets into the shared store, all topics
    /// under one lock acquisition.
    pub async fn commit_resolved(&self, group: &str, resolved: &[TopicOffsets]) {
        self.offsets.lock().await.merge_topics(group, resolved);
        debug!(group = %group, topics = resolved.len(), "committed offsets merged");
    }

    pub async fn produce(
        &self,
        topic: &str,
        partition: u32,
        records: Vec<Record>,
    ) -> Result<ProduceAck, ClientError> {
        self.ensure_metadata().await?;
        let leader = self
            .metadata
            .lock()
            .await
            .leader_for(topic, partition)
            .ok_or_else(|| ClientError::NoLeader {
                topic: topic.to_string(),
                partition,
            })?;

        let request = ProduceRequest {
            topic: topic.to_string(),
            partition,
            records,
        };
        let data = self
            .send_to(leader, ApiKey::Produce, request.serialize())
            .await?;
        let ack = ProduceAck::deserialize(data)?;
        if !ack.error.is_ok() {
            return Err(ClientError::Broker {
                topic: topic.to_string(),
                partition,
                code: ack.error,
            });
        }
        Ok(ack)
    }

    pub async fn fetch_records(
        &self,
        topic: &str,
        partition: u32,
        offset: u64,
        max_bytes: u32,
    ) -> Result<FetchResponse, ClientError> {
        self.ensure_metadata().await?;
        let leader = self
            .metadata
            .lock()
            .await
            .leader_for(topic, partition)
            .ok_or_else(|| ClientError::NoLeader {
                topic: topic.to_string(),
                partition,
            })?;

        let request = FetchRequest {
            topic: topic.to_string(),
            partition,
            offset,
            max_bytes,
            isolation_level: self.isolation_level,
        };
        let data = self
            .send_to(leader, ApiKey::Fetch, request.serialize())
            .await?;
        let response = FetchResponse::deserialize(data)?;
        if !response.error.is_ok() {
            return Err(ClientError::Broker {
                topic: topic.to_string(),
                partition,
                code: response.error,
            });
        }
        Ok(response)
    }

    /// Durably records offsets broker-side for the group. Routed to any
    /// live broker; the broker forwards to the group's coordinator.
    pub async fn offset_commit(
        &self,
        group: &str,
        topics: &[TopicOffsets],
    ) -> Result<(), ClientError> {
        self.ensure_metadata().await?;
        let broker = self
            .metadata
            .lock()
            .await
            .any_broker()
            .ok_or(ClientError::NoBrokers)?;

        let request = OffsetCommitRequest {
            group: group.to_string(),
            topics: topics.to_vec(),
        };
        self.send_to(broker, ApiKey::OffsetCommit, request.serialize())
            .await?;
        Ok(())
    }

    /// Broker-side committed offsets for the group; partitions with no
    /// commit come back as the invalid marker for the resolver to fill in.
    pub async fn offset_fetch(
        &self,
        group: &str,
        topics: &[OffsetFetchTopic],
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        self.ensure_metadata().await?;
        let broker = self
            .metadata
            .lock()
            .await
            .any_broker()
            .ok_or(ClientError::NoBrokers)?;

        let request = OffsetFetchRequest {
            group: group.to_string(),
            topics: topics.to_vec(),
        };
        let data = self
            .send_to(broker, ApiKey::OffsetFetch, request.serialize())
            .await?;
        let response = OffsetFetchResponse::deserialize(data)?;
        Ok(response.topics)
    }
}

impl crate::resolver::OffsetsCluster for Cluster {
    async fn fetch_topics_offset(
        &self,
        requests: &[ListOffsetsTopic],
    ) -> Result<Vec<TopicOffsets>, ClientError> {
        Cluster::fetch_topics_offset(self, requests).await
    }

    fn offset_store(&self) -> &SharedOffsetStore {
        &self.offsets
    }
}
