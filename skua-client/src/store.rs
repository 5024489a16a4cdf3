use skua_protocol::TopicOffsets;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// topic -> partition -> committed offset
pub type CommittedOffsets = HashMap<String, HashMap<u32, u64>>;

/// The committed-offset store shared by every producer/consumer/admin
/// built from one client. Holds only resolved integer offsets; sentinels
/// never reach it. All mutation funnels through `merge_topics`/`set`
/// under the owning mutex, so a resolution's writes land atomically.
#[derive(Debug, Default)]
pub struct OffsetStore {
    store: HashMap<String, CommittedOffsets>, // group -> topic -> partition -> offset
}

impl OffsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a group's committed offsets. A group nothing has been
    /// committed for is an empty map, never an error.
    pub fn committed(&self, group: &str) -> CommittedOffsets {
        self.store.get(group).cloned().unwrap_or_default()
    }

    pub fn fetch(&self, group: &str, topic: &str, partition: u32) -> Option<u64> {
        self.store
            .get(group)
            .and_then(|topics| topics.get(topic))
            .and_then(|partitions| partitions.get(&partition))
            .copied()
    }

    pub fn set(&mut self, group: &str, topic: &str, partition: u32, offset: u64) {
        self.store
            .entry(group.to_string())
            .or_default()
            .entry(topic.to_string())
            .or_default()
            .insert(partition, offset);
    }

    /// Folds a fully-resolved offset list into the group's section: per
    /// topic a shallow merge where new partition entries win and unrelated
    /// pre-existing partitions are preserved. The group entry is lazily
    /// created.
    pub fn merge_topics(&mut self, group: &str, resolved: &[TopicOffsets]) {
        let group_entry = self.store.entry(group.to_string()).or_default();
        for t in resolved {
            let topic_entry = group_entry.entry(t.topic.clone()).or_default();
            for p in &t.partitions {
                match p.offset.as_concrete() {
                    Some(offset) => {
                        topic_entry.insert(p.partition, offset);
                    }
                    // caller contract violation, not a runtime error
                    None => debug_assert!(false, "sentinel offset reached the committed store"),
                }
            }
        }
    }

    pub fn clear_group(&mut self, group: &str) {
        self.store.remove(group);
    }
}

pub type SharedOffsetStore = Arc<Mutex<OffsetStore>>;

pub fn shared_store() -> SharedOffsetStore {
    Arc::new(Mutex::new(OffsetStore::new()))
}
