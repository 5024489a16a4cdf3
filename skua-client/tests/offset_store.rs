use skua_client::OffsetStore;
use skua_protocol::{OffsetValue, PartitionOffset, TopicOffsets};

fn po(partition: u32, offset: u64) -> PartitionOffset {
    PartitionOffset {
        partition,
        offset: OffsetValue::At(offset),
    }
}

#[test]
fn test_unknown_group_reads_as_empty() {
    let store = OffsetStore::new();
    assert!(store.committed("nobody").is_empty());
    assert_eq!(store.fetch("nobody", "orders", 0), None);
}

#[test]
fn test_set_and_fetch_roundtrip() {
    let mut store = OffsetStore::new();
    store.set("G1", "orders", 2, 17);

    assert_eq!(store.fetch("G1", "orders", 2), Some(17));
    assert_eq!(store.fetch("G1", "orders", 3), None);
    assert_eq!(store.fetch("G2", "orders", 2), None);
}

#[test]
fn test_merge_preserves_unrelated_partitions() {
    let mut store = OffsetStore::new();
    store.set("G1", "orders", 5, 500);

    store.merge_topics(
        "G1",
        &[TopicOffsets::new("orders", vec![po(0, 10), po(1, 20)])],
    );

    let committed = store.committed("G1");
    assert_eq!(committed["orders"][&0], 10);
    assert_eq!(committed["orders"][&1], 20);
    assert_eq!(committed["orders"][&5], 500);
}

#[test]
fn test_merge_is_last_writer_wins_per_partition() {
    let mut store = OffsetStore::new();
    store.merge_topics("G1", &[TopicOffsets::new("orders", vec![po(0, 10)])]);
    store.merge_topics("G1", &[TopicOffsets::new("orders", vec![po(0, 99)])]);

    assert_eq!(store.fetch("G1", "orders", 0), Some(99));
}

#[test]
fn test_groups_are_independent() {
    let mut store = OffsetStore::new();
    store.merge_topics("G1", &[TopicOffsets::new("orders", vec![po(0, 1)])]);
    store.merge_topics("G2", &[TopicOffsets::new("orders", vec![po(0, 2)])]);

    assert_eq!(store.fetch("G1", "orders", 0), Some(1));
    assert_eq!(store.fetch("G2", "orders", 0), Some(2));

    store.clear_group("G1");
    assert!(store.committed("G1").is_empty());
    assert_eq!(store.fetch("G2", "orders", 0), Some(2));
}

#[test]
fn test_committed_returns_a_snapshot() {
    let mut store = OffsetStore::new();
    store.set("G1", "orders", 0, 7);

    let snapshot = store.committed("G1");
    store.set("G1", "orders", 0, 8);

    assert_eq!(snapshot["orders"][&0], 7);
    assert_eq!(store.fetch("G1", "orders", 0), Some(8));
}
