use skua_protocol::TopicOffsets;

/// Stitches broker-fetched offsets back into the consumer's requested
/// list. Only partitions present in `fetched` are replaced; everything
/// else passes through unchanged. Returns new structures — neither input
/// is mutated, callers keep their prior state.
pub fn initialize_consumer_offsets(
    consumer_offsets: &[TopicOffsets],
    fetched: &[TopicOffsets],
) -> Vec<TopicOffsets> {
    consumer_offsets
        .iter()
        .map(|t| {
            let fetched_topic = fetched.iter().find(|f| f.topic == t.topic);
            let partitions = t
                .partitions
                .iter()
                .map(|p| {
                    fetched_topic
                        .and_then(|f| f.partitions.iter().find(|fp| fp.partition == p.partition))
                        .copied()
                        .unwrap_or(*p)
                })
                .collect();
            TopicOffsets {
                topic: t.topic.clone(),
                partitions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skua_protocol::{OffsetValue, PartitionOffset};

    fn po(partition: u32, offset: OffsetValue) -> PartitionOffset {
        PartitionOffset { partition, offset }
    }

    #[test]
    fn test_replaces_only_fetched_partitions() {
        let consumer = vec![TopicOffsets::new(
            "orders",
            vec![po(0, OffsetValue::Invalid), po(1, OffsetValue::At(42))],
        )];
        let fetched = vec![TopicOffsets::new("orders", vec![po(0, OffsetValue::At(7))])];

        let merged = initialize_consumer_offsets(&consumer, &fetched);

        assert_eq!(
            merged,
            vec![TopicOffsets::new(
                "orders",
                vec![po(0, OffsetValue::At(7)), po(1, OffsetValue::At(42))],
            )]
        );
        // inputs untouched
        assert_eq!(consumer[0].partitions[0].offset, OffsetValue::Invalid);
    }

    #[test]
    fn test_topics_absent_from_fetch_pass_through() {
        let consumer = vec![
            TopicOffsets::new("orders", vec![po(0, OffsetValue::At(3))]),
            TopicOffsets::new("payments", vec![po(0, OffsetValue::Invalid)]),
        ];
        let fetched = vec![TopicOffsets::new(
            "payments",
            vec![po(0, OffsetValue::At(9))],
        )];

        let merged = initialize_consumer_offsets(&consumer, &fetched);

        assert_eq!(merged[0], consumer[0]);
        assert_eq!(merged[1].partitions[0].offset, OffsetValue::At(9));
    }
}
