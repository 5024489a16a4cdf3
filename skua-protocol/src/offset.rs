/// Wire encoding of the symbolic offsets. Only the codec layer should
/// ever see these raw values.
pub const LATEST_OFFSET: i64 = -1;
pub const EARLIEST_OFFSET: i64 = -2;
pub const INVALID_OFFSET: i64 = -1001;

/// A requested or resolved partition position. Concrete positions and the
/// symbolic markers are separate variants so classification never depends
/// on magic numbers leaking out of the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetValue {
    /// A concrete log position.
    At(u64),
    /// Start from the oldest record still retained.
    Earliest,
    /// Start from the next record to be appended.
    Latest,
    /// No known offset yet (e.g. nothing committed for the group).
    Invalid,
}

impl OffsetValue {
    /// True iff this is the `Invalid` marker.
    pub fn is_invalid(&self) -> bool {
        matches!(self, OffsetValue::Invalid)
    }

    /// True iff this is a concrete log position. `Earliest`/`Latest` still
    /// present at resolution time count as unresolved, not just `Invalid`.
    pub fn is_concrete(&self) -> bool {
        matches!(self, OffsetValue::At(_))
    }

    pub fn needs_resolution(&self) -> bool {
        !self.is_concrete()
    }

    pub fn as_concrete(&self) -> Option<u64> {
        match self {
            OffsetValue::At(n) => Some(*n),
            _ => None,
        }
    }

    pub fn to_wire(&self) -> i64 {
        match self {
            OffsetValue::At(n) => *n as i64,
            OffsetValue::Latest => LATEST_OFFSET,
            OffsetValue::Earliest => EARLIEST_OFFSET,
            OffsetValue::Invalid => INVALID_OFFSET,
        }
    }

    /// Total over all of `i64`: every unknown negative value maps to
    /// `Invalid` rather than failing the decode.
    pub fn from_wire(raw: i64) -> OffsetValue {
        match raw {
            LATEST_OFFSET => OffsetValue::Latest,
            EARLIEST_OFFSET => OffsetValue::Earliest,
            n if n >= 0 => OffsetValue::At(n as u64),
            _ => OffsetValue::Invalid,
        }
    }
}

/// One partition's requested or resolved position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionOffset {
    pub partition: u32,
    pub offset: OffsetValue,
}

/// Per-topic offsets, partition order preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicOffsets {
    pub topic: String,
    pub partitions: Vec<PartitionOffset>,
}

impl TopicOffsets {
    pub fn new(topic: impl Into<String>, partitions: Vec<PartitionOffset>) -> Self {
        TopicOffsets {
            topic: topic.into(),
            partitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_is_total() {
        assert!(OffsetValue::Invalid.is_invalid());
        assert!(!OffsetValue::Earliest.is_invalid());
        assert!(!OffsetValue::Latest.is_invalid());
        assert!(!OffsetValue::At(0).is_invalid());

        assert!(OffsetValue::At(0).is_concrete());
        assert!(OffsetValue::Earliest.needs_resolution());
        assert!(OffsetValue::Latest.needs_resolution());
        assert!(OffsetValue::Invalid.needs_resolution());
        assert!(!OffsetValue::At(7).needs_resolution());
    }

    #[test]
    fn test_wire_mapping() {
        assert_eq!(OffsetValue::from_wire(42), OffsetValue::At(42));
        assert_eq!(OffsetValue::from_wire(LATEST_OFFSET), OffsetValue::Latest);
        assert_eq!(OffsetValue::from_wire(EARLIEST_OFFSET), OffsetValue::Earliest);
        assert_eq!(OffsetValue::from_wire(INVALID_OFFSET), OffsetValue::Invalid);
        // any other negative value is treated as invalid, not an error
        assert_eq!(OffsetValue::from_wire(-77), OffsetValue::Invalid);

        assert_eq!(OffsetValue::At(100).to_wire(), 100);
        assert_eq!(OffsetValue::Invalid.to_wire(), INVALID_OFFSET);
    }
}
