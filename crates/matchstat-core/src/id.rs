use serde::{Deserialize, Serialize};

/// Identifies a transferable resource category. Dense ordinal assigned by the
/// host, cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u16);

/// Largest category count a [`CategoryId`] can address.
pub const MAX_CATEGORY_COUNT: usize = u16::MAX as usize + 1;

impl CategoryId {
    /// The ordinal as an array index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifies a host location (building, outside connection, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub u32);

/// Which counter a record belongs to: a single category or the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterSlot {
    Category(CategoryId),
    /// Totals summed across every category.
    All,
}

impl CounterSlot {
    pub fn category(self) -> Option<CategoryId> {
        match self {
            CounterSlot::Category(id) => Some(id),
            CounterSlot::All => None,
        }
    }

    pub fn is_aggregate(self) -> bool {
        matches!(self, CounterSlot::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_index_is_ordinal() {
        assert_eq!(CategoryId(0).index(), 0);
        assert_eq!(CategoryId(127).index(), 127);
        assert_eq!(CategoryId(u16::MAX).index(), MAX_CATEGORY_COUNT - 1);
    }

    #[test]
    fn slot_accessors() {
        let slot = CounterSlot::Category(CategoryId(3));
        assert_eq!(slot.category(), Some(CategoryId(3)));
        assert!(!slot.is_aggregate());
        assert_eq!(CounterSlot::All.category(), None);
        assert!(CounterSlot::All.is_aggregate());
    }

    #[test]
    fn ids_are_hashable() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(CategoryId(0), "garbage");
        map.insert(CategoryId(1), "mail");
        assert_eq!(map[&CategoryId(1)], "mail");
    }
}
