//! Dense, ordinal-indexed storage for category counters.
//!
//! Layout: one counter per category at index `ordinal`, followed by the
//! aggregate counter at index `category_count`. Every write goes through
//! [`CounterRegistry::apply`], which updates the category slot and the
//! aggregate slot under separate bounds checks.

use matchstat_core::host::OutstandingOffers;
use matchstat_core::id::{CategoryId, CounterSlot};

use crate::counter::CategoryCounter;

#[derive(Debug, Clone)]
pub struct CounterRegistry {
    counters: Vec<CategoryCounter>,
    category_count: usize,
}

impl CounterRegistry {
    /// A zeroed registry for `category_count` categories plus the aggregate.
    pub fn new(category_count: usize) -> Self {
        let mut registry = Self {
            counters: Vec::with_capacity(category_count + 1),
            category_count,
        };
        registry.reset(category_count);
        registry
    }

    /// Zero every counter, resizing to `category_count` categories if it
    /// changed. The existing allocation is reused when large enough.
    pub fn reset(&mut self, category_count: usize) {
        self.category_count = category_count;
        self.counters.clear();
        self.counters.extend(
            (0..category_count)
                .map(|i| CategoryCounter::new(CounterSlot::Category(ordinal_to_id(i))))
                .chain(std::iter::once(CategoryCounter::new(CounterSlot::All))),
        );
        debug_assert!(self.counters[category_count].slot.is_aggregate());
    }

    /// Add outstanding host offers to the matching category counters and to
    /// the aggregate. Returns the number of categories seeded.
    pub fn seed(&mut self, offers: &OutstandingOffers<'_>) -> usize {
        let seeded = offers.len().min(self.category_count);
        for i in 0..seeded {
            let category = ordinal_to_id(i);
            let in_count = u64::from(offers.incoming_count[i]);
            let in_amount = i64::from(offers.incoming_amount[i]);
            let out_count = u64::from(offers.outgoing_count[i]);
            let out_amount = i64::from(offers.outgoing_amount[i]);
            self.apply(category, |c| {
                c.add_incoming(in_count, in_amount);
                c.add_outgoing(out_count, out_amount);
            });
        }
        seeded
    }

    /// Apply `update` to the category slot (when `category` names a real
    /// category) and to the aggregate slot. Returns whether the category slot
    /// was written.
    pub(crate) fn apply<F>(&mut self, category: CategoryId, mut update: F) -> bool
    where
        F: FnMut(&mut CategoryCounter),
    {
        let category_count = self.category_count;
        let wrote_category = match self.category_mut(category) {
            Some(counter) => {
                update(counter);
                true
            }
            None => {
                tracing::trace!(
                    category = category.0,
                    category_count,
                    "category out of range, updating aggregate only"
                );
                false
            }
        };
        if let Some(aggregate) = self.counters.get_mut(category_count) {
            update(aggregate);
        }
        wrote_category
    }

    fn category_mut(&mut self, category: CategoryId) -> Option<&mut CategoryCounter> {
        if category.index() < self.category_count {
            self.counters.get_mut(category.index())
        } else {
            None
        }
    }

    /// Number of real categories (excluding the aggregate slot).
    pub fn category_count(&self) -> usize {
        self.category_count
    }

    /// Index of the aggregate slot.
    pub fn aggregate_index(&self) -> usize {
        self.category_count
    }

    /// Total slots, aggregate included.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn get(&self, category: CategoryId) -> Option<&CategoryCounter> {
        if category.index() < self.category_count {
            self.counters.get(category.index())
        } else {
            None
        }
    }

    pub fn aggregate(&self) -> &CategoryCounter {
        &self.counters[self.category_count]
    }

    /// Category counters in ordinal order, aggregate excluded.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryCounter> {
        self.counters[..self.category_count].iter()
    }

    /// Every slot in index order, aggregate last.
    pub fn slots(&self) -> &[CategoryCounter] {
        &self.counters
    }
}

fn ordinal_to_id(ordinal: usize) -> CategoryId {
    CategoryId(u16::try_from(ordinal).unwrap_or(u16::MAX))
}
