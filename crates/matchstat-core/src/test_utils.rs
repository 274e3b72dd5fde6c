//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use std::collections::HashSet;

use crate::endpoint::{Endpoint, Position};
use crate::host::{OutsideClassifier, SeedSource};
use crate::id::{CategoryId, LocationId};

// ===========================================================================
// Categories
// ===========================================================================

pub fn garbage() -> CategoryId {
    CategoryId(0)
}
pub fn crime() -> CategoryId {
    CategoryId(1)
}
pub fn sick() -> CategoryId {
    CategoryId(2)
}
pub fn goods() -> CategoryId {
    CategoryId(3)
}
pub fn mail() -> CategoryId {
    CategoryId(4)
}

// ===========================================================================
// Endpoints
// ===========================================================================

pub fn endpoint_at(x: f32, z: f32, location: u32) -> Endpoint {
    Endpoint::new(Position::new(x, 0.0, z), LocationId(location))
}

/// Two endpoints on the x axis exactly `distance` units apart.
pub fn endpoints_apart(distance: f32, outgoing: u32, incoming: u32) -> (Endpoint, Endpoint) {
    (
        endpoint_at(0.0, 0.0, outgoing),
        endpoint_at(distance, 0.0, incoming),
    )
}

// ===========================================================================
// Host fakes
// ===========================================================================

/// A host with a known category count and optional outstanding offers.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    pub categories: Option<usize>,
    pub incoming_amount: Option<Vec<i32>>,
    pub outgoing_amount: Option<Vec<i32>>,
    pub incoming_count: Option<Vec<u16>>,
    pub outgoing_count: Option<Vec<u16>>,
}

impl FakeHost {
    /// A host reporting `categories` and no seed arrays.
    pub fn with_categories(categories: usize) -> Self {
        Self {
            categories: Some(categories),
            ..Self::default()
        }
    }

    /// A host whose every category has `count` outstanding offers of `amount`
    /// on both sides.
    pub fn uniform(categories: usize, count: u16, amount: i32) -> Self {
        Self {
            categories: Some(categories),
            incoming_amount: Some(vec![amount; categories]),
            outgoing_amount: Some(vec![amount; categories]),
            incoming_count: Some(vec![count; categories]),
            outgoing_count: Some(vec![count; categories]),
        }
    }
}

impl SeedSource for FakeHost {
    fn category_count(&self) -> Option<usize> {
        self.categories
    }
    fn incoming_amounts(&self) -> Option<&[i32]> {
        self.incoming_amount.as_deref()
    }
    fn outgoing_amounts(&self) -> Option<&[i32]> {
        self.outgoing_amount.as_deref()
    }
    fn incoming_counts(&self) -> Option<&[u16]> {
        self.incoming_count.as_deref()
    }
    fn outgoing_counts(&self) -> Option<&[u16]> {
        self.outgoing_count.as_deref()
    }
}

/// Classifies a fixed set of locations as outside connections.
#[derive(Debug, Clone, Default)]
pub struct OutsideSet(pub HashSet<LocationId>);

impl OutsideSet {
    pub fn of(locations: &[u32]) -> Self {
        Self(locations.iter().copied().map(LocationId).collect())
    }
}

impl OutsideClassifier for OutsideSet {
    fn is_outside_connection(&self, location: LocationId) -> bool {
        self.0.contains(&location)
    }
}
