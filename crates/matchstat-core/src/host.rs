//! Host collaborators consumed by the statistics engine.
//!
//! The host simulation owns the offer queues and the building table. The
//! engine never reaches into them directly: it reads the outstanding offer
//! counters through [`SeedSource`] once per init, and classifies match
//! endpoints through [`OutsideClassifier`].

use crate::id::LocationId;

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Per-category offer counters that were already outstanding in the host.
///
/// All four slices are indexed by category ordinal.
#[derive(Debug, Clone, Copy)]
pub struct OutstandingOffers<'a> {
    pub incoming_amount: &'a [i32],
    pub outgoing_amount: &'a [i32],
    pub incoming_count: &'a [u16],
    pub outgoing_count: &'a [u16],
}

impl OutstandingOffers<'_> {
    /// Number of categories covered by every one of the four slices.
    pub fn len(&self) -> usize {
        self.incoming_amount
            .len()
            .min(self.outgoing_amount.len())
            .min(self.incoming_count.len())
            .min(self.outgoing_count.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only view of host matching state, queried when the engine is
/// (re)initialized.
///
/// Each accessor may return `None` when the host cannot expose that array
/// (for example, a field that is missing in the running game version).
pub trait SeedSource {
    /// Number of categories the host currently tracks.
    fn category_count(&self) -> Option<usize>;

    fn incoming_amounts(&self) -> Option<&[i32]>;
    fn outgoing_amounts(&self) -> Option<&[i32]>;
    fn incoming_counts(&self) -> Option<&[u16]>;
    fn outgoing_counts(&self) -> Option<&[u16]>;

    /// All four arrays together, or `None` if any one is unavailable.
    fn outstanding_offers(&self) -> Option<OutstandingOffers<'_>> {
        Some(OutstandingOffers {
            incoming_amount: self.incoming_amounts()?,
            outgoing_amount: self.outgoing_amounts()?,
            incoming_count: self.incoming_counts()?,
            outgoing_count: self.outgoing_counts()?,
        })
    }
}

/// A host that exposes nothing. Init falls back to the configured category
/// count and skips seeding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeed;

impl SeedSource for NoSeed {
    fn category_count(&self) -> Option<usize> {
        None
    }
    fn incoming_amounts(&self) -> Option<&[i32]> {
        None
    }
    fn outgoing_amounts(&self) -> Option<&[i32]> {
        None
    }
    fn incoming_counts(&self) -> Option<&[u16]> {
        None
    }
    fn outgoing_counts(&self) -> Option<&[u16]> {
        None
    }
}

// ---------------------------------------------------------------------------
// Outside connections
// ---------------------------------------------------------------------------

/// Decides whether a location is an outside connection (an off-map
/// boundary endpoint).
pub trait OutsideClassifier {
    fn is_outside_connection(&self, location: LocationId) -> bool;
}

impl<F> OutsideClassifier for F
where
    F: Fn(LocationId) -> bool,
{
    fn is_outside_connection(&self, location: LocationId) -> bool {
        self(location)
    }
}

/// Classifier for hosts without outside connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverOutside;

impl OutsideClassifier for NeverOutside {
    fn is_outside_connection(&self, _location: LocationId) -> bool {
        false
    }
}
