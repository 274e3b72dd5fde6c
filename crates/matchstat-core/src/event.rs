//! Events the matching subsystem emits for statistics.
//!
//! Hosts that already buffer their own events can translate them into
//! [`MatchEvent`]s and forward the stream instead of calling each recorder
//! method by hand.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::fixed::Ticks;
use crate::id::CategoryId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// An outgoing and an incoming offer were paired.
    Matched {
        category: CategoryId,
        outgoing: Endpoint,
        incoming: Endpoint,
        amount: i32,
    },
    /// One run of the matching algorithm for a category finished.
    JobCompleted { category: CategoryId, elapsed: Ticks },
    /// An incoming offer (demand) was registered.
    IncomingAdded { category: CategoryId, amount: i32 },
    /// An outgoing offer (supply) was registered.
    OutgoingAdded { category: CategoryId, amount: i32 },
}

impl MatchEvent {
    /// Category the event belongs to.
    pub fn category(&self) -> CategoryId {
        match self {
            MatchEvent::Matched { category, .. }
            | MatchEvent::JobCompleted { category, .. }
            | MatchEvent::IncomingAdded { category, .. }
            | MatchEvent::OutgoingAdded { category, .. } => *category,
        }
    }
}
