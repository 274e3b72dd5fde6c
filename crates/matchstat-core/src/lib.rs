//! Matchstat Core -- shared vocabulary for the match statistics engine.
//!
//! This crate holds everything the statistics engine consumes from the host
//! simulation: category and location identifiers, offer endpoints, the seed
//! and classifier collaborator traits, clocks, match events, and settings.
//!
//! # Key Types
//!
//! - [`id::CategoryId`] -- Dense ordinal of a resource category.
//! - [`endpoint::Endpoint`] -- Position and owning location of an offer.
//! - [`host::SeedSource`] -- Outstanding host offers read at init.
//! - [`host::OutsideClassifier`] -- Off-map endpoint detection.
//! - [`clock::Clock`] -- Millisecond time source for rate sampling.
//! - [`event::MatchEvent`] -- Recordable events from the matching subsystem.
//! - [`settings::StatsSettings`] -- Engine configuration, loadable from
//!   RON, TOML, or JSON.

pub mod clock;
pub mod endpoint;
pub mod event;
pub mod fixed;
pub mod host;
pub mod id;
pub mod settings;
pub mod timer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
