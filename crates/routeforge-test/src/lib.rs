//! Shared test fixtures for RouteForge crates.
//!
//! This crate provides plans, mutations and listeners for testing.
//! It does NOT depend on `routeforge-scoring` to avoid circular dependencies.
//!
//! - [`brno`] - The three Brno locations and a small hand-checked plan
//! - [`random`] - Seeded random plans and chain mutations
//! - [`listener`] - A listener that records every notification
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! routeforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use routeforge_test::{brno_plan, random_mutation, random_plan, seeded_rng};
//! ```

pub mod brno;
pub mod listener;
pub mod random;

// Re-export commonly used items at crate root for convenience
pub use brno::{brno_plan, HOUR, LOCATION_1, LOCATION_2, LOCATION_3};
pub use listener::{Notification, RecordingListener};
pub use random::{random_mutation, random_plan, seeded_rng, Mutation};
