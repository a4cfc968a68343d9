//! RouteForge Routing - Route chains and arrival-time propagation
//!
//! This crate holds the vehicle routing domain:
//! - [`Location`] and the [`DrivingTimeCalculator`] that turns pairs of
//!   locations into driving seconds, precomputed into a [`DrivingTimeMatrix`]
//! - [`Visit`], [`Vehicle`] and the [`RoutePlan`] that owns them
//! - Chain primitives ([`RoutePlan::insert`], [`RoutePlan::remove`],
//!   [`RoutePlan::relocate`]) that keep routes and links consistent
//! - Incremental arrival-time propagation ([`RoutePlan::propagate`]) with
//!   before/after change notification

pub mod chain;
pub mod domain;
pub mod geo;
pub mod matrix;
pub mod plan;
pub mod propagation;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod chain_tests;
#[cfg(test)]
mod plan_tests;

pub use chain::Relocation;
pub use domain::{Vehicle, Visit, ARRIVAL_TIME, VEHICLE_DESCRIPTOR, VISITS, VISIT_DESCRIPTOR};
pub use geo::{DrivingTimeCalculator, HaversineDrivingTimeCalculator, Location, AVERAGE_SPEED_KMPH};
pub use matrix::DrivingTimeMatrix;
pub use plan::{BoundingBox, RoutePlan};
