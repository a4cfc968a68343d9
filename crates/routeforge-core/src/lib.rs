//! RouteForge Core - Core types and traits for vehicle routing
//!
//! This crate provides the fundamental abstractions for RouteForge:
//! - Score types for representing plan quality
//! - Domain traits for planning solutions and change notification
//! - Constraint identification types
//! - The shared error type

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use domain::{NoopListener, PlanningSolution, VariableListener};
pub use error::{Result, RoutingError};
pub use score::{HardSoftScore, ParseableScore, Score, ScoreParseError};
