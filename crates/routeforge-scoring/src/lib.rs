//! Constraint scoring for RouteForge.
//!
//! This crate scores a [`RoutePlan`](routeforge_routing::RoutePlan):
//! - The three routing constraints and a bulk pass over the plan
//!   ([`calculate_score`])
//! - Score directors that listen to variable changes
//!   ([`EasyScoreDirector`], [`IncrementalScoreDirector`])
//! - Score explanation with per-match justifications ([`explain`])

pub mod analysis;
pub mod constraints;
pub mod director;

#[cfg(test)]
mod analysis_tests;

pub use analysis::{
    explain, format_travel_time, ConstraintAnalysis, ConstraintJustification, ConstraintMatch,
    EntityRef, ScoreExplanation,
};
pub use constraints::{calculate_score, RoutingConstraint, CONSTRAINT_PACKAGE};
pub use director::{EasyScoreDirector, IncrementalScoreDirector, ScoreDirector};
