//! RouteForge - Vehicle Routing in Rust
//!
//! Build a [`RoutePlan`] from vehicles and visits, then mutate it through a
//! [`RoutingSession`]: every insert, remove or relocate keeps arrival times
//! and the score current.
//!
//! # Example
//!
//! ```rust
//! use routeforge::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! assert_eq!(score.to_string(), "0hard/-100soft");
//! ```

// Score types
pub use routeforge_core::{HardSoftScore, ParseableScore, Score};

// Errors
pub use routeforge_core::{Result, RoutingError};

// Routing domain
pub use routeforge_routing::{
    BoundingBox, DrivingTimeCalculator, DrivingTimeMatrix, HaversineDrivingTimeCalculator,
    Location, RoutePlan, Vehicle, Visit,
};

// Scoring
pub use routeforge_scoring::{
    calculate_score, explain, ConstraintAnalysis, EasyScoreDirector, IncrementalScoreDirector,
    RoutingConstraint, ScoreDirector, ScoreExplanation,
};

// Configuration
pub use routeforge_config::{ConfigError, EnvironmentMode, RoutingConfig, ScoreDirectorType};

pub mod console;
mod session;


pub use session::RoutingSession;

pub mod prelude {
    pub use super::{HardSoftScore, ParseableScore, Score};
    pub use super::{
        HaversineDrivingTimeCalculator, Location, RoutePlan, RoutingSession, Vehicle, Visit,
    };
    pub use super::{EnvironmentMode, RoutingConfig, ScoreDirectorType};
    pub use super::{Result, RoutingError};
}
