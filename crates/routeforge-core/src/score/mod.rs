//! Score types for representing plan quality
//!
//! Scores are used to compare plans and guide the optimizer. All score types
//! are immutable and implement arithmetic operations.

mod hard_soft;
mod traits;


pub use hard_soft::HardSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};
