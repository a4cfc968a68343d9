//! Score director implementations.
//!
//! The score director turns plan state into a score and listens to every
//! variable write on the plan.
//!
//! # Score Director Types
//!
//! - [`EasyScoreDirector`] - Full recalculation (baseline)
//! - [`IncrementalScoreDirector`] - Per-entity retract/insert bookkeeping

mod easy;
mod incremental;
mod traits;


pub use easy::EasyScoreDirector;
pub use incremental::IncrementalScoreDirector;
pub use traits::ScoreDirector;
