//! Domain model traits for routing plans
//!
//! - `PlanningSolution`: The container for the complete problem and plan
//! - `VariableListener`: Change notification injected by the optimizer

mod listener;
mod traits;


pub use listener::{NoopListener, VariableListener};
pub use traits::PlanningSolution;
