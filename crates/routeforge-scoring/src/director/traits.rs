// Score director trait definition.

use routeforge_core::{HardSoftScore, VariableListener};
use routeforge_routing::RoutePlan;

// The score director turns the state of a plan into a score.
//
// It sits on the listener side of every variable write: chain mutations and
// arrival-time propagation notify it before and after each change, which is
// all an incremental director needs to keep its running totals current.
pub trait ScoreDirector: VariableListener<RoutePlan> + Send {
    // Calculates and returns the score of the plan in its current state.
    fn calculate_score(&mut self, plan: &RoutePlan) -> HardSoftScore;

    // Returns true if this score director supports incremental scoring.
    fn is_incremental(&self) -> bool {
        false
    }

    // Drops all cached state; the next calculation starts from scratch.
    fn reset(&mut self) {}
}
