//! Core domain traits

use crate::score::Score;

/// Marker trait for planning solutions.
///
/// A planning solution represents both the problem definition and the
/// (potentially partial) plan. It contains:
/// - Problem facts: Immutable input data (locations, driving times)
/// - Planning entities: Things to be optimized (vehicles and their visits)
/// - Score: The quality of the current plan
///
/// # Example
///
/// ```
/// use routeforge_core::{HardSoftScore, PlanningSolution};
///
/// #[derive(Clone)]
/// struct Tour {
///     stops: Vec<usize>,
///     score: Option<HardSoftScore>,
/// }
///
/// impl PlanningSolution for Tour {
///     type Score = HardSoftScore;
///
///     fn score(&self) -> Option<Self::Score> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<Self::Score>) {
///         self.score = score;
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// Planning solutions must be `Send + Sync` so independent sessions can run
/// on separate threads.
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the current score of this solution, if calculated.
    ///
    /// Returns `None` if the solution has not been scored yet.
    fn score(&self) -> Option<Self::Score>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Self::Score>);

    /// Returns true if this solution is fully initialized.
    ///
    /// A solution is initialized when all planning variables have been assigned.
    fn is_initialized(&self) -> bool {
        true
    }
}
