//! Easy score director with full recalculation.

use routeforge_core::{HardSoftScore, VariableListener};
use routeforge_routing::RoutePlan;

use super::traits::ScoreDirector;
use crate::constraints::calculate_score;

/// A score director that rescores the whole plan after any change.
///
/// Inefficient but obviously correct; used as the reference for the
/// incremental director and for small plans.
#[derive(Debug, Default)]
pub struct EasyScoreDirector {
    score_dirty: bool,
    cached_score: Option<HardSoftScore>,
}

impl EasyScoreDirector {
    pub fn new() -> Self {
        Self::default()
    }

    fn mark_dirty(&mut self) {
        self.score_dirty = true;
    }
}

impl VariableListener<RoutePlan> for EasyScoreDirector {
    fn before_variable_changed(
        &mut self,
        _plan: &RoutePlan,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
        self.mark_dirty();
    }

    fn after_variable_changed(
        &mut self,
        _plan: &RoutePlan,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
        // Already marked dirty in before_variable_changed
    }
}

impl ScoreDirector for EasyScoreDirector {
    fn calculate_score(&mut self, plan: &RoutePlan) -> HardSoftScore {
        if !self.score_dirty {
            if let Some(score) = self.cached_score {
                return score;
            }
        }

        let score = calculate_score(plan);
        self.cached_score = Some(score);
        self.score_dirty = false;
        score
    }

    fn is_incremental(&self) -> bool {
        false
    }

    fn reset(&mut self) {
        self.mark_dirty();
        self.cached_score = None;
    }
}
