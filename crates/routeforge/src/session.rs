//! A routing session: one plan, one score director, one configuration.

use routeforge_config::{RoutingConfig, ScoreDirectorType};
use routeforge_core::{
    HardSoftScore, NoopListener, PlanningSolution, Result, RoutingError, VariableListener,
};
use routeforge_routing::{
    HaversineDrivingTimeCalculator, RoutePlan, Vehicle, Visit, VEHICLE_DESCRIPTOR, VISITS,
};
use routeforge_scoring::{
    calculate_score, explain, EasyScoreDirector, IncrementalScoreDirector, ScoreDirector,
    ScoreExplanation,
};
use tracing::{debug, error, info};

/// Owns a plan and keeps its arrival times and score current across chain
/// mutations.
///
/// Every mutation notifies the score director before and after the route
/// change, propagates arrival times from the heads of disturbance with the
/// director listening, and returns the new score. In the assert environment
/// modes the incremental result is checked against a full recalculation.
///
/// # Examples
///
/// ```
/// use routeforge::prelude::*;
///
/// let depot = Location::new(49.288087, 16.562172);
/// let vehicles = vec![Vehicle::new("1", 100, depot, 7 * 3600)];
/// let visits = vec![Visit::new("2", "John", Location::new(49.190922, 16.624466))];
///
/// let config = RoutingConfig::load("routing.toml").unwrap_or_default();
/// let mut session = RoutingSession::build("demo", vehicles, visits, config).unwrap();
/// assert_eq!(session.score(), HardSoftScore::ZERO);
///
/// let score = session.insert(0, 0, 0).unwrap();
/// assert_eq!(score, HardSoftScore::of_soft(-2 * 843));
/// assert_eq!(session.plan().visit(0).unwrap().arrival_time(), Some(7 * 3600 + 843));
/// ```
pub struct RoutingSession {
    plan: RoutePlan,
    director: Box<dyn ScoreDirector>,
    config: RoutingConfig,
}

impl RoutingSession {
    /// Wraps a plan with the score director the configuration selects.
    pub fn new(plan: RoutePlan, config: RoutingConfig) -> Self {
        let director: Box<dyn ScoreDirector> = match config.score_director {
            ScoreDirectorType::Easy => Box::new(EasyScoreDirector::new()),
            ScoreDirectorType::Incremental => Box::new(IncrementalScoreDirector::new()),
        };
        Self::with_director(plan, director, config)
    }

    /// Wraps a plan with a caller-supplied score director.
    pub fn with_director(
        plan: RoutePlan,
        director: Box<dyn ScoreDirector>,
        config: RoutingConfig,
    ) -> Self {
        let mut session = Self {
            plan,
            director,
            config,
        };
        let score = session.score();
        info!(
            event = "session_started",
            plan = %session.plan.name,
            vehicles = session.plan.vehicles().len(),
            visits = session.plan.visits().len(),
            incremental = session.director.is_incremental(),
            score = %score,
        );
        session
    }

    /// Builds the plan with a haversine calculator at the configured speed.
    ///
    /// The configuration is expected to be validated, which every
    /// [`RoutingConfig`] loader does.
    pub fn build(
        name: impl Into<String>,
        vehicles: Vec<Vehicle>,
        visits: Vec<Visit>,
        config: RoutingConfig,
    ) -> Result<Self> {
        let calculator = HaversineDrivingTimeCalculator::new(config.average_speed_kmph);
        let plan = RoutePlan::with_calculator(name, vehicles, visits, &calculator)?;
        Ok(Self::new(plan, config))
    }

    pub fn plan(&self) -> &RoutePlan {
        &self.plan
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn is_incremental(&self) -> bool {
        self.director.is_incremental()
    }

    /// Current score, also stored on the plan.
    pub fn score(&mut self) -> HardSoftScore {
        let score = self.director.calculate_score(&self.plan);
        self.plan.set_score(Some(score));
        score
    }

    /// Constraint-by-constraint explanation of the current plan.
    pub fn explain(&self) -> ScoreExplanation {
        explain(&self.plan)
    }

    /// Gives the plan back, scored.
    pub fn into_plan(mut self) -> RoutePlan {
        self.score();
        self.plan
    }

    /// Inserts an unassigned visit into a vehicle's route at `index`.
    pub fn insert(&mut self, vehicle: usize, index: usize, visit: usize) -> Result<HardSoftScore> {
        self.mutate("insert", &[vehicle], |plan, _| {
            Ok(vec![plan.insert(vehicle, index, visit)?])
        })
    }

    /// Takes a visit off its route, leaving it unassigned.
    pub fn remove(&mut self, visit: usize) -> Result<HardSoftScore> {
        let owner: Vec<usize> = self.plan.visit(visit).and_then(Visit::vehicle).into_iter().collect();
        self.mutate("remove", &owner, |plan, director| {
            Ok(plan.remove(visit, director)?.into_iter().collect())
        })
    }

    /// Moves an assigned visit to `index` of a vehicle's route, where `index`
    /// counts positions after the visit has been taken off its current route.
    pub fn relocate(
        &mut self,
        visit: usize,
        vehicle: usize,
        index: usize,
    ) -> Result<HardSoftScore> {
        let mut vehicles = vec![vehicle];
        if let Some(source) = self.plan.visit(visit).and_then(Visit::vehicle) {
            if source != vehicle {
                vehicles.push(source);
            }
        }
        self.mutate("relocate", &vehicles, |plan, director| {
            Ok(plan.relocate(visit, vehicle, index, director)?.heads().to_vec())
        })
    }

    /// Recomputes every arrival time from scratch and drops the director's
    /// cached state, for use after the plan was changed behind its back.
    pub fn rebuild(&mut self) -> Result<HardSoftScore> {
        self.plan.recalculate_arrival_times(&mut NoopListener)?;
        self.director.reset();
        Ok(self.score())
    }

    fn mutate<F>(
        &mut self,
        operation: &'static str,
        vehicles: &[usize],
        apply: F,
    ) -> Result<HardSoftScore>
    where
        F: FnOnce(&mut RoutePlan, &mut dyn ScoreDirector) -> Result<Vec<usize>>,
    {
        for &vehicle in vehicles {
            self.director
                .before_variable_changed(&self.plan, VEHICLE_DESCRIPTOR, vehicle, VISITS);
        }

        // A rejected move leaves the plan untouched; the after-notifications
        // still run so the director's totals are restored.
        let applied = apply(&mut self.plan, &mut *self.director);

        for &vehicle in vehicles {
            self.director
                .after_variable_changed(&self.plan, VEHICLE_DESCRIPTOR, vehicle, VISITS);
        }

        let heads = applied?;
        let written = self.plan.propagate_all(heads.iter().copied(), &mut *self.director)?;
        let score = self.score();

        debug!(
            event = "session_mutation",
            operation,
            heads = ?heads,
            written,
            score = %score,
        );

        if self.config.environment_mode.is_asserted() {
            self.assert_consistent(operation, score)?;
        }
        Ok(score)
    }

    fn assert_consistent(&self, operation: &'static str, actual: HardSoftScore) -> Result<()> {
        if self.config.environment_mode.is_fully_asserted() {
            self.plan.validate()?;
            let expected_arrivals = self.plan.calculate_arrival_times();
            let mismatch = self
                .plan
                .visits()
                .iter()
                .zip(&expected_arrivals)
                .find(|(visit, expected)| visit.arrival_time() != **expected);
            if let Some((visit, expected)) = mismatch {
                error!(
                    event = "arrival_time_corruption",
                    operation,
                    visit = %visit.id,
                    expected = ?expected,
                    actual = ?visit.arrival_time(),
                );
                return Err(RoutingError::InvariantViolation(format!(
                    "arrival time of visit '{}' is {:?} after {}, expected {:?}",
                    visit.id,
                    visit.arrival_time(),
                    operation,
                    expected
                )));
            }
        }

        let expected = calculate_score(&self.plan);
        if expected != actual {
            error!(
                event = "score_corruption",
                operation,
                expected = %expected,
                actual = %actual,
            );
            return Err(RoutingError::ScoreCorruption { expected, actual });
        }
        Ok(())
    }
}

impl std::fmt::Debug for RoutingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingSession")
            .field("plan", &self.plan.name)
            .field("incremental", &self.director.is_incremental())
            .field("config", &self.config)
            .finish()
    }
}
