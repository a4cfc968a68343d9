//! Incremental score director driven by variable-change notifications.

use routeforge_core::{HardSoftScore, VariableListener};
use routeforge_routing::{RoutePlan, ARRIVAL_TIME, VEHICLE_DESCRIPTOR, VISITS, VISIT_DESCRIPTOR};
use tracing::{debug, trace};

use super::traits::ScoreDirector;
use crate::constraints::{capacity_overrun, service_delay, travel_time};

/// Keeps per-entity constraint weights and running totals up to date.
///
/// On `before_variable_changed` the cached contribution of the entity is
/// retracted; on `after_variable_changed` it is recomputed from the plan and
/// inserted again. Calculating the score is then O(1).
///
/// Recognized notifications:
/// - `(VISIT_DESCRIPTOR, visit, "arrivalTime")` updates the visit's lateness
/// - `(VEHICLE_DESCRIPTOR, vehicle, "visits")` updates the vehicle's capacity
///   overrun and travel time
///
/// Any other notification invalidates the director, and the next calculation
/// rescores the whole plan.
///
/// # Example
///
/// ```
/// use routeforge_core::VariableListener;
/// use routeforge_routing::{
///     HaversineDrivingTimeCalculator, Location, RoutePlan, Vehicle, Visit, VEHICLE_DESCRIPTOR,
///     VISITS,
/// };
/// use routeforge_scoring::{calculate_score, IncrementalScoreDirector, ScoreDirector};
///
/// let depot = Location::new(49.288087, 16.562172);
/// let mut plan = RoutePlan::with_calculator(
///     "demo",
///     vec![Vehicle::new("1", 100, depot, 0).with_visits(vec![0, 1])],
///     vec![
///         Visit::new("2", "John", Location::new(49.190922, 16.624466)),
///         Visit::new("3", "Paul", Location::new(49.1767533245638, 16.50422914190477)),
///     ],
///     &HaversineDrivingTimeCalculator::default(),
/// )
/// .unwrap();
///
/// let mut director = IncrementalScoreDirector::new();
/// assert_eq!(director.calculate_score(&plan), calculate_score(&plan));
///
/// // Take John off the route; the chain notifies the arrival-time clear.
/// director.before_variable_changed(&plan, VEHICLE_DESCRIPTOR, 0, VISITS);
/// let head = plan.remove(0, &mut director).unwrap();
/// director.after_variable_changed(&plan, VEHICLE_DESCRIPTOR, 0, VISITS);
/// plan.propagate(head, &mut director).unwrap();
///
/// assert_eq!(director.calculate_score(&plan), calculate_score(&plan));
/// ```
#[derive(Debug, Default)]
pub struct IncrementalScoreDirector {
    capacity_overruns: Vec<i64>,
    travel_times: Vec<i64>,
    service_delays: Vec<i64>,
    hard_penalty: i64,
    soft_penalty: i64,
    initialized: bool,
}

impl IncrementalScoreDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the director has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn initialize(&mut self, plan: &RoutePlan) {
        let vehicle_count = plan.vehicles().len();
        self.capacity_overruns = (0..vehicle_count)
            .map(|idx| capacity_overrun(plan, idx))
            .collect();
        self.travel_times = (0..vehicle_count).map(|idx| travel_time(plan, idx)).collect();
        self.service_delays = plan.visits().iter().map(service_delay).collect();

        self.hard_penalty = self.capacity_overruns.iter().sum::<i64>()
            + self.service_delays.iter().sum::<i64>();
        self.soft_penalty = self.travel_times.iter().sum();
        self.initialized = true;

        debug!(
            event = "incremental_score_initialized",
            vehicles = vehicle_count,
            visits = self.service_delays.len(),
            hard_penalty = self.hard_penalty,
            soft_penalty = self.soft_penalty,
        );
    }

    fn current_score(&self) -> HardSoftScore {
        HardSoftScore::of(-self.hard_penalty, -self.soft_penalty)
    }

    fn retract(&mut self, descriptor_index: usize, entity_index: usize, variable_name: &str) {
        match (descriptor_index, variable_name) {
            (VISIT_DESCRIPTOR, ARRIVAL_TIME) if entity_index < self.service_delays.len() => {
                self.hard_penalty -= std::mem::take(&mut self.service_delays[entity_index]);
            }
            (VEHICLE_DESCRIPTOR, VISITS) if entity_index < self.travel_times.len() => {
                self.hard_penalty -= std::mem::take(&mut self.capacity_overruns[entity_index]);
                self.soft_penalty -= std::mem::take(&mut self.travel_times[entity_index]);
            }
            _ => self.invalidate(descriptor_index, entity_index, variable_name),
        }
    }

    fn insert(
        &mut self,
        plan: &RoutePlan,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        match (descriptor_index, variable_name) {
            (VISIT_DESCRIPTOR, ARRIVAL_TIME) if entity_index < self.service_delays.len() => {
                let delay = plan.visit(entity_index).map_or(0, service_delay);
                self.service_delays[entity_index] = delay;
                self.hard_penalty += delay;
            }
            (VEHICLE_DESCRIPTOR, VISITS) if entity_index < self.travel_times.len() => {
                let overrun = capacity_overrun(plan, entity_index);
                let travel = travel_time(plan, entity_index);
                self.capacity_overruns[entity_index] = overrun;
                self.travel_times[entity_index] = travel;
                self.hard_penalty += overrun;
                self.soft_penalty += travel;
            }
            _ => self.invalidate(descriptor_index, entity_index, variable_name),
        }
    }

    fn invalidate(&mut self, descriptor_index: usize, entity_index: usize, variable_name: &str) {
        trace!(
            event = "incremental_score_invalidated",
            descriptor_index,
            entity_index,
            variable_name,
        );
        self.initialized = false;
    }
}

impl VariableListener<RoutePlan> for IncrementalScoreDirector {
    fn before_variable_changed(
        &mut self,
        _plan: &RoutePlan,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        if !self.initialized {
            // Full calculation will happen on next calculate_score
            return;
        }
        self.retract(descriptor_index, entity_index, variable_name);
    }

    fn after_variable_changed(
        &mut self,
        plan: &RoutePlan,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        if !self.initialized {
            return;
        }
        self.insert(plan, descriptor_index, entity_index, variable_name);
    }
}

impl ScoreDirector for IncrementalScoreDirector {
    fn calculate_score(&mut self, plan: &RoutePlan) -> HardSoftScore {
        if !self.initialized {
            self.initialize(plan);
        }
        self.current_score()
    }

    fn is_incremental(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.initialized = false;
    }
}
