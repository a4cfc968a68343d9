//! The vehicle routing constraints and the bulk score calculation.
//!
//! - `vehicleCapacity` (hard): demand on a route beyond the vehicle capacity
//! - `serviceFinishedAfterMaxEndTime` (hard): minutes of service past the
//!   visit's window
//! - `minimizeTravelTime` (soft): seconds driven per vehicle, depot to depot

use routeforge_core::{ConstraintRef, HardSoftScore, ImpactType};
use routeforge_routing::{RoutePlan, Visit};

/// Package of every routing constraint.
pub const CONSTRAINT_PACKAGE: &str = "vehiclerouting";

/// The constraints a routing plan is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingConstraint {
    VehicleCapacity,
    ServiceFinishedAfterMaxEndTime,
    MinimizeTravelTime,
}

impl RoutingConstraint {
    /// All constraints, hard first.
    pub const ALL: [RoutingConstraint; 3] = [
        RoutingConstraint::VehicleCapacity,
        RoutingConstraint::ServiceFinishedAfterMaxEndTime,
        RoutingConstraint::MinimizeTravelTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RoutingConstraint::VehicleCapacity => "vehicleCapacity",
            RoutingConstraint::ServiceFinishedAfterMaxEndTime => "serviceFinishedAfterMaxEndTime",
            RoutingConstraint::MinimizeTravelTime => "minimizeTravelTime",
        }
    }

    pub fn constraint_ref(self) -> ConstraintRef {
        ConstraintRef::new(CONSTRAINT_PACKAGE, self.name())
    }

    /// Score of a single unit of match weight.
    pub fn weight(self) -> HardSoftScore {
        if self.is_hard() {
            HardSoftScore::ONE_HARD
        } else {
            HardSoftScore::ONE_SOFT
        }
    }

    pub fn is_hard(self) -> bool {
        !matches!(self, RoutingConstraint::MinimizeTravelTime)
    }

    pub fn impact_type(self) -> ImpactType {
        ImpactType::Penalty
    }

    /// Score impact of a match with the given weight.
    pub fn impact(self, match_weight: i64) -> HardSoftScore {
        self.weight().scale(self.impact_type().apply(match_weight))
    }
}

/// Demand beyond capacity on a vehicle's route, or 0.
pub fn capacity_overrun(plan: &RoutePlan, vehicle_idx: usize) -> i64 {
    plan.vehicle(vehicle_idx).map_or(0, |vehicle| {
        (plan.total_demand(vehicle_idx) - vehicle.capacity).max(0)
    })
}

/// Lateness penalty of a visit in minutes; 0 for unplaced visits.
#[inline]
pub fn service_delay(visit: &Visit) -> i64 {
    visit.service_finished_delay_in_minutes()
}

/// Seconds a vehicle drives; 0 for an empty route.
#[inline]
pub fn travel_time(plan: &RoutePlan, vehicle_idx: usize) -> i64 {
    plan.total_driving_time_seconds(vehicle_idx)
}

/// Scores the whole plan in one pass.
///
/// # Examples
///
/// ```
/// use routeforge_routing::{HaversineDrivingTimeCalculator, Location, RoutePlan, Vehicle, Visit};
/// use routeforge_scoring::calculate_score;
/// use routeforge_core::HardSoftScore;
///
/// let depot = Location::new(49.288087, 16.562172);
/// let plan = RoutePlan::with_calculator(
///     "demo",
///     vec![Vehicle::new("1", 10, depot, 0).with_visits(vec![0])],
///     vec![Visit::new("2", "John", Location::new(49.190922, 16.624466)).with_demand(12)],
///     &HaversineDrivingTimeCalculator::default(),
/// )
/// .unwrap();
///
/// assert_eq!(calculate_score(&plan), HardSoftScore::of(-2, -2 * 843));
/// ```
pub fn calculate_score(plan: &RoutePlan) -> HardSoftScore {
    let mut score = HardSoftScore::ZERO;
    for vehicle_idx in 0..plan.vehicles().len() {
        score = score
            + RoutingConstraint::VehicleCapacity.impact(capacity_overrun(plan, vehicle_idx))
            + RoutingConstraint::MinimizeTravelTime.impact(travel_time(plan, vehicle_idx));
    }
    for visit in plan.visits() {
        score = score + RoutingConstraint::ServiceFinishedAfterMaxEndTime.impact(service_delay(visit));
    }
    score
}
