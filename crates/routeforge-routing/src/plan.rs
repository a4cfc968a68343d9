//! The planning solution: vehicles, visits and the shared driving-time matrix.

use std::sync::Arc;

use routeforge_core::{
    HardSoftScore, NoopListener, PlanningSolution, Result, RoutingError, VariableListener,
};
use tracing::debug;

use crate::domain::{Vehicle, Visit};
use crate::geo::{DrivingTimeCalculator, Location};
use crate::matrix::DrivingTimeMatrix;

/// Smallest latitude/longitude rectangle containing every location of a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south_west_corner: Location,
    pub north_east_corner: Location,
}

/// A vehicle routing plan, mutated in place by the optimizer.
///
/// Construction resolves every location against the matrix, links any
/// pre-assigned routes and computes all arrival times, so a constructed plan
/// is always consistent and its driving-time lookups cannot fail.
///
/// # Examples
///
/// ```
/// use routeforge_routing::{HaversineDrivingTimeCalculator, Location, RoutePlan, Vehicle, Visit};
///
/// let depot = Location::new(49.288087, 16.562172);
/// let vehicles = vec![Vehicle::new("1", 100, depot, 7 * 3600).with_visits(vec![0])];
/// let visits = vec![Visit::new("2", "John", Location::new(49.190922, 16.624466))];
///
/// let plan = RoutePlan::with_calculator(
///     "demo",
///     vehicles,
///     visits,
///     &HaversineDrivingTimeCalculator::default(),
/// )
/// .unwrap();
///
/// assert_eq!(plan.visit(0).unwrap().arrival_time(), Some(7 * 3600 + 843));
/// ```
#[derive(Clone, Debug)]
pub struct RoutePlan {
    pub name: String,
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) visits: Vec<Visit>,
    matrix: Arc<DrivingTimeMatrix>,
    score: Option<HardSoftScore>,
}

impl RoutePlan {
    /// Builds a plan over a prebuilt matrix.
    ///
    /// Fails with [`RoutingError::MissingRouteData`] if a home or visit
    /// location is not in the matrix, and with [`RoutingError::IllegalMove`]
    /// if a pre-assigned route names an unknown visit or a visit twice.
    pub fn new(
        name: impl Into<String>,
        mut vehicles: Vec<Vehicle>,
        mut visits: Vec<Visit>,
        matrix: Arc<DrivingTimeMatrix>,
    ) -> Result<Self> {
        for vehicle in &mut vehicles {
            vehicle.home_slot = resolve_slot(&matrix, &vehicle.home_location)?;
        }
        for visit in &mut visits {
            visit.location_slot = resolve_slot(&matrix, &visit.location)?;
            visit.vehicle = None;
            visit.previous_visit = None;
            visit.next_visit = None;
            visit.arrival_time = None;
        }

        for (vehicle_idx, vehicle) in vehicles.iter().enumerate() {
            let mut previous = None;
            for &visit_idx in &vehicle.visits {
                let visit = visits.get_mut(visit_idx).ok_or_else(|| {
                    RoutingError::IllegalMove(format!(
                        "vehicle '{}' is pre-assigned unknown visit {}",
                        vehicle.id, visit_idx
                    ))
                })?;
                if visit.vehicle.is_some() {
                    return Err(RoutingError::IllegalMove(format!(
                        "visit '{}' is pre-assigned to more than one route position",
                        visit.id
                    )));
                }
                visit.vehicle = Some(vehicle_idx);
                visit.previous_visit = previous;
                if let Some(previous) = previous {
                    visits[previous].next_visit = Some(visit_idx);
                }
                previous = Some(visit_idx);
            }
        }

        let mut plan = Self {
            name: name.into(),
            vehicles,
            visits,
            matrix,
            score: None,
        };
        plan.initialize_arrival_times()?;

        debug!(
            event = "route_plan_created",
            plan = %plan.name,
            vehicles = plan.vehicles.len(),
            visits = plan.visits.len(),
            locations = plan.matrix.len(),
        );
        Ok(plan)
    }

    /// Builds the matrix over every home and visit location, then the plan.
    pub fn with_calculator<C>(
        name: impl Into<String>,
        vehicles: Vec<Vehicle>,
        visits: Vec<Visit>,
        calculator: &C,
    ) -> Result<Self>
    where
        C: DrivingTimeCalculator + ?Sized,
    {
        let locations: Vec<Location> = vehicles
            .iter()
            .map(|vehicle| vehicle.home_location)
            .chain(visits.iter().map(|visit| visit.location))
            .collect();
        let matrix = DrivingTimeMatrix::build(calculator, &locations);
        Self::new(name, vehicles, visits, Arc::new(matrix))
    }

    fn initialize_arrival_times(&mut self) -> Result<()> {
        self.recalculate_arrival_times(&mut NoopListener)
    }

    /// Clears every arrival time and propagates each route from its first
    /// visit, leaving the plan as if freshly constructed.
    pub fn recalculate_arrival_times<L>(&mut self, listener: &mut L) -> Result<()>
    where
        L: VariableListener<RoutePlan> + ?Sized,
    {
        for visit in &mut self.visits {
            visit.arrival_time = None;
        }
        let heads: Vec<usize> = self
            .vehicles
            .iter()
            .filter_map(|vehicle| vehicle.visits.first().copied())
            .collect();
        self.propagate_all(heads, listener)?;
        Ok(())
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn vehicle(&self, idx: usize) -> Option<&Vehicle> {
        self.vehicles.get(idx)
    }

    pub fn visit(&self, idx: usize) -> Option<&Visit> {
        self.visits.get(idx)
    }

    pub fn matrix(&self) -> &Arc<DrivingTimeMatrix> {
        &self.matrix
    }

    /// Indices of visits on no route.
    pub fn unassigned_visits(&self) -> impl Iterator<Item = usize> + '_ {
        self.visits
            .iter()
            .enumerate()
            .filter(|(_, visit)| !visit.is_assigned())
            .map(|(idx, _)| idx)
    }

    /// Current arrival time of every visit, by index.
    pub fn arrival_times(&self) -> Vec<Option<i64>> {
        self.visits.iter().map(Visit::arrival_time).collect()
    }

    /// Sum of the demands on a vehicle's route.
    pub fn total_demand(&self, vehicle_idx: usize) -> i64 {
        self.vehicles
            .get(vehicle_idx)
            .map_or(0, |vehicle| vehicle.total_demand(&self.visits))
    }

    /// Driving time into a visit from its predecessor, or from the depot if
    /// it is first on its route. `None` for unassigned visits.
    pub fn driving_time_from_previous_standstill(&self, visit_idx: usize) -> Option<i64> {
        let visit = self.visits.get(visit_idx)?;
        let vehicle = self.vehicles.get(visit.vehicle?)?;
        let from_slot = match visit.previous_visit {
            Some(previous) => self.visits.get(previous)?.location_slot,
            None => vehicle.home_slot,
        };
        Some(self.matrix.seconds_between(from_slot, visit.location_slot))
    }

    /// Depot to first visit, every leg in between, last visit back to depot.
    ///
    /// Zero for a vehicle with an empty route.
    pub fn total_driving_time_seconds(&self, vehicle_idx: usize) -> i64 {
        let Some(vehicle) = self.vehicles.get(vehicle_idx) else {
            return 0;
        };
        if vehicle.visits.is_empty() {
            return 0;
        }
        let mut total = 0;
        let mut from_slot = vehicle.home_slot;
        for visit in vehicle.visits.iter().filter_map(|&idx| self.visits.get(idx)) {
            total += self.matrix.seconds_between(from_slot, visit.location_slot);
            from_slot = visit.location_slot;
        }
        total + self.matrix.seconds_between(from_slot, vehicle.home_slot)
    }

    /// Driving time summed over all vehicles.
    pub fn total_driving_time(&self) -> i64 {
        (0..self.vehicles.len())
            .map(|idx| self.total_driving_time_seconds(idx))
            .sum()
    }

    /// `None` for a plan without any location.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut locations = self
            .vehicles
            .iter()
            .map(|vehicle| vehicle.home_location)
            .chain(self.visits.iter().map(|visit| visit.location));
        let first = locations.next()?;
        let (mut south, mut west, mut north, mut east) = (
            first.latitude,
            first.longitude,
            first.latitude,
            first.longitude,
        );
        for location in locations {
            south = south.min(location.latitude);
            west = west.min(location.longitude);
            north = north.max(location.latitude);
            east = east.max(location.longitude);
        }
        Some(BoundingBox {
            south_west_corner: Location::new(south, west),
            north_east_corner: Location::new(north, east),
        })
    }

    /// Arrival times recomputed from scratch by walking each route.
    ///
    /// Ignores the stored arrival times and the previous/next links, so it
    /// serves as the reference the incremental propagation must agree with.
    pub fn calculate_arrival_times(&self) -> Vec<Option<i64>> {
        let mut arrivals = vec![None; self.visits.len()];
        for vehicle in &self.vehicles {
            let mut departure = vehicle.departure_time;
            let mut from_slot = vehicle.home_slot;
            for &visit_idx in &vehicle.visits {
                let Some(visit) = self.visits.get(visit_idx) else {
                    break;
                };
                let arrival = departure + self.matrix.seconds_between(from_slot, visit.location_slot);
                arrivals[visit_idx] = Some(arrival);
                departure = arrival.max(visit.min_start_time) + visit.service_duration;
                from_slot = visit.location_slot;
            }
        }
        arrivals
    }

    /// Checks that every route agrees with the owner/previous/next fields of
    /// its visits and that unassigned visits carry no chain data.
    pub fn validate(&self) -> Result<()> {
        let mut seen = vec![false; self.visits.len()];
        for (vehicle_idx, vehicle) in self.vehicles.iter().enumerate() {
            let mut previous = None;
            for (position, &visit_idx) in vehicle.visits.iter().enumerate() {
                let visit = self.visits.get(visit_idx).ok_or_else(|| {
                    RoutingError::InvariantViolation(format!(
                        "vehicle '{}' references unknown visit {}",
                        vehicle.id, visit_idx
                    ))
                })?;
                if std::mem::replace(&mut seen[visit_idx], true) {
                    return Err(RoutingError::InvariantViolation(format!(
                        "visit '{}' appears on more than one route position",
                        visit.id
                    )));
                }
                let next = vehicle.visits.get(position + 1).copied();
                if visit.vehicle != Some(vehicle_idx)
                    || visit.previous_visit != previous
                    || visit.next_visit != next
                {
                    return Err(RoutingError::InvariantViolation(format!(
                        "visit '{}' links disagree with route of vehicle '{}'",
                        visit.id, vehicle.id
                    )));
                }
                previous = Some(visit_idx);
            }
        }
        for (visit_idx, visit) in self.visits.iter().enumerate() {
            if !seen[visit_idx]
                && (visit.vehicle.is_some()
                    || visit.previous_visit.is_some()
                    || visit.next_visit.is_some()
                    || visit.arrival_time.is_some())
            {
                return Err(RoutingError::InvariantViolation(format!(
                    "unassigned visit '{}' still carries chain data",
                    visit.id
                )));
            }
        }
        Ok(())
    }
}

impl PlanningSolution for RoutePlan {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.visits.iter().all(Visit::is_assigned)
    }
}

fn resolve_slot(matrix: &DrivingTimeMatrix, location: &Location) -> Result<usize> {
    matrix
        .slot_of(location)
        .ok_or_else(|| RoutingError::MissingRouteData {
            from: location.to_string(),
            to: "any location".to_string(),
        })
}
