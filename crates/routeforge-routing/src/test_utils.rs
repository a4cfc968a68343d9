//! Test utilities for routeforge-routing
//!
//! Provides common test fixtures used across the crate's test modules.

// Mirrors the fixtures in `routeforge-test` (`brno`, `random`, `listener`),
// which this crate cannot depend on. Keep the two copies in step; the only
// intended difference is that `random_mutation` here applies the move.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use routeforge_core::{NoopListener, VariableListener};

use crate::{HaversineDrivingTimeCalculator, Location, RoutePlan, Vehicle, Visit};

pub const LOCATION_1: Location = Location::new(49.288087, 16.562172);
pub const LOCATION_2: Location = Location::new(49.190922, 16.624466);
pub const LOCATION_3: Location = Location::new(49.1767533245638, 16.50422914190477);

pub const HOUR: i64 = 3600;

/// One vehicle from LOCATION_1 at 07:00 serving John then Paul, plus an idle
/// second vehicle. John waits for his 08:00 window; nobody is late.
///
/// Arrivals: John 07:14:03, Paul 08:40:39.
pub fn brno_plan() -> RoutePlan {
    let vehicles = vec![
        Vehicle::new("1", 100, LOCATION_1, 7 * HOUR).with_visits(vec![0, 1]),
        Vehicle::new("2", 100, LOCATION_1, 7 * HOUR),
    ];
    let visits = vec![
        Visit::new("2", "John", LOCATION_2)
            .with_demand(80)
            .with_time_window(8 * HOUR, 10 * HOUR)
            .with_service_duration(1800),
        Visit::new("3", "Paul", LOCATION_3)
            .with_demand(40)
            .with_time_window(8 * HOUR, 10 * HOUR)
            .with_service_duration(1800),
        Visit::new("4", "Ringo", LOCATION_3)
            .with_demand(10)
            .with_service_duration(600),
    ];
    RoutePlan::with_calculator("brno", vehicles, visits, &HaversineDrivingTimeCalculator::default())
        .unwrap()
}

/// A plan with random locations around Brno and random windows; every visit
/// starts unassigned.
pub fn random_plan(seed: u64, vehicle_count: usize, visit_count: usize) -> RoutePlan {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let location = |rng: &mut ChaCha8Rng| {
        Location::new(rng.random_range(49.10..49.30), rng.random_range(16.45..16.70))
    };
    let vehicles = (0..vehicle_count)
        .map(|i| Vehicle::new(format!("v{}", i), 50, location(&mut rng), 7 * HOUR))
        .collect();
    let visits = (0..visit_count)
        .map(|i| {
            let min_start = rng.random_range(7..12) * HOUR;
            let max_end = min_start + rng.random_range(1..4) * HOUR;
            Visit::new(format!("{}", i), format!("visit {}", i), location(&mut rng))
                .with_demand(rng.random_range(1..20))
                .with_time_window(min_start, max_end)
                .with_service_duration(rng.random_range(0..40) * 60)
        })
        .collect();
    RoutePlan::with_calculator("random", vehicles, visits, &HaversineDrivingTimeCalculator::default())
        .unwrap()
}

/// Applies one random chain mutation and returns its heads of disturbance.
pub fn random_mutation(plan: &mut RoutePlan, rng: &mut ChaCha8Rng) -> Vec<usize> {
    let vehicle_count = plan.vehicles().len();
    let visit_idx = rng.random_range(0..plan.visits().len());
    let owner = plan.visit(visit_idx).unwrap().vehicle();
    match owner {
        None => {
            let vehicle = rng.random_range(0..vehicle_count);
            let index = rng.random_range(0..=plan.vehicle(vehicle).unwrap().visits().len());
            vec![plan.insert(vehicle, index, visit_idx).unwrap()]
        }
        Some(_) if rng.random_bool(0.3) => plan
            .remove(visit_idx, &mut NoopListener)
            .unwrap()
            .into_iter()
            .collect(),
        Some(source) => {
            let target = rng.random_range(0..vehicle_count);
            let mut len = plan.vehicle(target).unwrap().visits().len();
            if target == source {
                len -= 1;
            }
            let index = rng.random_range(0..=len);
            plan.relocate(visit_idx, target, index, &mut NoopListener)
                .unwrap()
                .heads()
                .to_vec()
        }
    }
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// One observed notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub before: bool,
    pub descriptor_index: usize,
    pub entity_index: usize,
    pub variable_name: String,
    pub arrival_time: Option<i64>,
}

/// Records every notification together with the arrival time it observed.
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub notifications: Vec<Notification>,
}

impl RecordingListener {
    fn record(
        &mut self,
        plan: &RoutePlan,
        before: bool,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        self.notifications.push(Notification {
            before,
            descriptor_index,
            entity_index,
            variable_name: variable_name.to_string(),
            arrival_time: plan.visit(entity_index).and_then(Visit::arrival_time),
        });
    }

    /// Entities written, in order (one entry per after-notification).
    pub fn written(&self) -> Vec<usize> {
        self.notifications
            .iter()
            .filter(|n| !n.before)
            .map(|n| n.entity_index)
            .collect()
    }
}

impl VariableListener<RoutePlan> for RecordingListener {
    fn before_variable_changed(
        &mut self,
        plan: &RoutePlan,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        self.record(plan, true, descriptor_index, entity_index, variable_name);
    }

    fn after_variable_changed(
        &mut self,
        plan: &RoutePlan,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        self.record(plan, false, descriptor_index, entity_index, variable_name);
    }
}
