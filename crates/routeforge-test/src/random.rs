//! Seeded random plans and chain mutations.
//!
//! # Example
//!
//! ```
//! use routeforge_core::NoopListener;
//! use routeforge_test::{random_mutation, random_plan, seeded_rng};
//!
//! let mut plan = random_plan(42, 3, 10);
//! let mut rng = seeded_rng(42);
//! for _ in 0..50 {
//!     let heads = random_mutation(&plan, &mut rng)
//!         .apply(&mut plan, &mut NoopListener)
//!         .unwrap();
//!     plan.propagate_all(heads, &mut NoopListener).unwrap();
//! }
//! assert_eq!(plan.arrival_times(), plan.calculate_arrival_times());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use routeforge_core::{Result, VariableListener};
use routeforge_routing::{HaversineDrivingTimeCalculator, Location, RoutePlan, Vehicle, Visit};

use crate::brno::HOUR;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A plan with random locations around Brno and random windows; every visit
/// starts unassigned and every vehicle has capacity 50.
pub fn random_plan(seed: u64, vehicle_count: usize, visit_count: usize) -> RoutePlan {
    let mut rng = seeded_rng(seed);
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
    RoutePlan::with_calculator(
        "random",
        vehicles,
        visits,
        &HaversineDrivingTimeCalculator::default(),
    )
    .expect("random locations are all in the matrix")
}

/// A chain mutation, described but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Insert {
        vehicle: usize,
        index: usize,
        visit: usize,
    },
    Remove {
        visit: usize,
    },
    Relocate {
        visit: usize,
        vehicle: usize,
        index: usize,
    },
}

impl Mutation {
    /// Applies the mutation and returns its heads of disturbance.
    ///
    /// The listener sees the arrival-time clear of a removed or relocated
    /// visit; route changes themselves are not notified.
    pub fn apply<L>(self, plan: &mut RoutePlan, listener: &mut L) -> Result<Vec<usize>>
    where
        L: VariableListener<RoutePlan> + ?Sized,
    {
        match self {
            Mutation::Insert {
                vehicle,
                index,
                visit,
            } => Ok(vec![plan.insert(vehicle, index, visit)?]),
            Mutation::Remove { visit } => Ok(plan.remove(visit, listener)?.into_iter().collect()),
            Mutation::Relocate {
                visit,
                vehicle,
                index,
            } => Ok(plan.relocate(visit, vehicle, index, listener)?.heads().to_vec()),
        }
    }

    /// Vehicles whose route the mutation changes, without duplicates.
    pub fn affected_vehicles(&self, plan: &RoutePlan) -> Vec<usize> {
        let owner = |visit: usize| plan.visit(visit).and_then(Visit::vehicle);
        match *self {
            Mutation::Insert { vehicle, .. } => vec![vehicle],
            Mutation::Remove { visit } => owner(visit).into_iter().collect(),
            Mutation::Relocate { visit, vehicle, .. } => match owner(visit) {
                Some(source) if source != vehicle => vec![source, vehicle],
                _ => vec![vehicle],
            },
        }
    }
}

/// Picks a legal mutation: unassigned visits get inserted, assigned ones are
/// removed or relocated.
pub fn random_mutation(plan: &RoutePlan, rng: &mut ChaCha8Rng) -> Mutation {
    let vehicle_count = plan.vehicles().len();
    let visit = rng.random_range(0..plan.visits().len());
    let route_len = |vehicle: usize| plan.vehicle(vehicle).map_or(0, |v| v.visits().len());
    let owner = plan.visit(visit).and_then(Visit::vehicle);
    match owner {
        None => {
            let vehicle = rng.random_range(0..vehicle_count);
            Mutation::Insert {
                vehicle,
                index: rng.random_range(0..=route_len(vehicle)),
                visit,
            }
        }
        Some(_) if rng.random_bool(0.3) => Mutation::Remove { visit },
        Some(source) => {
            let vehicle = rng.random_range(0..vehicle_count);
            let mut len = route_len(vehicle);
            if vehicle == source {
                len -= 1;
            }
            Mutation::Relocate {
                visit,
                vehicle,
                index: rng.random_range(0..=len),
            }
        }
    }
}
