//! Tests for plan construction, visit timing and plan-wide queries.

use std::sync::Arc;

use routeforge_core::{HardSoftScore, PlanningSolution, RoutingError};

use crate::test_utils::{brno_plan, HOUR, LOCATION_1, LOCATION_2, LOCATION_3};
use crate::{
    DrivingTimeCalculator, HaversineDrivingTimeCalculator, Location, RoutePlan, Vehicle, Visit,
};

fn late_visit(arrival: i64) -> Visit {
    let mut visit = Visit::new("1", "A", LOCATION_2)
        .with_time_window(8 * HOUR, 10 * HOUR)
        .with_service_duration(1800);
    visit.arrival_time = Some(arrival);
    visit
}

#[test]
fn test_visit_timing() {
    let early = late_visit(7 * HOUR);
    assert_eq!(early.start_service_time(), Some(8 * HOUR));
    assert_eq!(early.departure_time(), Some(8 * HOUR + 1800));
    assert!(!early.is_service_finished_after_max_end_time());

    let unplaced = Visit::new("2", "B", LOCATION_2);
    assert_eq!(unplaced.start_service_time(), None);
    assert_eq!(unplaced.departure_time(), None);
    assert_eq!(unplaced.service_finished_delay_in_minutes(), 0);
}

#[test]
fn test_service_delay_minutes() {
    // 09:45 arrival + 30 minutes of service ends 15 minutes after 10:00.
    let visit = late_visit(9 * HOUR + 45 * 60);
    assert!(visit.is_service_finished_after_max_end_time());
    assert_eq!(visit.service_finished_delay_in_minutes(), 15);

    assert_eq!(late_visit(9 * HOUR + 45 * 60 + 29).service_finished_delay_in_minutes(), 15);
    assert_eq!(late_visit(9 * HOUR + 45 * 60 + 30).service_finished_delay_in_minutes(), 16);

    // Finishing exactly on time is not late.
    let on_time = late_visit(9 * HOUR + 30 * 60);
    assert!(!on_time.is_service_finished_after_max_end_time());
    assert_eq!(on_time.service_finished_delay_in_minutes(), 0);
}

#[test]
fn test_construction_links_preassigned_routes() {
    let plan = brno_plan();

    plan.validate().unwrap();
    assert_eq!(plan.name, "brno");
    assert_eq!(plan.vehicles().len(), 2);
    assert_eq!(plan.visits().len(), 3);
    assert_eq!(plan.matrix().len(), 3);
    assert_eq!(plan.unassigned_visits().collect::<Vec<_>>(), vec![2]);
    assert!(!plan.is_initialized());
}

#[test]
fn test_construction_rejects_unknown_location() {
    let calculator = HaversineDrivingTimeCalculator::default();
    let matrix = Arc::new(calculator.build_matrix(&[LOCATION_1, LOCATION_2]));
    let vehicles = vec![Vehicle::new("1", 10, LOCATION_1, 0)];
    let visits = vec![Visit::new("2", "Paul", LOCATION_3)];

    let err = RoutePlan::new("missing", vehicles, visits, matrix).unwrap_err();
    assert!(matches!(err, RoutingError::MissingRouteData { .. }));
}

#[test]
fn test_construction_rejects_bad_preassignment() {
    let calculator = HaversineDrivingTimeCalculator::default();
    let visits = || vec![Visit::new("2", "John", LOCATION_2)];

    let twice = vec![Vehicle::new("1", 10, LOCATION_1, 0).with_visits(vec![0, 0])];
    let err = RoutePlan::with_calculator("twice", twice, visits(), &calculator).unwrap_err();
    assert!(matches!(err, RoutingError::IllegalMove(_)));

    let shared = vec![
        Vehicle::new("1", 10, LOCATION_1, 0).with_visits(vec![0]),
        Vehicle::new("2", 10, LOCATION_1, 0).with_visits(vec![0]),
    ];
    assert!(RoutePlan::with_calculator("shared", shared, visits(), &calculator).is_err());

    let unknown = vec![Vehicle::new("1", 10, LOCATION_1, 0).with_visits(vec![4])];
    assert!(RoutePlan::with_calculator("unknown", unknown, visits(), &calculator).is_err());
}

#[test]
fn test_total_demand() {
    let plan = brno_plan();
    assert_eq!(plan.total_demand(0), 120);
    assert_eq!(plan.total_demand(1), 0);
    assert_eq!(plan.vehicle(0).unwrap().total_demand(plan.visits()), 120);
}

#[test]
fn test_driving_times() {
    let mut plan = brno_plan();

    assert_eq!(plan.total_driving_time_seconds(0), 843 + 639 + 941);
    assert_eq!(plan.total_driving_time_seconds(1), 0);
    assert_eq!(plan.total_driving_time(), 2423);
    assert_eq!(plan.driving_time_from_previous_standstill(0), Some(843));
    assert_eq!(plan.driving_time_from_previous_standstill(1), Some(639));
    assert_eq!(plan.driving_time_from_previous_standstill(2), None);

    plan.insert(1, 0, 2).unwrap();
    assert_eq!(plan.total_driving_time_seconds(1), 2 * 941);
    assert_eq!(plan.total_driving_time(), 2423 + 2 * 941);
}

#[test]
fn test_bounding_box() {
    let plan = brno_plan();
    let bounds = plan.bounding_box().unwrap();

    assert_eq!(
        bounds.south_west_corner,
        Location::new(LOCATION_3.latitude, LOCATION_3.longitude)
    );
    assert_eq!(
        bounds.north_east_corner,
        Location::new(LOCATION_1.latitude, LOCATION_2.longitude)
    );
}

#[test]
fn test_empty_plan() {
    let plan = RoutePlan::with_calculator(
        "empty",
        Vec::new(),
        Vec::new(),
        &HaversineDrivingTimeCalculator::default(),
    )
    .unwrap();

    assert!(plan.bounding_box().is_none());
    assert!(plan.is_initialized());
    assert_eq!(plan.total_driving_time(), 0);
}

#[test]
fn test_score_slot() {
    let mut plan = brno_plan();
    assert_eq!(plan.score(), None);

    plan.set_score(Some(HardSoftScore::of(0, -2423)));
    assert_eq!(plan.score(), Some(HardSoftScore::of(0, -2423)));
}

#[test]
fn test_validate_detects_stale_links() {
    let mut plan = brno_plan();
    plan.visits[2].vehicle = Some(1);

    let err = plan.validate().unwrap_err();
    assert!(matches!(err, RoutingError::InvariantViolation(_)));
}

#[test]
fn test_recalculate_arrival_times_repairs_stale_values() {
    let mut plan = brno_plan();
    let expected = plan.arrival_times();
    plan.visits[0].arrival_time = Some(0);
    plan.visits[2].arrival_time = Some(HOUR);

    plan.recalculate_arrival_times(&mut routeforge_core::NoopListener)
        .unwrap();

    assert_eq!(plan.arrival_times(), expected);
    assert_eq!(plan.arrival_times(), plan.calculate_arrival_times());
}
