//! Tests for score explanation.

use routeforge_core::HardSoftScore;
use routeforge_routing::{HaversineDrivingTimeCalculator, RoutePlan, Vehicle, Visit};
use routeforge_test::{brno_plan, random_plan, HOUR, LOCATION_1, LOCATION_2};

use crate::analysis::{explain, EntityRef};
use crate::constraints::calculate_score;

#[test]
fn test_explanation_of_brno_plan() {
    let plan = brno_plan();
    let explanation = explain(&plan);

    assert_eq!(explanation.score, HardSoftScore::of(-20, -2423));
    assert_eq!(explanation.total_match_count(), 2);
    assert_eq!(explanation.non_zero_constraints().len(), 2);

    let capacity = explanation.analysis("vehicleCapacity").unwrap();
    assert!(capacity.is_hard);
    assert_eq!(capacity.score, HardSoftScore::of(-20, 0));
    assert_eq!(
        capacity.matches[0].justification.description,
        "Vehicle '1' exceeded its max capacity by 20."
    );
    assert_eq!(
        capacity.matches[0].justification.entity,
        EntityRef::Vehicle {
            index: 0,
            id: "1".to_string(),
        }
    );

    let travel = explanation.analysis("minimizeTravelTime").unwrap();
    assert!(!travel.is_hard);
    assert_eq!(travel.weight, HardSoftScore::ONE_SOFT);
    assert_eq!(travel.match_count(), 1);
    assert_eq!(
        travel.matches[0].justification.description,
        "Vehicle '1' total travel time is 0 hours 40 minutes."
    );

    assert_eq!(
        explanation
            .analysis("serviceFinishedAfterMaxEndTime")
            .unwrap()
            .match_count(),
        0
    );
}

#[test]
fn test_lateness_justification() {
    let plan = RoutePlan::with_calculator(
        "late",
        vec![Vehicle::new("1", 100, LOCATION_1, 9 * HOUR + 45 * 60 - 843).with_visits(vec![0])],
        vec![Visit::new("2", "John", LOCATION_2)
            .with_time_window(8 * HOUR, 10 * HOUR)
            .with_service_duration(1800)],
        &HaversineDrivingTimeCalculator::default(),
    )
    .unwrap();

    let explanation = explain(&plan);
    let lateness = explanation.analysis("serviceFinishedAfterMaxEndTime").unwrap();

    assert_eq!(lateness.score, HardSoftScore::of(-15, 0));
    assert_eq!(lateness.matches[0].match_weight, 15);
    assert_eq!(
        lateness.matches[0].justification.description,
        "Visit '2' serviced with a 15-minute delay."
    );
    assert_eq!(lateness.matches[0].justification.entity.id(), "2");
}

#[test]
fn test_explanation_total_matches_calculation() {
    let mut plan = random_plan(11, 2, 12);
    for visit in 0..12 {
        let head = plan.insert(visit % 2, 0, visit).unwrap();
        plan.propagate(Some(head), &mut routeforge_core::NoopListener).unwrap();
    }

    let explanation = explain(&plan);
    assert_eq!(explanation.score, calculate_score(&plan));
    assert_eq!(
        explanation.all_matches().len(),
        explanation.total_match_count()
    );
}

#[test]
fn test_explanation_display() {
    let rendered = explain(&brno_plan()).to_string();
    assert!(rendered.starts_with("Score: -20hard/-2423soft\n"));
    assert!(rendered.contains("  vehicleCapacity (1 matches): -20hard/0soft\n"));
    assert!(rendered.contains("    Vehicle '1' exceeded its max capacity by 20.\n"));
}
