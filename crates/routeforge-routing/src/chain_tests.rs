//! Tests for the route chain primitives.

use routeforge_core::{NoopListener, RoutingError};

use crate::test_utils::{brno_plan, RecordingListener};
use crate::{Relocation, RoutePlan, ARRIVAL_TIME, VISIT_DESCRIPTOR};

const JOHN: usize = 0;
const PAUL: usize = 1;
const RINGO: usize = 2;

fn routes(plan: &RoutePlan) -> Vec<Vec<usize>> {
    plan.vehicles().iter().map(|v| v.visits().to_vec()).collect()
}

#[test]
fn test_insert_links_neighbours() {
    let mut plan = brno_plan();

    let head = plan.insert(0, 1, RINGO).unwrap();

    assert_eq!(head, RINGO);
    assert_eq!(routes(&plan), vec![vec![JOHN, RINGO, PAUL], vec![]]);
    let ringo = plan.visit(RINGO).unwrap();
    assert_eq!(ringo.vehicle(), Some(0));
    assert_eq!(ringo.previous_visit(), Some(JOHN));
    assert_eq!(ringo.next_visit(), Some(PAUL));
    assert_eq!(plan.visit(JOHN).unwrap().next_visit(), Some(RINGO));
    assert_eq!(plan.visit(PAUL).unwrap().previous_visit(), Some(RINGO));
    plan.validate().unwrap();
}

#[test]
fn test_insert_into_empty_route() {
    let mut plan = brno_plan();

    plan.insert(1, 0, RINGO).unwrap();

    let ringo = plan.visit(RINGO).unwrap();
    assert_eq!(ringo.vehicle(), Some(1));
    assert_eq!(ringo.previous_visit(), None);
    assert_eq!(ringo.next_visit(), None);
    plan.validate().unwrap();
}

#[test]
fn test_insert_preconditions() {
    let mut plan = brno_plan();
    let before = routes(&plan);

    assert!(matches!(plan.insert(0, 0, JOHN), Err(RoutingError::IllegalMove(_))));
    assert!(matches!(plan.insert(0, 3, RINGO), Err(RoutingError::IllegalMove(_))));
    assert!(matches!(plan.insert(5, 0, RINGO), Err(RoutingError::IllegalMove(_))));
    assert!(matches!(plan.insert(0, 0, 9), Err(RoutingError::IllegalMove(_))));

    assert_eq!(routes(&plan), before);
    assert!(!plan.visit(RINGO).unwrap().is_assigned());
    plan.validate().unwrap();
}

#[test]
fn test_remove_returns_next_and_clears_visit() {
    let mut plan = brno_plan();

    assert_eq!(plan.remove(JOHN, &mut NoopListener).unwrap(), Some(PAUL));

    let john = plan.visit(JOHN).unwrap();
    assert_eq!(john.vehicle(), None);
    assert_eq!(john.previous_visit(), None);
    assert_eq!(john.next_visit(), None);
    assert_eq!(john.arrival_time(), None);
    assert_eq!(plan.visit(PAUL).unwrap().previous_visit(), None);
    assert_eq!(routes(&plan), vec![vec![PAUL], vec![]]);
    plan.validate().unwrap();

    assert_eq!(plan.remove(PAUL, &mut NoopListener).unwrap(), None);
    assert!(plan.vehicle(0).unwrap().visits().is_empty());
}

#[test]
fn test_remove_notifies_arrival_clear() {
    let mut plan = brno_plan();
    let old_arrival = plan.visit(JOHN).unwrap().arrival_time();
    let mut listener = RecordingListener::default();

    plan.remove(JOHN, &mut listener).unwrap();

    assert_eq!(listener.notifications.len(), 2);
    let (before, after) = (&listener.notifications[0], &listener.notifications[1]);
    assert!(before.before);
    assert!(!after.before);
    for notification in [before, after] {
        assert_eq!(notification.descriptor_index, VISIT_DESCRIPTOR);
        assert_eq!(notification.entity_index, JOHN);
        assert_eq!(notification.variable_name, ARRIVAL_TIME);
    }
    assert_eq!(before.arrival_time, old_arrival);
    assert_eq!(after.arrival_time, None);
}

#[test]
fn test_rejected_remove_sends_no_notification() {
    let mut plan = brno_plan();
    let mut listener = RecordingListener::default();

    assert!(plan.remove(RINGO, &mut listener).is_err());
    assert!(plan.relocate(JOHN, 0, 2, &mut listener).is_err());

    assert!(listener.notifications.is_empty());
}

#[test]
fn test_remove_unassigned_is_illegal() {
    let mut plan = brno_plan();
    let err = plan.remove(RINGO, &mut NoopListener).unwrap_err();
    assert_eq!(err, RoutingError::IllegalMove("visit '4' is not assigned".to_string()));
}

#[test]
fn test_relocate_across_vehicles() {
    let mut plan = brno_plan();

    let relocation = plan.relocate(JOHN, 1, 0, &mut NoopListener).unwrap();

    assert_eq!(
        relocation,
        Relocation {
            source_head: Some(PAUL),
            target_head: JOHN,
        }
    );
    assert_eq!(relocation.heads().as_slice(), &[JOHN, PAUL]);
    assert_eq!(routes(&plan), vec![vec![PAUL], vec![JOHN]]);
    plan.validate().unwrap();
}

#[test]
fn test_relocate_within_route_uses_index_after_removal() {
    let mut plan = brno_plan();
    plan.insert(0, 2, RINGO).unwrap();

    // [John, Paul, Ringo] minus John is [Paul, Ringo]; index 2 appends.
    let relocation = plan.relocate(JOHN, 0, 2, &mut NoopListener).unwrap();

    assert_eq!(routes(&plan), vec![vec![PAUL, RINGO, JOHN], vec![]]);
    assert_eq!(relocation.source_head, Some(PAUL));
    plan.validate().unwrap();

    // Moving the last visit leaves no source head.
    let relocation = plan.relocate(JOHN, 0, 0, &mut NoopListener).unwrap();
    assert_eq!(relocation.source_head, None);
    assert_eq!(relocation.heads().as_slice(), &[JOHN]);
    assert_eq!(routes(&plan), vec![vec![JOHN, PAUL, RINGO], vec![]]);
}

#[test]
fn test_relocate_preconditions_leave_plan_untouched() {
    let mut plan = brno_plan();
    let before = routes(&plan);
    let arrivals = plan.arrival_times();

    let mut noop = NoopListener;
    assert!(matches!(plan.relocate(JOHN, 0, 2, &mut noop), Err(RoutingError::IllegalMove(_))));
    assert!(matches!(plan.relocate(JOHN, 1, 1, &mut noop), Err(RoutingError::IllegalMove(_))));
    assert!(matches!(plan.relocate(JOHN, 7, 0, &mut noop), Err(RoutingError::IllegalMove(_))));
    assert!(matches!(plan.relocate(RINGO, 0, 0, &mut noop), Err(RoutingError::IllegalMove(_))));

    assert_eq!(routes(&plan), before);
    assert_eq!(plan.arrival_times(), arrivals);
    plan.validate().unwrap();
}

#[test]
fn test_position_of() {
    let plan = brno_plan();
    assert_eq!(plan.position_of(PAUL).unwrap(), (0, 1));
    assert!(plan.position_of(RINGO).is_err());
}
