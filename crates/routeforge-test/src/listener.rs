//! Notification recording.

use routeforge_core::VariableListener;
use routeforge_routing::{RoutePlan, Visit, VISIT_DESCRIPTOR};

/// One observed notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub before: bool,
    pub descriptor_index: usize,
    pub entity_index: usize,
    pub variable_name: String,
    /// Arrival time of the visit at notification time, for visit notifications.
    pub arrival_time: Option<i64>,
}

/// Records every notification together with the arrival time it observed.
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub notifications: Vec<Notification>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities written, in order (one entry per after-notification).
    pub fn written(&self) -> Vec<usize> {
        self.notifications
            .iter()
            .filter(|n| !n.before)
            .map(|n| n.entity_index)
            .collect()
    }

    /// True if notifications come in before/after pairs on the same entity.
    pub fn is_balanced(&self) -> bool {
        self.notifications.len() % 2 == 0
            && self.notifications.chunks(2).all(|pair| {
                pair[0].before
                    && !pair[1].before
                    && pair[0].descriptor_index == pair[1].descriptor_index
                    && pair[0].entity_index == pair[1].entity_index
                    && pair[0].variable_name == pair[1].variable_name
            })
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    fn record(
        &mut self,
        plan: &RoutePlan,
        before: bool,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        let arrival_time = if descriptor_index == VISIT_DESCRIPTOR {
            plan.visit(entity_index).and_then(Visit::arrival_time)
        } else {
            None
        };
        self.notifications.push(Notification {
            before,
            descriptor_index,
            entity_index,
            variable_name: variable_name.to_string(),
            arrival_time,
        });
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
