//! Incremental arrival-time propagation along a route.
//!
//! After a chain mutation only the suffix starting at the head of
//! disturbance can have stale arrival times, and often only a prefix of that
//! suffix actually changes. Propagation walks forward from the head and stops
//! as soon as a recomputed arrival matches the stored one.

use routeforge_core::{Result, RoutingError, VariableListener};
use tracing::trace;

use crate::domain::{ARRIVAL_TIME, VISIT_DESCRIPTOR};
use crate::plan::RoutePlan;

impl RoutePlan {
    /// Recomputes arrival times from `head` forward.
    ///
    /// The head is always written, even when its value is unchanged; later
    /// visits are written until one already holds the recomputed value or
    /// the route ends. An unassigned head gets its arrival time cleared.
    /// Every write is wrapped in the listener's before/after pair.
    ///
    /// Returns the number of arrival times written.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvariantViolation`] if the chain is contradictory:
    /// a dangling index, a visit whose owner or links disagree with its
    /// neighbours, or a cycle.
    pub fn propagate<L>(&mut self, head: Option<usize>, listener: &mut L) -> Result<usize>
    where
        L: VariableListener<RoutePlan> + ?Sized,
    {
        let Some(head) = head else {
            return Ok(0);
        };
        let visit = self.visits.get(head).ok_or_else(|| dangling(head))?;
        let Some(vehicle_idx) = visit.vehicle else {
            self.write_arrival_time(head, None, listener);
            trace!(event = "arrival_cleared", visit = head);
            return Ok(1);
        };
        self.check_predecessor(head, vehicle_idx)?;
        let route_len = self.vehicles[vehicle_idx].visits.len();

        let mut current = head;
        let mut written = 0;
        loop {
            if written >= route_len {
                return Err(RoutingError::InvariantViolation(format!(
                    "cycle in route of vehicle '{}'",
                    self.vehicles[vehicle_idx].id
                )));
            }
            let arrival = self.calculate_arrival_time(current, vehicle_idx)?;
            if written > 0 && self.visits[current].arrival_time == arrival {
                break;
            }
            self.write_arrival_time(current, arrival, listener);
            written += 1;

            let Some(next) = self.visits[current].next_visit else {
                break;
            };
            self.check_successor(current, next, vehicle_idx)?;
            current = next;
        }

        trace!(
            event = "arrival_times_propagated",
            head,
            vehicle = vehicle_idx,
            written,
        );
        Ok(written)
    }

    /// Propagates from each head in turn.
    pub fn propagate_all<I, L>(&mut self, heads: I, listener: &mut L) -> Result<usize>
    where
        I: IntoIterator<Item = usize>,
        L: VariableListener<RoutePlan> + ?Sized,
    {
        let mut written = 0;
        for head in heads {
            written += self.propagate(Some(head), listener)?;
        }
        Ok(written)
    }

    /// Relocates a visit and propagates both heads of disturbance.
    pub fn relocate_and_propagate<L>(
        &mut self,
        visit_idx: usize,
        target_vehicle: usize,
        target_index: usize,
        listener: &mut L,
    ) -> Result<usize>
    where
        L: VariableListener<RoutePlan> + ?Sized,
    {
        let relocation = self.relocate(visit_idx, target_vehicle, target_index, &mut *listener)?;
        self.propagate_all(relocation.heads(), listener)
    }

    fn calculate_arrival_time(&self, visit_idx: usize, vehicle_idx: usize) -> Result<Option<i64>> {
        let visit = &self.visits[visit_idx];
        let (previous_departure, from_slot) = match visit.previous_visit {
            Some(previous) => {
                let previous = self.visits.get(previous).ok_or_else(|| dangling(previous))?;
                (previous.departure_time(), previous.location_slot)
            }
            None => {
                let vehicle = &self.vehicles[vehicle_idx];
                (Some(vehicle.departure_time), vehicle.home_slot)
            }
        };
        Ok(previous_departure
            .map(|departure| departure + self.matrix().seconds_between(from_slot, visit.location_slot)))
    }

    pub(crate) fn write_arrival_time<L>(&mut self, visit_idx: usize, arrival: Option<i64>, listener: &mut L)
    where
        L: VariableListener<RoutePlan> + ?Sized,
    {
        listener.before_variable_changed(self, VISIT_DESCRIPTOR, visit_idx, ARRIVAL_TIME);
        self.visits[visit_idx].arrival_time = arrival;
        listener.after_variable_changed(self, VISIT_DESCRIPTOR, visit_idx, ARRIVAL_TIME);
    }

    fn check_predecessor(&self, head: usize, vehicle_idx: usize) -> Result<()> {
        let vehicle = self.vehicles.get(vehicle_idx).ok_or_else(|| {
            RoutingError::InvariantViolation(format!(
                "visit {} is owned by unknown vehicle {}",
                head, vehicle_idx
            ))
        })?;
        let consistent = match self.visits[head].previous_visit {
            Some(previous) => {
                let previous = self.visits.get(previous).ok_or_else(|| dangling(previous))?;
                previous.next_visit == Some(head) && previous.vehicle == Some(vehicle_idx)
            }
            None => vehicle.visits.first() == Some(&head),
        };
        if consistent {
            Ok(())
        } else {
            Err(RoutingError::InvariantViolation(format!(
                "visit {} is not linked from its predecessor on vehicle '{}'",
                head, vehicle.id
            )))
        }
    }

    fn check_successor(&self, current: usize, next: usize, vehicle_idx: usize) -> Result<()> {
        let successor = self.visits.get(next).ok_or_else(|| dangling(next))?;
        if successor.vehicle != Some(vehicle_idx) || successor.previous_visit != Some(current) {
            return Err(RoutingError::InvariantViolation(format!(
                "visit {} does not link back to {} on vehicle '{}'",
                next, current, self.vehicles[vehicle_idx].id
            )));
        }
        Ok(())
    }
}

fn dangling(visit_idx: usize) -> RoutingError {
    RoutingError::InvariantViolation(format!("dangling visit index {}", visit_idx))
}
