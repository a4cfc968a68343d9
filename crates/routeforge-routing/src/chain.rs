//! Route chain primitives: insert, remove and relocate.
//!
//! Each primitive keeps a vehicle's visit sequence and the owner/previous/next
//! fields of the affected visits in agreement. None of them computes arrival
//! times or scores; they report the heads of disturbance the caller must
//! propagate from. The only arrival-time write, clearing the time of a
//! removed visit, is wrapped in listener notifications like every write the
//! propagator performs.

use routeforge_core::{Result, RoutingError, VariableListener};
use smallvec::SmallVec;

use crate::plan::RoutePlan;

/// Heads of disturbance left by [`RoutePlan::relocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    /// Former successor of the moved visit, if it had one.
    pub source_head: Option<usize>,
    /// The moved visit at its new position.
    pub target_head: usize,
}

impl Relocation {
    /// Both heads, target first.
    pub fn heads(&self) -> SmallVec<[usize; 2]> {
        let mut heads = SmallVec::new();
        heads.push(self.target_head);
        heads.extend(self.source_head);
        heads
    }
}

impl RoutePlan {
    /// Inserts an unassigned visit at `index` of a vehicle's route.
    ///
    /// Returns the head of disturbance, which is the inserted visit.
    pub fn insert(&mut self, vehicle_idx: usize, index: usize, visit_idx: usize) -> Result<usize> {
        let route_len = self.route_len(vehicle_idx)?;
        let visit = self.visits.get(visit_idx).ok_or_else(|| unknown_visit(visit_idx))?;
        if let Some(owner) = visit.vehicle {
            return Err(RoutingError::IllegalMove(format!(
                "visit '{}' is already assigned to vehicle {}",
                visit.id, owner
            )));
        }
        if index > route_len {
            return Err(RoutingError::IllegalMove(format!(
                "insert index {} out of range for route of length {}",
                index, route_len
            )));
        }

        let route = &mut self.vehicles[vehicle_idx].visits;
        let previous = index.checked_sub(1).map(|i| route[i]);
        let next = route.get(index).copied();
        route.insert(index, visit_idx);

        let visit = &mut self.visits[visit_idx];
        visit.vehicle = Some(vehicle_idx);
        visit.previous_visit = previous;
        visit.next_visit = next;
        if let Some(previous) = previous {
            self.visits[previous].next_visit = Some(visit_idx);
        }
        if let Some(next) = next {
            self.visits[next].previous_visit = Some(visit_idx);
        }
        Ok(visit_idx)
    }

    /// Takes an assigned visit off its route and clears its arrival time.
    ///
    /// The listener is notified before and after the arrival time is cleared,
    /// once the visit is already off its route.
    ///
    /// Returns the former successor, now the head of disturbance, or `None`
    /// if the visit was last.
    pub fn remove<L>(&mut self, visit_idx: usize, listener: &mut L) -> Result<Option<usize>>
    where
        L: VariableListener<RoutePlan> + ?Sized,
    {
        let (vehicle_idx, position) = self.position_of(visit_idx)?;

        self.vehicles[vehicle_idx].visits.remove(position);

        let visit = &mut self.visits[visit_idx];
        let previous = visit.previous_visit.take();
        let next = visit.next_visit.take();
        visit.vehicle = None;
        if let Some(previous) = previous {
            self.visits[previous].next_visit = next;
        }
        if let Some(next) = next {
            self.visits[next].previous_visit = previous;
        }

        self.write_arrival_time(visit_idx, None, listener);
        Ok(next)
    }

    /// Moves an assigned visit to `target_index` of `target_vehicle`'s route.
    ///
    /// `target_index` refers to the target route after the visit has been
    /// removed, so for a move within one route it ranges over `[0, len - 1]`.
    /// Preconditions are checked up front; on error the plan is unchanged.
    /// The listener sees the moved visit's arrival time being cleared.
    pub fn relocate<L>(
        &mut self,
        visit_idx: usize,
        target_vehicle: usize,
        target_index: usize,
        listener: &mut L,
    ) -> Result<Relocation>
    where
        L: VariableListener<RoutePlan> + ?Sized,
    {
        let (source_vehicle, _) = self.position_of(visit_idx)?;
        let mut target_len = self.route_len(target_vehicle)?;
        if source_vehicle == target_vehicle {
            target_len -= 1;
        }
        if target_index > target_len {
            return Err(RoutingError::IllegalMove(format!(
                "relocate index {} out of range for route of length {}",
                target_index, target_len
            )));
        }

        let source_head = self.remove(visit_idx, listener)?;
        let target_head = self.insert(target_vehicle, target_index, visit_idx)?;
        Ok(Relocation {
            source_head,
            target_head,
        })
    }

    /// Owning vehicle and position of an assigned visit.
    pub fn position_of(&self, visit_idx: usize) -> Result<(usize, usize)> {
        let visit = self.visits.get(visit_idx).ok_or_else(|| unknown_visit(visit_idx))?;
        let vehicle_idx = visit.vehicle.ok_or_else(|| {
            RoutingError::IllegalMove(format!("visit '{}' is not assigned", visit.id))
        })?;
        let position = self
            .vehicles
            .get(vehicle_idx)
            .and_then(|vehicle| vehicle.visits.iter().position(|&idx| idx == visit_idx))
            .ok_or_else(|| {
                RoutingError::InvariantViolation(format!(
                    "visit '{}' claims vehicle {} but is not on its route",
                    visit.id, vehicle_idx
                ))
            })?;
        Ok((vehicle_idx, position))
    }

    fn route_len(&self, vehicle_idx: usize) -> Result<usize> {
        self.vehicles
            .get(vehicle_idx)
            .map(|vehicle| vehicle.visits.len())
            .ok_or_else(|| RoutingError::IllegalMove(format!("unknown vehicle {}", vehicle_idx)))
    }
}

fn unknown_visit(visit_idx: usize) -> RoutingError {
    RoutingError::IllegalMove(format!("unknown visit {}", visit_idx))
}
