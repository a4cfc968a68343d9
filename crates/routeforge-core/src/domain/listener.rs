//! Change notification for derived (shadow) variables.
//!
//! Whoever writes a derived variable on a planning entity wraps every single
//! write in a before/after pair so that the optimizer's own change-tracking
//! ledger (typically an incremental score director) stays consistent.

/// A listener that is notified around every variable write on a solution.
///
/// The listener is injected by the caller of the mutating code; it is never
/// registered globally. `before_variable_changed` sees the old value,
/// `after_variable_changed` sees the new one.
///
/// # Type Parameters
///
/// - `S`: The solution type holding the entities
///
/// # Example
///
/// ```
/// use routeforge_core::VariableListener;
///
/// struct Plan { arrivals: Vec<Option<i64>> }
///
/// #[derive(Default)]
/// struct Counter { writes: usize }
///
/// impl VariableListener<Plan> for Counter {
///     fn before_variable_changed(&mut self, _: &Plan, _: usize, _: usize, _: &str) {}
///     fn after_variable_changed(&mut self, _: &Plan, _: usize, _: usize, _: &str) {
///         self.writes += 1;
///     }
/// }
///
/// let mut plan = Plan { arrivals: vec![None] };
/// let mut counter = Counter::default();
/// counter.before_variable_changed(&plan, 0, 0, "arrivalTime");
/// plan.arrivals[0] = Some(3600);
/// counter.after_variable_changed(&plan, 0, 0, "arrivalTime");
/// assert_eq!(counter.writes, 1);
/// ```
pub trait VariableListener<S> {
    /// Called before `variable_name` changes on the entity.
    fn before_variable_changed(
        &mut self,
        solution: &S,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    /// Called after `variable_name` has changed on the entity.
    fn after_variable_changed(
        &mut self,
        solution: &S,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );
}

impl<S, L> VariableListener<S> for &mut L
where
    L: VariableListener<S> + ?Sized,
{
    fn before_variable_changed(
        &mut self,
        solution: &S,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        (**self).before_variable_changed(solution, descriptor_index, entity_index, variable_name);
    }

    fn after_variable_changed(
        &mut self,
        solution: &S,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        (**self).after_variable_changed(solution, descriptor_index, entity_index, variable_name);
    }
}

/// A listener that ignores all notifications.
///
/// Used when no incremental bookkeeping is attached, e.g. while loading a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopListener;

impl<S> VariableListener<S> for NoopListener {
    #[inline]
    fn before_variable_changed(&mut self, _: &S, _: usize, _: usize, _: &str) {}

    #[inline]
    fn after_variable_changed(&mut self, _: &S, _: usize, _: usize, _: &str) {}
}
