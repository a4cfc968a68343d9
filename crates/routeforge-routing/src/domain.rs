//! Domain model: visits and the vehicles that serve them.
//!
//! Visits live in an arena owned by [`RoutePlan`](crate::RoutePlan) and are
//! referred to by their stable index. A vehicle owns the ordered sequence of
//! visit indices that forms its route; each visit's owner, previous and next
//! fields are denormalized caches of that sequence, maintained by the chain
//! primitives.

use crate::geo::Location;

/// Descriptor index of [`Visit`] in variable-change notifications.
pub const VISIT_DESCRIPTOR: usize = 0;

/// Descriptor index of [`Vehicle`] in variable-change notifications.
pub const VEHICLE_DESCRIPTOR: usize = 1;

/// Name of the derived arrival-time variable on a visit.
pub const ARRIVAL_TIME: &str = "arrivalTime";

/// Name of the list variable holding a vehicle's route.
pub const VISITS: &str = "visits";

/// A customer visit with a time window, a demand and a service duration.
///
/// All times are seconds from an arbitrary epoch shared by the whole plan.
///
/// # Examples
///
/// ```
/// use routeforge_routing::{Location, Visit};
///
/// // 08:00-10:00 window, 30 minute service
/// let visit = Visit::new("2", "John", Location::new(49.190922, 16.624466))
///     .with_demand(80)
///     .with_time_window(8 * 3600, 10 * 3600)
///     .with_service_duration(1800);
///
/// assert_eq!(visit.demand, 80);
/// assert!(!visit.is_assigned());
/// assert_eq!(visit.arrival_time(), None);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Visit {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub demand: i64,
    pub min_start_time: i64,
    pub max_end_time: i64,
    pub service_duration: i64,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) location_slot: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) vehicle: Option<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) previous_visit: Option<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) next_visit: Option<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) arrival_time: Option<i64>,
}

impl Visit {
    /// Creates a visit with demand 1, no service time and an unbounded window.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            demand: 1,
            min_start_time: 0,
            max_end_time: i64::MAX,
            service_duration: 0,
            location_slot: 0,
            vehicle: None,
            previous_visit: None,
            next_visit: None,
            arrival_time: None,
        }
    }

    pub fn with_demand(mut self, demand: i64) -> Self {
        self.demand = demand;
        self
    }

    pub fn with_time_window(mut self, min_start_time: i64, max_end_time: i64) -> Self {
        self.min_start_time = min_start_time;
        self.max_end_time = max_end_time;
        self
    }

    pub fn with_service_duration(mut self, service_duration: i64) -> Self {
        self.service_duration = service_duration;
        self
    }

    /// Index of the owning vehicle, if the visit is on a route.
    #[inline]
    pub fn vehicle(&self) -> Option<usize> {
        self.vehicle
    }

    #[inline]
    pub fn previous_visit(&self) -> Option<usize> {
        self.previous_visit
    }

    #[inline]
    pub fn next_visit(&self) -> Option<usize> {
        self.next_visit
    }

    #[inline]
    pub fn arrival_time(&self) -> Option<i64> {
        self.arrival_time
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.vehicle.is_some()
    }

    /// When service begins: the arrival, or the window opening if earlier.
    pub fn start_service_time(&self) -> Option<i64> {
        self.arrival_time
            .map(|arrival| arrival.max(self.min_start_time))
    }

    /// When the vehicle leaves this visit.
    pub fn departure_time(&self) -> Option<i64> {
        self.start_service_time()
            .map(|start| start + self.service_duration)
    }

    /// Seconds by which `arrival + service_duration` exceeds `max_end_time`.
    fn overrun_seconds(&self) -> i64 {
        self.arrival_time.map_or(0, |arrival| {
            (arrival.saturating_add(self.service_duration))
                .saturating_sub(self.max_end_time)
                .max(0)
        })
    }

    pub fn is_service_finished_after_max_end_time(&self) -> bool {
        self.overrun_seconds() > 0
    }

    /// Overrun in whole minutes, plus one when 30 or more seconds are left.
    ///
    /// ```
    /// use routeforge_routing::{Location, Visit};
    ///
    /// let mut visit = Visit::new("1", "A", Location::new(0.0, 0.0))
    ///     .with_time_window(8 * 3600, 10 * 3600)
    ///     .with_service_duration(1800);
    /// assert_eq!(visit.service_finished_delay_in_minutes(), 0);
    /// ```
    pub fn service_finished_delay_in_minutes(&self) -> i64 {
        let overrun = self.overrun_seconds();
        overrun / 60 + i64::from(overrun % 60 >= 30)
    }
}

/// A vehicle with a capacity, a home depot and an ordered route.
///
/// # Examples
///
/// ```
/// use routeforge_routing::{Location, Vehicle};
///
/// let depot = Location::new(49.288087, 16.562172);
/// let vehicle = Vehicle::new("1", 100, depot, 7 * 3600);
///
/// assert_eq!(vehicle.capacity, 100);
/// assert!(vehicle.visits().is_empty());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Vehicle {
    pub id: String,
    pub capacity: i64,
    pub home_location: Location,
    pub departure_time: i64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) visits: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) home_slot: usize,
}

impl Vehicle {
    pub fn new(
        id: impl Into<String>,
        capacity: i64,
        home_location: Location,
        departure_time: i64,
    ) -> Self {
        Self {
            id: id.into(),
            capacity,
            home_location,
            departure_time,
            visits: Vec::new(),
            home_slot: 0,
        }
    }

    /// Pre-assigns a route, as visit indices into the plan's visit arena.
    ///
    /// The sequence is validated and linked by [`RoutePlan::new`](crate::RoutePlan::new).
    pub fn with_visits(mut self, visits: Vec<usize>) -> Self {
        self.visits = visits;
        self
    }

    /// The route, in driving order.
    #[inline]
    pub fn visits(&self) -> &[usize] {
        &self.visits
    }

    /// Sum of the demands on the route.
    pub fn total_demand(&self, visits: &[Visit]) -> i64 {
        self.visits
            .iter()
            .filter_map(|&idx| visits.get(idx))
            .map(|visit| visit.demand)
            .sum()
    }
}
