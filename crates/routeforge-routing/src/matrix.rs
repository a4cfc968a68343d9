//! Precomputed driving times between every pair of known locations.

use std::collections::HashMap;

use routeforge_core::{Result, RoutingError};
use tracing::debug;

use crate::geo::{DrivingTimeCalculator, Location};

/// Dense, symmetric table of driving times in seconds.
///
/// Each distinct location gets a slot; times are stored row-major in a flat
/// `n * n` vector. The table is built once and shared read-only (usually
/// behind an `Arc`) for the whole optimization run.
///
/// # Examples
///
/// ```
/// use routeforge_routing::{DrivingTimeMatrix, HaversineDrivingTimeCalculator, Location};
///
/// let a = Location::new(49.288087, 16.562172);
/// let b = Location::new(49.190922, 16.624466);
/// let matrix = DrivingTimeMatrix::build(&HaversineDrivingTimeCalculator::default(), &[a, b, a]);
///
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.driving_time(&a, &b).unwrap(), matrix.driving_time(&b, &a).unwrap());
/// assert_eq!(matrix.driving_time(&a, &a).unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DrivingTimeMatrix {
    locations: Vec<Location>,
    slots: HashMap<Location, usize>,
    seconds: Vec<i64>,
}

impl DrivingTimeMatrix {
    /// Computes the time for each unordered pair once and stores it both ways.
    pub fn build<C>(calculator: &C, locations: &[Location]) -> Self
    where
        C: DrivingTimeCalculator + ?Sized,
    {
        let mut distinct = Vec::with_capacity(locations.len());
        let mut slots = HashMap::with_capacity(locations.len());
        for location in locations {
            slots.entry(*location).or_insert_with(|| {
                distinct.push(*location);
                distinct.len() - 1
            });
        }

        let n = distinct.len();
        let mut seconds = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let time = calculator.driving_time(&distinct[i], &distinct[j]);
                seconds[i * n + j] = time;
                seconds[j * n + i] = time;
            }
        }

        debug!(
            event = "driving_time_matrix_built",
            locations = n,
            pairs = n * n.saturating_sub(1) / 2,
        );

        Self {
            locations: distinct,
            slots,
            seconds,
        }
    }

    /// Number of distinct locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Distinct locations in slot order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn slot_of(&self, location: &Location) -> Option<usize> {
        self.slots.get(location).copied()
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.slots.contains_key(location)
    }

    /// Driving time from `from` to `to`.
    ///
    /// Fails with [`RoutingError::MissingRouteData`] if either location was
    /// not part of the build.
    pub fn driving_time(&self, from: &Location, to: &Location) -> Result<i64> {
        match (self.slot_of(from), self.slot_of(to)) {
            (Some(i), Some(j)) => Ok(self.seconds_between(i, j)),
            _ => Err(RoutingError::MissingRouteData {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Driving time between two slots.
    ///
    /// # Panics
    ///
    /// Panics if either slot is out of range. Slots handed out by
    /// [`slot_of`](Self::slot_of) are always in range.
    #[inline]
    pub fn seconds_between(&self, from_slot: usize, to_slot: usize) -> i64 {
        self.seconds[from_slot * self.locations.len() + to_slot]
    }
}
