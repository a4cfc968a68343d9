//! Geographic locations and driving-time estimation.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::matrix::DrivingTimeMatrix;

/// Average driving speed used by [`HaversineDrivingTimeCalculator::default`].
pub const AVERAGE_SPEED_KMPH: f64 = 50.0;

const EARTH_RADIUS_IN_M: f64 = 6_371_000.0;
const TWICE_EARTH_RADIUS_IN_M: f64 = 2.0 * EARTH_RADIUS_IN_M;

/// A point on the globe, in decimal degrees.
///
/// Two locations are equal only when both coordinates are bit-for-bit equal,
/// which is what lets a location key a hash map.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Estimates the driving time between two locations, in whole seconds.
///
/// Implementations must return 0 for identical locations and a non-negative
/// value otherwise.
pub trait DrivingTimeCalculator {
    fn driving_time(&self, from: &Location, to: &Location) -> i64;

    /// Driving times for every pair of `from` x `to`.
    fn calculate_bulk_driving_time(
        &self,
        from: &[Location],
        to: &[Location],
    ) -> HashMap<Location, HashMap<Location, i64>> {
        from.iter()
            .map(|origin| {
                let row = to
                    .iter()
                    .map(|destination| (*destination, self.driving_time(origin, destination)))
                    .collect();
                (*origin, row)
            })
            .collect()
    }

    /// Builds a symmetric matrix over all distinct `locations`.
    fn build_matrix(&self, locations: &[Location]) -> DrivingTimeMatrix
    where
        Self: Sized,
    {
        DrivingTimeMatrix::build(self, locations)
    }
}

/// Great-circle distance at a constant average speed.
///
/// # Examples
///
/// ```
/// use routeforge_routing::{DrivingTimeCalculator, HaversineDrivingTimeCalculator, Location};
///
/// let calculator = HaversineDrivingTimeCalculator::default();
/// let a = Location::new(0.0, 0.0);
/// let b = Location::new(0.0, 1.0);
///
/// assert_eq!(calculator.distance_meters(&a, &b), 111_195);
/// assert_eq!(calculator.driving_time(&a, &b), 8006);
/// assert_eq!(calculator.driving_time(&a, &a), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaversineDrivingTimeCalculator {
    average_speed_kmph: f64,
}

impl HaversineDrivingTimeCalculator {
    pub fn new(average_speed_kmph: f64) -> Self {
        Self { average_speed_kmph }
    }

    pub fn average_speed_kmph(&self) -> f64 {
        self.average_speed_kmph
    }

    /// Great-circle distance rounded to whole meters.
    pub fn distance_meters(&self, from: &Location, to: &Location) -> i64 {
        if from == to {
            return 0;
        }
        let from = CartesianCoordinate::from(from);
        let to = CartesianCoordinate::from(to);
        let chord = from.distance(&to);
        (TWICE_EARTH_RADIUS_IN_M * chord.min(1.0).asin()).round() as i64
    }

    fn meters_to_driving_seconds(&self, meters: i64) -> i64 {
        (meters as f64 / self.average_speed_kmph * 3.6).round() as i64
    }
}

impl Default for HaversineDrivingTimeCalculator {
    fn default() -> Self {
        Self::new(AVERAGE_SPEED_KMPH)
    }
}

impl DrivingTimeCalculator for HaversineDrivingTimeCalculator {
    fn driving_time(&self, from: &Location, to: &Location) -> i64 {
        if from == to {
            return 0;
        }
        self.meters_to_driving_seconds(self.distance_meters(from, to))
    }
}

// Point on a sphere of diameter 1, so the chord length is sin(angle / 2).
struct CartesianCoordinate {
    x: f64,
    y: f64,
    z: f64,
}

impl CartesianCoordinate {
    fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<&Location> for CartesianCoordinate {
    fn from(location: &Location) -> Self {
        let latitude = location.latitude.to_radians();
        let longitude = location.longitude.to_radians();
        Self {
            x: 0.5 * latitude.cos() * longitude.sin(),
            y: 0.5 * latitude.cos() * longitude.cos(),
            z: 0.5 * latitude.sin(),
        }
    }
}
