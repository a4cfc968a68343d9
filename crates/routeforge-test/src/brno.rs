//! Brno fixtures.
//!
//! # Example
//!
//! ```
//! use routeforge_test::brno_plan;
//!
//! let plan = brno_plan();
//! assert_eq!(plan.total_driving_time(), 843 + 639 + 941);
//! assert_eq!(plan.total_demand(0), 120);
//! ```

use routeforge_routing::{HaversineDrivingTimeCalculator, Location, RoutePlan, Vehicle, Visit};

pub const LOCATION_1: Location = Location::new(49.288087, 16.562172);
pub const LOCATION_2: Location = Location::new(49.190922, 16.624466);
pub const LOCATION_3: Location = Location::new(49.1767533245638, 16.50422914190477);

pub const HOUR: i64 = 3600;

/// Vehicle "1" (capacity 100, from LOCATION_1 at 07:00) serves John (demand
/// 80) then Paul (demand 40); vehicle "2" is idle and Ringo is unassigned.
///
/// Visit indices: John 0, Paul 1, Ringo 2. Score: `-20hard/-2423soft`.
pub fn brno_plan() -> RoutePlan {
    let vehicles = vec![
        Vehicle::new("1", 100, LOCATION_1, 7 * HOUR).with_visits(vec![0, 1]),
        Vehicle::new("2", 100, LOCATION_1, 7 * HOUR),
    ];
    let visits = vec![
        Visit::new("2", "John", LOCATION_2)
            .with_demand(80)
            .with_time_window(8 * HOUR, 10 * HOUR)
            .with_service_duration(1800),
        Visit::new("3", "Paul", LOCATION_3)
            .with_demand(40)
            .with_time_window(8 * HOUR, 10 * HOUR)
            .with_service_duration(1800),
        Visit::new("4", "Ringo", LOCATION_3)
            .with_demand(10)
            .with_service_duration(600),
    ];
    RoutePlan::with_calculator("brno", vehicles, visits, &HaversineDrivingTimeCalculator::default())
        .expect("Brno locations are all in the matrix")
}
