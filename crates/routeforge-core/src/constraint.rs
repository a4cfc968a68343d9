//! Core constraint types.
//!
//! Identification and classification of the constraints a routing plan is
//! scored against.

/// Reference to a constraint for identification.
///
/// # Example
///
/// ```
/// use routeforge_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("vehiclerouting", "vehicleCapacity");
/// assert_eq!(cr.full_name(), "vehiclerouting/vehicleCapacity");
///
/// let simple = ConstraintRef::new("", "minimizeTravelTime");
/// assert_eq!(simple.full_name(), "minimizeTravelTime");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintRef {
    /// Package/module containing the constraint.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

/// Type of impact a constraint has on the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    /// Penalize (subtract from score).
    Penalty,
    /// Reward (add to score).
    Reward,
}

impl ImpactType {
    /// Applies the impact direction to a non-negative match weight.
    #[inline]
    pub fn apply(self, magnitude: i64) -> i64 {
        match self {
            ImpactType::Penalty => -magnitude,
            ImpactType::Reward => magnitude,
        }
    }
}
