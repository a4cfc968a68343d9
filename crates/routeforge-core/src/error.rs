//! Error types for RouteForge

use thiserror::Error;

use crate::score::HardSoftScore;

/// Main error type for routing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// A driving-time lookup between locations that are not in the matrix.
    #[error("No driving time known from {from} to {to}")]
    MissingRouteData {
        /// Source location, formatted as `(lat, lon)`.
        from: String,
        /// Target location, formatted as `(lat, lon)`.
        to: String,
    },

    /// The route chain is in a contradictory state (cycle, mismatched owner).
    ///
    /// This is a programming error: chain primitives never produce it.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A chain primitive was called with unmet preconditions.
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// Incremental bookkeeping diverged from a full recalculation.
    #[error("Score corruption: expected {expected}, got {actual}")]
    ScoreCorruption {
        /// Score from a full recalculation.
        expected: HardSoftScore,
        /// Score maintained incrementally.
        actual: HardSoftScore,
    },
}

impl RoutingError {
    /// Returns true for errors that indicate a bug rather than bad input.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            RoutingError::InvariantViolation(_) | RoutingError::ScoreCorruption { .. }
        )
    }
}

/// Result type alias for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_route_data_display() {
        let err = RoutingError::MissingRouteData {
            from: "(1, 2)".to_string(),
            to: "(3, 4)".to_string(),
        };
        assert_eq!(err.to_string(), "No driving time known from (1, 2) to (3, 4)");
        assert!(!err.is_programming_error());
    }

    #[test]
    fn test_programming_errors() {
        assert!(RoutingError::InvariantViolation("cycle".into()).is_programming_error());
        assert!(RoutingError::ScoreCorruption {
            expected: HardSoftScore::of(0, -10),
            actual: HardSoftScore::of(0, -12),
        }
        .is_programming_error());
        assert!(!RoutingError::IllegalMove("visit 3 already assigned".into()).is_programming_error());
    }

    #[test]
    fn test_score_corruption_display() {
        let err = RoutingError::ScoreCorruption {
            expected: HardSoftScore::of(-1, -10),
            actual: HardSoftScore::of(0, -10),
        };
        assert_eq!(
            err.to_string(),
            "Score corruption: expected -1hard/-10soft, got 0hard/-10soft"
        );
    }
}
