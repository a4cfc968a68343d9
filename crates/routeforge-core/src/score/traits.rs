//! Score traits shared by the scoring crate and the session.

use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};

/// A totally ordered plan quality where a greater score is a better plan.
///
/// Scores are small `Copy` values; weights are combined with `+` and `-`,
/// and retracted with `-` or `Neg`.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// True when no hard constraint is broken.
    fn is_feasible(&self) -> bool;

    /// Identity for `+`.
    fn zero() -> Self;
}

/// A score with a textual form that round-trips through `Display`.
pub trait ParseableScore: Score {
    /// Parses text such as `"0hard/-100soft"`.
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    fn to_string_repr(&self) -> String {
        self.to_string()
    }
}

/// Rejected score text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl std::fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid score: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}
