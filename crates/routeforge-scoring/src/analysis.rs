//! Score analysis: which constraints matched, on what, and why.

use std::fmt;

use routeforge_core::{ConstraintRef, HardSoftScore};
use routeforge_routing::RoutePlan;

use crate::constraints::{capacity_overrun, service_delay, travel_time, RoutingConstraint};

/// Entity a constraint match is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Vehicle { index: usize, id: String },
    Visit { index: usize, id: String },
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Vehicle { id, .. } | EntityRef::Visit { id, .. } => id,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Vehicle { id, .. } => write!(f, "Vehicle '{}'", id),
            EntityRef::Visit { id, .. } => write!(f, "Visit '{}'", id),
        }
    }
}

/// Justification for why a constraint matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintJustification {
    /// Entity involved in the match.
    pub entity: EntityRef,
    /// Human-readable description of why the constraint matched.
    pub description: String,
}

/// A single constraint match with its score impact.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintMatch {
    pub constraint_ref: ConstraintRef,
    /// Non-negative match weight (overrun units, minutes or seconds).
    pub match_weight: i64,
    pub score: HardSoftScore,
    pub justification: ConstraintJustification,
}

/// Per-constraint breakdown in a score explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintAnalysis {
    pub constraint_ref: ConstraintRef,
    /// Constraint weight (score per unit of match weight).
    pub weight: HardSoftScore,
    /// Total score from this constraint.
    pub score: HardSoftScore,
    pub matches: Vec<ConstraintMatch>,
    pub is_hard: bool,
}

impl ConstraintAnalysis {
    fn new(constraint: RoutingConstraint, matches: Vec<ConstraintMatch>) -> Self {
        Self {
            constraint_ref: constraint.constraint_ref(),
            weight: constraint.weight(),
            score: matches.iter().map(|m| m.score).sum(),
            matches,
            is_hard: constraint.is_hard(),
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }
}

/// Complete score explanation with per-constraint breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreExplanation {
    pub score: HardSoftScore,
    pub constraint_analyses: Vec<ConstraintAnalysis>,
}

impl ScoreExplanation {
    /// Returns the total match count across all constraints.
    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count()).sum()
    }

    /// Returns constraints with non-zero scores.
    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis> {
        self.constraint_analyses
            .iter()
            .filter(|a| a.score != HardSoftScore::ZERO)
            .collect()
    }

    /// Returns all matches across all constraints.
    pub fn all_matches(&self) -> Vec<&ConstraintMatch> {
        self.constraint_analyses
            .iter()
            .flat_map(|a| &a.matches)
            .collect()
    }

    pub fn analysis(&self, name: &str) -> Option<&ConstraintAnalysis> {
        self.constraint_analyses.iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for ScoreExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        for analysis in &self.constraint_analyses {
            writeln!(
                f,
                "  {} ({} matches): {}",
                analysis.name(),
                analysis.match_count(),
                analysis.score
            )?;
            for m in &analysis.matches {
                writeln!(f, "    {}", m.justification.description)?;
            }
        }
        Ok(())
    }
}

/// `"{h} hours {m} minutes"`, with minutes rounded up when 30 or more
/// seconds are left over.
///
/// ```
/// use routeforge_scoring::format_travel_time;
///
/// assert_eq!(format_travel_time(2423), "0 hours 40 minutes");
/// assert_eq!(format_travel_time(3600 + 29), "1 hours 0 minutes");
/// assert_eq!(format_travel_time(3600 + 30), "1 hours 1 minutes");
/// ```
pub fn format_travel_time(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60 + i64::from(seconds % 60 >= 30);
    format!("{} hours {} minutes", hours, minutes)
}

/// Explains the score of a plan constraint by constraint.
///
/// The explanation's total always equals [`calculate_score`](crate::calculate_score).
pub fn explain(plan: &RoutePlan) -> ScoreExplanation {
    let mut capacity = Vec::new();
    let mut travel = Vec::new();
    for (index, vehicle) in plan.vehicles().iter().enumerate() {
        let entity = EntityRef::Vehicle {
            index,
            id: vehicle.id.clone(),
        };

        let overrun = capacity_overrun(plan, index);
        if overrun > 0 {
            capacity.push(constraint_match(
                RoutingConstraint::VehicleCapacity,
                overrun,
                entity.clone(),
                format!(
                    "Vehicle '{}' exceeded its max capacity by {}.",
                    vehicle.id, overrun
                ),
            ));
        }

        if !vehicle.visits().is_empty() {
            let seconds = travel_time(plan, index);
            travel.push(constraint_match(
                RoutingConstraint::MinimizeTravelTime,
                seconds,
                entity,
                format!(
                    "Vehicle '{}' total travel time is {}.",
                    vehicle.id,
                    format_travel_time(seconds)
                ),
            ));
        }
    }

    let lateness = plan
        .visits()
        .iter()
        .enumerate()
        .filter(|(_, visit)| visit.is_service_finished_after_max_end_time())
        .map(|(index, visit)| {
            let delay = service_delay(visit);
            constraint_match(
                RoutingConstraint::ServiceFinishedAfterMaxEndTime,
                delay,
                EntityRef::Visit {
                    index,
                    id: visit.id.clone(),
                },
                format!("Visit '{}' serviced with a {}-minute delay.", visit.id, delay),
            )
        })
        .collect();

    let constraint_analyses = vec![
        ConstraintAnalysis::new(RoutingConstraint::VehicleCapacity, capacity),
        ConstraintAnalysis::new(RoutingConstraint::ServiceFinishedAfterMaxEndTime, lateness),
        ConstraintAnalysis::new(RoutingConstraint::MinimizeTravelTime, travel),
    ];
    ScoreExplanation {
        score: constraint_analyses.iter().map(|a| a.score).sum(),
        constraint_analyses,
    }
}

fn constraint_match(
    constraint: RoutingConstraint,
    match_weight: i64,
    entity: EntityRef,
    description: String,
) -> ConstraintMatch {
    ConstraintMatch {
        constraint_ref: constraint.constraint_ref(),
        match_weight,
        score: constraint.impact(match_weight),
        justification: ConstraintJustification {
            entity,
            description,
        },
    }
}
