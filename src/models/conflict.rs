//! Conflict model.
//!
//! A conflict records one detected violation of a scheduling
//! constraint. Conflicts are ephemeral values: every aggregation pass
//! produces a fresh set, nothing persists them as authoritative state,
//! and two passes over identical inputs produce identical sets.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RuleKind;

/// Classification of conflicts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ConflictKind {
    /// Two meetings share a room at overlapping times.
    RoomDoubleBooking,
    /// Two meetings share an instructor at overlapping times.
    InstructorDoubleBooking,
    /// A section's student count exceeds its room's capacity.
    CapacityOverflow,
    /// A meeting intersects the campus break window.
    BreakTimeViolation,
    /// A meeting falls inside the midterm blackout window.
    MidtermBlackout,
    /// A preference submission exceeds the ranked-choice cap.
    PreferenceLimit,
    /// The generator found no feasible slot/room for a section.
    UnresolvedPlacement,
}

impl From<RuleKind> for ConflictKind {
    fn from(kind: RuleKind) -> Self {
        match kind {
            RuleKind::RoomDoubleBooking => ConflictKind::RoomDoubleBooking,
            RuleKind::InstructorDoubleBooking => ConflictKind::InstructorDoubleBooking,
            RuleKind::CapacityOverflow => ConflictKind::CapacityOverflow,
            RuleKind::BreakTimeViolation => ConflictKind::BreakTimeViolation,
            RuleKind::MidtermBlackout => ConflictKind::MidtermBlackout,
            RuleKind::ElectivePreferenceLimit => ConflictKind::PreferenceLimit,
        }
    }
}

/// Conflict severity. Ordered so `High > Medium > Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Kind of entity a conflict points at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EntityKind {
    Section,
    Meeting,
    Room,
    Instructor,
    Student,
    /// A reserved block owned by another department.
    External,
}

/// A reference to the entity a conflict is about.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConflictTarget {
    /// Entity kind.
    pub entity: EntityKind,
    /// Entity identifier.
    pub id: String,
}

impl ConflictTarget {
    /// Creates a target reference.
    pub fn new(entity: EntityKind, id: impl Into<String>) -> Self {
        Self {
            entity,
            id: id.into(),
        }
    }

    /// Meeting target.
    pub fn meeting(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Meeting, id)
    }

    /// Section target.
    pub fn section(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Section, id)
    }

    /// Student target.
    pub fn student(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Student, id)
    }
}

impl fmt::Display for ConflictTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.entity, self.id)
    }
}

/// A detected violation of a scheduling constraint.
///
/// Targets are kept sorted so symmetric pair checks (A-vs-B and
/// B-vs-A) collapse to the same value under deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// What was violated.
    pub kind: ConflictKind,
    /// How serious the violation is.
    pub severity: Severity,
    /// Entities involved, sorted.
    pub targets: Vec<ConflictTarget>,
    /// Human-readable explanation.
    pub message: String,
}

impl Conflict {
    /// Creates a conflict. Targets are sorted on construction.
    pub fn new(
        kind: ConflictKind,
        severity: Severity,
        mut targets: Vec<ConflictTarget>,
        message: impl Into<String>,
    ) -> Self {
        targets.sort();
        Self {
            kind,
            severity,
            targets,
            message: message.into(),
        }
    }

    /// Room double-booking between two meetings.
    pub fn room_double_booking(
        meeting_a: impl Into<String>,
        meeting_b: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            ConflictKind::RoomDoubleBooking,
            Severity::High,
            vec![
                ConflictTarget::meeting(meeting_a),
                ConflictTarget::meeting(meeting_b),
            ],
            message,
        )
    }

    /// Instructor double-booking between two meetings.
    pub fn instructor_double_booking(
        meeting_a: impl Into<String>,
        meeting_b: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            ConflictKind::InstructorDoubleBooking,
            Severity::High,
            vec![
                ConflictTarget::meeting(meeting_a),
                ConflictTarget::meeting(meeting_b),
            ],
            message,
        )
    }

    /// Section over room capacity.
    pub fn capacity_overflow(section_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ConflictKind::CapacityOverflow,
            Severity::High,
            vec![ConflictTarget::section(section_id)],
            message,
        )
    }

    /// Meeting inside the break window.
    pub fn break_time(meeting_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ConflictKind::BreakTimeViolation,
            Severity::Medium,
            vec![ConflictTarget::meeting(meeting_id)],
            message,
        )
    }

    /// Meeting inside the midterm blackout window.
    pub fn midterm_blackout(meeting_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ConflictKind::MidtermBlackout,
            Severity::Medium,
            vec![ConflictTarget::meeting(meeting_id)],
            message,
        )
    }

    /// Preference submission over the ranked-choice cap.
    pub fn preference_limit(student_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ConflictKind::PreferenceLimit,
            Severity::Low,
            vec![ConflictTarget::student(student_id)],
            message,
        )
    }

    /// Section the generator could not place.
    pub fn unresolved_placement(
        section_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            ConflictKind::UnresolvedPlacement,
            Severity::Medium,
            vec![ConflictTarget::section(section_id)],
            message,
        )
    }

    /// Key identifying equivalent conflicts for deduplication.
    pub fn dedup_key(&self) -> (ConflictKind, &[ConflictTarget]) {
        (self.kind, &self.targets)
    }

    /// First target id, used for deterministic report ordering.
    pub fn primary_target_id(&self) -> &str {
        self.targets.first().map(|t| t.id.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_pairs_share_dedup_key() {
        let ab = Conflict::room_double_booking("M-A", "M-B", "overlap");
        let ba = Conflict::room_double_booking("M-B", "M-A", "overlap");
        assert_eq!(ab.dedup_key(), ba.dedup_key());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_factory_severities() {
        assert_eq!(
            Conflict::room_double_booking("a", "b", "").severity,
            Severity::High
        );
        assert_eq!(Conflict::capacity_overflow("s", "").severity, Severity::High);
        assert_eq!(Conflict::break_time("m", "").severity, Severity::Medium);
        assert_eq!(Conflict::preference_limit("s", "").severity, Severity::Low);
        assert_eq!(
            Conflict::unresolved_placement("s", "").severity,
            Severity::Medium
        );
    }

    #[test]
    fn test_rule_kind_maps_to_conflict_kind() {
        assert_eq!(
            ConflictKind::from(RuleKind::ElectivePreferenceLimit),
            ConflictKind::PreferenceLimit
        );
        assert_eq!(
            ConflictKind::from(RuleKind::RoomDoubleBooking),
            ConflictKind::RoomDoubleBooking
        );
    }

    #[test]
    fn test_targets_sorted_on_construction() {
        let c = Conflict::instructor_double_booking("M-Z", "M-A", "overlap");
        assert_eq!(c.targets[0].id, "M-A");
        assert_eq!(c.targets[1].id, "M-Z");
    }
}
