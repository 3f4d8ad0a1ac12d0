//! Snapshot integrity validation.
//!
//! Checks the structural integrity of a snapshot before generation or
//! conflict checking. Detects:
//! - Duplicate IDs (courses, rooms, instructors, sections, meetings)
//! - Dangling references (section → course/room/instructor,
//!   meeting → section, external slot → room/instructor)
//! - Degenerate time slots (non-positive duration, outside campus
//!   operating hours)
//! - Sections with no meetings
//! - Duplicate course codes inside one preference submission
//!
//! All detected issues are returned at once; callers ingesting
//! untrusted snapshots run this before trusting any derived result.

use crate::models::Snapshot;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity references another that doesn't exist.
    DanglingReference,
    /// A slot has non-positive duration or leaves operating hours.
    InvalidTimeSlot,
    /// A section has no meetings.
    EmptySection,
    /// A submission ranks the same course twice.
    DuplicatePreference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structural integrity of a snapshot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &Snapshot) -> ValidationResult {
    let mut errors = Vec::new();

    // Collect ids, flagging duplicates
    let mut course_codes = HashSet::new();
    for c in &snapshot.courses {
        if !course_codes.insert(c.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course code: {}", c.code),
            ));
        }
    }
    let mut room_ids = HashSet::new();
    for r in &snapshot.rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
    }
    let mut instructor_ids = HashSet::new();
    for i in &snapshot.instructors {
        if !instructor_ids.insert(i.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate instructor ID: {}", i.id),
            ));
        }
    }
    let mut section_ids = HashSet::new();
    for s in &snapshot.sections {
        if !section_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section ID: {}", s.id),
            ));
        }
    }
    let mut meeting_ids = HashSet::new();
    for m in &snapshot.meetings {
        if !meeting_ids.insert(m.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate meeting ID: {}", m.id),
            ));
        }
    }

    // Reference integrity
    for s in &snapshot.sections {
        if !course_codes.contains(s.course_code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Section '{}' references unknown course '{}'",
                    s.id, s.course_code
                ),
            ));
        }
        if let Some(room_id) = &s.room_id {
            if !room_ids.contains(room_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!("Section '{}' references unknown room '{}'", s.id, room_id),
                ));
            }
        }
        if let Some(instructor_id) = &s.instructor_id {
            if !instructor_ids.contains(instructor_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!(
                        "Section '{}' references unknown instructor '{}'",
                        s.id, instructor_id
                    ),
                ));
            }
        }
    }
    for m in &snapshot.meetings {
        if !section_ids.contains(m.section_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Meeting '{}' references unknown section '{}'",
                    m.id, m.section_id
                ),
            ));
        }
    }
    for x in &snapshot.external_slots {
        if let Some(room_id) = &x.room_id {
            if !room_ids.contains(room_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!(
                        "External slot '{}' references unknown room '{}'",
                        x.id, room_id
                    ),
                ));
            }
        }
        if let Some(instructor_id) = &x.instructor_id {
            if !instructor_ids.contains(instructor_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!(
                        "External slot '{}' references unknown instructor '{}'",
                        x.id, instructor_id
                    ),
                ));
            }
        }
    }

    // Time slot sanity: canonical slots and meeting slots
    for slot in &snapshot.time_slots {
        if !slot.is_within_operating_hours() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeSlot,
                format!("Canonical slot {slot} is degenerate or outside operating hours"),
            ));
        }
    }
    for m in &snapshot.meetings {
        if !m.slot.is_within_operating_hours() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeSlot,
                format!(
                    "Meeting '{}' slot {} is degenerate or outside operating hours",
                    m.id, m.slot
                ),
            ));
        }
    }

    // Scheduled sections must own at least one meeting
    for s in &snapshot.sections {
        if snapshot.meetings_for_section(&s.id).is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySection,
                format!("Section '{}' has no meetings", s.id),
            ));
        }
    }

    // A submission may not rank the same course twice
    for p in &snapshot.preferences {
        let mut seen = HashSet::new();
        for code in &p.ranked_courses {
            if !seen.insert(code.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePreference,
                    format!(
                        "Student '{}' ranked course '{}' more than once",
                        p.student_id, code
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityKind, Course, Day, ExternalSlot, Instructor, Meeting, PreferenceSubmission, Room,
        Section, TimeSlot,
    };

    fn valid_snapshot() -> Snapshot {
        Snapshot::new()
            .with_course(Course::new("CS101", 4))
            .with_room(Room::new("R101", 35))
            .with_instructor(Instructor::new("I1"))
            .with_section(
                Section::new("CS101-1", "CS101")
                    .with_instructor("I1")
                    .with_room("R101"),
            )
            .with_meeting(Meeting::new(
                "CS101-1/lec",
                "CS101-1",
                TimeSlot::new(Day::Sunday, 480, 570),
                ActivityKind::Lecture,
            ))
            .with_time_slot(TimeSlot::new(Day::Sunday, 480, 570))
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(validate_snapshot(&valid_snapshot()).is_ok());
    }

    #[test]
    fn test_duplicate_course_code() {
        let snap = valid_snapshot().with_course(Course::new("CS101", 4));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("CS101")));
    }

    #[test]
    fn test_duplicate_room_id() {
        let snap = valid_snapshot().with_room(Room::new("R101", 20));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_dangling_room_reference() {
        let snap = valid_snapshot()
            .with_section(Section::new("CS101-2", "CS101").with_room("NOWHERE"))
            .with_meeting(Meeting::new(
                "CS101-2/lec",
                "CS101-2",
                TimeSlot::new(Day::Monday, 480, 570),
                ActivityKind::Lecture,
            ));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingReference
                && e.message.contains("NOWHERE")));
    }

    #[test]
    fn test_dangling_meeting_section() {
        let snap = valid_snapshot().with_meeting(Meeting::new(
            "ghost/lec",
            "GHOST-1",
            TimeSlot::new(Day::Monday, 480, 570),
            ActivityKind::Lecture,
        ));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingReference
                && e.message.contains("GHOST-1")));
    }

    #[test]
    fn test_external_slot_dangling_room() {
        let snap = valid_snapshot().with_external_slot(
            ExternalSlot::new("X1", TimeSlot::new(Day::Monday, 480, 570)).with_room("NOWHERE"),
        );
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingReference));
    }

    #[test]
    fn test_degenerate_canonical_slot() {
        let snap = valid_snapshot().with_time_slot(TimeSlot::new(Day::Monday, 570, 570));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTimeSlot));
    }

    #[test]
    fn test_meeting_outside_operating_hours() {
        let snap = valid_snapshot()
            .with_section(Section::new("CS101-2", "CS101"))
            .with_meeting(Meeting::new(
                "CS101-2/lec",
                "CS101-2",
                TimeSlot::new(Day::Monday, 300, 360), // 05:00, before opening
                ActivityKind::Lecture,
            ));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTimeSlot));
    }

    #[test]
    fn test_empty_section() {
        let snap = valid_snapshot().with_section(Section::new("CS101-9", "CS101"));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptySection));
    }

    #[test]
    fn test_duplicate_preference() {
        let snap = valid_snapshot().with_preference(
            PreferenceSubmission::new("S1")
                .with_choice("CS441")
                .with_choice("CS441"),
        );
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicatePreference));
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let snap = valid_snapshot()
            .with_course(Course::new("CS101", 4)) // Duplicate code
            .with_section(Section::new("CS101-9", "CS101")); // No meetings
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
