//! Term, external slots, and irregular students.
//!
//! A `Term` is the scheduling period everything else hangs off.
//! `ExternalSlot` marks a reserved block owned by another department:
//! it participates in double-booking checks as an opaque occupied slot
//! but is never (re)placed by the generator. `IrregularStudent` records
//! a student whose remaining-course list deviates from the standard
//! level curriculum; their demand is folded into section sizing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// An academic scheduling period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    /// Term code (e.g., "2025-FALL").
    pub code: String,
    /// First day of the term.
    pub start_date: NaiveDate,
    /// Last day of the term.
    pub end_date: NaiveDate,
    /// Whether the term is open for scheduling.
    pub active: bool,
}

impl Term {
    /// Creates an active term.
    pub fn new(code: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            code: code.into(),
            start_date,
            end_date,
            active: true,
        }
    }

    /// Marks the term inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// A reserved block not owned by this catalog (e.g., a service course
/// taught by another department).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSlot {
    /// Unique identifier.
    pub id: String,
    /// Occupied room, if the block holds one.
    pub room_id: Option<String>,
    /// Occupied instructor, if the block holds one.
    pub instructor_id: Option<String>,
    /// The occupied time slot.
    pub slot: TimeSlot,
    /// Display label (e.g., "MATH201 service lecture").
    pub label: String,
}

impl ExternalSlot {
    /// Creates a new external slot.
    pub fn new(id: impl Into<String>, slot: TimeSlot) -> Self {
        Self {
            id: id.into(),
            room_id: None,
            instructor_id: None,
            slot,
            label: String::new(),
        }
    }

    /// Marks a room as occupied by this block.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Marks an instructor as occupied by this block.
    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A student whose remaining-course list deviates from the standard
/// level curriculum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrregularStudent {
    /// Student identifier.
    pub id: String,
    /// Nominal curriculum level.
    pub level: u8,
    /// Course codes still required.
    pub remaining_courses: Vec<String>,
}

impl IrregularStudent {
    /// Creates a new irregular-student record.
    pub fn new(id: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            level,
            remaining_courses: Vec::new(),
        }
    }

    /// Adds a remaining course.
    pub fn with_remaining(mut self, course_code: impl Into<String>) -> Self {
        self.remaining_courses.push(course_code.into());
        self
    }

    /// Whether the student still needs the given course.
    pub fn needs(&self, course_code: &str) -> bool {
        self.remaining_courses.iter().any(|c| c == course_code)
    }
}
