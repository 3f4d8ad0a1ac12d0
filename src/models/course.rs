//! Course, section, and meeting models.
//!
//! A `Course` is immutable catalog data for a term. A `Section` is one
//! offered instance of a course with its own instructor, room, and
//! meetings. A `Meeting` is a single weekly occurrence of a section at
//! one time slot — a section may have several (e.g., lecture + lab),
//! but each meeting maps to exactly one slot.

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// Kind of activity a meeting hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Lecture,
    Lab,
    Tutorial,
    Exam,
}

/// Catalog entry for a course offered in a term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g., "CS101").
    pub code: String,
    /// Course title.
    pub name: String,
    /// Credit hours.
    pub credit_hours: u8,
    /// Required weekly contact hours.
    pub weekly_contact_hours: u8,
    /// Curriculum level (year), e.g. 4..=8.
    pub level: u8,
    /// Campus offering the course.
    pub campus: String,
}

impl Course {
    /// Creates a new course at the given level.
    pub fn new(code: impl Into<String>, level: u8) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            credit_hours: 3,
            weekly_contact_hours: 3,
            level,
            campus: String::new(),
        }
    }

    /// Sets the course title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets credit hours.
    pub fn with_credit_hours(mut self, hours: u8) -> Self {
        self.credit_hours = hours;
        self
    }

    /// Sets required weekly contact hours.
    pub fn with_weekly_contact_hours(mut self, hours: u8) -> Self {
        self.weekly_contact_hours = hours;
        self
    }

    /// Sets the campus.
    pub fn with_campus(mut self, campus: impl Into<String>) -> Self {
        self.campus = campus.into();
        self
    }
}

/// One offered instance of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier (e.g., "CS101-1").
    pub id: String,
    /// Owning course code.
    pub course_code: String,
    /// Assigned instructor, if any.
    pub instructor_id: Option<String>,
    /// Assigned room, if any (None = online).
    pub room_id: Option<String>,
    /// Expected or actual enrolled student count.
    pub student_count: u32,
}

impl Section {
    /// Creates a new section of a course.
    pub fn new(id: impl Into<String>, course_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            course_code: course_code.into(),
            instructor_id: None,
            room_id: None,
            student_count: 0,
        }
    }

    /// Assigns an instructor.
    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    /// Assigns a room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Sets the student count.
    pub fn with_student_count(mut self, count: u32) -> Self {
        self.student_count = count;
        self
    }
}

/// A single weekly occurrence of a section at one time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique meeting identifier (e.g., "CS101-1/lec").
    pub id: String,
    /// Owning section.
    pub section_id: String,
    /// The one time slot this meeting occupies.
    pub slot: TimeSlot,
    /// Activity kind.
    pub kind: ActivityKind,
}

impl Meeting {
    /// Creates a new meeting.
    pub fn new(
        id: impl Into<String>,
        section_id: impl Into<String>,
        slot: TimeSlot,
        kind: ActivityKind,
    ) -> Self {
        Self {
            id: id.into(),
            section_id: section_id.into(),
            slot,
            kind,
        }
    }

    /// Meeting duration in minutes.
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.slot.duration_min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    #[test]
    fn test_course_builder() {
        let c = Course::new("CS101", 4)
            .with_name("Intro to Computing")
            .with_credit_hours(4)
            .with_weekly_contact_hours(5)
            .with_campus("Main");
        assert_eq!(c.code, "CS101");
        assert_eq!(c.level, 4);
        assert_eq!(c.credit_hours, 4);
        assert_eq!(c.weekly_contact_hours, 5);
    }

    #[test]
    fn test_section_builder() {
        let s = Section::new("CS101-1", "CS101")
            .with_instructor("I1")
            .with_room("R101")
            .with_student_count(30);
        assert_eq!(s.course_code, "CS101");
        assert_eq!(s.instructor_id.as_deref(), Some("I1"));
        assert_eq!(s.room_id.as_deref(), Some("R101"));
        assert_eq!(s.student_count, 30);
    }

    #[test]
    fn test_online_section_has_no_room() {
        let s = Section::new("CS101-2", "CS101");
        assert!(s.room_id.is_none());
    }

    #[test]
    fn test_meeting_duration() {
        let m = Meeting::new(
            "CS101-1/lec",
            "CS101-1",
            TimeSlot::new(Day::Sunday, 480, 570),
            ActivityKind::Lecture,
        );
        assert_eq!(m.duration_min(), 90);
    }
}
