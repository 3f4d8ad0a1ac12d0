//! The evaluation snapshot.
//!
//! A `Snapshot` is the complete in-memory view of one term's scheduling
//! data at the moment of evaluation: catalog, inventory, current
//! sections and meetings, committee config. Every core operation takes
//! the snapshot by reference and returns fresh values — the core holds
//! no mutable state between calls, and persistence is entirely the
//! caller's concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    Course, ExternalSlot, Instructor, IrregularStudent, Meeting, PreferenceSubmission, Room,
    ScheduleConfig, Section, Term, TimeSlot,
};

/// Complete in-memory scheduling state for evaluation and generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Known terms.
    pub terms: Vec<Term>,
    /// Course catalog for the term.
    pub courses: Vec<Course>,
    /// Room inventory.
    pub rooms: Vec<Room>,
    /// Teaching staff.
    pub instructors: Vec<Instructor>,
    /// Canonical time slots available for placement.
    pub time_slots: Vec<TimeSlot>,
    /// Currently scheduled sections.
    pub sections: Vec<Section>,
    /// Currently scheduled meetings.
    pub meetings: Vec<Meeting>,
    /// Reserved blocks owned by other departments.
    pub external_slots: Vec<ExternalSlot>,
    /// Students off the standard curriculum.
    pub irregular_students: Vec<IrregularStudent>,
    /// Elective preference submissions.
    pub preferences: Vec<PreferenceSubmission>,
    /// Expected enrollment per course code.
    pub expected_enrollment: BTreeMap<String, u32>,
    /// Active committee configuration.
    pub config: ScheduleConfig,
}

impl Snapshot {
    /// Creates an empty snapshot with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term.
    pub fn with_term(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds an instructor.
    pub fn with_instructor(mut self, instructor: Instructor) -> Self {
        self.instructors.push(instructor);
        self
    }

    /// Adds a canonical time slot.
    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a meeting.
    pub fn with_meeting(mut self, meeting: Meeting) -> Self {
        self.meetings.push(meeting);
        self
    }

    /// Adds an external reserved block.
    pub fn with_external_slot(mut self, slot: ExternalSlot) -> Self {
        self.external_slots.push(slot);
        self
    }

    /// Adds an irregular-student record.
    pub fn with_irregular_student(mut self, student: IrregularStudent) -> Self {
        self.irregular_students.push(student);
        self
    }

    /// Adds a preference submission.
    pub fn with_preference(mut self, submission: PreferenceSubmission) -> Self {
        self.preferences.push(submission);
        self
    }

    /// Sets expected enrollment for a course.
    pub fn with_expected_enrollment(mut self, course_code: impl Into<String>, count: u32) -> Self {
        self.expected_enrollment.insert(course_code.into(), count);
        self
    }

    /// Sets the committee config.
    pub fn with_config(mut self, config: ScheduleConfig) -> Self {
        self.config = config;
        self
    }

    // ---- lookups ----

    /// Finds a term by code.
    pub fn term_by_code(&self, code: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.code == code)
    }

    /// Finds a course by code.
    pub fn course_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Finds a room by id.
    pub fn room_by_id(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Finds an instructor by id.
    pub fn instructor_by_id(&self, id: &str) -> Option<&Instructor> {
        self.instructors.iter().find(|i| i.id == id)
    }

    /// Finds a section by id.
    pub fn section_by_id(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Courses at a curriculum level, in code order.
    pub fn courses_at_level(&self, level: u8) -> Vec<&Course> {
        let mut courses: Vec<&Course> =
            self.courses.iter().filter(|c| c.level == level).collect();
        courses.sort_by(|a, b| a.code.cmp(&b.code));
        courses
    }

    /// Meetings belonging to a section.
    pub fn meetings_for_section(&self, section_id: &str) -> Vec<&Meeting> {
        self.meetings
            .iter()
            .filter(|m| m.section_id == section_id)
            .collect()
    }

    /// The section that owns a meeting.
    pub fn section_for_meeting(&self, meeting: &Meeting) -> Option<&Section> {
        self.section_by_id(&meeting.section_id)
    }

    /// The instructor teaching a meeting, resolved through its section.
    pub fn instructor_for_meeting(&self, meeting: &Meeting) -> Option<&Instructor> {
        self.section_for_meeting(meeting)
            .and_then(|s| s.instructor_id.as_deref())
            .and_then(|id| self.instructor_by_id(id))
    }

    /// Expected enrollment for a course (0 if unknown).
    pub fn expected_enrollment_for(&self, course_code: &str) -> u32 {
        self.expected_enrollment
            .get(course_code)
            .copied()
            .unwrap_or(0)
    }

    /// Canonical slots sorted by (day, start, end).
    pub fn sorted_time_slots(&self) -> Vec<TimeSlot> {
        let mut slots = self.time_slots.clone();
        slots.sort();
        slots.dedup();
        slots
    }

    /// Weekly scheduled minutes for an instructor, summed over the
    /// meetings of their sections.
    pub fn instructor_weekly_minutes(&self, instructor_id: &str) -> u32 {
        self.meetings
            .iter()
            .filter(|m| {
                self.section_for_meeting(m)
                    .and_then(|s| s.instructor_id.as_deref())
                    == Some(instructor_id)
            })
            .map(|m| u32::from(m.duration_min()))
            .sum()
    }
}
