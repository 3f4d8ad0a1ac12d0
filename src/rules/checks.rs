//! Built-in constraint rules.
//!
//! Six rules cover the committee's constraint set: the two pair checks
//! (room and instructor double-booking), capacity, the two window
//! checks (break time, midterm blackout), and the elective preference
//! cap. Pair checks also see external reserved blocks as occupied
//! slots.

use std::collections::BTreeMap;

use super::{RuleError, SchedulingRule};
use crate::models::{
    Conflict, ConflictKind, ConflictTarget, DailyWindow, EntityKind, RuleKind, Severity, Snapshot,
    TimeSlot,
};

/// One occupied slot on a keyed resource (room or instructor), either
/// a catalog meeting or an external reserved block.
#[derive(Debug, Clone)]
struct Occupancy {
    target: ConflictTarget,
    slot: TimeSlot,
}

/// Collects pairwise overlaps within each occupancy group.
///
/// The pair is ordered by target before describing it, so the same
/// violation yields the same conflict whatever order the meetings were
/// loaded in.
fn overlapping_pairs(
    groups: BTreeMap<String, Vec<Occupancy>>,
    kind: ConflictKind,
    describe: impl Fn(&str, &Occupancy, &Occupancy) -> String,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for (key, occupancies) in groups {
        for i in 0..occupancies.len() {
            for j in (i + 1)..occupancies.len() {
                let (mut a, mut b) = (&occupancies[i], &occupancies[j]);
                if b.target < a.target {
                    std::mem::swap(&mut a, &mut b);
                }
                if a.slot.overlaps(&b.slot) {
                    conflicts.push(Conflict::new(
                        kind,
                        Severity::High,
                        vec![a.target.clone(), b.target.clone()],
                        describe(&key, a, b),
                    ));
                }
            }
        }
    }
    conflicts
}

fn window_or_invalid(
    window: &DailyWindow,
    rule: RuleKind,
) -> Result<&DailyWindow, RuleError> {
    if window.start_min >= window.end_min {
        return Err(RuleError::InvalidParameter {
            rule,
            detail: format!(
                "window start {} is not before end {}",
                window.start_min, window.end_min
            ),
        });
    }
    Ok(window)
}

/// Flags meetings that share a room at overlapping times.
#[derive(Debug, Clone, Copy)]
pub struct RoomDoubleBooking;

impl SchedulingRule for RoomDoubleBooking {
    fn kind(&self) -> RuleKind {
        RuleKind::RoomDoubleBooking
    }

    fn evaluate(&self, snapshot: &Snapshot) -> Result<Vec<Conflict>, RuleError> {
        let mut by_room: BTreeMap<String, Vec<Occupancy>> = BTreeMap::new();

        for meeting in &snapshot.meetings {
            let room_id = snapshot
                .section_for_meeting(meeting)
                .and_then(|s| s.room_id.clone());
            // Online sections have no room and cannot double-book one
            if let Some(room_id) = room_id {
                by_room.entry(room_id).or_default().push(Occupancy {
                    target: ConflictTarget::meeting(&meeting.id),
                    slot: meeting.slot,
                });
            }
        }
        for external in &snapshot.external_slots {
            if let Some(room_id) = &external.room_id {
                by_room.entry(room_id.clone()).or_default().push(Occupancy {
                    target: ConflictTarget::new(EntityKind::External, &external.id),
                    slot: external.slot,
                });
            }
        }

        Ok(overlapping_pairs(
            by_room,
            ConflictKind::RoomDoubleBooking,
            |room, a, b| {
                format!(
                    "room {room} is double-booked: {} ({}) overlaps {} ({})",
                    a.target, a.slot, b.target, b.slot
                )
            },
        ))
    }

    fn description(&self) -> &'static str {
        "No two meetings may occupy the same room at overlapping times"
    }
}

/// Flags meetings that share an instructor at overlapping times.
#[derive(Debug, Clone, Copy)]
pub struct InstructorDoubleBooking;

impl SchedulingRule for InstructorDoubleBooking {
    fn kind(&self) -> RuleKind {
        RuleKind::InstructorDoubleBooking
    }

    fn evaluate(&self, snapshot: &Snapshot) -> Result<Vec<Conflict>, RuleError> {
        let mut by_instructor: BTreeMap<String, Vec<Occupancy>> = BTreeMap::new();

        for meeting in &snapshot.meetings {
            let instructor_id = snapshot
                .section_for_meeting(meeting)
                .and_then(|s| s.instructor_id.clone());
            if let Some(instructor_id) = instructor_id {
                by_instructor
                    .entry(instructor_id)
                    .or_default()
                    .push(Occupancy {
                        target: ConflictTarget::meeting(&meeting.id),
                        slot: meeting.slot,
                    });
            }
        }
        for external in &snapshot.external_slots {
            if let Some(instructor_id) = &external.instructor_id {
                by_instructor
                    .entry(instructor_id.clone())
                    .or_default()
                    .push(Occupancy {
                        target: ConflictTarget::new(EntityKind::External, &external.id),
                        slot: external.slot,
                    });
            }
        }

        Ok(overlapping_pairs(
            by_instructor,
            ConflictKind::InstructorDoubleBooking,
            |instructor, a, b| {
                format!(
                    "instructor {instructor} is double-booked: {} ({}) overlaps {} ({})",
                    a.target, a.slot, b.target, b.slot
                )
            },
        ))
    }

    fn description(&self) -> &'static str {
        "No instructor may teach two overlapping meetings"
    }
}

/// Flags sections whose student count exceeds their room's capacity.
#[derive(Debug, Clone, Copy)]
pub struct CapacityOverflow;

impl SchedulingRule for CapacityOverflow {
    fn kind(&self) -> RuleKind {
        RuleKind::CapacityOverflow
    }

    fn evaluate(&self, snapshot: &Snapshot) -> Result<Vec<Conflict>, RuleError> {
        let mut conflicts = Vec::new();
        for section in &snapshot.sections {
            let Some(room_id) = &section.room_id else {
                continue;
            };
            // Dangling room references are the validator's concern
            let Some(room) = snapshot.room_by_id(room_id) else {
                continue;
            };
            if !room.fits(section.student_count) {
                conflicts.push(Conflict::capacity_overflow(
                    &section.id,
                    format!(
                        "section {} has {} students but room {} seats {}",
                        section.id, section.student_count, room.id, room.capacity
                    ),
                ));
            }
        }
        Ok(conflicts)
    }

    fn description(&self) -> &'static str {
        "A section's student count must not exceed its room's capacity"
    }
}

/// Flags meetings intersecting the campus break window.
#[derive(Debug, Clone, Copy)]
pub struct BreakTimeViolation;

impl SchedulingRule for BreakTimeViolation {
    fn kind(&self) -> RuleKind {
        RuleKind::BreakTimeViolation
    }

    fn evaluate(&self, snapshot: &Snapshot) -> Result<Vec<Conflict>, RuleError> {
        let Some(window) = &snapshot.config.break_window else {
            return Ok(Vec::new());
        };
        let window = window_or_invalid(window, self.kind())?;

        let mut conflicts = Vec::new();
        for meeting in &snapshot.meetings {
            if meeting
                .slot
                .intersects_window(&window.days, window.start_min, window.end_min)
            {
                conflicts.push(Conflict::break_time(
                    &meeting.id,
                    format!(
                        "meeting {} ({}) intersects the campus break window",
                        meeting.id, meeting.slot
                    ),
                ));
            }
        }
        Ok(conflicts)
    }

    fn description(&self) -> &'static str {
        "Meetings must not intersect the campus break window"
    }
}

/// Flags meetings scheduled inside the midterm blackout window.
#[derive(Debug, Clone, Copy)]
pub struct MidtermBlackout;

impl SchedulingRule for MidtermBlackout {
    fn kind(&self) -> RuleKind {
        RuleKind::MidtermBlackout
    }

    fn evaluate(&self, snapshot: &Snapshot) -> Result<Vec<Conflict>, RuleError> {
        let Some(window) = &snapshot.config.midterm_blackout else {
            return Ok(Vec::new());
        };
        let window = window_or_invalid(window, self.kind())?;

        let mut conflicts = Vec::new();
        for meeting in &snapshot.meetings {
            if meeting
                .slot
                .intersects_window(&window.days, window.start_min, window.end_min)
            {
                conflicts.push(Conflict::midterm_blackout(
                    &meeting.id,
                    format!(
                        "meeting {} ({}) falls inside the midterm blackout window",
                        meeting.id, meeting.slot
                    ),
                ));
            }
        }
        Ok(conflicts)
    }

    fn description(&self) -> &'static str {
        "Meetings must not be scheduled during the midterm blackout"
    }
}

/// Flags preference submissions over the ranked-choice cap.
#[derive(Debug, Clone, Copy)]
pub struct ElectivePreferenceLimit;

impl SchedulingRule for ElectivePreferenceLimit {
    fn kind(&self) -> RuleKind {
        RuleKind::ElectivePreferenceLimit
    }

    fn evaluate(&self, snapshot: &Snapshot) -> Result<Vec<Conflict>, RuleError> {
        let max = snapshot.config.max_elective_preferences;
        let mut conflicts = Vec::new();
        for submission in &snapshot.preferences {
            if submission.choice_count() > max {
                conflicts.push(Conflict::preference_limit(
                    &submission.student_id,
                    format!(
                        "student {} ranked {} electives; the limit is {}",
                        submission.student_id,
                        submission.choice_count(),
                        max
                    ),
                ));
            }
        }
        Ok(conflicts)
    }

    fn description(&self) -> &'static str {
        "A preference submission may not exceed the ranked-choice cap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityKind, Day, ExternalSlot, Meeting, PreferenceSubmission, Room, ScheduleConfig,
        Section,
    };

    fn slot(day: Day, start: u16, end: u16) -> TimeSlot {
        TimeSlot::new(day, start, end)
    }

    fn snapshot_with_two_meetings_in_r101() -> Snapshot {
        Snapshot::new()
            .with_room(Room::new("R101", 35))
            .with_section(Section::new("A-1", "A").with_room("R101"))
            .with_section(Section::new("B-1", "B").with_room("R101"))
            .with_meeting(Meeting::new(
                "A-1/lec",
                "A-1",
                slot(Day::Monday, 600, 660),
                ActivityKind::Lecture,
            ))
            .with_meeting(Meeting::new(
                "B-1/lec",
                "B-1",
                slot(Day::Monday, 600, 660),
                ActivityKind::Lecture,
            ))
    }

    #[test]
    fn test_room_double_booking_detected() {
        let snap = snapshot_with_two_meetings_in_r101();
        let conflicts = RoomDoubleBooking.evaluate(&snap).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::RoomDoubleBooking);
        assert_eq!(conflicts[0].severity, Severity::High);
        let ids: Vec<&str> = conflicts[0].targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["A-1/lec", "B-1/lec"]);
    }

    #[test]
    fn test_pair_conflict_identical_under_reversed_input() {
        // Same violation, reversed load order: targets AND message
        // must match byte for byte
        let snap = snapshot_with_two_meetings_in_r101();
        let mut reversed = snap.clone();
        reversed.meetings.reverse();
        reversed.sections.reverse();
        assert_eq!(
            RoomDoubleBooking.evaluate(&snap).unwrap(),
            RoomDoubleBooking.evaluate(&reversed).unwrap()
        );
    }

    #[test]
    fn test_room_double_booking_ignores_different_days() {
        let mut snap = snapshot_with_two_meetings_in_r101();
        snap.meetings[1].slot = slot(Day::Tuesday, 600, 660);
        assert!(RoomDoubleBooking.evaluate(&snap).unwrap().is_empty());
    }

    #[test]
    fn test_online_sections_never_room_conflict() {
        let snap = Snapshot::new()
            .with_section(Section::new("A-1", "A"))
            .with_section(Section::new("B-1", "B"))
            .with_meeting(Meeting::new(
                "A-1/lec",
                "A-1",
                slot(Day::Monday, 600, 660),
                ActivityKind::Lecture,
            ))
            .with_meeting(Meeting::new(
                "B-1/lec",
                "B-1",
                slot(Day::Monday, 600, 660),
                ActivityKind::Lecture,
            ));
        assert!(RoomDoubleBooking.evaluate(&snap).unwrap().is_empty());
    }

    #[test]
    fn test_external_slot_blocks_room() {
        let snap = Snapshot::new()
            .with_room(Room::new("R101", 35))
            .with_section(Section::new("A-1", "A").with_room("R101"))
            .with_meeting(Meeting::new(
                "A-1/lec",
                "A-1",
                slot(Day::Monday, 600, 660),
                ActivityKind::Lecture,
            ))
            .with_external_slot(
                ExternalSlot::new("X1", slot(Day::Monday, 630, 690)).with_room("R101"),
            );
        let conflicts = RoomDoubleBooking.evaluate(&snap).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0]
            .targets
            .iter()
            .any(|t| t.entity == EntityKind::External));
    }

    #[test]
    fn test_instructor_double_booking() {
        let snap = Snapshot::new()
            .with_section(Section::new("A-1", "A").with_instructor("I1"))
            .with_section(Section::new("B-1", "B").with_instructor("I1"))
            .with_meeting(Meeting::new(
                "A-1/lec",
                "A-1",
                slot(Day::Sunday, 480, 570),
                ActivityKind::Lecture,
            ))
            .with_meeting(Meeting::new(
                "B-1/lec",
                "B-1",
                slot(Day::Sunday, 540, 630),
                ActivityKind::Lecture,
            ));
        let conflicts = InstructorDoubleBooking.evaluate(&snap).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::InstructorDoubleBooking);
    }

    #[test]
    fn test_different_instructors_no_conflict() {
        let snap = Snapshot::new()
            .with_section(Section::new("A-1", "A").with_instructor("I1"))
            .with_section(Section::new("B-1", "B").with_instructor("I2"))
            .with_meeting(Meeting::new(
                "A-1/lec",
                "A-1",
                slot(Day::Sunday, 480, 570),
                ActivityKind::Lecture,
            ))
            .with_meeting(Meeting::new(
                "B-1/lec",
                "B-1",
                slot(Day::Sunday, 480, 570),
                ActivityKind::Lecture,
            ));
        assert!(InstructorDoubleBooking.evaluate(&snap).unwrap().is_empty());
    }

    #[test]
    fn test_capacity_overflow() {
        let snap = Snapshot::new()
            .with_room(Room::new("R101", 35))
            .with_section(
                Section::new("A-1", "A")
                    .with_room("R101")
                    .with_student_count(40),
            );
        let conflicts = CapacityOverflow.evaluate(&snap).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::CapacityOverflow);
    }

    #[test]
    fn test_capacity_at_limit_is_fine() {
        let snap = Snapshot::new()
            .with_room(Room::new("R101", 35))
            .with_section(
                Section::new("A-1", "A")
                    .with_room("R101")
                    .with_student_count(35),
            );
        assert!(CapacityOverflow.evaluate(&snap).unwrap().is_empty());
    }

    #[test]
    fn test_break_time_violation() {
        // Default config: break 12:00-13:00 every day
        let snap = Snapshot::new()
            .with_section(Section::new("A-1", "A"))
            .with_meeting(Meeting::new(
                "A-1/lec",
                "A-1",
                slot(Day::Wednesday, 750, 810),
                ActivityKind::Lecture,
            ));
        let conflicts = BreakTimeViolation.evaluate(&snap).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::BreakTimeViolation);
    }

    #[test]
    fn test_no_break_window_means_no_conflicts() {
        let snap = Snapshot::new()
            .with_config(ScheduleConfig::new().without_break_window())
            .with_section(Section::new("A-1", "A"))
            .with_meeting(Meeting::new(
                "A-1/lec",
                "A-1",
                slot(Day::Wednesday, 750, 810),
                ActivityKind::Lecture,
            ));
        assert!(BreakTimeViolation.evaluate(&snap).unwrap().is_empty());
    }

    #[test]
    fn test_inverted_break_window_is_a_rule_error() {
        let snap = Snapshot::new().with_config(
            ScheduleConfig::new().with_break_window(DailyWindow::new(Day::ALL.to_vec(), 780, 720)),
        );
        let err = BreakTimeViolation.evaluate(&snap).unwrap_err();
        assert!(matches!(
            err,
            RuleError::InvalidParameter {
                rule: RuleKind::BreakTimeViolation,
                ..
            }
        ));
    }

    #[test]
    fn test_midterm_blackout() {
        let snap = Snapshot::new()
            .with_config(ScheduleConfig::new().with_midterm_blackout(DailyWindow::new(
                vec![Day::Tuesday],
                960,
                1080,
            )))
            .with_section(Section::new("A-1", "A"))
            .with_meeting(Meeting::new(
                "A-1/lec",
                "A-1",
                slot(Day::Tuesday, 990, 1050),
                ActivityKind::Lecture,
            ))
            .with_meeting(Meeting::new(
                "A-1/lab",
                "A-1",
                slot(Day::Monday, 990, 1050),
                ActivityKind::Lab,
            ));
        let conflicts = MidtermBlackout.evaluate(&snap).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].primary_target_id(), "A-1/lec");
    }

    #[test]
    fn test_preference_limit() {
        let over = PreferenceSubmission::new("S1")
            .with_choice("E1")
            .with_choice("E2")
            .with_choice("E3");
        let within = PreferenceSubmission::new("S2").with_choice("E1");
        let snap = Snapshot::new()
            .with_config(ScheduleConfig::new().with_max_elective_preferences(2))
            .with_preference(over)
            .with_preference(within);
        let conflicts = ElectivePreferenceLimit.evaluate(&snap).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].primary_target_id(), "S1");
        assert_eq!(conflicts[0].severity, Severity::Low);
    }
}
