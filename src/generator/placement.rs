//! Greedy feasibility search for one section.
//!
//! The placement state tracks room and instructor occupancy as the
//! run commits sections, seeded from everything already on the books
//! (existing meetings and external reserved blocks). Candidate
//! enumeration is fully deterministic: slots in (day, start) order,
//! rooms and instructors in id order, and the winner minimizes
//! (added instructor gap, day index, start minute, room id,
//! instructor id).

use std::collections::BTreeMap;

use crate::models::{Snapshot, TimeSlot};

/// A feasible (slot, room, instructor) triple for a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Chosen slot.
    pub slot: TimeSlot,
    /// Chosen room.
    pub room_id: String,
    /// Chosen instructor.
    pub instructor_id: String,
}

/// Mutable occupancy bookkeeping for one generation run.
///
/// Holds no references into the snapshot; the generator owns it for
/// the duration of a run and drops it afterwards.
#[derive(Debug, Clone, Default)]
pub struct PlacementState {
    room_busy: BTreeMap<String, Vec<TimeSlot>>,
    instructor_busy: BTreeMap<String, Vec<TimeSlot>>,
    instructor_load_min: BTreeMap<String, u32>,
}

impl PlacementState {
    /// Seeds occupancy from everything already scheduled in the
    /// snapshot: meetings (through their sections) and external
    /// reserved blocks.
    pub fn seeded_from(snapshot: &Snapshot) -> Self {
        let mut state = Self::default();
        for meeting in &snapshot.meetings {
            let section = snapshot.section_for_meeting(meeting);
            if let Some(room_id) = section.and_then(|s| s.room_id.as_deref()) {
                state.occupy_room(room_id, meeting.slot);
            }
            if let Some(instructor_id) = section.and_then(|s| s.instructor_id.as_deref()) {
                state.occupy_instructor(instructor_id, meeting.slot);
            }
        }
        for external in &snapshot.external_slots {
            if let Some(room_id) = &external.room_id {
                state.occupy_room(room_id, external.slot);
            }
            if let Some(instructor_id) = &external.instructor_id {
                state.occupy_instructor(instructor_id, external.slot);
            }
        }
        state
    }

    /// Records a room as busy during a slot.
    pub fn occupy_room(&mut self, room_id: &str, slot: TimeSlot) {
        self.room_busy.entry(room_id.to_string()).or_default().push(slot);
    }

    /// Records an instructor as busy during a slot and adds to their
    /// weekly load.
    pub fn occupy_instructor(&mut self, instructor_id: &str, slot: TimeSlot) {
        self.instructor_busy
            .entry(instructor_id.to_string())
            .or_default()
            .push(slot);
        *self
            .instructor_load_min
            .entry(instructor_id.to_string())
            .or_insert(0) += u32::from(slot.duration_min());
    }

    /// Whether a room is free for the whole slot.
    pub fn room_free(&self, room_id: &str, slot: &TimeSlot) -> bool {
        self.room_busy
            .get(room_id)
            .map(|busy| !busy.iter().any(|b| b.overlaps(slot)))
            .unwrap_or(true)
    }

    /// Whether an instructor is free for the whole slot.
    pub fn instructor_free(&self, instructor_id: &str, slot: &TimeSlot) -> bool {
        self.instructor_busy
            .get(instructor_id)
            .map(|busy| !busy.iter().any(|b| b.overlaps(slot)))
            .unwrap_or(true)
    }

    /// Current weekly load in minutes for an instructor.
    pub fn instructor_load(&self, instructor_id: &str) -> u32 {
        self.instructor_load_min
            .get(instructor_id)
            .copied()
            .unwrap_or(0)
    }

    /// Extra idle time an instructor would accrue by taking the slot.
    ///
    /// Gap on a day = span from first start to last end minus busy
    /// minutes. The delta is the change in that day's gap, so a slot
    /// adjacent to existing teaching scores 0 and an isolated
    /// afternoon slot after a morning class scores the idle stretch
    /// between them.
    pub fn gap_delta(&self, instructor_id: &str, slot: &TimeSlot) -> u32 {
        let empty = Vec::new();
        let day_slots: Vec<&TimeSlot> = self
            .instructor_busy
            .get(instructor_id)
            .unwrap_or(&empty)
            .iter()
            .filter(|b| b.day == slot.day)
            .collect();

        let gap_of = |slots: &[&TimeSlot]| -> u32 {
            if slots.is_empty() {
                return 0;
            }
            let start = slots.iter().map(|s| s.start_min).min().unwrap_or(0);
            let end = slots.iter().map(|s| s.end_min).max().unwrap_or(0);
            let busy: u32 = slots.iter().map(|s| u32::from(s.duration_min())).sum();
            u32::from(end.saturating_sub(start)).saturating_sub(busy)
        };

        let before = gap_of(&day_slots);
        let mut with_slot = day_slots;
        with_slot.push(slot);
        let after = gap_of(&with_slot);
        after.saturating_sub(before)
    }
}

/// Finds the best feasible placement for a section of `student_count`
/// students, or `None` if every candidate violates a hard constraint.
///
/// Hard constraints: room free and large enough, instructor available
/// (declared coverage), instructor free, instructor weekly load within
/// their maximum after taking the slot.
pub fn best_candidate(
    snapshot: &Snapshot,
    state: &PlacementState,
    student_count: u32,
) -> Option<Candidate> {
    let slots = snapshot.sorted_time_slots();

    let mut rooms: Vec<_> = snapshot.rooms.iter().collect();
    rooms.sort_by(|a, b| a.id.cmp(&b.id));
    let mut instructors: Vec<_> = snapshot.instructors.iter().collect();
    instructors.sort_by(|a, b| a.id.cmp(&b.id));

    let mut best: Option<(u32, Candidate)> = None;

    for slot in &slots {
        for room in &rooms {
            if !room.fits(student_count) || !state.room_free(&room.id, slot) {
                continue;
            }
            for instructor in &instructors {
                if !instructor.covers(slot) || !state.instructor_free(&instructor.id, slot) {
                    continue;
                }
                let load_after =
                    state.instructor_load(&instructor.id) + u32::from(slot.duration_min());
                if load_after > instructor.max_load_min() {
                    continue;
                }

                let gap = state.gap_delta(&instructor.id, slot);
                let candidate = Candidate {
                    slot: *slot,
                    room_id: room.id.clone(),
                    instructor_id: instructor.id.clone(),
                };
                let better = match &best {
                    None => true,
                    Some((best_gap, best_c)) => {
                        let key = (
                            gap,
                            slot.day.index(),
                            slot.start_min,
                            &candidate.room_id,
                            &candidate.instructor_id,
                        );
                        let best_key = (
                            *best_gap,
                            best_c.slot.day.index(),
                            best_c.slot.start_min,
                            &best_c.room_id,
                            &best_c.instructor_id,
                        );
                        key < best_key
                    }
                };
                if better {
                    best = Some((gap, candidate));
                }
            }
        }
    }

    best.map(|(_, c)| c)
}
