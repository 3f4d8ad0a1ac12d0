//! Teaching days and time slots.
//!
//! The academic week runs Sunday through Thursday. A `TimeSlot` is a
//! day-of-week plus a half-open minute interval `[start, end)` measured
//! from midnight. Canonical slots are pre-enumerated by the caller and
//! carried in the snapshot; the core never invents new slot boundaries.
//!
//! # Overlap
//! Two slots on the same day overlap iff `s1 < e2 && s2 < e1`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest minute a meeting may start (08:00).
pub const OPERATING_START_MIN: u16 = 8 * 60;
/// Latest minute a meeting may end (20:00).
pub const OPERATING_END_MIN: u16 = 20 * 60;

/// A teaching day. The week runs Sunday through Thursday.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

impl Day {
    /// All teaching days in week order.
    pub const ALL: [Day; 5] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
    ];

    /// Zero-based index within the teaching week (Sunday = 0).
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Day::Sunday => 0,
            Day::Monday => 1,
            Day::Tuesday => 2,
            Day::Wednesday => 3,
            Day::Thursday => 4,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Sunday => "Sun",
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
        };
        f.write_str(name)
    }
}

/// A weekly time slot: one day plus a half-open minute interval.
///
/// Minutes are counted from midnight, so 08:30 is 510. The interval
/// includes `start_min` and excludes `end_min`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSlot {
    /// Teaching day.
    pub day: Day,
    /// Start minute (inclusive).
    pub start_min: u16,
    /// End minute (exclusive).
    pub end_min: u16,
}

impl TimeSlot {
    /// Creates a new slot.
    pub fn new(day: Day, start_min: u16, end_min: u16) -> Self {
        Self {
            day,
            start_min,
            end_min,
        }
    }

    /// Slot duration in minutes.
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end_min.saturating_sub(self.start_min)
    }

    /// Whether a minute-of-day falls within this slot (same-day check
    /// is the caller's concern).
    #[inline]
    pub fn contains(&self, minute: u16) -> bool {
        minute >= self.start_min && minute < self.end_min
    }

    /// Whether two slots overlap.
    ///
    /// Slots on different days never overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Whether this slot intersects the minute window `[start, end)`
    /// on any of the given days.
    pub fn intersects_window(&self, days: &[Day], start_min: u16, end_min: u16) -> bool {
        days.contains(&self.day) && self.start_min < end_min && start_min < self.end_min
    }

    /// Whether the slot has positive duration and sits inside campus
    /// operating hours.
    pub fn is_within_operating_hours(&self) -> bool {
        self.start_min < self.end_min
            && self.start_min >= OPERATING_START_MIN
            && self.end_min <= OPERATING_END_MIN
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}-{:02}:{:02}",
            self.day,
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_ordering() {
        assert!(Day::Sunday < Day::Monday);
        assert!(Day::Wednesday < Day::Thursday);
        assert_eq!(Day::Sunday.index(), 0);
        assert_eq!(Day::Thursday.index(), 4);
    }

    #[test]
    fn test_duration() {
        let slot = TimeSlot::new(Day::Sunday, 480, 570);
        assert_eq!(slot.duration_min(), 90);
    }

    #[test]
    fn test_overlap_same_day() {
        let a = TimeSlot::new(Day::Monday, 600, 660);
        let b = TimeSlot::new(Day::Monday, 630, 690);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_adjacent_slots_do_not_overlap() {
        // [600,660) and [660,720) share only the boundary minute
        let a = TimeSlot::new(Day::Monday, 600, 660);
        let b = TimeSlot::new(Day::Monday, 660, 720);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_no_overlap_across_days() {
        let a = TimeSlot::new(Day::Sunday, 600, 660);
        let b = TimeSlot::new(Day::Monday, 600, 660);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_intersects_window() {
        let slot = TimeSlot::new(Day::Tuesday, 700, 760);
        // Break window 12:00-13:00 on Tue
        assert!(slot.intersects_window(&[Day::Tuesday], 720, 780));
        // Same window, wrong day
        assert!(!slot.intersects_window(&[Day::Monday], 720, 780));
        // Slot ends exactly when the window opens
        let before = TimeSlot::new(Day::Tuesday, 660, 720);
        assert!(!before.intersects_window(&[Day::Tuesday], 720, 780));
    }

    #[test]
    fn test_operating_hours() {
        assert!(TimeSlot::new(Day::Sunday, 480, 540).is_within_operating_hours());
        // Starts before 08:00
        assert!(!TimeSlot::new(Day::Sunday, 420, 540).is_within_operating_hours());
        // Ends after 20:00
        assert!(!TimeSlot::new(Day::Sunday, 1140, 1260).is_within_operating_hours());
        // Zero duration
        assert!(!TimeSlot::new(Day::Sunday, 540, 540).is_within_operating_hours());
    }

    #[test]
    fn test_display() {
        let slot = TimeSlot::new(Day::Sunday, 480, 570);
        assert_eq!(slot.to_string(), "Sun 08:00-09:30");
    }

    #[test]
    fn test_slot_ordering() {
        let early = TimeSlot::new(Day::Sunday, 480, 540);
        let later = TimeSlot::new(Day::Sunday, 600, 660);
        let monday = TimeSlot::new(Day::Monday, 480, 540);
        assert!(early < later);
        assert!(later < monday);
    }

    #[test]
    fn test_serde_roundtrip() {
        let slot = TimeSlot::new(Day::Wednesday, 600, 690);
        let json = serde_json::to_string(&slot).unwrap();
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(slot, back);
    }
}
