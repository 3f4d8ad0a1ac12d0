//! Instructor model.
//!
//! An instructor carries a weekly availability pattern (a set of time
//! slots during which they may teach) and a maximum teaching load in
//! hours per week. Assigned sections are derived from the schedule,
//! never stored here.

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A teaching staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Maximum weekly teaching load (hours).
    pub max_load_hours: u16,
    /// Weekly availability. Empty = available at any slot.
    pub availability: Vec<TimeSlot>,
}

impl Instructor {
    /// Creates a new instructor with a default 12-hour weekly load.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_load_hours: 12,
            availability: Vec::new(),
        }
    }

    /// Sets the instructor name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the maximum weekly load in hours.
    pub fn with_max_load_hours(mut self, hours: u16) -> Self {
        self.max_load_hours = hours;
        self
    }

    /// Adds an availability slot.
    pub fn with_availability(mut self, slot: TimeSlot) -> Self {
        self.availability.push(slot);
        self
    }

    /// Whether the instructor can teach during the given slot.
    ///
    /// An empty availability list means unrestricted availability;
    /// otherwise some declared slot must fully contain the candidate.
    pub fn covers(&self, slot: &TimeSlot) -> bool {
        if self.availability.is_empty() {
            return true;
        }
        self.availability.iter().any(|a| {
            a.day == slot.day && a.start_min <= slot.start_min && slot.end_min <= a.end_min
        })
    }

    /// Maximum weekly load in minutes.
    #[inline]
    pub fn max_load_min(&self) -> u32 {
        u32::from(self.max_load_hours) * 60
    }
}
