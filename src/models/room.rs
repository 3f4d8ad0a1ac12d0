//! Room model.
//!
//! Rooms are immutable reference data within a term: a seat capacity
//! plus a campus/building location. Online sections carry no room.

use serde::{Deserialize, Serialize};

/// A physical teaching room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier (e.g., "R101").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Seat capacity.
    pub capacity: u32,
    /// Campus or building label.
    pub campus: String,
}

impl Room {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            campus: String::new(),
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the campus/building label.
    pub fn with_campus(mut self, campus: impl Into<String>) -> Self {
        self.campus = campus.into();
        self
    }

    /// Whether the room can seat the given number of students.
    #[inline]
    pub fn fits(&self, students: u32) -> bool {
        students <= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let r = Room::new("R101", 35)
            .with_name("Lecture Hall 101")
            .with_campus("Main");
        assert_eq!(r.id, "R101");
        assert_eq!(r.capacity, 35);
        assert_eq!(r.campus, "Main");
    }

    #[test]
    fn test_fits() {
        let r = Room::new("R101", 35);
        assert!(r.fits(35));
        assert!(!r.fits(36));
        assert!(r.fits(0));
    }
}
