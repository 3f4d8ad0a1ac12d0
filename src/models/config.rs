//! Committee-controlled scheduling configuration.
//!
//! Each constraint rule is a named, toggle-able entry: the committee
//! flips toggles and edits parameter values, and the rule engine reads
//! the config fresh on every evaluation pass. The core never caches or
//! mutates config — it arrives inside the snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::Day;

/// The fixed set of constraint rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RuleKind {
    RoomDoubleBooking,
    InstructorDoubleBooking,
    CapacityOverflow,
    BreakTimeViolation,
    MidtermBlackout,
    ElectivePreferenceLimit,
}

impl RuleKind {
    /// All rule kinds in a fixed, deterministic order.
    pub const ALL: [RuleKind; 6] = [
        RuleKind::RoomDoubleBooking,
        RuleKind::InstructorDoubleBooking,
        RuleKind::CapacityOverflow,
        RuleKind::BreakTimeViolation,
        RuleKind::MidtermBlackout,
        RuleKind::ElectivePreferenceLimit,
    ];
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::RoomDoubleBooking => "room-double-booking",
            RuleKind::InstructorDoubleBooking => "instructor-double-booking",
            RuleKind::CapacityOverflow => "capacity-overflow",
            RuleKind::BreakTimeViolation => "break-time-violation",
            RuleKind::MidtermBlackout => "midterm-blackout",
            RuleKind::ElectivePreferenceLimit => "elective-preference-limit",
        };
        f.write_str(name)
    }
}

/// A daily window in minutes-of-day applied to a set of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    /// Days the window applies to.
    pub days: Vec<Day>,
    /// Window start (minute of day, inclusive).
    pub start_min: u16,
    /// Window end (minute of day, exclusive).
    pub end_min: u16,
}

impl DailyWindow {
    /// Creates a window over the given days.
    pub fn new(days: Vec<Day>, start_min: u16, end_min: u16) -> Self {
        Self {
            days,
            start_min,
            end_min,
        }
    }
}

/// Scheduling configuration: rule toggles plus rule parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Rules switched off by the committee. Everything else is active.
    pub disabled_rules: BTreeSet<RuleKind>,
    /// Campus break window meetings must not intersect.
    pub break_window: Option<DailyWindow>,
    /// Midterm blackout: no meetings during this window on these days.
    pub midterm_blackout: Option<DailyWindow>,
    /// Maximum ranked choices per elective preference submission.
    pub max_elective_preferences: usize,
    /// Maximum students per generated section.
    pub max_section_size: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            disabled_rules: BTreeSet::new(),
            // 12:00-13:00 every teaching day
            break_window: Some(DailyWindow::new(Day::ALL.to_vec(), 720, 780)),
            midterm_blackout: None,
            max_elective_preferences: 5,
            max_section_size: 35,
        }
    }
}

impl ScheduleConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables a rule.
    pub fn with_rule_disabled(mut self, kind: RuleKind) -> Self {
        self.disabled_rules.insert(kind);
        self
    }

    /// Sets the campus break window.
    pub fn with_break_window(mut self, window: DailyWindow) -> Self {
        self.break_window = Some(window);
        self
    }

    /// Clears the campus break window.
    pub fn without_break_window(mut self) -> Self {
        self.break_window = None;
        self
    }

    /// Sets the midterm blackout window.
    pub fn with_midterm_blackout(mut self, window: DailyWindow) -> Self {
        self.midterm_blackout = Some(window);
        self
    }

    /// Sets the preference-submission cap.
    pub fn with_max_elective_preferences(mut self, max: usize) -> Self {
        self.max_elective_preferences = max;
        self
    }

    /// Sets the generated-section size cap.
    pub fn with_max_section_size(mut self, max: u32) -> Self {
        self.max_section_size = max;
        self
    }

    /// Whether a rule is active.
    #[inline]
    pub fn is_rule_enabled(&self, kind: RuleKind) -> bool {
        !self.disabled_rules.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ScheduleConfig::default();
        for kind in RuleKind::ALL {
            assert!(cfg.is_rule_enabled(kind));
        }
        assert_eq!(cfg.max_section_size, 35);
        assert_eq!(cfg.max_elective_preferences, 5);
        assert!(cfg.break_window.is_some());
    }

    #[test]
    fn test_disable_rule() {
        let cfg = ScheduleConfig::new().with_rule_disabled(RuleKind::BreakTimeViolation);
        assert!(!cfg.is_rule_enabled(RuleKind::BreakTimeViolation));
        assert!(cfg.is_rule_enabled(RuleKind::RoomDoubleBooking));
    }

    #[test]
    fn test_rule_kind_display() {
        assert_eq!(RuleKind::RoomDoubleBooking.to_string(), "room-double-booking");
        assert_eq!(
            RuleKind::ElectivePreferenceLimit.to_string(),
            "elective-preference-limit"
        );
    }
}
