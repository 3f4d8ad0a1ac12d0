//! Constraint rules and the rule contract.
//!
//! Each scheduling constraint is an independent, pure evaluator over
//! the snapshot: it never mutates state and its result does not depend
//! on the order rules run in. Rules are toggled through
//! [`ScheduleConfig`](crate::models::ScheduleConfig); a disabled rule
//! is skipped entirely, never evaluated.
//!
//! # Usage
//!
//! ```
//! use termplan::rules::{all_rules, SchedulingRule};
//! use termplan::models::Snapshot;
//!
//! let snapshot = Snapshot::new();
//! for rule in all_rules() {
//!     if snapshot.config.is_rule_enabled(rule.kind()) {
//!         let conflicts = rule.evaluate(&snapshot).unwrap();
//!         assert!(conflicts.is_empty());
//!     }
//! }
//! ```

mod checks;

pub use checks::{
    BreakTimeViolation, CapacityOverflow, ElectivePreferenceLimit, InstructorDoubleBooking,
    MidtermBlackout, RoomDoubleBooking,
};

use std::fmt::Debug;
use thiserror::Error;

use crate::models::{Conflict, RuleKind, Snapshot};

/// Failure of a single rule evaluation.
///
/// Rule failures are isolated by the aggregator: the failing rule's
/// conflicts become "unknown" for that pass and every other rule still
/// runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A config parameter the rule depends on is unusable.
    #[error("rule {rule} has an invalid parameter: {detail}")]
    InvalidParameter {
        /// The failing rule.
        rule: RuleKind,
        /// What was wrong.
        detail: String,
    },
}

/// A toggle-able scheduling constraint.
///
/// # Contract
/// `evaluate` must be a pure function of the snapshot: no mutation, no
/// I/O, and identical snapshots produce identical conflict lists.
pub trait SchedulingRule: Send + Sync + Debug {
    /// Which fixed rule this is.
    fn kind(&self) -> RuleKind;

    /// Evaluates the rule over the full snapshot.
    fn evaluate(&self, snapshot: &Snapshot) -> Result<Vec<Conflict>, RuleError>;

    /// Rule description.
    fn description(&self) -> &'static str;
}

/// All built-in rules, in the fixed [`RuleKind::ALL`] order.
pub fn all_rules() -> Vec<Box<dyn SchedulingRule>> {
    vec![
        Box::new(RoomDoubleBooking),
        Box::new(InstructorDoubleBooking),
        Box::new(CapacityOverflow),
        Box::new(BreakTimeViolation),
        Box::new(MidtermBlackout),
        Box::new(ElectivePreferenceLimit),
    ]
}
