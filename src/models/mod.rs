//! Academic scheduling domain models.
//!
//! Pure data definitions plus pure derivation helpers (slot overlap,
//! meeting duration, availability coverage). No side effects live here.
//!
//! # Entities
//!
//! | Type | Role |
//! |------|------|
//! | `Course` | Immutable catalog entry for a term |
//! | `Section` | One offered instance of a course |
//! | `Meeting` | A weekly occurrence of a section at one slot |
//! | `TimeSlot` | Day-of-week + minute interval |
//! | `Room` / `Instructor` | Placement inventory |
//! | `ExternalSlot` | Opaque reserved block from another department |
//! | `Snapshot` | The full view every core operation consumes |
//! | `Conflict` | A derived, ephemeral constraint violation |

mod config;
mod conflict;
mod course;
mod instructor;
mod preference;
mod room;
mod snapshot;
mod term;
mod time;

pub use config::{DailyWindow, RuleKind, ScheduleConfig};
pub use conflict::{Conflict, ConflictKind, ConflictTarget, EntityKind, Severity};
pub use course::{ActivityKind, Course, Meeting, Section};
pub use instructor::Instructor;
pub use preference::PreferenceSubmission;
pub use room::Room;
pub use snapshot::Snapshot;
pub use term::{ExternalSlot, IrregularStudent, Term};
pub use time::{Day, TimeSlot, OPERATING_END_MIN, OPERATING_START_MIN};
