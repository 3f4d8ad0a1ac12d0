//! Scheduling core for university term planning.
//!
//! Provides the domain models, constraint rules, conflict aggregation,
//! and automated section placement behind an academic-scheduling
//! application. The surrounding application (dashboards, persistence,
//! auth, notifications) is an external collaborator: it hands this
//! crate a [`Snapshot`](models::Snapshot) of one term's data and
//! persists whatever sections, meetings, and conflicts come back.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Course`, `Section`, `Meeting`,
//!   `TimeSlot`, `Room`, `Instructor`, `Snapshot`, `Conflict`,
//!   `ScheduleConfig`
//! - **`rules`**: Toggle-able constraint rules (double-booking,
//!   capacity, break window, midterm blackout, preference cap)
//! - **`aggregator`**: Runs active rules, dedupes, and orders conflicts
//! - **`generator`**: Greedy section placement under hard constraints
//! - **`validation`**: Structural integrity checks for snapshots
//!
//! # Design
//!
//! Every operation is a pure function of its snapshot: the core holds
//! no state between calls, conflicts are recomputed on demand rather
//! than persisted, and identical inputs always produce identical
//! outputs — including ordering. Callers that mutate a backing store
//! concurrently must serialize writes per term themselves.

pub mod aggregator;
pub mod generator;
pub mod models;
pub mod rules;
pub mod validation;
