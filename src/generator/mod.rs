//! Automated schedule generation.
//!
//! Given a term and a set of target student levels, the generator
//! sizes sections from expected demand, greedily places each one on a
//! canonical time slot, room, and instructor under the hard
//! constraints (no double-booking, room capacity, instructor
//! availability and load), then validates the combined result through
//! the conflict aggregator. Sections with no feasible placement still
//! come back in the output — without a room, instructor, or meeting —
//! paired with an unresolved-placement conflict, never as a failure of
//! the whole run.
//!
//! # Determinism
//! Identical snapshots and requests produce identical output: levels
//! and courses are processed in sorted order and every tie in the
//! placement search breaks on fixed keys.

mod placement;

pub use placement::{best_candidate, Candidate, PlacementState};

use std::collections::BTreeSet;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::aggregator::{check_all, ConflictReport};
use crate::models::{ActivityKind, Conflict, Meeting, Section, Snapshot};

/// Levels scheduled when a request names none.
pub const DEFAULT_TARGET_LEVELS: [u8; 5] = [4, 5, 6, 7, 8];

/// Highest curriculum level the generator accepts.
const MAX_LEVEL: u8 = 12;

/// A request to generate a term's schedule.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Term to schedule.
    pub term_code: String,
    /// Levels to schedule; `None` means [`DEFAULT_TARGET_LEVELS`].
    pub target_levels: Option<Vec<u8>>,
}

impl GenerateRequest {
    /// Creates a request for the default levels.
    pub fn new(term_code: impl Into<String>) -> Self {
        Self {
            term_code: term_code.into(),
            target_levels: None,
        }
    }

    /// Restricts generation to specific levels.
    pub fn with_levels(mut self, levels: Vec<u8>) -> Self {
        self.target_levels = Some(levels);
        self
    }
}

/// Why a generation request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// No term with the requested code exists in the snapshot.
    #[error("term '{code}' not found")]
    TermNotFound {
        /// The unknown code.
        code: String,
    },
    /// The request or config is malformed; generation never started.
    #[error("invalid input: {detail}")]
    InvalidInput {
        /// What was wrong.
        detail: String,
    },
    /// An inconsistency surfaced mid-run that the generator cannot
    /// resolve safely.
    #[error("generation failed: {detail}")]
    GenerationFailed {
        /// Diagnostic detail.
        detail: String,
    },
}

/// Counters describing one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Wall-clock time of the run in milliseconds.
    pub elapsed_ms: u64,
    /// Courses considered across all target levels.
    pub courses_considered: usize,
    /// Sections successfully placed.
    pub sections_placed: usize,
    /// Sections with no feasible placement.
    pub sections_unplaced: usize,
}

/// A generated candidate schedule plus its conflict report.
#[derive(Debug, Clone)]
pub struct GeneratedSchedule {
    /// Newly generated sections. Unplaced sections are included with
    /// no room, instructor, or meeting.
    pub sections: Vec<Section>,
    /// Newly generated meetings.
    pub meetings: Vec<Meeting>,
    /// Conflicts over the combined (existing + generated) schedule,
    /// including unresolved placements.
    pub report: ConflictReport,
    /// Run counters.
    pub stats: ExecutionStats,
}

impl GeneratedSchedule {
    /// Conflicts in report order.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.report.conflicts
    }
}

/// The schedule generator.
///
/// Stateless between runs: every call consumes a snapshot and request
/// and returns fresh values.
///
/// # Example
///
/// ```
/// use termplan::generator::{GenerateRequest, ScheduleGenerator};
/// use termplan::models::Snapshot;
///
/// let generator = ScheduleGenerator::new();
/// let request = GenerateRequest::new("NO-SUCH-TERM");
/// assert!(generator.generate(&Snapshot::new(), &request).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates sections and meetings for the requested term and
    /// levels.
    ///
    /// Fails fast on an unknown term, an empty or out-of-range level
    /// set, an inactive term, or a zero section-size cap. Placement
    /// failures for individual sections do not abort the run: the
    /// section is emitted unplaced alongside an
    /// [`UnresolvedPlacement`](crate::models::ConflictKind::UnresolvedPlacement)
    /// conflict.
    pub fn generate(
        &self,
        snapshot: &Snapshot,
        request: &GenerateRequest,
    ) -> Result<GeneratedSchedule, GenerateError> {
        let started = Instant::now();

        let term = snapshot
            .term_by_code(&request.term_code)
            .ok_or_else(|| GenerateError::TermNotFound {
                code: request.term_code.clone(),
            })?;
        if !term.active {
            return Err(GenerateError::InvalidInput {
                detail: format!("term '{}' is not open for scheduling", term.code),
            });
        }

        let levels = self.resolve_levels(request)?;
        if snapshot.config.max_section_size == 0 {
            return Err(GenerateError::InvalidInput {
                detail: "max section size must be positive".into(),
            });
        }

        info!(term = %term.code, ?levels, "starting schedule generation");

        let mut state = PlacementState::seeded_from(snapshot);
        let mut sections = Vec::new();
        let mut meetings = Vec::new();
        let mut unresolved = Vec::new();
        let mut courses_considered = 0usize;

        for level in &levels {
            for course in snapshot.courses_at_level(*level) {
                courses_considered += 1;
                let demand = self.course_demand(snapshot, &course.code);
                if demand == 0 {
                    debug!(course = %course.code, "no demand, skipping");
                    continue;
                }

                let max = snapshot.config.max_section_size;
                let section_count = demand.div_ceil(max) as usize;

                for n in 1..=section_count {
                    let section_id = format!("{}-{}", course.code, n);
                    if snapshot.section_by_id(&section_id).is_some() {
                        return Err(GenerateError::GenerationFailed {
                            detail: format!(
                                "section id '{section_id}' already exists in the snapshot"
                            ),
                        });
                    }

                    // Spread demand evenly; earlier sections take the remainder
                    let base = demand / section_count as u32;
                    let remainder = demand % section_count as u32;
                    let students = base + u32::from((n as u32) <= remainder);

                    match best_candidate(snapshot, &state, students) {
                        Some(candidate) => {
                            state.occupy_room(&candidate.room_id, candidate.slot);
                            state.occupy_instructor(&candidate.instructor_id, candidate.slot);

                            debug!(
                                section = %section_id,
                                slot = %candidate.slot,
                                room = %candidate.room_id,
                                instructor = %candidate.instructor_id,
                                "section placed"
                            );
                            meetings.push(Meeting::new(
                                format!("{section_id}/lec"),
                                &section_id,
                                candidate.slot,
                                ActivityKind::Lecture,
                            ));
                            sections.push(
                                Section::new(section_id, &course.code)
                                    .with_instructor(candidate.instructor_id)
                                    .with_room(candidate.room_id)
                                    .with_student_count(students),
                            );
                        }
                        None => {
                            unresolved.push(Conflict::unresolved_placement(
                                &section_id,
                                format!(
                                    "no feasible slot/room/instructor for section {section_id} \
                                     ({students} students)"
                                ),
                            ));
                            // The sized section is still part of the
                            // output; the committee resolves it by hand.
                            sections.push(
                                Section::new(section_id, &course.code)
                                    .with_student_count(students),
                            );
                        }
                    }
                }
            }
        }

        // Validate the combined result; the caller sees every conflict,
        // nothing is suppressed.
        let mut combined = snapshot.clone();
        combined.sections.extend(sections.iter().cloned());
        combined.meetings.extend(meetings.iter().cloned());
        let report = check_all(&combined).merged_with(unresolved.clone());

        let stats = ExecutionStats {
            elapsed_ms: started.elapsed().as_millis() as u64,
            courses_considered,
            sections_placed: meetings.len(),
            sections_unplaced: unresolved.len(),
        };
        info!(
            placed = stats.sections_placed,
            unplaced = stats.sections_unplaced,
            conflicts = report.count(),
            elapsed_ms = stats.elapsed_ms,
            "schedule generation complete"
        );

        Ok(GeneratedSchedule {
            sections,
            meetings,
            report,
            stats,
        })
    }

    /// Applies the level default and validates the resulting set.
    fn resolve_levels(&self, request: &GenerateRequest) -> Result<Vec<u8>, GenerateError> {
        let levels: BTreeSet<u8> = match &request.target_levels {
            None => DEFAULT_TARGET_LEVELS.into_iter().collect(),
            Some(levels) => levels.iter().copied().collect(),
        };
        if levels.is_empty() {
            return Err(GenerateError::InvalidInput {
                detail: "target level set is empty".into(),
            });
        }
        if let Some(bad) = levels.iter().find(|l| **l == 0 || **l > MAX_LEVEL) {
            return Err(GenerateError::InvalidInput {
                detail: format!("level {bad} is outside the valid range 1..={MAX_LEVEL}"),
            });
        }
        Ok(levels.into_iter().collect())
    }

    /// Expected demand for a course: forecast enrollment plus
    /// irregular students who still need it.
    fn course_demand(&self, snapshot: &Snapshot, course_code: &str) -> u32 {
        let irregular = snapshot
            .irregular_students
            .iter()
            .filter(|s| s.needs(course_code))
            .count() as u32;
        snapshot.expected_enrollment_for(course_code) + irregular
    }
}
