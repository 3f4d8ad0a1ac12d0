//! Elective preference submissions.
//!
//! Students rank the electives they want; the committee caps how many
//! ranked choices a single submission may carry. Rank order is the
//! vector order.

use serde::{Deserialize, Serialize};

/// A student's ranked elective choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceSubmission {
    /// Submitting student.
    pub student_id: String,
    /// Elective course codes, highest preference first.
    pub ranked_courses: Vec<String>,
}

impl PreferenceSubmission {
    /// Creates an empty submission.
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            ranked_courses: Vec::new(),
        }
    }

    /// Appends a ranked choice.
    pub fn with_choice(mut self, course_code: impl Into<String>) -> Self {
        self.ranked_courses.push(course_code.into());
        self
    }

    /// Number of ranked choices.
    #[inline]
    pub fn choice_count(&self) -> usize {
        self.ranked_courses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_order_preserved() {
        let s = PreferenceSubmission::new("S1")
            .with_choice("CS441")
            .with_choice("CS452")
            .with_choice("CS460");
        assert_eq!(s.choice_count(), 3);
        assert_eq!(s.ranked_courses[0], "CS441");
        assert_eq!(s.ranked_courses[2], "CS460");
    }
}
