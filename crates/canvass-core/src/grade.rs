//! Auto-grading of a response record against a test.

use serde::{Deserialize, Serialize};

use crate::model::ResponseRecord;
use crate::oracle::Test;

/// The outcome of auto-grading one response record.
///
/// Every question carries equal weight out of 100 points; essays count
/// toward the total but can never earn their points automatically. The
/// rounded values are for display only, the fractional point value is not
/// persisted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSummary {
    /// Auto-gradable questions answered correctly.
    pub correct: usize,
    /// Total questions on the test, essays included.
    pub total_questions: usize,
    /// Essay questions, which cannot be auto-graded.
    pub essay_count: usize,
}

impl GradeSummary {
    /// Points each question is worth.
    pub fn point_value(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            100.0 / self.total_questions as f64
        }
    }

    /// The rounded score earned on auto-gradable questions.
    pub fn score(&self) -> u32 {
        (self.correct as f64 * self.point_value()).round() as u32
    }

    /// The rounded ceiling the auto-grader could award, excluding essays.
    pub fn auto_gradable_points(&self) -> u32 {
        let auto = (self.total_questions - self.essay_count) as f64;
        (auto * self.point_value()).round() as u32
    }
}

/// Grade one response record against a test.
///
/// Questions and answers are paired by position up to the shorter of the
/// two lists; essays and any questions past the end of a short record
/// simply earn nothing.
pub fn grade(test: &Test, record: &ResponseRecord) -> GradeSummary {
    let mut correct = 0;
    for (keyed, answers) in test.questions().iter().zip(&record.answers) {
        if !keyed.is_essay() && keyed.is_correct(answers) {
            correct += 1;
        }
    }
    GradeSummary {
        correct,
        total_questions: test.len(),
        essay_count: test.essay_count(),
    }
}
