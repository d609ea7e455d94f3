//! Validation error types.
//!
//! Answer validation and configuration edits share one error taxonomy,
//! defined here so the capture loops and the interactive shell can classify
//! failures without string matching. Every variant is recoverable: a failed
//! validation or edit never leaves a question or answer key half-modified.

use thiserror::Error;

use crate::model::QuestionType;

/// Errors produced while validating a submission or editing a question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An answer does not match the question's expected format.
    #[error("invalid answer: {0}")]
    InvalidFormat(String),

    /// A choice letter appeared more than once in a single submission.
    #[error("choice '{0}' was already selected")]
    DuplicateSelection(char),

    /// A matching number was assigned to more than one letter.
    #[error("number {0} is already matched")]
    AssignmentConflict(usize),

    /// A numeric configuration edit fell outside its legal bounds.
    #[error("{field} must be {}", bounds_text(.min, .max))]
    OutOfRange {
        field: &'static str,
        min: usize,
        max: Option<usize>,
    },

    /// The edit does not apply to this kind of question.
    #[error("a {0} question does not support this edit")]
    UnsupportedEdit(QuestionType),
}

impl ValidationError {
    /// Returns `true` when the respondent can fix the problem by re-entering
    /// the input, as opposed to an author-side configuration mistake.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ValidationError::InvalidFormat(_)
                | ValidationError::DuplicateSelection(_)
                | ValidationError::AssignmentConflict(_)
        )
    }
}

fn bounds_text(min: &usize, max: &Option<usize>) -> String {
    match max {
        Some(max) => format!("between {min} and {max}"),
        None => format!("at least {min}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_messages() {
        let bounded = ValidationError::OutOfRange {
            field: "answers allowed",
            min: 1,
            max: Some(4),
        };
        assert_eq!(
            bounded.to_string(),
            "answers allowed must be between 1 and 4"
        );

        let unbounded = ValidationError::OutOfRange {
            field: "answers allowed",
            min: 1,
            max: None,
        };
        assert_eq!(unbounded.to_string(), "answers allowed must be at least 1");
    }

    #[test]
    fn input_error_classification() {
        assert!(ValidationError::InvalidFormat("x".into()).is_input_error());
        assert!(ValidationError::DuplicateSelection('A').is_input_error());
        assert!(ValidationError::AssignmentConflict(2).is_input_error());
        assert!(!ValidationError::OutOfRange {
            field: "choices",
            min: 2,
            max: Some(26),
        }
        .is_input_error());
        assert!(!ValidationError::UnsupportedEdit(QuestionType::Date).is_input_error());
    }
}
