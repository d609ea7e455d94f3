//! In-place question configuration edits.
//!
//! Edits are expressed as values so the interactive shell and tests share
//! one code path. An edit either applies fully or fails with a
//! [`ValidationError`], leaving the question exactly as it was.

use crate::error::ValidationError;
use crate::model::{index_letter, Question, QuestionKind};

/// One partial update to a question's configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionEdit {
    /// Replace the prompt text. Applies to every kind.
    Prompt(String),
    /// Replace the text of one multiple-choice option.
    Choice { letter: char, text: String },
    /// Change how many answers the question accepts.
    AnswersAllowed(usize),
    /// Replace the text of one left-column matching item.
    LeftItem { letter: char, text: String },
    /// Replace the text of one right-column matching item.
    RightItem { number: usize, text: String },
}

impl Question {
    /// Apply one edit, or fail without touching the question.
    ///
    /// Numeric edits outside their legal bounds fail with
    /// [`ValidationError::OutOfRange`] rather than clamping. True/false and
    /// date questions only support prompt replacement; matching questions
    /// reset their answer count to the item count after any item edit.
    pub fn apply_edit(&mut self, edit: QuestionEdit) -> Result<(), ValidationError> {
        match edit {
            QuestionEdit::Prompt(text) => {
                self.prompt = text;
                Ok(())
            }
            QuestionEdit::Choice { letter, text } => match &mut self.kind {
                QuestionKind::MultipleChoice { choices } => {
                    let index = letter_index(letter, choices.len())?;
                    choices[index] = text;
                    Ok(())
                }
                _ => Err(ValidationError::UnsupportedEdit(self.question_type())),
            },
            QuestionEdit::AnswersAllowed(count) => match &self.kind {
                QuestionKind::MultipleChoice { choices } => {
                    if count < 1 || count > choices.len() {
                        return Err(ValidationError::OutOfRange {
                            field: "answers allowed",
                            min: 1,
                            max: Some(choices.len()),
                        });
                    }
                    self.answers_allowed = count;
                    Ok(())
                }
                QuestionKind::ShortAnswer | QuestionKind::Essay => {
                    if count < 1 {
                        return Err(ValidationError::OutOfRange {
                            field: "answers allowed",
                            min: 1,
                            max: None,
                        });
                    }
                    self.answers_allowed = count;
                    Ok(())
                }
                QuestionKind::TrueFalse | QuestionKind::Date | QuestionKind::Matching { .. } => {
                    Err(ValidationError::UnsupportedEdit(self.question_type()))
                }
            },
            QuestionEdit::LeftItem { letter, text } => match &mut self.kind {
                QuestionKind::Matching { left, .. } => {
                    let index = letter_index(letter, left.len())?;
                    left[index] = text;
                    self.answers_allowed = left.len();
                    Ok(())
                }
                _ => Err(ValidationError::UnsupportedEdit(self.question_type())),
            },
            QuestionEdit::RightItem { number, text } => match &mut self.kind {
                QuestionKind::Matching { left, right } => {
                    if number < 1 || number > right.len() {
                        return Err(ValidationError::OutOfRange {
                            field: "item number",
                            min: 1,
                            max: Some(right.len()),
                        });
                    }
                    right[number - 1] = text;
                    self.answers_allowed = left.len();
                    Ok(())
                }
                _ => Err(ValidationError::UnsupportedEdit(self.question_type())),
            },
        }
    }
}

fn letter_index(letter: char, count: usize) -> Result<usize, ValidationError> {
    let upper = letter.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() || upper > index_letter(count - 1) {
        return Err(ValidationError::InvalidFormat(format!(
            "letter '{letter}' does not name an item"
        )));
    }
    Ok(upper as usize - 'A' as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;

    #[test]
    fn prompt_edit_applies_to_every_kind() {
        let mut q = Question::date("Old prompt");
        q.apply_edit(QuestionEdit::Prompt("New prompt".into())).unwrap();
        assert_eq!(q.prompt(), "New prompt");
    }

    #[test]
    fn choice_edit() {
        let mut q = Question::multiple_choice(
            "Pick",
            vec!["Red".into(), "Green".into()],
            1,
        )
        .unwrap();
        q.apply_edit(QuestionEdit::Choice {
            letter: 'b',
            text: "Blue".into(),
        })
        .unwrap();
        assert_eq!(
            q.kind(),
            &QuestionKind::MultipleChoice {
                choices: vec!["Red".into(), "Blue".into()]
            }
        );
        assert!(q
            .apply_edit(QuestionEdit::Choice {
                letter: 'C',
                text: "x".into()
            })
            .is_err());
    }

    #[test]
    fn answers_allowed_bounds() {
        let mut q = Question::multiple_choice(
            "Pick",
            vec!["Red".into(), "Green".into(), "Blue".into()],
            1,
        )
        .unwrap();
        q.apply_edit(QuestionEdit::AnswersAllowed(3)).unwrap();
        assert_eq!(q.answers_allowed(), 3);
        let err = q.apply_edit(QuestionEdit::AnswersAllowed(4)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "answers allowed",
                min: 1,
                max: Some(3),
            }
        );
        // the failed edit left the question untouched
        assert_eq!(q.answers_allowed(), 3);
    }

    #[test]
    fn fixed_kinds_reject_count_edits() {
        let mut tf = Question::true_false("Sure?");
        assert_eq!(
            tf.apply_edit(QuestionEdit::AnswersAllowed(2)).unwrap_err(),
            ValidationError::UnsupportedEdit(QuestionType::TrueFalse)
        );
        let mut date = Question::date("When?");
        assert!(date.apply_edit(QuestionEdit::AnswersAllowed(2)).is_err());
    }

    #[test]
    fn matching_item_edits_reset_count() {
        let mut q = Question::matching(
            "Match",
            vec!["France".into(), "Peru".into()],
            vec!["Lima".into(), "Paris".into()],
        )
        .unwrap();
        q.apply_edit(QuestionEdit::LeftItem {
            letter: 'a',
            text: "Japan".into(),
        })
        .unwrap();
        q.apply_edit(QuestionEdit::RightItem {
            number: 2,
            text: "Tokyo".into(),
        })
        .unwrap();
        assert_eq!(q.answers_allowed(), 2);
        assert!(q
            .apply_edit(QuestionEdit::RightItem {
                number: 3,
                text: "x".into()
            })
            .is_err());
        assert!(q
            .apply_edit(QuestionEdit::AnswersAllowed(1))
            .is_err());
    }

    #[test]
    fn mismatched_kind_edits_fail() {
        let mut essay = Question::essay("Discuss", 1).unwrap();
        assert_eq!(
            essay
                .apply_edit(QuestionEdit::Choice {
                    letter: 'A',
                    text: "x".into()
                })
                .unwrap_err(),
            ValidationError::UnsupportedEdit(QuestionType::Essay)
        );
    }
}
