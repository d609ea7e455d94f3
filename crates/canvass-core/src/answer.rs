//! Answer validation and normalization.
//!
//! [`Question::validate_answers`] turns a raw submission into canonical form
//! or reports the first rule it breaks. Validation is a pure function of the
//! question and the submission; a rejected submission mutates nothing.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::{index_letter, Question, QuestionKind};

/// Canonical date format for date questions.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a true/false answer, accepting `t`/`true`/`f`/`false` in any case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "t" | "true" => Some(true),
        "f" | "false" => Some(false),
        _ => None,
    }
}

/// Canonical display form of a true/false answer.
pub fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Parse a single choice letter against `count` available choices,
/// normalizing to upper case.
pub fn parse_choice_letter(raw: &str, count: usize) -> Result<char, ValidationError> {
    let trimmed = raw.trim().to_uppercase();
    let mut chars = trimmed.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => c,
        _ => {
            return Err(ValidationError::InvalidFormat(
                "enter a single choice letter".into(),
            ))
        }
    };
    let last = index_letter(count - 1);
    if letter > last {
        return Err(ValidationError::InvalidFormat(format!(
            "enter a letter between A and {last}"
        )));
    }
    Ok(letter)
}

/// Parse a date answer, requiring a real calendar date written exactly as
/// `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let invalid =
        || ValidationError::InvalidFormat("enter a valid date in YYYY-MM-DD format".into());
    let parsed = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())?;
    // chrono tolerates unpadded fields; the canonical rendering must match.
    if parsed.format(DATE_FORMAT).to_string() != trimmed {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Parse a matching pair code like `A-2` against `count` items.
pub fn parse_pair(raw: &str, count: usize) -> Result<(char, usize), ValidationError> {
    let trimmed = raw.trim();
    let Some((letter_part, number_part)) = trimmed.split_once('-') else {
        return Err(ValidationError::InvalidFormat(
            "enter a pair like A-2".into(),
        ));
    };
    let letter = parse_choice_letter(letter_part, count)?;
    let number: usize = number_part
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat("the right-hand side must be a number".into()))?;
    if number < 1 || number > count {
        return Err(ValidationError::InvalidFormat(format!(
            "enter a number between 1 and {count}"
        )));
    }
    Ok((letter, number))
}

fn expect_count(got: usize, want: usize) -> Result<(), ValidationError> {
    if got == want {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(format!(
            "expected {want} answer(s), got {got}"
        )))
    }
}

impl Question {
    /// Validate a raw submission and return it in canonical form.
    pub fn validate_answers(&self, raw: &[String]) -> Result<Vec<String>, ValidationError> {
        expect_count(raw.len(), self.answers_allowed)?;
        match &self.kind {
            QuestionKind::TrueFalse => {
                let value = parse_bool(&raw[0]).ok_or_else(|| {
                    ValidationError::InvalidFormat("enter T for true or F for false".into())
                })?;
                Ok(vec![bool_text(value).to_string()])
            }
            QuestionKind::MultipleChoice { choices } => {
                let mut picked: Vec<char> = Vec::with_capacity(raw.len());
                for answer in raw {
                    let letter = parse_choice_letter(answer, choices.len())?;
                    if picked.contains(&letter) {
                        return Err(ValidationError::DuplicateSelection(letter));
                    }
                    picked.push(letter);
                }
                Ok(picked.into_iter().map(String::from).collect())
            }
            QuestionKind::ShortAnswer | QuestionKind::Essay => Ok(raw.to_vec()),
            QuestionKind::Date => Ok(vec![parse_date(&raw[0])?]),
            QuestionKind::Matching { left, .. } => {
                let count = left.len();
                let mut letters: Vec<char> = Vec::with_capacity(count);
                let mut numbers: Vec<usize> = Vec::with_capacity(count);
                let mut pairs: Vec<String> = Vec::with_capacity(count);
                for answer in raw {
                    let (letter, number) = parse_pair(answer, count)?;
                    if letters.contains(&letter) {
                        return Err(ValidationError::DuplicateSelection(letter));
                    }
                    if numbers.contains(&number) {
                        return Err(ValidationError::AssignmentConflict(number));
                    }
                    letters.push(letter);
                    numbers.push(number);
                    pairs.push(format!("{letter}-{number}"));
                }
                Ok(pairs)
            }
        }
    }
}
