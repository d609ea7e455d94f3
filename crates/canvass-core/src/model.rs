//! Core data model types for canvass.
//!
//! These are the fundamental types the entire canvass system uses to
//! represent questions, surveys and captured responses.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Letter encoding imposes the A–Z ceiling on choice and item lists.
pub const MAX_LETTERED_ITEMS: usize = 26;

/// The letter that labels a zero-based choice or item index.
pub fn index_letter(index: usize) -> char {
    debug_assert!(index < MAX_LETTERED_ITEMS);
    (b'A' + index as u8) as char
}

/// The six supported question kinds, as a bare tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    TrueFalse,
    MultipleChoice,
    ShortAnswer,
    Essay,
    Date,
    Matching,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::TrueFalse => write!(f, "true/false"),
            QuestionType::MultipleChoice => write!(f, "multiple choice"),
            QuestionType::ShortAnswer => write!(f, "short answer"),
            QuestionType::Essay => write!(f, "essay"),
            QuestionType::Date => write!(f, "date"),
            QuestionType::Matching => write!(f, "matching"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tf" | "true_false" | "true/false" => Ok(QuestionType::TrueFalse),
            "mc" | "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "short" | "short_answer" => Ok(QuestionType::ShortAnswer),
            "essay" => Ok(QuestionType::Essay),
            "date" => Ok(QuestionType::Date),
            "matching" => Ok(QuestionType::Matching),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Kind-specific payload of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    TrueFalse,
    MultipleChoice { choices: Vec<String> },
    ShortAnswer,
    Essay,
    Date,
    Matching { left: Vec<String>, right: Vec<String> },
}

/// A single question: prompt, answer-count policy and kind payload.
///
/// `answers_allowed` is fixed at 1 for true/false and date questions and at
/// the item count for matching; multiple-choice, short-answer and essay
/// questions let the author configure it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub(crate) prompt: String,
    pub(crate) answers_allowed: usize,
    pub(crate) kind: QuestionKind,
}

impl Question {
    /// A true/false question. Always takes exactly one answer.
    pub fn true_false(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answers_allowed: 1,
            kind: QuestionKind::TrueFalse,
        }
    }

    /// A multiple-choice question over lettered `choices`, accepting
    /// `answers_allowed` distinct selections.
    pub fn multiple_choice(
        prompt: impl Into<String>,
        choices: Vec<String>,
        answers_allowed: usize,
    ) -> Result<Self, ValidationError> {
        if choices.len() < 2 || choices.len() > MAX_LETTERED_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "choices",
                min: 2,
                max: Some(MAX_LETTERED_ITEMS),
            });
        }
        if answers_allowed < 1 || answers_allowed > choices.len() {
            return Err(ValidationError::OutOfRange {
                field: "answers allowed",
                min: 1,
                max: Some(choices.len()),
            });
        }
        Ok(Self {
            prompt: prompt.into(),
            answers_allowed,
            kind: QuestionKind::MultipleChoice { choices },
        })
    }

    /// A short-answer question taking `answers_allowed` single-line answers.
    pub fn short_answer(
        prompt: impl Into<String>,
        answers_allowed: usize,
    ) -> Result<Self, ValidationError> {
        if answers_allowed < 1 {
            return Err(ValidationError::OutOfRange {
                field: "answers allowed",
                min: 1,
                max: None,
            });
        }
        Ok(Self {
            prompt: prompt.into(),
            answers_allowed,
            kind: QuestionKind::ShortAnswer,
        })
    }

    /// An essay question taking `answers_allowed` free-text blocks.
    pub fn essay(
        prompt: impl Into<String>,
        answers_allowed: usize,
    ) -> Result<Self, ValidationError> {
        if answers_allowed < 1 {
            return Err(ValidationError::OutOfRange {
                field: "answers allowed",
                min: 1,
                max: None,
            });
        }
        Ok(Self {
            prompt: prompt.into(),
            answers_allowed,
            kind: QuestionKind::Essay,
        })
    }

    /// A date question. Always takes exactly one `YYYY-MM-DD` answer.
    pub fn date(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answers_allowed: 1,
            kind: QuestionKind::Date,
        }
    }

    /// A matching question pairing each lettered left item with a numbered
    /// right item. The answer count equals the item count.
    pub fn matching(
        prompt: impl Into<String>,
        left: Vec<String>,
        right: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if left.len() != right.len() {
            return Err(ValidationError::InvalidFormat(
                "left and right item lists must be the same length".into(),
            ));
        }
        if left.is_empty() || left.len() > MAX_LETTERED_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "matching items",
                min: 1,
                max: Some(MAX_LETTERED_ITEMS),
            });
        }
        let answers_allowed = left.len();
        Ok(Self {
            prompt: prompt.into(),
            answers_allowed,
            kind: QuestionKind::Matching { left, right },
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// How many answers a valid submission must contain.
    pub fn answers_allowed(&self) -> usize {
        self.answers_allowed
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// The bare kind tag, without the payload.
    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            QuestionKind::TrueFalse => QuestionType::TrueFalse,
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::ShortAnswer => QuestionType::ShortAnswer,
            QuestionKind::Essay => QuestionType::Essay,
            QuestionKind::Date => QuestionType::Date,
            QuestionKind::Matching { .. } => QuestionType::Matching,
        }
    }
}

impl fmt::Display for Question {
    /// Renders the prompt plus the kind-specific scaffold a respondent sees:
    /// the `(T/F)` hint, the lettered choice list, the date format hint, or
    /// the two matching columns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prompt)?;
        match &self.kind {
            QuestionKind::TrueFalse => write!(f, "\n(T/F)"),
            QuestionKind::MultipleChoice { choices } => {
                for (i, choice) in choices.iter().enumerate() {
                    write!(f, "\n{}) {}", index_letter(i), choice)?;
                }
                Ok(())
            }
            QuestionKind::ShortAnswer | QuestionKind::Essay => Ok(()),
            QuestionKind::Date => write!(f, "\n(Please enter a date in YYYY-MM-DD format)"),
            QuestionKind::Matching { left, right } => {
                write!(f, "\nMatch the following items:")?;
                let width = left.iter().map(String::len).max().unwrap_or(0);
                for (i, (l, r)) in left.iter().zip(right).enumerate() {
                    write!(f, "\n{}) {:width$}   {}) {}", index_letter(i), l, i + 1, r)?;
                }
                Ok(())
            }
        }
    }
}

/// An ordered collection of questions without answer keys.
///
/// Created empty and grown by append; questions are edited in place and
/// never reordered or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub name: String,
    questions: Vec<Question>,
}

impl Survey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            questions: Vec::new(),
        }
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_mut(&mut self, index: usize) -> Option<&mut Question> {
        self.questions.get_mut(index)
    }
}

/// One respondent's answers to every question of a collection, in collection
/// order, stamped at capture time.
///
/// A record carries the collection's name rather than a reference to it; the
/// name is a best-effort association resolved again at load time, not a
/// foreign key. Records are treated as immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub id: Uuid,
    /// Name of the survey or test at capture time.
    pub subject: String,
    /// One inner list per question, in collection order.
    pub answers: Vec<Vec<String>>,
    pub captured_at: DateTime<Utc>,
}

impl ResponseRecord {
    pub fn new(subject: impl Into<String>, answers: Vec<Vec<String>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            answers,
            captured_at: Utc::now(),
        }
    }
}
