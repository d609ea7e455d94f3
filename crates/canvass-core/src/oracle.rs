//! Answer keys and correctness judgments.
//!
//! A [`KeyedQuestion`] pairs a question with the answers that count as
//! correct. The key is absent exactly when the question is an essay; essays
//! are never auto-graded and always judge as not-correct.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::answer::parse_bool;
use crate::error::ValidationError;
use crate::model::{Question, QuestionKind, QuestionType};

/// A question plus its answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedQuestion {
    question: Question,
    key: Option<Vec<String>>,
}

impl KeyedQuestion {
    /// Pair a question with its answer key.
    ///
    /// A present key is validated and normalized through the question's own
    /// answer rules, so its length always matches the question's answer
    /// slots at the time it is set. Essays take no key; every other kind
    /// requires one.
    pub fn new(question: Question, key: Option<Vec<String>>) -> Result<Self, ValidationError> {
        let key = checked_key(&question, key)?;
        Ok(Self { question, key })
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Mutable access to the underlying question for in-place edits.
    ///
    /// Editing the question does not re-validate the stored key; callers
    /// that change a question's answer slots should follow up with
    /// [`KeyedQuestion::set_key`]. A key left stale judges submissions as
    /// not-correct rather than failing.
    pub fn question_mut(&mut self) -> &mut Question {
        &mut self.question
    }

    pub fn key(&self) -> Option<&[String]> {
        self.key.as_deref()
    }

    pub fn is_essay(&self) -> bool {
        self.question.question_type() == QuestionType::Essay
    }

    /// Replace the answer key, subject to the same rules as construction.
    pub fn set_key(&mut self, key: Option<Vec<String>>) -> Result<(), ValidationError> {
        self.key = checked_key(&self.question, key)?;
        Ok(())
    }

    /// Judge a submission against the key.
    ///
    /// Essays and questions without a key always judge `false`; that is a
    /// defined outcome, not an error. Comparison is order-independent and
    /// uses the kind's own equality rule: boolean equivalence for
    /// true/false, case-insensitive sets for choices, matches and short
    /// answers, exact trimmed strings for dates.
    pub fn is_correct(&self, submitted: &[String]) -> bool {
        let Some(key) = &self.key else {
            return false;
        };
        match &self.question.kind {
            QuestionKind::TrueFalse => {
                if submitted.len() != 1 || key.len() != 1 {
                    return false;
                }
                match (parse_bool(&submitted[0]), parse_bool(&key[0])) {
                    (Some(s), Some(k)) => s == k,
                    _ => false,
                }
            }
            QuestionKind::MultipleChoice { .. } | QuestionKind::Matching { .. } => {
                set_eq(submitted, key, |s| s.trim().to_uppercase())
            }
            QuestionKind::ShortAnswer => set_eq(submitted, key, |s| s.trim().to_lowercase()),
            QuestionKind::Date => set_eq(submitted, key, |s| s.trim().to_string()),
            QuestionKind::Essay => false,
        }
    }

    /// Human rendering of the key for review displays, `None` for essays.
    pub fn describe_key(&self) -> Option<String> {
        let key = self.key.as_ref()?;
        let text = match &self.question.kind {
            QuestionKind::TrueFalse => {
                let letter = match parse_bool(key.first()?) {
                    Some(true) => "T",
                    Some(false) => "F",
                    None => return None,
                };
                format!("The correct answer is {letter}")
            }
            QuestionKind::MultipleChoice { choices } => {
                let parts: Vec<String> = key
                    .iter()
                    .map(|answer| {
                        let letter = answer.trim().to_uppercase();
                        let index = letter.bytes().next().map(|b| b.wrapping_sub(b'A') as usize);
                        match index.and_then(|i| choices.get(i)) {
                            Some(choice) => format!("{letter}) {choice}"),
                            None => format!("{letter})"),
                        }
                    })
                    .collect();
                if parts.len() == 1 {
                    format!("The correct choice is {}", parts[0])
                } else {
                    format!("The correct choices are {}", parts.join(", "))
                }
            }
            QuestionKind::ShortAnswer => {
                if key.len() == 1 {
                    format!("The correct answer is {}", key[0])
                } else {
                    format!("The correct answers are {}", key.join(", "))
                }
            }
            QuestionKind::Date => format!("The correct answer is {}", key.first()?),
            QuestionKind::Matching { .. } => {
                let mut lines = vec!["The correct matches are:".to_string()];
                for pair in key {
                    match pair.split_once('-') {
                        Some((letter, number)) => {
                            lines.push(format!("{} -> {}", letter.to_uppercase(), number))
                        }
                        None => lines.push(pair.clone()),
                    }
                }
                lines.join("\n")
            }
            QuestionKind::Essay => return None,
        };
        Some(text)
    }
}

fn checked_key(
    question: &Question,
    key: Option<Vec<String>>,
) -> Result<Option<Vec<String>>, ValidationError> {
    let essay = question.question_type() == QuestionType::Essay;
    match (essay, key) {
        (true, None) => Ok(None),
        (true, Some(_)) => Err(ValidationError::InvalidFormat(
            "essay questions take no answer key".into(),
        )),
        (false, None) => Err(ValidationError::InvalidFormat(
            "an answer key is required for auto-graded questions".into(),
        )),
        (false, Some(key)) => Ok(Some(question.validate_answers(&key)?)),
    }
}

fn set_eq(a: &[String], b: &[String], normalize: impl Fn(&str) -> String) -> bool {
    let a: HashSet<String> = a.iter().map(|s| normalize(s)).collect();
    let b: HashSet<String> = b.iter().map(|s| normalize(s)).collect();
    a == b
}

/// An ordered collection of keyed questions.
///
/// Like [`crate::model::Survey`], a test is created empty, grown by append,
/// edited in place, and never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub name: String,
    questions: Vec<KeyedQuestion>,
}

impl Test {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            questions: Vec::new(),
        }
    }

    pub fn add_question(&mut self, question: KeyedQuestion) {
        self.questions.push(question);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[KeyedQuestion] {
        &self.questions
    }

    pub fn question_mut(&mut self, index: usize) -> Option<&mut KeyedQuestion> {
        self.questions.get_mut(index)
    }

    /// How many questions cannot be auto-graded.
    pub fn essay_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_essay()).count()
    }
}
