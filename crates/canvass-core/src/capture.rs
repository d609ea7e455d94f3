//! Answer capture through an explicit input source.
//!
//! The interactive shell (or a scripted test double) implements
//! [`AnswerSource`]; the per-kind loops here keep prompting until the
//! submission satisfies the question's rules, so the answers handed back
//! are already canonical. The source is always an explicit argument, never
//! ambient global state.

use anyhow::Result;

use crate::answer::{bool_text, parse_bool, parse_choice_letter, parse_date};
use crate::model::{index_letter, Question, QuestionKind, ResponseRecord, Survey};
use crate::oracle::Test;

/// A source of respondent input.
///
/// Implementations own the actual I/O; the core never touches stdin.
pub trait AnswerSource {
    /// Read one line of input after showing `prompt`.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Show a message to the respondent (question text, validation feedback).
    fn notify(&mut self, message: &str);
}

/// Collect a full submission for one question, re-prompting until valid.
pub fn collect_answers(question: &Question, source: &mut dyn AnswerSource) -> Result<Vec<String>> {
    let raw = match question.kind() {
        QuestionKind::TrueFalse => loop {
            let input = source.read_line("Enter T for True or F for False: ")?;
            match parse_bool(&input) {
                Some(value) => break vec![bool_text(value).to_string()],
                None => source.notify("Invalid input. Please enter 'T' or 'F'."),
            }
        },
        QuestionKind::MultipleChoice { choices } => {
            let mut picked: Vec<char> = Vec::new();
            while picked.len() < question.answers_allowed() {
                let input = source.read_line(&format!("Choice {}: ", picked.len() + 1))?;
                match parse_choice_letter(&input, choices.len()) {
                    Ok(letter) if picked.contains(&letter) => {
                        source.notify("You already selected that letter.");
                    }
                    Ok(letter) => picked.push(letter),
                    Err(err) => source.notify(&err.to_string()),
                }
            }
            picked.into_iter().map(String::from).collect()
        }
        QuestionKind::ShortAnswer => {
            let mut collected = Vec::with_capacity(question.answers_allowed());
            for i in 0..question.answers_allowed() {
                collected.push(source.read_line(&format!("Answer {}: ", i + 1))?);
            }
            collected
        }
        QuestionKind::Essay => {
            let mut collected = Vec::with_capacity(question.answers_allowed());
            for i in 0..question.answers_allowed() {
                source.notify(&format!(
                    "Enter essay response {} (finish with a blank line):",
                    i + 1
                ));
                let mut block = String::new();
                loop {
                    let line = source.read_line("")?;
                    if line.is_empty() {
                        break;
                    }
                    if !block.is_empty() {
                        block.push('\n');
                    }
                    block.push_str(&line);
                }
                collected.push(block);
            }
            collected
        }
        QuestionKind::Date => loop {
            let input = source.read_line("Enter date (YYYY-MM-DD): ")?;
            match parse_date(&input) {
                Ok(date) => break vec![date],
                Err(err) => source.notify(&err.to_string()),
            }
        },
        QuestionKind::Matching { left, .. } => {
            let count = left.len();
            let mut used: Vec<usize> = Vec::with_capacity(count);
            let mut pairs = Vec::with_capacity(count);
            for i in 0..count {
                let letter = index_letter(i);
                loop {
                    let input = source.read_line(&format!("{letter} -> "))?;
                    let number: usize = match input.trim().parse() {
                        Ok(n) => n,
                        Err(_) => {
                            source.notify("Please enter a valid integer.");
                            continue;
                        }
                    };
                    if number < 1 || number > count {
                        source.notify(&format!("Please enter a number between 1 and {count}."));
                        continue;
                    }
                    if used.contains(&number) {
                        source.notify("That number has already been used.");
                        continue;
                    }
                    used.push(number);
                    pairs.push(format!("{letter}-{number}"));
                    break;
                }
            }
            pairs
        }
    };
    // Validation stays the single authority on canonical form.
    Ok(question.validate_answers(&raw)?)
}

/// Run a full capture session over a survey.
pub fn take_survey(survey: &Survey, source: &mut dyn AnswerSource) -> Result<ResponseRecord> {
    source.notify(&format!("Beginning survey: {}", survey.name));
    let mut collected = Vec::with_capacity(survey.len());
    for (i, question) in survey.questions().iter().enumerate() {
        source.notify(&format!("\n{}) {question}", i + 1));
        collected.push(collect_answers(question, source)?);
    }
    Ok(ResponseRecord::new(survey.name.clone(), collected))
}

/// Run a full capture session over a test. The key is never shown.
pub fn take_test(test: &Test, source: &mut dyn AnswerSource) -> Result<ResponseRecord> {
    source.notify(&format!("Beginning test: {}", test.name));
    let mut collected = Vec::with_capacity(test.len());
    for (i, keyed) in test.questions().iter().enumerate() {
        source.notify(&format!("\n{}) {}", i + 1, keyed.question()));
        collected.push(collect_answers(keyed.question(), source)?);
    }
    Ok(ResponseRecord::new(test.name.clone(), collected))
}
