//! The `canvass modify` command.
//!
//! Walks the author through editing one question in place. For tests, the
//! answer key is always re-collected after the question changes so it can
//! never go stale against the edited question.

use std::path::Path;

use anyhow::{Context, Result};

use canvass_core::capture::{collect_answers, AnswerSource};
use canvass_core::edit::QuestionEdit;
use canvass_core::model::{Question, QuestionType};
use canvass_store::Store;

use crate::prompt::{self, StdinSource};

pub fn execute(data_dir: &Path, name: &str, test: bool) -> Result<()> {
    let store = Store::open(data_dir)?;
    let mut source = StdinSource::new();

    if test {
        let mut loaded = store.load_test(name)?;
        anyhow::ensure!(!loaded.is_empty(), "there are no questions to modify");
        list_prompts(
            &mut source,
            loaded.questions().iter().map(|k| k.question().prompt()),
        );
        let index = prompt::read_usize(
            &mut source,
            "Enter the number of the question you wish to modify: ",
            1,
            loaded.len(),
        )? - 1;
        let keyed = loaded
            .question_mut(index)
            .context("question index out of range")?;
        modify_question(&mut source, keyed.question_mut())?;
        if !keyed.is_essay() {
            source.notify("Enter the new correct answer(s):");
            let key = collect_answers(keyed.question(), &mut source)?;
            keyed.set_key(Some(key))?;
        }
        store.save_test(&loaded)?;
        println!("Test '{}' updated.", loaded.name);
    } else {
        let mut loaded = store.load_survey(name)?;
        anyhow::ensure!(!loaded.is_empty(), "there are no questions to modify");
        list_prompts(&mut source, loaded.questions().iter().map(|q| q.prompt()));
        let index = prompt::read_usize(
            &mut source,
            "Enter the number of the question you wish to modify: ",
            1,
            loaded.len(),
        )? - 1;
        let question = loaded
            .question_mut(index)
            .context("question index out of range")?;
        modify_question(&mut source, question)?;
        store.save_survey(&loaded)?;
        println!("Survey '{}' updated.", loaded.name);
    }
    Ok(())
}

fn list_prompts<'a>(source: &mut dyn AnswerSource, prompts: impl Iterator<Item = &'a str>) {
    for (i, text) in prompts.enumerate() {
        source.notify(&format!("{}) {text}", i + 1));
    }
}

fn modify_question(source: &mut dyn AnswerSource, question: &mut Question) -> Result<()> {
    source.notify(&format!("Current prompt: {}", question.prompt()));
    if prompt::confirm(source, "Do you wish to modify the prompt? (Y/N): ")? {
        let text = source.read_line("Enter a new prompt: ")?;
        question.apply_edit(QuestionEdit::Prompt(text))?;
    }

    match question.question_type() {
        QuestionType::TrueFalse | QuestionType::Date => {}
        QuestionType::MultipleChoice => {
            if prompt::confirm(source, "Do you wish to modify the choices? (Y/N): ")? {
                edit_choices(source, question)?;
            }
            source.notify(&format!(
                "Current number of allowed responses: {}",
                question.answers_allowed()
            ));
            if prompt::confirm(
                source,
                "Do you wish to change the number of responses allowed? (Y/N): ",
            )? {
                edit_answer_count(source, question)?;
            }
        }
        QuestionType::ShortAnswer | QuestionType::Essay => {
            source.notify(&format!(
                "Current number of allowed responses: {}",
                question.answers_allowed()
            ));
            if prompt::confirm(
                source,
                "Do you wish to change the number of responses allowed? (Y/N): ",
            )? {
                edit_answer_count(source, question)?;
            }
        }
        QuestionType::Matching => {
            if prompt::confirm(source, "Do you wish to modify the items? (Y/N): ")? {
                edit_matching_items(source, question)?;
            }
        }
    }
    Ok(())
}

fn edit_choices(source: &mut dyn AnswerSource, question: &mut Question) -> Result<()> {
    loop {
        source.notify(&format!("{question}"));
        let input =
            source.read_line("Enter the letter of the choice to modify (blank to finish): ")?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let Some(letter) = single_letter(trimmed) else {
            source.notify("Please enter a single letter.");
            continue;
        };
        let text = source.read_line(&format!("Enter new value for choice {letter}: "))?;
        if let Err(e) = question.apply_edit(QuestionEdit::Choice { letter, text }) {
            source.notify(&e.to_string());
        }
    }
}

fn edit_answer_count(source: &mut dyn AnswerSource, question: &mut Question) -> Result<()> {
    loop {
        let input = source.read_line("Enter the new number of allowed responses: ")?;
        let count: usize = match input.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                source.notify("Please enter a valid integer.");
                continue;
            }
        };
        match question.apply_edit(QuestionEdit::AnswersAllowed(count)) {
            Ok(()) => return Ok(()),
            Err(e) => source.notify(&e.to_string()),
        }
    }
}

fn edit_matching_items(source: &mut dyn AnswerSource, question: &mut Question) -> Result<()> {
    loop {
        source.notify(&format!("{question}"));
        let input = source.read_line(
            "Enter the letter/number of the item to modify (e.g. A or 1; blank to finish): ",
        )?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let edit = if let Ok(number) = trimmed.parse::<usize>() {
            let text = source.read_line(&format!("Enter new value for right item {number}: "))?;
            QuestionEdit::RightItem { number, text }
        } else if let Some(letter) = single_letter(trimmed) {
            let text = source.read_line(&format!(
                "Enter new value for left item {}: ",
                letter.to_ascii_uppercase()
            ))?;
            QuestionEdit::LeftItem { letter, text }
        } else {
            source.notify("Please enter a valid letter or number.");
            continue;
        };
        if let Err(e) = question.apply_edit(edit) {
            source.notify(&e.to_string());
        }
    }
}

fn single_letter(input: &str) -> Option<char> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}
