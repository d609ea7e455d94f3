//! The `canvass create` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use canvass_core::capture::{collect_answers, AnswerSource};
use canvass_core::definition::{check_definition, parse_definition, Definition};
use canvass_core::model::{index_letter, Question, QuestionType, Survey, MAX_LETTERED_ITEMS};
use canvass_core::oracle::{KeyedQuestion, Test};
use canvass_store::Store;

use crate::prompt::{self, StdinSource};

pub fn execute(data_dir: &Path, from: Option<PathBuf>, test: bool) -> Result<()> {
    let store = Store::open(data_dir)?;

    if let Some(path) = from {
        let definition = parse_definition(&path)?;
        for warning in check_definition(&definition) {
            match warning.question {
                Some(n) => eprintln!("WARNING (question {n}): {}", warning.message),
                None => eprintln!("WARNING: {}", warning.message),
            }
        }
        match definition {
            Definition::Survey(survey) => {
                let saved = store.save_survey(&survey)?;
                println!("Survey '{}' saved to {}", survey.name, saved.display());
            }
            Definition::Test(test) => {
                let saved = store.save_test(&test)?;
                println!("Test '{}' saved to {}", test.name, saved.display());
            }
        }
        return Ok(());
    }

    let mut source = StdinSource::new();
    if test {
        let built = build_test(&mut source)?;
        if built.is_empty() {
            println!("No questions added; nothing saved.");
            return Ok(());
        }
        let saved = store.save_test(&built)?;
        println!("Test '{}' saved to {}", built.name, saved.display());
    } else {
        let built = build_survey(&mut source)?;
        if built.is_empty() {
            println!("No questions added; nothing saved.");
            return Ok(());
        }
        let saved = store.save_survey(&built)?;
        println!("Survey '{}' saved to {}", built.name, saved.display());
    }
    Ok(())
}

fn build_survey(source: &mut dyn AnswerSource) -> Result<Survey> {
    let name = prompt::read_nonempty(source, "Enter a name for your survey: ")?;
    let mut survey = Survey::new(name);
    while let Some(question_type) = next_question_type(source)? {
        survey.add_question(build_question(source, question_type)?);
    }
    Ok(survey)
}

fn build_test(source: &mut dyn AnswerSource) -> Result<Test> {
    let name = prompt::read_nonempty(source, "Enter a name for your test: ")?;
    let mut test = Test::new(name);
    while let Some(question_type) = next_question_type(source)? {
        let question = build_question(source, question_type)?;
        test.add_question(collect_key(source, question)?);
    }
    Ok(test)
}

/// Prompt for the next question's type, or `None` when the author is done.
fn next_question_type(source: &mut dyn AnswerSource) -> Result<Option<QuestionType>> {
    loop {
        let input = source.read_line(
            "Question type (tf, mc, short, essay, date, matching; blank to finish): ",
        )?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<QuestionType>() {
            Ok(question_type) => return Ok(Some(question_type)),
            Err(e) => source.notify(&e),
        }
    }
}

fn build_question(
    source: &mut dyn AnswerSource,
    question_type: QuestionType,
) -> Result<Question> {
    let prompt_text = prompt::read_nonempty(source, "Enter the question prompt: ")?;
    let question = match question_type {
        QuestionType::TrueFalse => Question::true_false(prompt_text),
        QuestionType::Date => Question::date(prompt_text),
        QuestionType::MultipleChoice => {
            let count = prompt::read_usize(source, "How many choices? ", 2, MAX_LETTERED_ITEMS)?;
            let mut choices = Vec::with_capacity(count);
            for i in 0..count {
                choices.push(prompt::read_nonempty(
                    source,
                    &format!("Choice {}: ", index_letter(i)),
                )?);
            }
            let allowed = prompt::read_usize(
                source,
                &format!("How many selections are allowed (1-{count})? "),
                1,
                count,
            )?;
            Question::multiple_choice(prompt_text, choices, allowed)?
        }
        QuestionType::ShortAnswer => {
            let allowed =
                prompt::read_usize(source, "How many answers are required? ", 1, usize::MAX)?;
            Question::short_answer(prompt_text, allowed)?
        }
        QuestionType::Essay => {
            let allowed =
                prompt::read_usize(source, "How many essay responses? ", 1, usize::MAX)?;
            Question::essay(prompt_text, allowed)?
        }
        QuestionType::Matching => {
            let count = prompt::read_usize(
                source,
                "How many item pairs? ",
                1,
                MAX_LETTERED_ITEMS,
            )?;
            let mut left = Vec::with_capacity(count);
            for i in 0..count {
                left.push(prompt::read_nonempty(
                    source,
                    &format!("Left item {}: ", index_letter(i)),
                )?);
            }
            let mut right = Vec::with_capacity(count);
            for i in 0..count {
                right.push(prompt::read_nonempty(
                    source,
                    &format!("Right item {}: ", i + 1),
                )?);
            }
            Question::matching(prompt_text, left, right)?
        }
    };
    Ok(question)
}

/// Collect the answer key for a freshly built question.
fn collect_key(source: &mut dyn AnswerSource, question: Question) -> Result<KeyedQuestion> {
    if question.question_type() == QuestionType::Essay {
        return Ok(KeyedQuestion::new(question, None)?);
    }
    source.notify(&format!("\n{question}"));
    source.notify("Enter the correct answer(s):");
    let key = collect_answers(&question, source)?;
    Ok(KeyedQuestion::new(question, Some(key))?)
}
