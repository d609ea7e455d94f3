//! The `canvass tabulate` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use canvass_core::model::{Question, QuestionKind};
use canvass_core::tabulate::{tabulate, Tabulation, Tally};
use canvass_store::{Store, SubjectKind};

pub fn execute(data_dir: &Path, name: &str, test: bool, format: &str) -> Result<()> {
    let store = Store::open(data_dir)?;

    let (subject, questions, kind) = if test {
        let loaded = store.load_test(name)?;
        let questions: Vec<Question> = loaded
            .questions()
            .iter()
            .map(|k| k.question().clone())
            .collect();
        (loaded.name, questions, SubjectKind::Test)
    } else {
        let loaded = store.load_survey(name)?;
        let questions = loaded.questions().to_vec();
        (loaded.name, questions, SubjectKind::Survey)
    };

    let records = store.load_responses(kind, &subject)?;
    if records.is_empty() {
        println!("No responses to tabulate for '{subject}'.");
        return Ok(());
    }

    let tabulation = tabulate(&subject, &questions, &records);
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&tabulation)?),
        "table" => print_tabulation(&tabulation, &questions),
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }
    Ok(())
}

fn print_tabulation(tabulation: &Tabulation, questions: &[Question]) {
    println!(
        "Tabulation of '{}' ({} respondent{})",
        tabulation.subject,
        tabulation.respondents,
        if tabulation.respondents == 1 { "" } else { "s" }
    );

    for entry in &tabulation.entries {
        println!();
        println!("{}) {}", entry.index + 1, entry.prompt);
        match &entry.tally {
            Tally::TrueFalse {
                true_count,
                false_count,
            } => {
                let mut table = Table::new();
                table.set_header(vec!["Answer", "Count"]);
                table.add_row(vec![Cell::new("True"), Cell::new(true_count)]);
                table.add_row(vec![Cell::new("False"), Cell::new(false_count)]);
                println!("{table}");
            }
            Tally::Choices { counts } => {
                let mut table = Table::new();
                table.set_header(vec!["Letter", "Choice", "Count"]);
                for count in counts {
                    table.add_row(vec![
                        Cell::new(count.letter),
                        Cell::new(&count.choice),
                        Cell::new(count.count),
                    ]);
                }
                println!("{table}");
            }
            Tally::Text { counts } => {
                let mut table = Table::new();
                table.set_header(vec!["Answer", "Count"]);
                for count in counts {
                    table.add_row(vec![Cell::new(&count.answer), Cell::new(count.count)]);
                }
                println!("{table}");
            }
            Tally::Essays { responses } => {
                for response in responses {
                    println!("---");
                    println!("{response}");
                }
            }
            Tally::Assignments { assignments } => {
                if let Some(QuestionKind::Matching { left, right }) =
                    questions.get(entry.index).map(Question::kind)
                {
                    for (i, (l, r)) in left.iter().zip(right).enumerate() {
                        println!(
                            "{}) {}   {}) {}",
                            canvass_core::model::index_letter(i),
                            l,
                            i + 1,
                            r
                        );
                    }
                }
                for assignment in assignments {
                    println!(
                        "{} response{}:",
                        assignment.count,
                        if assignment.count == 1 { "" } else { "s" }
                    );
                    for pair in &assignment.pairs {
                        match pair.split_once('-') {
                            Some((letter, number)) => println!("  {letter} -> {number}"),
                            None => println!("  {pair}"),
                        }
                    }
                }
            }
        }
    }
}
