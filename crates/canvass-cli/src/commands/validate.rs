//! The `canvass validate` command.

use std::path::Path;

use anyhow::Result;

use canvass_core::definition::{check_definition, parse_definition, Definition};

pub fn execute(definition_path: &Path) -> Result<()> {
    let definition = parse_definition(definition_path)?;

    let kind = match &definition {
        Definition::Survey(_) => "Survey",
        Definition::Test(_) => "Test",
    };
    println!(
        "{kind}: {} ({} questions)",
        definition.name(),
        definition.question_count()
    );

    let warnings = check_definition(&definition);
    for warning in &warnings {
        let prefix = warning
            .question
            .map(|n| format!("  [question {n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", warning.message);
    }

    if warnings.is_empty() {
        println!("Definition is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
