//! TOML survey and test definitions.
//!
//! A survey or test can be authored as a TOML file and loaded in one step,
//! as an alternative to the interactive prompts:
//!
//! ```toml
//! [survey]                       # or [test]
//! name = "Customer satisfaction"
//!
//! [[questions]]
//! type = "multiple_choice"
//! prompt = "Preferred contact method?"
//! choices = ["Email", "Phone", "Mail"]
//! answers_allowed = 1
//! # key = ["A"]                  # tests only
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionType, Survey};
use crate::oracle::{KeyedQuestion, Test};

#[derive(Debug, Deserialize)]
struct TomlDefinition {
    #[serde(default)]
    survey: Option<TomlHeader>,
    #[serde(default)]
    test: Option<TomlHeader>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlHeader {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(rename = "type")]
    question_type: String,
    prompt: String,
    #[serde(default)]
    choices: Vec<String>,
    #[serde(default)]
    left: Vec<String>,
    #[serde(default)]
    right: Vec<String>,
    #[serde(default)]
    answers_allowed: Option<usize>,
    #[serde(default)]
    key: Option<Vec<String>>,
}

/// A parsed definition file.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Survey(Survey),
    Test(Test),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Survey(survey) => &survey.name,
            Definition::Test(test) => &test.name,
        }
    }

    pub fn question_count(&self) -> usize {
        match self {
            Definition::Survey(survey) => survey.len(),
            Definition::Test(test) => test.len(),
        }
    }
}

/// Parse a TOML definition file.
pub fn parse_definition(path: &Path) -> Result<Definition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read definition file: {}", path.display()))?;
    parse_definition_str(&content, path)
}

/// Parse a TOML string into a definition (useful for testing).
pub fn parse_definition_str(content: &str, source_path: &Path) -> Result<Definition> {
    let parsed: TomlDefinition = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    match (parsed.survey, parsed.test) {
        (Some(_), Some(_)) => {
            anyhow::bail!("a definition must contain either [survey] or [test], not both")
        }
        (None, None) => anyhow::bail!("a definition must contain a [survey] or [test] section"),
        (Some(header), None) => {
            let mut survey = Survey::new(header.name);
            for (i, spec) in parsed.questions.into_iter().enumerate() {
                anyhow::ensure!(
                    spec.key.is_none(),
                    "question {}: only tests carry answer keys",
                    i + 1
                );
                survey.add_question(build_question(spec, i)?);
            }
            Ok(Definition::Survey(survey))
        }
        (None, Some(header)) => {
            let mut test = Test::new(header.name);
            for (i, mut spec) in parsed.questions.into_iter().enumerate() {
                let key = spec.key.take();
                let question = build_question(spec, i)?;
                let keyed = KeyedQuestion::new(question, key)
                    .with_context(|| format!("question {}: bad answer key", i + 1))?;
                test.add_question(keyed);
            }
            Ok(Definition::Test(test))
        }
    }
}

fn build_question(spec: TomlQuestion, index: usize) -> Result<Question> {
    let context = || format!("question {}", index + 1);
    let question_type: QuestionType = spec
        .question_type
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}: {e}", context()))?;
    let question = match question_type {
        QuestionType::TrueFalse => Question::true_false(spec.prompt),
        QuestionType::Date => Question::date(spec.prompt),
        QuestionType::MultipleChoice => Question::multiple_choice(
            spec.prompt,
            spec.choices,
            spec.answers_allowed.unwrap_or(1),
        )
        .with_context(context)?,
        QuestionType::ShortAnswer => {
            Question::short_answer(spec.prompt, spec.answers_allowed.unwrap_or(1))
                .with_context(context)?
        }
        QuestionType::Essay => Question::essay(spec.prompt, spec.answers_allowed.unwrap_or(1))
            .with_context(context)?,
        QuestionType::Matching => {
            Question::matching(spec.prompt, spec.left, spec.right).with_context(context)?
        }
    };
    Ok(question)
}

/// A non-fatal issue found in a definition.
#[derive(Debug, Clone)]
pub struct DefinitionWarning {
    /// One-based question number, when the warning points at a question.
    pub question: Option<usize>,
    pub message: String,
}

/// Check a definition for issues that are worth flagging but not fatal.
pub fn check_definition(definition: &Definition) -> Vec<DefinitionWarning> {
    let mut warnings = Vec::new();

    let questions: Vec<&Question> = match definition {
        Definition::Survey(survey) => survey.questions().iter().collect(),
        Definition::Test(test) => test.questions().iter().map(|k| k.question()).collect(),
    };

    if definition.name().trim().is_empty() {
        warnings.push(DefinitionWarning {
            question: None,
            message: "name is empty".into(),
        });
    }

    if questions.is_empty() {
        warnings.push(DefinitionWarning {
            question: None,
            message: "definition has no questions".into(),
        });
    }

    for (i, question) in questions.iter().enumerate() {
        if question.prompt().trim().is_empty() {
            warnings.push(DefinitionWarning {
                question: Some(i + 1),
                message: "prompt is empty".into(),
            });
        }
    }

    let mut seen_prompts = std::collections::HashSet::new();
    for (i, question) in questions.iter().enumerate() {
        if !seen_prompts.insert(question.prompt().trim()) {
            warnings.push(DefinitionWarning {
                question: Some(i + 1),
                message: format!("duplicate prompt: {}", question.prompt().trim()),
            });
        }
    }

    for (i, question) in questions.iter().enumerate() {
        if let crate::model::QuestionKind::MultipleChoice { choices } = question.kind() {
            if question.answers_allowed() == choices.len() {
                warnings.push(DefinitionWarning {
                    question: Some(i + 1),
                    message: "every choice must be selected; respondents have no real choice"
                        .into(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SURVEY_TOML: &str = r#"
[survey]
name = "Lunch preferences"

[[questions]]
type = "tf"
prompt = "Do you eat lunch at your desk?"

[[questions]]
type = "multiple_choice"
prompt = "Preferred cuisine?"
choices = ["Italian", "Thai", "Mexican"]
answers_allowed = 2

[[questions]]
type = "matching"
prompt = "Match the dish to its cuisine"
left = ["Pad thai", "Carbonara"]
right = ["Italian", "Thai"]
"#;

    const TEST_TOML: &str = r#"
[test]
name = "Geography quiz"

[[questions]]
type = "tf"
prompt = "Lima is the capital of Peru."
key = ["True"]

[[questions]]
type = "short_answer"
prompt = "Capital of Japan?"
key = ["Tokyo"]

[[questions]]
type = "essay"
prompt = "Describe the Andes."
"#;

    #[test]
    fn parse_survey_definition() {
        let definition =
            parse_definition_str(SURVEY_TOML, &PathBuf::from("lunch.toml")).unwrap();
        let Definition::Survey(survey) = definition else {
            panic!("expected a survey");
        };
        assert_eq!(survey.name, "Lunch preferences");
        assert_eq!(survey.len(), 3);
        assert_eq!(survey.questions()[1].answers_allowed(), 2);
        assert_eq!(survey.questions()[2].answers_allowed(), 2);
    }

    #[test]
    fn parse_test_definition_with_keys() {
        let definition = parse_definition_str(TEST_TOML, &PathBuf::from("quiz.toml")).unwrap();
        let Definition::Test(test) = definition else {
            panic!("expected a test");
        };
        assert_eq!(test.len(), 3);
        assert_eq!(test.essay_count(), 1);
        assert_eq!(test.questions()[0].key(), Some(&["True".to_string()][..]));
        assert!(test.questions()[2].key().is_none());
    }

    #[test]
    fn survey_rejects_keys() {
        let toml = r#"
[survey]
name = "Oops"

[[questions]]
type = "tf"
prompt = "Sure?"
key = ["True"]
"#;
        let err = parse_definition_str(toml, &PathBuf::from("oops.toml")).unwrap_err();
        assert!(err.to_string().contains("only tests carry answer keys"));
    }

    #[test]
    fn test_requires_keys_outside_essays() {
        let toml = r#"
[test]
name = "Oops"

[[questions]]
type = "tf"
prompt = "Sure?"
"#;
        assert!(parse_definition_str(toml, &PathBuf::from("oops.toml")).is_err());
    }

    #[test]
    fn missing_section_is_an_error() {
        let toml = r#"
[[questions]]
type = "tf"
prompt = "Sure?"
"#;
        let err = parse_definition_str(toml, &PathBuf::from("none.toml")).unwrap_err();
        assert!(err.to_string().contains("[survey] or [test]"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_definition_str("not [valid toml }{", &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn warnings_flag_select_all_and_duplicates() {
        let toml = r#"
[survey]
name = "Warnings"

[[questions]]
type = "mc"
prompt = "Pick everything"
choices = ["A", "B"]
answers_allowed = 2

[[questions]]
type = "tf"
prompt = "Repeated"

[[questions]]
type = "tf"
prompt = "Repeated"
"#;
        let definition = parse_definition_str(toml, &PathBuf::from("warn.toml")).unwrap();
        let warnings = check_definition(&definition);
        assert!(warnings.iter().any(|w| w.message.contains("every choice")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate prompt")));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.toml");
        std::fs::write(&path, SURVEY_TOML).unwrap();
        let definition = parse_definition(&path).unwrap();
        assert_eq!(definition.name(), "Lunch preferences");
        assert_eq!(definition.question_count(), 3);
    }
}
