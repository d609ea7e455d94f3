//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn canvass() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("canvass").unwrap()
}

const SURVEY_TOML: &str = r#"
[survey]
name = "Lunch preferences"

[[questions]]
type = "tf"
prompt = "Do you eat lunch at your desk?"

[[questions]]
type = "mc"
prompt = "Preferred cuisine?"
choices = ["Italian", "Thai", "Mexican"]
answers_allowed = 1
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

fn write_definition(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_survey_definition() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "survey.toml", SURVEY_TOML);

    canvass()
        .arg("validate")
        .arg(&definition)
        .assert()
        .success()
        .stdout(predicate::str::contains("Survey: Lunch preferences (2 questions)"))
        .stdout(predicate::str::contains("Definition is valid."));
}

#[test]
fn validate_flags_warnings() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(
        &dir,
        "warn.toml",
        r#"
[survey]
name = "Warnings"

[[questions]]
type = "mc"
prompt = "Pick everything"
choices = ["A", "B"]
answers_allowed = 2
"#,
    );

    canvass()
        .arg("validate")
        .arg(&definition)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_rejects_missing_section() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(
        &dir,
        "bad.toml",
        r#"
[[questions]]
type = "tf"
prompt = "Sure?"
"#,
    );

    canvass()
        .arg("validate")
        .arg(&definition)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[survey] or [test]"));
}

#[test]
fn create_from_definition_then_list() {
    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let definition = write_definition(&dir, "survey.toml", SURVEY_TOML);

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("create")
        .arg("--from")
        .arg(&definition)
        .assert()
        .success()
        .stdout(predicate::str::contains("Survey 'Lunch preferences' saved"));

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch_preferences"));
}

#[test]
fn show_survey_renders_scaffold() {
    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let definition = write_definition(&dir, "survey.toml", SURVEY_TOML);

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("create")
        .arg("--from")
        .arg(&definition)
        .assert()
        .success();

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("show")
        .arg("Lunch preferences")
        .assert()
        .success()
        .stdout(predicate::str::contains("(T/F)"))
        .stdout(predicate::str::contains("A) Italian"))
        .stdout(predicate::str::contains("C) Mexican"));
}

#[test]
fn show_test_with_answers() {
    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let definition = write_definition(&dir, "quiz.toml", TEST_TOML);

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("create")
        .arg("--from")
        .arg(&definition)
        .assert()
        .success();

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("show")
        .arg("Geography quiz")
        .arg("--test")
        .arg("--with-answers")
        .assert()
        .success()
        .stdout(predicate::str::contains("The correct answer is T"))
        .stdout(predicate::str::contains("The correct answer is Tokyo"))
        .stdout(predicate::str::contains(
            "(No automatic grading for this question)",
        ));
}

#[test]
fn with_answers_requires_test() {
    let data = TempDir::new().unwrap();

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("show")
        .arg("anything")
        .arg("--with-answers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--with-answers applies to tests"));
}

#[test]
fn show_missing_survey_fails() {
    let data = TempDir::new().unwrap();

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("show")
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stored entry named 'nope'"));
}

#[test]
fn grade_without_responses_fails() {
    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let definition = write_definition(&dir, "quiz.toml", TEST_TOML);

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("create")
        .arg("--from")
        .arg(&definition)
        .assert()
        .success();

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("grade")
        .arg("Geography quiz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no responses found"));
}

#[test]
fn create_survey_interactively() {
    let data = TempDir::new().unwrap();

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("create")
        .write_stdin("Desk survey\ntf\nDo you like your desk?\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Survey 'Desk survey' saved"));

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("show")
        .arg("Desk survey")
        .assert()
        .success()
        .stdout(predicate::str::contains("Do you like your desk?"));
}

#[test]
fn create_test_interactively_collects_key() {
    let data = TempDir::new().unwrap();

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("create")
        .arg("--test")
        .write_stdin("Pop quiz\ntf\nIs the sky blue?\nt\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test 'Pop quiz' saved"));

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("show")
        .arg("Pop quiz")
        .arg("--test")
        .arg("--with-answers")
        .assert()
        .success()
        .stdout(predicate::str::contains("The correct answer is T"));
}

#[test]
fn take_survey_scripted_then_tabulate() {
    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let definition = write_definition(&dir, "survey.toml", SURVEY_TOML);

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("create")
        .arg("--from")
        .arg(&definition)
        .assert()
        .success();

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("take")
        .arg("Lunch preferences")
        .write_stdin("t\nb\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Responses saved to"));

    canvass()
        .arg("--data-dir")
        .arg(data.path())
        .arg("tabulate")
        .arg("Lunch preferences")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"true_count\": 1"))
        .stdout(predicate::str::contains("\"respondents\": 1"));
}
