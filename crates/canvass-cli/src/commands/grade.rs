//! The `canvass grade` command.

use std::path::Path;

use anyhow::Result;

use canvass_core::grade::grade;
use canvass_store::{Store, SubjectKind};

pub fn execute(data_dir: &Path, name: &str, response: Option<usize>) -> Result<()> {
    let store = Store::open(data_dir)?;
    let test = store.load_test(name)?;

    let records = store.load_responses(SubjectKind::Test, &test.name)?;
    anyhow::ensure!(
        !records.is_empty(),
        "no responses found for test '{}'",
        test.name
    );

    let index = match response {
        Some(n) => {
            anyhow::ensure!(
                (1..=records.len()).contains(&n),
                "response must be between 1 and {}",
                records.len()
            );
            n - 1
        }
        None => records.len() - 1,
    };
    let record = &records[index];

    let summary = grade(&test, record);
    println!(
        "Response {} of {} (captured {})",
        index + 1,
        records.len(),
        record.captured_at.format("%Y-%m-%d %H:%M:%S")
    );
    let essays = summary.essay_count;
    let essay_clause = if essays == 1 {
        "was 1 essay question".to_string()
    } else {
        format!("were {essays} essay questions")
    };
    println!(
        "You received a {} on the test. The test was worth 100 points, \
         but only {} of those points could be auto graded because there {}.",
        summary.score(),
        summary.auto_gradable_points(),
        essay_clause
    );
    Ok(())
}
