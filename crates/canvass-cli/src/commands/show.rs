//! The `canvass show` command.

use std::path::Path;

use anyhow::Result;

use canvass_store::Store;

pub fn execute(data_dir: &Path, name: &str, test: bool, with_answers: bool) -> Result<()> {
    anyhow::ensure!(
        test || !with_answers,
        "--with-answers applies to tests; pass --test"
    );

    let store = Store::open(data_dir)?;
    if test {
        let loaded = store.load_test(name)?;
        println!("Test: {}", loaded.name);
        for (i, keyed) in loaded.questions().iter().enumerate() {
            println!();
            println!("{}) {}", i + 1, keyed.question());
            if with_answers {
                match keyed.describe_key() {
                    Some(text) => println!("{text}"),
                    None => println!("(No automatic grading for this question)"),
                }
            }
        }
    } else {
        let loaded = store.load_survey(name)?;
        println!("Survey: {}", loaded.name);
        for (i, question) in loaded.questions().iter().enumerate() {
            println!();
            println!("{}) {question}", i + 1);
        }
    }
    Ok(())
}
