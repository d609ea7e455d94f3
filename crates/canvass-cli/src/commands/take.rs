//! The `canvass take` command.

use std::path::Path;

use anyhow::Result;

use canvass_core::capture::{take_survey, take_test};
use canvass_store::{Store, SubjectKind};

use crate::prompt::StdinSource;

pub fn execute(data_dir: &Path, name: &str, test: bool) -> Result<()> {
    let store = Store::open(data_dir)?;
    let mut source = StdinSource::new();

    let (record, kind) = if test {
        let loaded = store.load_test(name)?;
        (take_test(&loaded, &mut source)?, SubjectKind::Test)
    } else {
        let loaded = store.load_survey(name)?;
        (take_survey(&loaded, &mut source)?, SubjectKind::Survey)
    };

    let saved = store.save_response(kind, &record)?;
    println!("Responses saved to {}", saved.display());
    Ok(())
}
