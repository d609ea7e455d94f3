//! The `canvass list` command.

use std::path::Path;

use anyhow::Result;

use canvass_store::Store;

pub fn execute(data_dir: &Path) -> Result<()> {
    let store = Store::open(data_dir)?;

    println!("Surveys:");
    print_names(&store.list_surveys()?);
    println!("Tests:");
    print_names(&store.list_tests()?);

    Ok(())
}

fn print_names(names: &[String]) {
    if names.is_empty() {
        println!("  (none)");
        return;
    }
    for name in names {
        println!("  {name}");
    }
}
