//! canvass CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod prompt;

#[derive(Parser)]
#[command(
    name = "canvass",
    version,
    about = "Survey and test builder with grading and tabulation"
)]
struct Cli {
    /// Root directory for stored surveys, tests and responses
    #[arg(long, global = true, default_value = "./canvass-data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a survey or test, interactively or from a TOML definition
    Create {
        /// Build from a TOML definition instead of interactive prompts
        #[arg(long)]
        from: Option<PathBuf>,

        /// Author a test (questions carry answer keys) rather than a survey
        #[arg(long)]
        test: bool,
    },

    /// List stored surveys and tests
    List,

    /// Display a stored survey or test
    Show {
        /// Name of the survey or test
        name: String,

        /// Look the name up among tests rather than surveys
        #[arg(long)]
        test: bool,

        /// Include the answer key (tests only)
        #[arg(long)]
        with_answers: bool,
    },

    /// Answer a survey or test and store the response record
    Take {
        name: String,

        #[arg(long)]
        test: bool,
    },

    /// Modify a question of a stored survey or test
    Modify {
        name: String,

        #[arg(long)]
        test: bool,
    },

    /// Aggregate every stored response for a subject
    Tabulate {
        name: String,

        #[arg(long)]
        test: bool,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Grade one stored response record against a test
    Grade {
        name: String,

        /// One-based index of the response record (defaults to the newest)
        #[arg(long)]
        response: Option<usize>,
    },

    /// Check a TOML definition without storing anything
    Validate {
        /// Path to the definition file
        definition: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("canvass=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir;

    let result = match cli.command {
        Commands::Create { from, test } => commands::create::execute(&data_dir, from, test),
        Commands::List => commands::list::execute(&data_dir),
        Commands::Show {
            name,
            test,
            with_answers,
        } => commands::show::execute(&data_dir, &name, test, with_answers),
        Commands::Take { name, test } => commands::take::execute(&data_dir, &name, test),
        Commands::Modify { name, test } => commands::modify::execute(&data_dir, &name, test),
        Commands::Tabulate { name, test, format } => {
            commands::tabulate::execute(&data_dir, &name, test, &format)
        }
        Commands::Grade { name, response } => commands::grade::execute(&data_dir, &name, response),
        Commands::Validate { definition } => commands::validate::execute(&definition),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
