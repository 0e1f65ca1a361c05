//! The quizcheck command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizcheck", version, about = "Self-assessment quiz grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade submissions against a quiz
    Grade {
        /// Path to a .json quiz file
        #[arg(long)]
        quiz: PathBuf,

        /// JSON array of submissions, one per question in quiz order.
        /// A null ranking is graded in its shuffled presented order, which
        /// is random unless --seed (or QUIZCHECK_SEED) is set
        #[arg(long)]
        submissions: PathBuf,

        /// Only keep questions in these groups (comma-separated)
        #[arg(long)]
        group: Option<String>,

        /// Seed for the presentation shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Directory to save the JSON grade report in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz JSON files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Export validated sheet rows as quiz records
    Export {
        /// CSV export of the question sheet
        #[arg(long)]
        sheet: PathBuf,

        /// Where to write the quiz JSON (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizcheck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            quiz,
            submissions,
            group,
            seed,
            format,
            output,
            config,
        } => commands::grade::execute(quiz, submissions, group, seed, format, output, config),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Export {
            sheet,
            output,
            config,
        } => commands::export::execute(sheet, output, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
