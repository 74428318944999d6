use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "palin",
    about = "Turing-machine palindrome recognizer",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// File the run history is recorded to, one JSON record per line
    #[arg(long, global = true, default_value = "palin-history.jsonl")]
    pub history_file: PathBuf,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decide whether a word is a palindrome and record the verdict
    Check(CheckArgs),
    /// Step through a run, showing every transition
    Trace(TraceArgs),
    /// Show recently recorded runs, newest first
    History(HistoryArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// The word to decide
    pub word: String,

    /// Alphabet the recognizer is built over
    #[arg(long)]
    pub alphabet: Option<String>,

    /// Skip recording the result to the history file
    #[arg(long)]
    pub no_record: bool,
}

#[derive(Args)]
pub struct TraceArgs {
    /// The word to decide
    pub word: String,

    /// Alphabet the recognizer is built over
    #[arg(long)]
    pub alphabet: Option<String>,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Maximum number of records to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}
