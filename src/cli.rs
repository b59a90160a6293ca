use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FAQ chatbot: answers course questions from a FAQ dataset with an LLM.
///
/// Settings come from the environment (a `.env` file is loaded if present).
#[derive(Parser)]
#[command(name = "faq-bot", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Prepare the index if needed, then serve HTTP (default).
    Serve,

    /// Rebuild the index from the dataset and exit.
    ///
    /// Replaces any existing index at the configured path.
    BuildIndex {
        /// Dataset to read instead of `FAQ_DATASET_PATH`.
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Index directory to write instead of `FAQ_INDEX_PATH`.
        #[arg(long)]
        index: Option<PathBuf>,
    },
}
