use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docqa_retrieval::SummaryMode;

#[derive(Parser, Debug)]
#[command(name = "docqa", about = "Summarize PDFs and answer questions about them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract a PDF and list the chunks it splits into.
    Chunks {
        /// Path to the PDF file.
        pdf: PathBuf,
        /// Words per chunk (overrides `chunking.max_words`).
        #[arg(long)]
        max_words: Option<usize>,
        /// Words shared by consecutive chunks (overrides `chunking.overlap`).
        #[arg(long)]
        overlap: Option<usize>,
        /// Print the first 600 characters of each chunk.
        #[arg(long)]
        preview: bool,
    },

    /// Summarize every chunk and merge the results into one summary.
    Summarize {
        pdf: PathBuf,
        #[arg(short, long, default_value_t = SummaryMode::Detailed)]
        mode: SummaryMode,
        /// Write the summary to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Answer a question from the most relevant passages of a PDF.
    Ask {
        pdf: PathBuf,
        question: String,
        /// Skip embeddings and rank chunks by keyword overlap.
        #[arg(long)]
        keyword_only: bool,
        /// Passages used for embedding retrieval (overrides `retrieval.top_k`).
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_defaults_to_detailed() {
        let cli = Cli::try_parse_from(["docqa", "summarize", "paper.pdf"]).unwrap();
        let Command::Summarize { mode, output, .. } = cli.command else { panic!("wrong command") };
        assert_eq!(mode, SummaryMode::Detailed);
        assert!(output.is_none());
    }

    #[test]
    fn ask_parses_flags() {
        let cli = Cli::try_parse_from(["docqa", "ask", "paper.pdf", "what is it?", "--keyword-only", "-k", "2"]).unwrap();
        let Command::Ask { question, keyword_only, top_k, .. } = cli.command else { panic!("wrong command") };
        assert_eq!(question, "what is it?");
        assert!(keyword_only);
        assert_eq!(top_k, Some(2));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["docqa", "summarize", "paper.pdf", "--mode", "poem"]).is_err());
    }
}
