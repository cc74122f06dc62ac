mod cli;
mod extract;

use std::fs;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use docqa_core::chunker::Chunker;
use docqa_core::config::{resolve_with_base, Settings};
use docqa_core::types::Chunk;
use docqa_gateway::{get_default_embedder, GeminiGenerator};
use docqa_retrieval::{answer, summarize, Answer, Retriever, SummaryMode, SummaryReport};

use crate::cli::{Cli, Command};

const PREVIEW_CHARS: usize = 600;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Expand `~` and `$VARS` in a user-supplied path and anchor it at the working directory.
fn resolve_cli_path(path: &Path) -> Result<PathBuf> {
    Ok(resolve_with_base(&env::current_dir()?, path.to_string_lossy()))
}

fn load_chunks(pdf: &Path, settings: &Settings) -> Result<Vec<Chunk>> {
    let path = resolve_cli_path(pdf)?;
    let text = extract::extract_text(&path)?;
    if text.is_empty() {
        bail!("No extractable text found in {} (the PDF may be scanned or image-only)", path.display());
    }
    Ok(Chunker::from_settings(&settings.chunking).chunk(&text))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    match cli.command {
        Command::Chunks { pdf, max_words, overlap, preview } => {
            if let Some(n) = max_words { settings.chunking.max_words = n; }
            if let Some(n) = overlap { settings.chunking.overlap = n; }
            settings.validate()?;
            let chunks = load_chunks(&pdf, &settings)?;
            println!("{} chunks ({} words max, {} overlap)", chunks.len(), settings.chunking.max_words, settings.chunking.overlap);
            for chunk in &chunks {
                println!("\n--- chunk {} ({} words) ---", chunk.chunk_id, chunk.text.split_whitespace().count());
                if preview {
                    let head: String = chunk.text.chars().take(PREVIEW_CHARS).collect();
                    println!("{head}");
                }
            }
        }
        Command::Summarize { pdf, mode, output } => {
            let chunks = load_chunks(&pdf, &settings)?;
            let generator = GeminiGenerator::new(&settings.gateway)?;
            let report = run_summary(&generator, &chunks, mode)?;
            if !report.failed_chunks.is_empty() {
                eprintln!("⚠️  {} chunk(s) could not be summarized: {:?}", report.failed_chunks.len(), report.failed_chunks);
            }
            if report.summary.is_empty() {
                bail!("no summary could be generated");
            }
            match output {
                Some(path) => {
                    let path = resolve_cli_path(&path)?;
                    fs::write(&path, &report.summary)?;
                    println!("✅ Summary written to {}", path.display());
                }
                None => println!("{}", report.summary),
            }
        }
        Command::Ask { pdf, question, keyword_only, top_k } => {
            if let Some(k) = top_k { settings.retrieval.top_k = k; }
            settings.validate()?;
            let chunks = load_chunks(&pdf, &settings)?;
            let generator = GeminiGenerator::new(&settings.gateway)?;
            let mut retriever = if keyword_only {
                Retriever::keyword_only(&settings.retrieval)
            } else {
                Retriever::new(get_default_embedder(&settings)?, &settings.retrieval)
            };
            retriever.build_index(&chunks)?;
            match answer(&generator, &retriever, &question)? {
                Answer::NoRelevantPassages => println!("No relevant passages found for this question."),
                Answer::Generated { text, contexts, strategy } => {
                    println!("{text}");
                    println!("\n--- contexts used ({strategy:?} retrieval) ---\n{}", contexts.trim_end());
                }
            }
        }
    }
    Ok(())
}

fn run_summary(generator: &GeminiGenerator, chunks: &[Chunk], mode: SummaryMode) -> Result<SummaryReport> {
    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("{mode} summary"));
    let report = summarize(generator, chunks, mode, |done, _| pb.set_position(done as u64));
    pb.finish_with_message(if report.merged { "merged" } else { "done" });
    Ok(report)
}
