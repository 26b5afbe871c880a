use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use engine::Engine;

use crate::{input, report};

/// Runs every detector over an HTML document and prints the tables and
/// pseudo-tables found.
#[derive(Args, Debug)]
pub struct Command {
    /// Path to the HTML document, or "-" to read it from standard input.
    input: PathBuf,

    /// Path to a YAML file overriding detection thresholds.
    ///
    /// Fields left out keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the diagnostic score recorded after each detector to this
    /// file, one "detector: score" line each.
    #[arg(long)]
    scores_log: Option<PathBuf>,

    /// Number of rows shown per table.
    #[arg(long, default_value = "5")]
    preview_rows: usize,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let config = input::load_config(cmd.config.as_deref())?;
    let html = input::read_html(&cmd.input)?;

    let engine = Engine::new(config).with_context(|| "building extraction engine")?;
    let extraction = engine
        .extract_html(&html)
        .with_context(|| format!("extracting tables from {:?}", cmd.input))?;

    if let Some(path) = &cmd.scores_log {
        report::write_scores_log(path, &extraction.scores)?;
    }

    let mut stdout = std::io::stdout().lock();
    report::write_summary(&mut stdout, &extraction.candidates, cmd.preview_rows)
        .with_context(|| "writing summary")
}
