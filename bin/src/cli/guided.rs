use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use engine::{Document, extract_by_examples};

use crate::{input, report};

/// Finds the blocks of an HTML document that hold the given example values,
/// and suggests a pattern for values like them.
#[derive(Args, Debug)]
pub struct Command {
    /// Path to the HTML document, or "-" to read it from standard input.
    input: PathBuf,

    /// A value as it appears on the page, e.g. "3&nbsp;700&nbsp;000&nbsp;kr".
    /// May be given more than once.
    #[arg(long = "example", required = true)]
    examples: Vec<String>,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let html = input::read_html(&cmd.input)?;
    let doc = Document::parse(&html).with_context(|| format!("parsing {:?}", cmd.input))?;
    let guided = extract_by_examples(&doc, cmd.examples.as_slice())
        .with_context(|| "extracting by examples")?;

    let mut stdout = std::io::stdout().lock();
    report::write_guided(&mut stdout, &guided).with_context(|| "writing results")
}
