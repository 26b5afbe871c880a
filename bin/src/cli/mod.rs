//! `tablemine` command line: `extract` runs every enabled detector over one
//! HTML document, `guided` locates the blocks holding given example values.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::LevelFilter;

mod extract;
mod guided;

/// Finds tables and table-like structures in HTML documents.
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Logging level.
    #[arg(long, default_value = "Warn")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    Extract(extract::Command),
    Guided(guided::Command),
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())
        .with_context(|| "configuring logging")?;

    use Command::*;
    match &args.command {
        Extract(cmd) => extract::run(cmd),
        Guided(cmd) => guided::run(cmd),
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[gtest]
    fn parses_extract_with_global_log_level() -> anyhow::Result<()> {
        let args = Args::try_parse_from([
            "tablemine",
            "--log-level",
            "debug",
            "extract",
            "page.html",
            "--scores-log",
            "scores.log",
        ])?;
        expect_that!(args.log_level, eq(LevelFilter::Debug));
        expect_that!(matches!(args.command, Command::Extract(_)), eq(true));
        Ok(())
    }

    #[gtest]
    fn guided_requires_an_example() {
        expect_that!(Args::try_parse_from(["tablemine", "guided", "page.html"]).is_err(), eq(true));
        expect_that!(
            Args::try_parse_from(["tablemine", "guided", "-", "--example", "3 700 000 kr"]).is_ok(),
            eq(true)
        );
    }

    #[gtest]
    fn log_level_defaults_to_warn() -> anyhow::Result<()> {
        let args = Args::try_parse_from(["tablemine", "extract", "-"])?;
        expect_that!(args.log_level, eq(LevelFilter::Warn));
        Ok(())
    }
}
