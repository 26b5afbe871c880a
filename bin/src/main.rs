use anyhow::Result;

mod cli;
mod input;
mod report;

fn main() -> Result<()> {
    cli::run()
}
