use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use engine::EngineConfig;

/// Path that stands for standard input.
const STDIN: &str = "-";

/// Reads the whole HTML document at `path`, or from standard input.
pub fn read_html(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .with_context(|| "reading HTML from standard input")?;
        return Ok(html);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading HTML from {path:?}"))
}

/// Loads the engine configuration from the YAML file at `path`. Without a
/// file, every threshold keeps its default.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let rdr = std::fs::File::open(path)
        .with_context(|| format!("opening configuration file {path:?}"))?;
    let config: EngineConfig =
        serde_yaml_ng::from_reader(rdr).with_context(|| "parsing configuration file")?;
    log::debug!("loaded configuration {config:?}");
    Ok(config)
}
