use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use ocr2gpt_config::Config;
use serde_json::Value;

use crate::cli::Cli;

/// Load the config file when given, otherwise build one from the environment.
///
/// Runs before the subscriber is installed, so nothing here logs.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let overrides: Value =
        serde_json::from_reader(reader).with_context(|| format!("parsing {}", path.display()))?;

    // File values layer over the environment-built config
    let mut merged = serde_json::to_value(Config::new())?;
    merge(&mut merged, overrides);
    let mut config: Config = serde_json::from_value(merged)
        .with_context(|| format!("parsing {}", path.display()))?;

    // Written files never carry the key; fall back to the environment
    if config.recognition.vision.api_key.is_empty() {
        config.recognition.vision.api_key = env::var("API_KEY").unwrap_or_default();
    }

    Ok(config)
}

/// Recursive object merge; anything that isn't an object on both sides is replaced
fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

/// Command-line flags win over the file and the environment
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(backend) = cli.backend {
        config.recognition.backend = backend;
    }
    if let Some(dir) = &cli.screenshot_dir {
        config.capture.screenshot_dir = dir.to_string_lossy().into_owned();
    }
}

/// Write the config as pretty JSON; the API key is never written
pub fn write_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Wrote config to {}", path.display());
    Ok(())
}
