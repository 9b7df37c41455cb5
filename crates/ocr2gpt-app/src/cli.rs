use std::path::PathBuf;

use clap::Parser;
use ocr2gpt_types::BackendKind;

/// Screenshot the primary monitor and read the text in it
#[derive(Parser, Debug, Default)]
#[command(name = "ocr2gpt", version, about)]
pub struct Cli {
    /// JSON config file; environment variables are used when absent
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Recognition backend: none, tesseract or vision
    #[arg(short, long)]
    pub backend: Option<BackendKind>,

    /// Where screenshots are written
    #[arg(long, value_name = "DIR")]
    pub screenshot_dir: Option<PathBuf>,

    /// Write the effective config as JSON and exit
    #[arg(long, value_name = "FILE")]
    pub write_default_config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}
