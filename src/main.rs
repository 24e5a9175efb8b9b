use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::io::AsyncReadExt;

use clearbox::{
    app::{ClearBoxApp, RunRequest},
    config,
    export::ExportFormat,
    infrastructure::{directories, logging},
};

/// Classify emails as productive or unproductive and suggest a reply.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// .txt or .pdf files to classify.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Email text to classify. May be repeated.
    #[arg(long = "text", short = 't', value_name = "TEXT")]
    texts: Vec<String>,

    /// Read one more email from standard input.
    #[arg(long, default_value_t = false)]
    stdin: bool,

    /// Write the results to the exports directory.
    #[arg(long, value_enum)]
    export: Option<ExportArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportArg {
    Json,
    Csv,
    Both,
}

impl ExportArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            ExportArg::Json => vec![ExportFormat::Json],
            ExportArg::Csv => vec![ExportFormat::Csv],
            ExportArg::Both => vec![ExportFormat::Json, ExportFormat::Csv],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let mut texts = cli.texts;
    if cli.stdin {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read standard input")?;
        texts.push(buf);
    }

    let request = RunRequest {
        files: cli.files,
        texts,
        exports: cli.export.map(ExportArg::formats).unwrap_or_default(),
    };

    let app = ClearBoxApp::initialize(config, paths)?;
    app.run(request).await
}
