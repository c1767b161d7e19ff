use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use article_assess::{assess_batch, parse_requests, Config, RequestBatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Parser)]
#[command(
    name = "article-assess",
    about = "Score articles for accuracy, quality and style compliance",
    version
)]
struct Cli {
    /// JSON request files to assess (reads stdin if none provided)
    files: Vec<PathBuf>,

    /// Config file (defaults to ./article-assess.toml when present)
    #[arg(long, env = "ARTICLE_ASSESS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Log level when RUST_LOG is unset (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Worker threads for batch assessment (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Report failed requests on stderr and keep going
    #[arg(long)]
    continue_on_error: bool,
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<(String, String)>> {
    if files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(vec![("<stdin>".to_string(), input)]);
    }
    files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Error reading {}", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = Config::discover(cli.config.as_deref(), &cwd)
        .and_then(|config| config.with_log_level(cli.log_level.as_deref()))
        .context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads.unwrap_or(config.threads))
        .build()
        .context("Failed to build worker pool")?;
    let pretty = config.pretty && !cli.compact;
    let continue_on_error = config.continue_on_error || cli.continue_on_error;

    let mut failed = 0usize;
    for (label, content) in read_inputs(&cli.files)? {
        let batch = parse_requests(&content).with_context(|| format!("Invalid input in {label}"))?;
        let is_array = matches!(batch, RequestBatch::Many(_));
        let requests = batch.into_requests();
        tracing::debug!(input = %label, requests = requests.len(), "assessing");

        let results = pool.install(|| assess_batch(&requests));
        let mut reports = Vec::with_capacity(results.len());
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(report) => reports.push(report),
                Err(err) if continue_on_error => {
                    failed += 1;
                    eprintln!("{label}[{index}]: {err}");
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("Request {index} in {label} failed"));
                }
            }
        }

        match cli.format {
            Format::Text => {
                for report in &reports {
                    println!("{report}");
                }
            }
            Format::Json if is_array => println!("{}", render(&reports, pretty)?),
            Format::Json => {
                if let Some(report) = reports.first() {
                    println!("{}", render(report, pretty)?);
                }
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} request(s) failed");
    }
    Ok(())
}
