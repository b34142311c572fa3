use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, io, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use statfixtures::{generate, source, DialectKind, Options};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate store assertions from a Stats Wales JSON export"
)]
struct Args {
    /// JSON export to read
    #[arg(default_value = "datasets/envi0201.json")]
    input: PathBuf,
    /// Built-in column map (see --list-datasets)
    #[arg(short, long, default_value = "aqi")]
    dataset: String,
    /// YAML column map; overrides --dataset
    #[arg(long)]
    columns: Option<PathBuf>,
    /// Assertion syntax: catch2 or plain
    #[arg(long, default_value_t = DialectKind::Catch2)]
    dialect: DialectKind,
    /// Also assert averages and first-to-last-year differences
    #[arg(long)]
    stats: bool,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print the built-in datasets and exit
    #[arg(long)]
    list_datasets: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging (stderr; stdout carries the fixtures) ──────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.list_datasets {
        for (code, name) in source::builtin_codes() {
            println!("{:<8} {}", code, name);
        }
        return Ok(());
    }

    // ─── 2) resolve column map ──────────────────────────────────────
    let columns = match &args.columns {
        Some(path) => source::load_column_map(path)
            .with_context(|| format!("loading column map {}", path.display()))?,
        None => source::builtin(&args.dataset)?,
    };
    let opts = Options {
        columns,
        dialect: args.dialect,
        stats: args.stats,
    };
    info!(input = %args.input.display(), dialect = %opts.dialect, stats = opts.stats, "startup");

    // ─── 3) generate into the chosen sink ───────────────────────────
    let result = match &args.output {
        Some(path) => {
            // buffer first so a failed run leaves no file behind
            let mut buf = Vec::new();
            generate(&args.input, &opts, &mut buf).and_then(|report| {
                fs::write(path, &buf)?;
                Ok(report)
            })
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            generate(&args.input, &opts, &mut lock)
        }
    };

    match result {
        Ok(report) => {
            info!(areas = report.areas, lines = report.lines, "all done");
            Ok(())
        }
        Err(e) => {
            error!("generation failed: {}", e);
            Err(e).with_context(|| format!("generating fixtures from {}", args.input.display()))
        }
    }
}
