use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use spendgrid_finance::{StatementAnalyzer, StatementRun};
use spendgrid_ingest::{normalize_tables, read_document_tables};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod render;
mod scan;

use config::{Config, default_config_path, init_config, load_config};

#[derive(Parser, Debug)]
#[command(name = "spendgrid", version, about = "Monthly merchant spend from extracted card statement tables")]
struct Cli {
    /// Config file (default: ~/.spendgrid/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze every `<Mon>_<YYYY>_*` statement in a folder and print the report
    Analyze {
        /// Folder of statement tables (CSV files or per-statement folders)
        dir: PathBuf,

        /// Print the report as JSON instead of text tables
        #[arg(long)]
        json: bool,

        /// Also write the per-merchant monthly series to this CSV file
        #[arg(long)]
        series_csv: Option<PathBuf>,

        /// Show spend that matched no merchant
        #[arg(long)]
        show_unmatched: bool,

        /// Number of top spends to list (default from config: 15)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Show column scores and inferred roles for one statement
    Inspect {
        /// Statement CSV file or folder of page tables
        document: PathBuf,
    },

    /// Write the default config file
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG > --verbose > info
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr).compact())
        .init();

    let config_path = match cli.config {
        Some(p) => p,
        None => default_config_path()?,
    };

    match cli.command {
        Command::Analyze {
            dir,
            json,
            series_csv,
            show_unmatched,
            top,
        } => {
            let cfg = load_config(&config_path)?;
            analyze(&dir, &cfg, json, series_csv.as_deref(), show_unmatched, top)?;
        }
        Command::Inspect { document } => {
            let cfg = load_config(&config_path)?;
            inspect(&document, &cfg)?;
        }
        Command::InitConfig => init_config(&config_path)?,
    }

    Ok(())
}

fn analyzer_for(cfg: &Config) -> StatementAnalyzer {
    StatementAnalyzer::new(cfg.merchants.clone(), cfg.inference, cfg.template)
}

fn analyze(
    dir: &Path,
    cfg: &Config,
    json: bool,
    series_csv: Option<&Path>,
    show_unmatched: bool,
    top: Option<usize>,
) -> Result<()> {
    if !dir.is_dir() {
        bail!("statement folder not found: {}", dir.display());
    }

    let docs = scan::scan_statements(dir)?;
    info!(folder = %dir.display(), documents = docs.len(), "scanned statements");

    let analyzer = analyzer_for(cfg);
    let mut run = StatementRun::new(&analyzer);
    for doc in &docs {
        info!(document = %doc.name, month = %doc.month, "analyzing");
        run.process(&doc.name, doc.month, read_document_tables(&doc.path));
    }

    let top_n = top.unwrap_or(cfg.report.top_n);
    let Some(report) = run.finish(top_n, cfg.report.description_width) else {
        println!("No valid monthly spend data found to report.");
        return Ok(());
    };

    if let Some(path) = series_csv {
        render::write_series_csv(path, &report.chart)?;
        info!(path = %path.display(), "wrote chart series");
    }

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report).context("serialize report")?;
        writeln!(out)?;
    } else {
        render::write_report(&mut out, &report, show_unmatched)?;
    }
    Ok(())
}

/// Manual-inspection view: what the inferrer saw and what it picked
fn inspect(document: &Path, cfg: &Config) -> Result<()> {
    let analyzer = analyzer_for(cfg);
    let tables = read_document_tables(document)
        .with_context(|| format!("reading {}", document.display()))?;
    let grid = normalize_tables(&tables)?;
    let scores = analyzer.inferrer().score(&grid);

    println!("{} table(s), {} row(s) x {} column(s)\n", tables.len(), grid.row_count(), grid.width());
    println!("{:>6} | {:>6} | {:>8} | {:>7}", "column", "date", "keywords", "numeric");
    for col in 0..grid.width() {
        println!(
            "{:>6} | {:>6.2} | {:>8} | {:>7.2}",
            col, scores.date_fraction[col], scores.keyword_hits[col], scores.numeric_fraction[col]
        );
    }

    println!("\nFirst rows:");
    for row in grid.rows().iter().take(5) {
        println!("  {}", row.join(" | "));
    }
    println!();

    match analyzer.inferrer().infer(&grid) {
        Ok(roles) => {
            println!("date        -> column {} ({:?})", roles.date.index, roles.date.source);
            println!("description -> column {} ({:?})", roles.description.index, roles.description.source);
            println!("amount      -> column {} ({:?})", roles.amount.index, roles.amount.source);
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}
