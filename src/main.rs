use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use towmerge::{export, merge_directory, qa, Config};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge per-cruise net-tow event logs into one canonical table"
)]
struct Args {
    /// YAML config; every field is optional.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory with the per-cruise datasheets.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Merged CSV output path.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write the merged table as Parquet.
    #[arg(long)]
    parquet: Option<PathBuf>,
    /// Write the QA report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) config, CLI flags win ────────────────────────────────────
    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::default(),
    };
    if let Some(input) = args.input {
        cfg.input_dir = input;
    }
    if let Some(output) = args.output {
        cfg.output_csv = output;
    }
    if args.parquet.is_some() {
        cfg.output_parquet = args.parquet;
    }
    if args.report.is_some() {
        cfg.report_json = args.report;
    }

    // ─── 3) merge ────────────────────────────────────────────────────
    let run = merge_directory(&cfg.input_dir, &cfg)?;
    info!(
        files = run.inputs.len(),
        rows = run.table.num_rows(),
        dropped = run.dropped_rows,
        "merge complete"
    );

    // ─── 4) export ───────────────────────────────────────────────────
    export::write_csv(&run.table, &cfg.output_csv)?;
    if let Some(path) = &cfg.output_parquet {
        export::write_parquet(&run.table, path)?;
    }

    // ─── 5) QA ───────────────────────────────────────────────────────
    let report = qa::build_report(&run.table, &cfg);
    qa::print_report(&report);
    if let Some(path) = &cfg.report_json {
        report.write_json(path)?;
    }

    info!("all done");
    Ok(())
}
