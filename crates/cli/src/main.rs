//! `payslip` - generate one PDF payslip per employee row of a CSV file

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use payslip::{generate_all, read_employees_csv, BatchReport, Mode, PayslipConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "payslip", version, about = "Generate payslip PDFs from an employee CSV")]
struct Args {
    /// Employee CSV file
    #[arg(short, long, env = "PAYSLIP_INPUT", default_value = "employees.csv")]
    input: PathBuf,

    /// Directory for the generated PDFs (created if missing)
    #[arg(short, long, env = "PAYSLIP_OUTPUT_DIR", default_value = "output")]
    output: PathBuf,

    /// JSON file with company details and record defaults
    #[arg(short, long, env = "PAYSLIP_CONFIG")]
    config: Option<PathBuf>,

    /// Logo image (PNG or JPEG), overrides the configured one
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Render payslips in parallel
    #[arg(long)]
    parallel: bool,
}

fn load_config(args: &Args) -> Result<PayslipConfig> {
    let config = match &args.config {
        Some(path) => PayslipConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PayslipConfig::default(),
    };

    match &args.logo {
        Some(logo) => Ok(config.with_logo(logo)?),
        None => Ok(config),
    }
}

fn run(args: &Args) -> Result<BatchReport> {
    let config = load_config(args)?;

    let records = read_employees_csv(&args.input, &config.defaults)
        .with_context(|| format!("Failed to read employees from {}", args.input.display()))?;
    if records.is_empty() {
        bail!("No employees found in {}", args.input.display());
    }
    info!("Loaded {} employees from {}", records.len(), args.input.display());

    std::fs::create_dir_all(&args.output).with_context(|| {
        format!("Failed to create output directory {}", args.output.display())
    })?;

    let mode = if args.parallel {
        Mode::Parallel
    } else {
        Mode::Sequential
    };
    Ok(generate_all(records, &config, &args.output, mode))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let report = run(&args)?;

    for failure in &report.failures {
        warn!("{}: {}", failure.employee, failure.error);
    }
    info!(
        "Generated {} of {} payslips in {}",
        report.generated.len(),
        report.total(),
        args.output.display()
    );

    Ok(())
}
