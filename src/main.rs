use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod attendance;
mod highlight;
mod imports;
mod models;
mod registry;
mod report;
mod session;

use registry::SubjectRegistry;

#[derive(Parser)]
#[command(name = "attendance-tracker")]
#[command(about = "Subject attendance tracker with 75% threshold recovery and medical-day estimates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute attendance percentages and remaining classes from a CSV
    Calc {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Estimate medical leave days for borderline attendance from a CSV
    Medical {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report from a CSV
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Start an interactive tracking session
    Session,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Calc { csv, json } => {
            let mut registry = SubjectRegistry::new();
            let imported = imports::load_subjects(&csv, &mut registry)?;
            let results = attendance::compute_attendance(registry.subjects());

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No subjects loaded from {}.", csv.display());
            } else {
                if imported.skipped > 0 {
                    println!("Skipped {} duplicate or unnamed rows.", imported.skipped);
                }
                for result in &results {
                    println!(
                        "- {} ({:.2}%): {}",
                        result.name,
                        result.percentage,
                        report::attendance_advice(result)
                    );
                }
                let summary = report::summarize_threshold(&results);
                println!(
                    "{} at or above 75%, {} below.",
                    summary.above_threshold, summary.below_threshold
                );
            }
        }
        Commands::Medical { csv, json } => {
            let mut registry = SubjectRegistry::new();
            let imported = imports::load_subjects(&csv, &mut registry)?;
            let results = attendance::compute_medical_days(registry.subjects());

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No subjects loaded from {}.", csv.display());
            } else {
                if imported.skipped > 0 {
                    println!("Skipped {} duplicate or unnamed rows.", imported.skipped);
                }
                for result in &results {
                    println!(
                        "- {} ({:.2}%): {}",
                        result.name,
                        result.percentage,
                        report::medical_advice(result)
                    );
                }
            }
        }
        Commands::Report { csv, out } => {
            let mut registry = SubjectRegistry::new();
            let imported = imports::load_subjects(&csv, &mut registry)?;
            if imported.skipped > 0 {
                println!("Skipped {} duplicate or unnamed rows.", imported.skipped);
            }

            let results = attendance::compute_attendance(registry.subjects());
            let medical = attendance::compute_medical_days(registry.subjects());
            let rendered = report::build_report(
                chrono::Utc::now().date_naive(),
                registry.subjects(),
                &results,
                &medical,
            );
            std::fs::write(&out, rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Session => session::run()?,
    }

    Ok(())
}
