use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use boi_align::config::Config;
use boi_align::export;
use boi_align::ingest::archive::{self, identify_entries};
use boi_align::logging;
use boi_align::pipeline;

#[derive(Parser)]
#[command(name = "boi_align")]
#[command(about = "Brand & BOI alignment tool for EU/OGRDS reconciliation")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reconciliation over a ZIP archive and write the workbook
    Process {
        /// ZIP archive containing the EU and OGRDS files
        input: PathBuf,
        /// Output workbook path (defaults to the configured file name)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also write a JSON run report next to the workbook
        #[arg(long)]
        report: bool,
    },
    /// List archive entries and show which files would be used
    Inspect {
        /// ZIP archive to examine
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Process {
            input,
            output,
            report,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.output.file_name));
            info!(input = %input.display(), output = %output.display(), "Starting reconciliation");

            let (eu, ogrds) = archive::load_archive_file(&input)?;
            match pipeline::process(eu, ogrds) {
                Ok((final_table, run_report)) => {
                    export::write_workbook(&final_table, &output, &config.output.sheet_name)?;

                    println!("\n📊 Reconciliation results:");
                    println!("   EU rows: {}", run_report.eu_rows);
                    println!("   OGRDS rows: {}", run_report.ogrds_rows);
                    println!("   Suggestion entries: {}", run_report.suggestion_entries);
                    println!("   Matched: {}", run_report.matched_rows);
                    println!("   Unmatched: {}", run_report.unmatched_rows);
                    println!(
                        "   GBE status: {} correct / {} incorrect / {} missing",
                        run_report.gbe_correct, run_report.gbe_incorrect, run_report.gbe_missing
                    );
                    println!("   Output file: {}", output.display());

                    if report || config.output.write_report {
                        let report_path = output.with_extension("report.json");
                        fs::write(&report_path, serde_json::to_string_pretty(&run_report)?)?;
                        println!("   Run report: {}", report_path.display());
                    }
                    println!("✅ File processed successfully");
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    println!("❌ Processing failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Inspect { input } => {
            let file = fs::File::open(&input)?;
            let names = archive::entry_names(file)?;
            println!("📦 {} entries in {}:", names.len(), input.display());
            for name in &names {
                println!("   - {}", name);
            }
            match identify_entries(&names) {
                Ok(found) => {
                    println!("   EU file: {}", found.eu);
                    println!("   OGRDS file: {}", found.ogrds);
                }
                Err(e) => {
                    println!("⚠️  {}", e);
                }
            }
        }
    }
    Ok(())
}
