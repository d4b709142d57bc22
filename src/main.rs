use anyhow::Context as _;
use clap::Parser as _;
use layout_prune::{RemovalOutcome, RemovalReport, WorkingSet};
use serde::Serialize;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(version, about)]
struct Options {
    /// Path to the offline layout folder
    #[arg(default_value = ".")]
    path: String,

    /// Delete the superseded module folders (otherwise only list them)
    #[arg(long)]
    delete: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Use verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// No report printed to stdout
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    scan: &'a WorkingSet,
    removal: Option<&'a RemovalReport>,
    outcome: Option<RemovalOutcome>,
}

fn main() {
    let options = Options::parse();
    init_logging(options.verbose, options.quiet);

    if let Err(e) = real_main(&options) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    // RUST_LOG takes precedence over -v/-q.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn real_main(options: &Options) -> anyhow::Result<()> {
    let path = Path::new(&options.path);
    let mut working_set = WorkingSet::scan(path)
        .with_context(|| format!("failed to scan layout folder `{}`", path.display()))?;

    let removal = if options.delete {
        Some(working_set.remove_superseded())
    } else {
        None
    };

    if options.json {
        let report = Report {
            scan: &working_set,
            removal: removal.as_ref(),
            outcome: removal.as_ref().map(RemovalReport::outcome),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !options.quiet {
        print_text_report(&working_set, removal.as_ref());
    }

    if let Some(report) = &removal {
        let failed = report.failed().count();
        if failed > 0 {
            anyhow::bail!(
                "{} of {} old version folders could not be removed",
                failed,
                report.entries.len()
            );
        }
    }

    Ok(())
}

fn print_text_report(working_set: &WorkingSet, removal: Option<&RemovalReport>) {
    println!(
        "Scanned {}: {} module folders, {} duplicates",
        working_set.root.display(),
        working_set.records.len(),
        working_set.duplicates().len()
    );
    for name in &working_set.rejected {
        println!("  ignored (unparsable name): {}", name);
    }

    match removal {
        None => {
            if working_set.superseded().is_empty() {
                println!("Old version folder does not exist.");
                return;
            }
            println!("Old version folders:");
            for record in working_set.superseded() {
                let newest = working_set
                    .resolution
                    .newest_version(&record.name)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                println!(
                    "  {} {} (newest {})  {}",
                    record.name,
                    record.version,
                    newest,
                    record.path.display()
                );
            }
            println!("Run again with --delete to remove them.");
        }
        Some(report) => match report.outcome() {
            RemovalOutcome::NothingToRemove => println!("Old version folder does not exist."),
            RemovalOutcome::Completed => {
                for record in report.removed() {
                    println!("  removed {}", record.path.display());
                }
                println!("Operation successful.");
            }
            RemovalOutcome::PartiallyFailed => {
                for record in report.removed() {
                    println!("  removed {}", record.path.display());
                }
                for entry in report.failed() {
                    if let Some(error) = &entry.error {
                        println!("  FAILED {}", error);
                    }
                }
            }
        },
    }
}
