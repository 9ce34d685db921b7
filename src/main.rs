use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use tracing::{info, Level};

use nagwatch::data::unix_now;
use nagwatch::{export, GroupView, Nag, NagConfig};

#[derive(Parser, Debug)]
#[command(name = "nagwatch")]
#[command(about = "Summarize Nagios status and object snapshots")]
struct Args {
    /// Snapshot files (`*.dat` status, `*.cache` objects)
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    files: Vec<PathBuf>,

    /// Load settings (including the file list) from a config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds past next_check before an active service is stale
    #[arg(long)]
    stale_threshold: Option<u64>,

    /// Never report services as stale
    #[arg(long)]
    ignore_stale: bool,

    /// Treat soft states as ok
    #[arg(long)]
    require_hard: bool,

    /// Mark a service group as important (repeatable)
    #[arg(long = "important", value_name = "NAME")]
    important: Vec<String>,

    /// Only consider important service groups
    #[arg(long)]
    important_only: bool,

    /// Export the snapshot to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn nag_config(&self) -> Result<NagConfig> {
        let mut config = match &self.config {
            Some(path) => NagConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => NagConfig::new(self.files.iter().cloned())?,
        };

        if let Some(threshold) = self.stale_threshold {
            config.stale_threshold = threshold;
        }
        config.ignore_stale_data |= self.ignore_stale;
        config.require_hard_service_status |= self.require_hard;
        config
            .important_servicegroups
            .extend(self.important.iter().cloned());
        Ok(config)
    }

    fn view(&self) -> GroupView {
        if self.important_only {
            GroupView::Important
        } else {
            GroupView::All
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = args.nag_config()?;
    let nag = nagwatch::parse(&config)?;

    if let Some(export_path) = &args.export {
        return export_to_file(&nag, args.view(), export_path);
    }

    print_summary(&nag, args.view());
    Ok(())
}

/// Render a timestamp with the configured format, falling back to RFC 3339
/// when the format string is invalid.
fn format_time(time: Option<DateTime<Utc>>, format: &str) -> String {
    let Some(time) = time else {
        return "-".to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", time.format(format)) {
        Ok(()) => out,
        Err(_) => time.to_rfc3339(),
    }
}

fn print_summary(nag: &Nag, view: GroupView) {
    let now = unix_now();
    let format = &nag.config().datetime_format;
    let overall = nag.status_at(view, now);

    println!("Generated:    {}", format_time(nag.generated(), format));
    println!("Last updated: {}", format_time(nag.last_updated(), format));
    println!(
        "Overall:      {}{}",
        overall.status,
        if overall.downtime { " (downtime)" } else { "" }
    );
    println!();

    for group in nag.servicegroup_view(view).iter() {
        let status = group.status_at(now);
        println!(
            "[{}] {:<24} {:<32} {} services",
            status.status.symbol(),
            group.servicegroup_name(),
            group.alias(),
            group.services().len()
        );
    }

    let problems = nag.bad_services_at(now);
    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for service in problems.iter() {
            println!(
                "  {}/{}: {}",
                service.host_name(),
                service.service_description(),
                service.status_at(now).state
            );
        }
    }
}

fn export_to_file(nag: &Nag, view: GroupView, export_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&export::to_json(nag, view, unix_now()))?;
    let mut file = std::fs::File::create(export_path)
        .with_context(|| format!("Failed to create {}", export_path.display()))?;
    file.write_all(json.as_bytes())?;

    info!(path = %export_path.display(), "exported snapshot");
    println!("Exported snapshot to: {}", export_path.display());
    Ok(())
}
