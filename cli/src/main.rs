use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use crosstable_core::{Tournament, render_json, render_report};
use crosstable_extract::{
    DefaultFetcher, ExtractConfig, FederationStats, RatingList, SourceKind, parse_source,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Report output format.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ReportFormat {
    /// Line-oriented rating report.
    Text,
    /// Extracted event as JSON.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "crosstable")]
#[command(version, about = "Extract chess tournament results into rating report format")]
struct Cli {
    /// Increase log detail on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract a tournament and write its rating report.
    Report(ReportArgs),
    /// Count a federation's players in a rating-list XML file.
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Results page URL, spreadsheet export URL, league round URL or saved page.
    source: String,
    /// League rounds: single-digit rounds ("12") or round:division pairs ("1:2b,2:2b").
    #[arg(long)]
    rounds: Option<String>,
    /// Own team name on league pages.
    #[arg(long)]
    team: Option<String>,
    /// Federation given to league opponents.
    #[arg(long)]
    federation: Option<String>,
    /// YAML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
    /// Write the report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct StatsArgs {
    /// Rating-list XML file.
    input: PathBuf,
    /// Federation code to count.
    #[arg(long, default_value = "IRL")]
    federation: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Report(args) => run_report(args),
        Command::Stats(args) => run_stats(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load_config(args: &ReportArgs) -> Result<ExtractConfig, String> {
    let mut config = match &args.config {
        Some(path) => ExtractConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ExtractConfig::default(),
    };
    if let Some(team) = &args.team {
        config.team_name.clone_from(team);
    }
    if let Some(federation) = &args.federation {
        config.default_opponent_federation.clone_from(federation);
    }
    debug!(?config, "Effective settings");
    Ok(config)
}

fn run_report(args: ReportArgs) -> Result<(), String> {
    let config = load_config(&args)?;
    let kind = SourceKind::classify(&args.source);
    if kind != SourceKind::LeagueSite && args.rounds.is_some() {
        debug!(kind = kind.label(), "Ignoring --rounds for a single-event source");
    }

    let fetcher = DefaultFetcher::new(&config).map_err(|err| err.to_string())?;
    let tournament = parse_source(&args.source, args.rounds.as_deref(), &config, &fetcher)
        .map_err(|err| err.to_string())?;
    let text = render(&tournament, args.format)?;

    match &args.output {
        Some(path) => write_output(path, &text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn render(tournament: &Tournament, format: ReportFormat) -> Result<String, String> {
    let rendered = match format {
        ReportFormat::Text => {
            render_report(&tournament.event, &tournament.players, &tournament.source)
        }
        ReportFormat::Json => render_json(tournament).map(|json| format!("{json}\n")),
    };
    rendered.map_err(|err| err.to_string())
}

fn write_output(path: &Path, text: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }
    fs::write(path, text).map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
    info!(path = %path.display(), "Wrote report");
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<(), String> {
    let list = RatingList::from_path(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    print!("{}", FederationStats::compute(&list, &args.federation));
    Ok(())
}
