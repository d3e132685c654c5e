use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use skirmish_engine::Role;
use skirmish_story::{
    discover_configs, generate_report, load_catalog, BattleConfig, BattleReport, StoryOptions,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Simulate squad skirmishes and narrate the battle")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fight the battle described by a config file and print the story.
    Narrate(NarrateArgs),
    /// List every unit in the catalog.
    Units(UnitsArgs),
    /// Narrate every battle config found under a directory.
    Batch(BatchArgs),
    /// Render a saved JSON report as markdown.
    Report(ReportArgs),
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }

    fn render(self, report: &BattleReport) -> Result<String> {
        Ok(match self {
            OutputFormat::Markdown => report.render_markdown(),
            OutputFormat::Json => serde_json::to_string_pretty(report)?,
        })
    }
}

#[derive(Args)]
struct NarrateArgs {
    /// Battle config (`.json` or `.toml`); `-` reads JSON from stdin.
    #[arg(long, default_value = "battle_config.json")]
    config: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
    /// Extra unit definitions layered over the config's catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args)]
struct UnitsArgs {
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args)]
struct BatchArgs {
    #[arg(long)]
    dir: PathBuf,
    #[arg(long, default_value = "reports")]
    out_dir: PathBuf,
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    input: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Narrate(args) => handle_narrate(args),
        Commands::Units(args) => handle_units(args),
        Commands::Batch(args) => handle_batch(args),
        Commands::Report(args) => handle_report(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_narrate(args: NarrateArgs) -> Result<()> {
    let config = BattleConfig::from_path(&args.config)?;
    let catalog = config.load_catalog(args.catalog.as_deref())?;
    let run_id = args
        .id
        .unwrap_or_else(|| format!("battle-{}", Utc::now().format("%Y%m%dT%H%M%S")));
    let options = StoryOptions::new(run_id).with_seed(args.seed);

    let report = generate_report(&config, &catalog, &options)?;
    let rendered = args.format.render(&report)?;
    match args.out {
        Some(path) => {
            write_output(&path, &rendered)?;
            println!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn handle_units(args: UnitsArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    for unit in catalog.iter() {
        let mut line = format!(
            "{} (Tier {}, {} pts) health {} damage {}",
            unit.name, unit.tier, unit.cost, unit.health, unit.damage
        );
        if unit.role == Role::Leader {
            match unit.leader_ability {
                Some(ability) => line.push_str(&format!(" [Leader: {}]", ability.key())),
                None => line.push_str(" [Leader]"),
            }
        }
        if !unit.description.is_empty() {
            line.push_str(&format!(" - {}", unit.description));
        }
        println!("{line}");
    }
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<()> {
    let configs = discover_configs(&args.dir)?;
    if configs.is_empty() {
        bail!("no battle configs found under {}", args.dir.display());
    }
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let mut failed = 0usize;
    for path in &configs {
        match narrate_file(path, &args) {
            Ok(out) => info!(target: "skirmish_cli.batch", config = %path.display(), out = %out.display(), "narrated"),
            Err(err) => {
                failed += 1;
                warn!(target: "skirmish_cli.batch", config = %path.display(), error = %format!("{err:#}"), "skipped");
                eprintln!("{}: {err:#}", path.display());
            }
        }
    }
    println!(
        "Narrated {} of {} battles into {}",
        configs.len() - failed,
        configs.len(),
        args.out_dir.display()
    );
    if failed > 0 {
        bail!("{failed} battle config(s) failed");
    }
    Ok(())
}

fn narrate_file(path: &Path, args: &BatchArgs) -> Result<PathBuf> {
    let config = BattleConfig::from_path(path)?;
    let catalog = config.load_catalog(None)?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("battle")
        .to_string();
    let report = generate_report(&config, &catalog, &StoryOptions::new(stem.clone()))?;
    let out = args
        .out_dir
        .join(format!("{stem}.{}", args.format.extension()));
    write_output(&out, &args.format.render(&report)?)?;
    Ok(out)
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let data = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let report: BattleReport = serde_json::from_str(&data)
        .with_context(|| format!("invalid battle report {}", args.input.display()))?;
    println!("{}", report.render_markdown());
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
