mod autopilot;
mod reports;
mod store;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use amazonia_game::{MemorySaveStore, PlayerClass, SaveStore, SurvivalEngine, SurvivalSession};
use autopilot::{Autopilot, RunConfig, RunRecord, run_autopilot};
use reports::{ClassAggregate, aggregate_runs};
use store::JsonFileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassArg {
    Hunter,
    Fisher,
    /// Run every seed once per class
    Both,
}

impl ClassArg {
    fn classes(self) -> &'static [PlayerClass] {
        match self {
            Self::Hunter => &[PlayerClass::Hunter],
            Self::Fisher => &[PlayerClass::Fisher],
            Self::Both => &PlayerClass::ALL,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "amazonia-tester", version)]
#[command(about = "Seeded autopilot play-throughs for the Amazonia survival core")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of runs per seed and class
    #[arg(long, default_value_t = 5)]
    iterations: usize,

    /// Player class to simulate
    #[arg(long, value_enum, default_value_t = ClassArg::Both)]
    class: ClassArg,

    /// Stop a run after this many in-game hours
    #[arg(long, default_value_t = 240.0)]
    max_hours: f64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Write every final state to this JSON save file
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !(args.max_hours.is_finite() && args.max_hours > 0.0) {
        bail!("--max-hours must be positive (got {})", args.max_hours);
    }
    let seeds = parse_seeds(&args.seeds)?;

    announce_banner();
    let start_time = Instant::now();

    let (runs, sessions) = run_all(&args, &seeds)?;
    if let Some(path) = &args.save_file {
        let store = JsonFileStore::new(path);
        persist_sessions(store.clone(), &sessions)?;
        println!(
            "💾 Saved {} runs to {}",
            sessions.len(),
            store.path().display().to_string().green()
        );
    }

    let aggregates = aggregate_runs(&runs);
    write_reports(&args, &runs, &aggregates, start_time)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn announce_banner() {
    println!("{}", "🌴 Amazonia Autopilot Tester".bright_green().bold());
    println!("{}", "============================".green());
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_seeds(raw: &str) -> Result<Vec<u64>> {
    let seeds = split_csv(raw)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if seeds.is_empty() {
        bail!("at least one seed is required");
    }
    Ok(seeds)
}

fn run_all(args: &Args, seeds: &[u64]) -> Result<(Vec<RunRecord>, Vec<SurvivalSession>)> {
    let engine = SurvivalEngine::new(MemorySaveStore::new());
    let autopilot = Autopilot::default();
    let mut runs = Vec::new();
    let mut sessions = Vec::new();

    for class in args.class.classes() {
        for seed in seeds {
            for iteration in 0..args.iterations {
                let config = RunConfig {
                    seed: *seed,
                    iteration,
                    class: *class,
                    max_hours: args.max_hours,
                };
                let (record, session) = run_autopilot(&engine, &autopilot, &config)
                    .with_context(|| format!("autopilot run {}", config.player_name()))?;
                log::info!(
                    "{} finished on day {} ({})",
                    record.name,
                    record.days_survived,
                    if record.died { "died" } else { "alive" }
                );
                runs.push(record);
                sessions.push(session);
            }
        }
    }
    Ok((runs, sessions))
}

fn persist_sessions<S>(store: S, sessions: &[SurvivalSession]) -> Result<()>
where
    S: SaveStore,
    S::Error: Into<anyhow::Error>,
{
    let engine = SurvivalEngine::new(store);
    for session in sessions {
        engine
            .save_session(session)
            .map_err(Into::<anyhow::Error>::into)
            .with_context(|| format!("saving {}", session.player().name()))?;
    }
    Ok(())
}

fn write_reports(
    args: &Args,
    runs: &[RunRecord],
    aggregates: &[ClassAggregate],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, runs, aggregates)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, runs, aggregates)?,
        _ => {
            let duration = start_time.elapsed();
            reports::generate_console_report(&mut output_target, runs, aggregates, duration)?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
