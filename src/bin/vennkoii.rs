use std::{
    collections::BTreeMap,
    path::PathBuf,
    process::ExitCode,
    sync::atomic::Ordering,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vennkoii", version)]
struct Cli {
    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Iterate generate -> critique -> refine until the score converges.
    Run(RunArgs),
    /// Score SVG frames (in order) and print the analysis as JSON.
    Analyze(AnalyzeArgs),
    /// Summarize a persisted memory file.
    Memory(MemoryArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Run configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    max_iterations: Option<u32>,

    #[arg(long)]
    memory_path: Option<PathBuf>,

    /// Include visual analysis in the score.
    #[arg(long, default_value_t = false)]
    visual: bool,

    /// Ask the Anthropic API for visual critique (implies --visual).
    #[arg(long, default_value_t = false)]
    llm: bool,
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// SVG files, one per frame.
    #[arg(required = true)]
    frames: Vec<PathBuf>,

    #[arg(long, default_value_t = false)]
    visual: bool,
}

#[derive(Parser, Debug)]
struct MemoryArgs {
    #[arg(long)]
    path: PathBuf,
}

const EXIT_INTERRUPTED: u8 = 130;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Analyze(args) => cmd_analyze(args).map(|()| ExitCode::SUCCESS),
        Command::Memory(args) => cmd_memory(args).map(|()| ExitCode::SUCCESS),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let mut config = match &args.config {
        Some(path) => vennkoii::RunConfig::load_json(path)
            .with_context(|| format!("load run config '{}'", path.display()))?,
        None => vennkoii::RunConfig::default(),
    };
    if let Some(n) = args.max_iterations {
        config.max_iterations = n;
    }
    if let Some(path) = args.memory_path {
        config.memory_path = path;
    }
    config.visual |= args.visual || args.llm;
    config.llm |= args.llm;

    let mut run = vennkoii::RunLoop::new(config).context("invalid run configuration")?;
    let abort = run.abort_handle();
    ctrlc::set_handler(move || abort.store(true, Ordering::SeqCst))
        .context("install interrupt handler")?;

    let report = run.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    eprintln!(
        "final score {:.3} after {} iterations (improvement {:+.3})",
        report.final_score, report.iterations, report.total_improvement
    );

    Ok(match report.stop_reason {
        Some(vennkoii::StopReason::AbortSignal) => ExitCode::from(EXIT_INTERRUPTED),
        Some(vennkoii::StopReason::RetriesExhausted) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let markups = args
        .frames
        .iter()
        .map(|p| std::fs::read_to_string(p).with_context(|| format!("read frame '{}'", p.display())))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let frames = vennkoii::parse_frames(&markups);

    let mut engine = vennkoii::CriticEngine::default();
    if args.visual {
        engine = engine.with_visual(vennkoii::analysis::VisualAnalyzer::new());
    }
    let result = engine.analyze(&frames);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[derive(serde::Serialize)]
struct MemorySummary {
    experiences: usize,
    feedback_records: usize,
    snapshots: BTreeMap<String, usize>,
    trends: BTreeMap<String, BTreeMap<String, vennkoii::memory::MetricTrend>>,
}

fn cmd_memory(args: MemoryArgs) -> anyhow::Result<()> {
    if !args.path.exists() {
        anyhow::bail!("memory file '{}' does not exist", args.path.display());
    }
    let memory = vennkoii::Memory::load(&args.path);
    let agents: Vec<String> = memory.agents_with_metrics().map(str::to_string).collect();
    let summary = MemorySummary {
        experiences: memory.experiences().len(),
        feedback_records: memory.feedback_history().len(),
        snapshots: agents
            .iter()
            .map(|a| (a.clone(), memory.snapshots(a).len()))
            .collect(),
        trends: agents
            .iter()
            .map(|a| (a.clone(), memory.performance_trend(a)))
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
