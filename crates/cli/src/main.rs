//! RV64I pipeline simulator CLI.
//!
//! This binary runs one program image and writes the end-of-run reports. It performs:
//! 1. **Configuration:** Defaults, an optional JSON file, then command-line overrides.
//! 2. **Loading:** The flat binary, an optional init image, and an optional dump range.
//! 3. **Execution:** Functional or pipelined, bounded or until halt.
//! 4. **Reporting:** Report files next to the output base and a console summary.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use rvpipe_core::config::{CacheConfig, Config, RunMode};
use rvpipe_core::sim::loader;
use rvpipe_core::sim::report::report_path;
use rvpipe_core::Simulator;

const EXIT_CONFIG_ERROR: u8 = 2;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Functional,
    Pipelined,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Functional => Self::Functional,
            ModeArg::Pipelined => Self::Pipelined,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "rvpipe",
    author,
    version,
    about = "RV64I functional and five-stage pipeline simulator",
    long_about = "Run a flat RV64I binary functionally or through the five-stage pipeline model.\n\nExamples:\n  rvpipe prog.bin\n  rvpipe prog.bin --mode functional --instructions 1000\n  rvpipe prog.bin --icache 2048,32,2,10 --dcache 1024,16,4,5 --output out/prog"
)]
struct Cli {
    /// Flat binary loaded at the memory base.
    image: PathBuf,

    /// JSON configuration file; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Execution model.
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Cycle budget for pipelined runs (0: until halt).
    #[arg(long, conflicts_with = "instructions")]
    cycles: Option<u64>,

    /// Instruction budget for functional runs (0: until halt).
    #[arg(long)]
    instructions: Option<u64>,

    /// Instruction cache as SIZE,BLOCK,WAYS,LATENCY.
    #[arg(long, value_name = "SPEC")]
    icache: Option<String>,

    /// Data cache as SIZE,BLOCK,WAYS,LATENCY.
    #[arg(long, value_name = "SPEC")]
    dcache: Option<String>,

    /// Text file of hex `address value` pairs written before the run.
    #[arg(long, value_name = "FILE")]
    init_mem: Option<PathBuf>,

    /// Text file holding the hex `start end` memory range to report.
    #[arg(long, value_name = "FILE")]
    mem_range: Option<PathBuf>,

    /// Base path of the report files (default: image path without extension).
    #[arg(short, long, value_name = "BASE")]
    output: Option<PathBuf>,

    /// Log every pipeline event.
    #[arg(long)]
    trace: bool,

    /// Skip the console statistics summary.
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the configuration from defaults, the optional file, and the flags.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(mode) = cli.mode {
        config.general.mode = mode.into();
    }
    if let Some(spec) = &cli.icache {
        config.cache.l1_i = CacheConfig::parse_spec(spec).context("--icache")?;
    }
    if let Some(spec) = &cli.dcache {
        config.cache.l1_d = CacheConfig::parse_spec(spec).context("--dcache")?;
    }
    if let Some(path) = &cli.init_mem {
        config.memory.init_image = Some(path.clone());
    }
    if let Some(path) = &cli.mem_range {
        let (start, end) = loader::load_dump_range(path)
            .with_context(|| format!("reading memory range {}", path.display()))?;
        config.memory.dump_start = start;
        config.memory.dump_end = end;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn output_base(cli: &Cli) -> PathBuf {
    cli.output
        .clone()
        .unwrap_or_else(|| cli.image.with_extension(""))
}

fn prepare(cli: &Cli, base: &Path) -> Result<(Simulator, u64)> {
    let config = build_config(cli)?;
    let memory = loader::load_program(&config, &cli.image)
        .with_context(|| format!("loading {}", cli.image.display()))?;
    let mut sim = Simulator::new(&config, memory).context("building simulator")?;
    if config.general.mode == RunMode::Pipelined {
        let path = report_path(base, "_pipe_state.out");
        sim.stream_pipe_log(&path)
            .with_context(|| format!("creating {}", path.display()))?;
    }
    let budget = match config.general.mode {
        RunMode::Functional => cli.instructions.unwrap_or(0),
        RunMode::Pipelined => cli.cycles.unwrap_or(0),
    };
    Ok((sim, budget))
}

fn finish(cli: &Cli, sim: &mut Simulator, base: &Path) -> Result<()> {
    sim.finish_pipe_log().context("writing pipeline state")?;
    let written = sim
        .write_reports(base)
        .with_context(|| format!("writing reports to {}", base.display()))?;
    tracing::info!(files = written.len(), base = %base.display(), "reports written");
    if !cli.quiet {
        sim.stats().print();
        println!("status                   {}", sim.status());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let base = output_base(&cli);
    let (mut sim, budget) = match prepare(&cli, &base) {
        Ok(ready) => ready,
        Err(e) => {
            eprintln!("[!] {e:#}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let status = sim.run(budget);

    if let Err(e) = finish(&cli, &mut sim, &base) {
        eprintln!("[!] {e:#}");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    ExitCode::from(status.exit_code())
}
