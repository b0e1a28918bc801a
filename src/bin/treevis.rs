use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use treevis::{
    FrameStats, LifecycleController, LoopConfig, NativeRuntime, NodeRegistry, PaintQueue,
    PatternRuntime, Point3, RefreshDriver, Rgb, ScriptRuntime, Tee, Topology, TracingReporter,
};

#[derive(Parser, Debug)]
#[command(name = "treevis", version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a pattern headlessly against a tree.
    Run(RunArgs),
    /// Decode packed light values into normalized RGB.
    Decode(DecodeArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Tree coordinates (CSV `x,y,z` rows, or a `.json` array of triples).
    #[arg(long)]
    tree: PathBuf,

    /// Built-in pattern name.
    #[arg(long, conflicts_with = "script")]
    pattern: Option<String>,

    /// Rhai pattern script.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Logical frames to run.
    #[arg(long, default_value_t = 90)]
    frames: u64,

    /// Loop config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the target frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Override the simulated display refresh rate.
    #[arg(long)]
    refresh_hz: Option<u32>,

    /// Pace refreshes in wall-clock time instead of virtual time.
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Write final node colors as JSON.
    #[arg(long)]
    dump: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// Packed values: decimal, `0x`-prefixed or `#`-prefixed hex.
    #[arg(required = true)]
    values: Vec<String>,
}

#[derive(serde::Serialize)]
struct NodeDump {
    index: usize,
    position: Point3,
    color: Option<Rgb>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Decode(args) => cmd_decode(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let topology = Topology::load(&args.tree)?;
    let mut cfg = match &args.config {
        Some(path) => LoopConfig::load(path)?,
        None => LoopConfig::default(),
    };
    if let Some(fps) = args.fps {
        cfg.target_fps = treevis::Fps::new(fps, 1)?;
    }
    if let Some(hz) = args.refresh_hz {
        cfg.refresh_hz = hz;
    }
    cfg.validate()?;

    let registry = match &args.script {
        Some(path) => {
            let runtime = ScriptRuntime::load(path, &topology)?;
            drive(runtime, &topology, &cfg, &args)?
        }
        None => {
            let name = args.pattern.as_deref().unwrap_or("spin");
            let pattern = treevis::builtin_pattern(name).with_context(|| {
                format!(
                    "unknown pattern '{name}' (built-in: {})",
                    treevis::BUILTIN_PATTERNS.join(", ")
                )
            })?;
            let runtime = NativeRuntime::new(pattern, &topology);
            drive(runtime, &topology, &cfg, &args)?
        }
    };

    if let Some(out) = &args.dump {
        write_dump(out, &registry)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn drive<R: PatternRuntime>(
    runtime: R,
    topology: &Topology,
    cfg: &LoopConfig,
    args: &RunArgs,
) -> anyhow::Result<Rc<NodeRegistry>> {
    let registry = Rc::new(NodeRegistry::from_topology(topology));
    let reporter = Rc::new(Tee(FrameStats::new(), TracingReporter));
    let queue = PaintQueue::new();

    let mut ctl = LifecycleController::new(
        Rc::clone(&registry),
        reporter.clone(),
        queue.clone(),
        cfg.frame_interval(),
    );
    ctl.set_interpreter(Some(runtime));
    ctl.set_running(true);

    let mut driver = if args.realtime {
        RefreshDriver::realtime(cfg.refresh_interval())
    } else {
        RefreshDriver::virtual_time(cfg.refresh_interval())
    };
    let per_frame =
        (cfg.frame_interval().as_secs_f64() / cfg.refresh_interval().as_secs_f64()).ceil() as u64;
    let max_refreshes = args.frames.saturating_mul(per_frame + 2).max(1);
    let summary = driver.run_frames(&queue, args.frames, max_refreshes, |req, now| {
        let outcome = ctl.on_paint(req, now);
        if outcome.executed() {
            print_console(&mut ctl);
        }
        outcome
    });
    print_console(&mut ctl);
    ctl.set_running(false);

    let stats = &reporter.0;
    eprintln!(
        "{} frames ({} failed) over {} refreshes in {:.1} ms; cost mean {:.3} ms, max {:.3} ms",
        summary.executed(),
        stats.failures(),
        summary.refreshes,
        summary.elapsed.as_secs_f64() * 1000.0,
        stats.mean_ms(),
        stats.max_ms(),
    );
    Ok(registry)
}

fn print_console<R: PatternRuntime>(ctl: &mut LifecycleController<R, PaintQueue>) {
    if let Some(bridge) = ctl.bridge_mut() {
        for line in bridge.runtime_mut().take_console() {
            println!("{line}");
        }
    }
}

fn write_dump(out: &std::path::Path, registry: &NodeRegistry) -> anyhow::Result<()> {
    let nodes: Vec<NodeDump> = registry
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| NodeDump {
            index,
            position: node.position(),
            color: node.color().get(),
        })
        .collect();
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&nodes).context("serialize node colors")?;
    std::fs::write(out, json).with_context(|| format!("write dump '{}'", out.display()))?;
    Ok(())
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    for raw in &args.values {
        let packed = parse_packed(raw)?;
        let rgb = treevis::decode_packed(packed);
        println!(
            "{:#08X} -> {:.3} {:.3} {:.3}",
            packed & 0xFF_FFFF,
            rgb.r,
            rgb.g,
            rgb.b
        );
    }
    Ok(())
}

fn parse_packed(raw: &str) -> anyhow::Result<u32> {
    let s = raw.trim();
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('#'));
    match hex {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => s.parse::<u32>(),
    }
    .with_context(|| format!("invalid packed value '{raw}'"))
}
