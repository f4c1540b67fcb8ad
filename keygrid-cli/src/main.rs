use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use keygrid::{
    BackendKind, FocusZoom, FrameOptions, FrameRGBA, ParamKey, RenderBackend, SceneConfig,
    Simulation, TargetInputs, compile_frame, create_backend, render_frame,
};

#[derive(Parser, Debug)]
#[command(name = "keygrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a number of frames and write the last one as a PNG.
    Frame(FrameArgs),
    /// Simulate a run and write every K-th frame as numbered PNGs.
    Sequence(SequenceArgs),
    /// Simulate a number of frames and print the last frame's draw ops as JSON.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene config JSON. Omitted fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<u32>,

    #[arg(long)]
    cols: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Ticks to simulate.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Disable the checkerboard flip.
    #[arg(long, default_value_t = false)]
    no_flip: bool,

    /// Key index to single out and zoom.
    #[arg(long)]
    select: Option<usize>,

    /// Key parameter target for the selected key, e.g. `--set toothExtra=12`.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Randomize every key each N frames (0 disables).
    #[arg(long, default_value_t = 30)]
    auto_every: u64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Write one PNG every this many frames.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

/// Headless frame loop: holds everything a UI would own between frames.
struct Driver {
    cfg: SceneConfig,
    sim: Simulation,
    zoom: FocusZoom,
    selected: Option<usize>,
    inputs: TargetInputs,
    flip: bool,
    auto_every: u64,
}

impl Driver {
    fn new(args: &SceneArgs) -> anyhow::Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => SceneConfig::from_json_file(path)?,
            None => SceneConfig::default(),
        };
        if let Some(rows) = args.rows {
            cfg.rows = rows;
        }
        if let Some(cols) = args.cols {
            cfg.cols = cols;
        }
        if let Some(seed) = args.seed {
            cfg.seed = seed;
        }
        if let Some(width) = args.width {
            cfg.canvas.width = width;
        }
        if let Some(height) = args.height {
            cfg.canvas.height = height;
        }
        cfg.validate().context("invalid scene")?;

        let inputs = parse_inputs(&args.set)?;
        let sim = Simulation::new(
            f64::from(cfg.rows),
            f64::from(cfg.cols),
            cfg.spring,
            cfg.palette.len(),
            cfg.seed,
        );
        tracing::info!(
            rows = sim.grid().rows(),
            cols = sim.grid().cols(),
            seed = cfg.seed,
            "scene ready"
        );

        Ok(Self {
            cfg,
            sim,
            zoom: FocusZoom::new(),
            selected: args.select,
            inputs,
            flip: !args.no_flip,
            auto_every: args.auto_every,
        })
    }

    fn advance(&mut self) {
        let frame = self.sim.frame();
        if self.auto_every > 0 && frame > 0 && frame % self.auto_every == 0 {
            self.sim.randomize_all();
        }
        if self.sim.step(&self.inputs, self.selected) {
            self.selected = None;
        }
        self.zoom.update(self.selected.is_some());
    }

    fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.advance();
        }
    }

    fn options(&self) -> FrameOptions {
        FrameOptions {
            flip: self.flip,
            selected: self.selected,
            focus_progress: self.zoom.progress(),
        }
    }

    fn render(&self, backend: &mut dyn RenderBackend) -> anyhow::Result<FrameRGBA> {
        Ok(render_frame(
            self.sim.grid(),
            &self.cfg,
            &self.options(),
            backend,
        )?)
    }
}

fn parse_inputs(pairs: &[String]) -> anyhow::Result<TargetInputs> {
    let mut inputs = TargetInputs::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("expected NAME=VALUE, got '{pair}'"))?;
        let key: ParamKey = name.trim().parse()?;
        if key.is_grid() {
            anyhow::bail!("'{key}' is a grid size, use --rows/--cols");
        }
        let v: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("parse value for '{key}'"))?;
        inputs.set(key, v);
    }
    Ok(inputs)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut driver = Driver::new(&args.scene)?;
    driver.run(args.scene.frames);

    let mut backend = create_backend(BackendKind::Cpu)?;
    let frame = driver.render(backend.as_mut())?;

    ensure_parent(&args.out)?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    if args.every == 0 {
        anyhow::bail!("--every must be >= 1");
    }
    let mut driver = Driver::new(&args.scene)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut backend = create_backend(BackendKind::Cpu)?;
    let mut written = 0usize;
    for _ in 0..args.scene.frames {
        driver.advance();
        let frame_idx = driver.sim.frame();
        if frame_idx % args.every != 0 {
            continue;
        }
        let frame = driver.render(backend.as_mut())?;
        let path = args.out_dir.join(format!("frame_{frame_idx:05}.png"));
        write_png(&path, &frame)?;
        written += 1;
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let mut driver = Driver::new(&args.scene)?;
    driver.run(args.scene.frames);

    let plan = compile_frame(driver.sim.grid(), &driver.cfg, &driver.options());
    let json = serde_json::to_string_pretty(&plan).context("serialize frame plan")?;
    match &args.out {
        Some(path) => {
            ensure_parent(path)?;
            std::fs::write(path, json)
                .with_context(|| format!("write plan '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
