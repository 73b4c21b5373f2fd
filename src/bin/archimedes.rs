use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use archimedes::{
    GradientMode, Preset, PresetStore, QualityTier, RenderMode, RenderThreading,
    RenderToVideoOpts, Rgb8, Scene, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "archimedes", version, about = "Render Archimedean spirals")]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a single frame as an SVG document.
    Svg(FrameArgs),
    /// Render a numbered PNG sequence.
    Frames(FramesArgs),
    /// Render MP4/WebM/GIF (requires `ffmpeg` on PATH).
    Video(VideoArgs),
    /// Manage named presets.
    #[command(subcommand)]
    Presets(PresetsCommand),
    /// Measure CPU frame rate and suggest a quality tier.
    Probe(ProbeArgs),
}

#[derive(Subcommand, Debug)]
enum PresetsCommand {
    /// List preset names.
    List,
    /// Print a preset as JSON.
    Show { name: String },
    /// Save the resolved scene under `name`.
    Save {
        name: String,
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Delete a user preset.
    Delete { name: String },
}

/// Where the scene comes from, plus per-field overrides.
#[derive(Args, Debug, Default)]
struct SceneArgs {
    /// Scene JSON document.
    #[arg(long)]
    scene: Option<PathBuf>,
    /// Named preset applied on top of the scene.
    #[arg(long)]
    preset: Option<String>,

    /// `2d` or `3d`.
    #[arg(long)]
    mode: Option<RenderMode>,
    #[arg(long)]
    turns: Option<u32>,
    /// Radius growth per radian.
    #[arg(long)]
    growth: Option<f64>,
    #[arg(long)]
    inner_radius: Option<f64>,
    /// Requested angular step in radians.
    #[arg(long)]
    step: Option<f64>,
    #[arg(long)]
    z_per_turn: Option<f64>,
    /// `low`, `med` or `high`.
    #[arg(long)]
    quality: Option<QualityTier>,

    #[arg(long)]
    line_width: Option<f64>,
    /// Base color as `#rrggbb`.
    #[arg(long)]
    color: Option<Rgb8>,
    /// Draw square markers instead of a polyline.
    #[arg(long)]
    points: bool,
    /// `none`, `radius`, `angle` or `depth`.
    #[arg(long)]
    gradient: Option<GradientMode>,

    #[arg(long)]
    fov: Option<f64>,
    #[arg(long)]
    scale: Option<f64>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,

    /// Hold the spiral still.
    #[arg(long)]
    no_animate: bool,
    /// Rotation speeds in degrees per second.
    #[arg(long)]
    speed_x: Option<f64>,
    #[arg(long)]
    speed_y: Option<f64>,
    #[arg(long)]
    speed_z: Option<f64>,
    #[arg(long)]
    z_offset: Option<f64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Animation time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Background color; transparent when omitted.
    #[arg(long)]
    background: Option<Rgb8>,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

impl ThreadingArgs {
    fn to_threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
        }
    }
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    #[arg(long)]
    background: Option<Rgb8>,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct VideoArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    #[arg(long, default_value = "#000000")]
    background: Rgb8,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output path; the container follows the extension (`.mp4`, `.webm`, `.gif`).
    #[arg(long)]
    out: PathBuf,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// How long to render for, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    millis: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Video(args) => cmd_video(args),
        Command::Presets(cmd) => cmd_presets(cmd),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn resolve_scene(args: &SceneArgs) -> anyhow::Result<Scene> {
    let mut scene = match &args.scene {
        Some(path) => Scene::from_path(path)?,
        None => Scene::default(),
    };
    if let Some(name) = &args.preset {
        let preset = PresetStore::from_env()
            .get(name)
            .with_context(|| format!("load preset '{name}'"))?;
        preset.apply_to(&mut scene);
    }

    let p = &mut scene.params;
    if let Some(v) = args.turns {
        p.turns = v;
    }
    if let Some(v) = args.growth {
        p.growth_rate = v;
    }
    if let Some(v) = args.inner_radius {
        p.inner_radius = v;
    }
    if let Some(v) = args.step {
        p.angular_step = v;
    }
    if let Some(v) = args.z_per_turn {
        p.z_per_turn = v;
    }
    if let Some(v) = args.quality {
        p.quality = v;
    }

    let s = &mut scene.style;
    if let Some(v) = args.line_width {
        s.line_width = v;
    }
    if let Some(v) = args.color {
        s.color = v;
    }
    if args.points {
        s.points = true;
    }
    if let Some(v) = args.gradient {
        s.gradient = v;
    }

    if let Some(v) = args.mode {
        scene.mode = v;
    }
    let proj = &mut scene.projection;
    if let Some(v) = args.fov {
        proj.field_of_view = v;
    }
    if let Some(v) = args.scale {
        proj.scale = v;
    }
    if args.width.is_some() || args.height.is_some() {
        proj.viewport = Viewport::new(
            args.width.unwrap_or(proj.viewport.width),
            args.height.unwrap_or(proj.viewport.height),
        )?;
    }

    let a = &mut scene.animation;
    if args.no_animate {
        a.animate = false;
    }
    if let Some(v) = args.speed_x {
        a.speed_x = v;
    }
    if let Some(v) = args.speed_y {
        a.speed_y = v;
    }
    if let Some(v) = args.speed_z {
        a.speed_z = v;
    }
    if let Some(v) = args.z_offset {
        a.z_offset_deg = v;
    }

    scene.validate()?;
    Ok(scene)
}

/// Frames covering `seconds` at `fps`, at least one.
fn frame_count(fps: archimedes::Fps, seconds: f64) -> anyhow::Result<u64> {
    if !seconds.is_finite() || seconds <= 0.0 {
        anyhow::bail!("--seconds must be finite and > 0");
    }
    Ok(fps.secs_to_frames_floor(seconds).max(1))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = resolve_scene(&args.scene)?;
    let frame = archimedes::render_frame(&scene, args.time, args.background)?;
    archimedes::write_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_svg(args: FrameArgs) -> anyhow::Result<()> {
    let scene = resolve_scene(&args.scene)?;
    archimedes::write_svg(&scene, args.time, args.background, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let scene = resolve_scene(&args.scene)?;
    let fps = archimedes::Fps::new(args.fps, 1)?;
    let frames = frame_count(fps, args.seconds)?;
    let (paths, stats) = archimedes::render_png_sequence(
        &scene,
        &args.out_dir,
        0..frames,
        fps,
        args.background,
        &args.threading.to_threading(),
    )?;
    eprintln!(
        "wrote {} frames to {} ({} with clamped depth)",
        paths.len(),
        args.out_dir.display(),
        stats.frames_clamped
    );
    Ok(())
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    let scene = resolve_scene(&args.scene)?;
    let frames = frame_count(archimedes::Fps::new(args.fps, 1)?, args.seconds)?;
    let opts = RenderToVideoOpts {
        frames: 0..frames,
        fps: args.fps,
        background: args.background,
        overwrite: args.overwrite,
        format: None,
        threading: args.threading.to_threading(),
    };
    let stats = archimedes::render_to_video(&scene, &args.out, &opts)?;
    eprintln!(
        "wrote {} ({} frames, {} with clamped depth)",
        args.out.display(),
        stats.frames_total,
        stats.frames_clamped
    );
    Ok(())
}

fn cmd_presets(cmd: PresetsCommand) -> anyhow::Result<()> {
    let store = PresetStore::from_env();
    match cmd {
        PresetsCommand::List => {
            for name in store.names()? {
                let builtin = if archimedes::presets::store::is_builtin(&name) {
                    " (built-in)"
                } else {
                    ""
                };
                println!("{name}{builtin}");
            }
        }
        PresetsCommand::Show { name } => {
            let preset = store.get(&name)?;
            let json = serde_json::to_string_pretty(&preset).context("serialize preset")?;
            println!("{json}");
        }
        PresetsCommand::Save { name, scene } => {
            let scene = resolve_scene(&scene)?;
            let saved = store.save(&name, &Preset::from_scene(&scene))?;
            eprintln!("saved preset '{saved}' to {}", store.path().display());
        }
        PresetsCommand::Delete { name } => {
            store.delete(&name)?;
            eprintln!("deleted preset '{name}'");
        }
    }
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    if args.millis == 0 {
        anyhow::bail!("--millis must be > 0");
    }
    let scene = resolve_scene(&args.scene)?;
    let probe = archimedes::probe_quality(&scene, Duration::from_millis(args.millis))?;
    let json = serde_json::to_string_pretty(&probe).context("serialize probe result")?;
    println!("{json}");
    Ok(())
}
