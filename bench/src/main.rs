use std::time::{Duration, Instant};

use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    fps: u32,
    seconds: u32,
    warmup: u32,
    repeats: u32,
    mode: archimedes::RenderMode,
    turns: u32,
    tiers: Vec<archimedes::QualityTier>,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    sample: Duration,
    project_total: Duration,
    raster_total: Duration,
    wall_total: Duration,
}

#[derive(Clone, Debug)]
struct TierReport {
    tier: archimedes::QualityTier,
    samples: usize,
    effective_step: f64,
    frames_per_run: u64,
    runs: Vec<RunMetrics>,
    last_frame_sha256: String,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.fps == 0 || args.seconds == 0 {
        anyhow::bail!("--fps and --seconds must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }

    let frames = u64::from(args.fps) * u64::from(args.seconds);
    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {frames} frames/run ({seconds}s @ {fps} fps), mode={mode:?}, turns={turns}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        frames = frames,
        seconds = args.seconds,
        fps = args.fps,
        mode = args.mode,
        turns = args.turns,
    );

    let mut reports = Vec::with_capacity(args.tiers.len());
    for &tier in &args.tiers {
        let scene = build_scene(&args, tier)?;
        for _ in 0..args.warmup {
            let _ = run_once(&scene, frames, args.fps)?;
        }

        let mut runs = Vec::with_capacity(args.repeats as usize);
        let mut last_digest = String::new();
        for _ in 0..args.repeats {
            let (m, digest) = run_once(&scene, frames, args.fps)?;
            runs.push(m);
            last_digest = digest;
        }

        let samples = archimedes::sample(&scene.params)?;
        reports.push(TierReport {
            tier,
            samples: samples.len(),
            effective_step: samples.effective_step(),
            frames_per_run: frames,
            runs,
            last_frame_sha256: last_digest,
        });
    }

    let report = json!({
        "width": args.width,
        "height": args.height,
        "fps": args.fps,
        "seconds": args.seconds,
        "repeats": args.repeats,
        "mode": args.mode,
        "turns": args.turns,
        "tiers": reports.iter().map(tier_json).collect::<Vec<_>>(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize bench report")?
    );
    Ok(())
}

fn build_scene(
    args: &BenchArgs,
    tier: archimedes::QualityTier,
) -> anyhow::Result<archimedes::Scene> {
    let mut scene = archimedes::Scene {
        mode: args.mode,
        ..archimedes::Scene::default()
    };
    scene.params.turns = args.turns;
    scene.params.quality = tier;
    scene.style.gradient = archimedes::GradientMode::Radius;
    scene.projection.viewport = archimedes::Viewport::new(args.width, args.height)?;
    scene.validate()?;
    Ok(scene)
}

/// Returns the run timings and the sha256 of the final frame's pixels.
fn run_once(
    scene: &archimedes::Scene,
    frames: u64,
    fps: u32,
) -> anyhow::Result<(RunMetrics, String)> {
    let wall = Instant::now();

    let t0 = Instant::now();
    let samples = archimedes::sample(&scene.params)?;
    let mut m = RunMetrics {
        sample: t0.elapsed(),
        ..RunMetrics::default()
    };

    let fps = archimedes::Fps::new(fps, 1)?;
    let background = Some(archimedes::Rgb8::new(18, 20, 28));
    let mut surface = archimedes::CpuSurface::new(scene.projection.viewport, background)?;
    let mut last = None;
    for f in 0..frames {
        let driver = archimedes::AnimationDriver::at_time(scene.animation, fps.frames_to_secs(f))?;

        let t1 = Instant::now();
        let projected = archimedes::project_frame(
            &samples,
            &driver.view(),
            &scene.projection,
            scene.mode,
            &scene.style,
        )?;
        m.project_total += t1.elapsed();

        let t2 = Instant::now();
        archimedes::draw_frame(&mut surface, &projected, &scene.style)?;
        let frame = surface.finish()?;
        m.raster_total += t2.elapsed();
        last = Some(frame);
    }

    let digest = last.map(|f| sha256_hex(&f.data)).unwrap_or_default();
    m.wall_total = wall.elapsed();
    Ok((m, digest))
}

fn tier_json(r: &TierReport) -> serde_json::Value {
    type Getter = fn(&RunMetrics) -> Duration;
    let fields: &[(&str, Getter)] = &[
        ("sample", |m| m.sample),
        ("project_total", |m| m.project_total),
        ("raster_total", |m| m.raster_total),
        ("wall_total", |m| m.wall_total),
    ];

    let mut stages = serde_json::Map::new();
    for (name, getter) in fields {
        let v = collect(&r.runs, *getter);
        stages.insert(
            (*name).to_string(),
            json!({
                "p50_ms": ms(p(&v, 0.50)),
                "p90_ms": ms(p(&v, 0.90)),
                "p99_ms": ms(p(&v, 0.99)),
            }),
        );
    }

    let wall = collect(&r.runs, |m| m.wall_total);
    let p50 = p(&wall, 0.50).as_secs_f64();
    let fps = if p50 > 0.0 {
        r.frames_per_run as f64 / p50
    } else {
        0.0
    };

    json!({
        "tier": r.tier,
        "budget": r.tier.budget(),
        "samples": r.samples,
        "effective_step": r.effective_step,
        "frames_per_run": r.frames_per_run,
        "fps_p50": fps,
        "suggested_tier": archimedes::QualityTier::from_fps(fps),
        "stages": stages,
        "last_frame_sha256": r.last_frame_sha256,
    })
}

fn collect(runs: &[RunMetrics], f: fn(&RunMetrics) -> Duration) -> Vec<Duration> {
    let mut v = runs.iter().map(f).collect::<Vec<_>>();
    v.sort_by_key(|d| d.as_nanos());
    v
}

fn p(v: &[Duration], p: f64) -> Duration {
    if v.is_empty() {
        return Duration::ZERO;
    }
    let n = v.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    v[rank - 1]
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 800,
        height: 600,
        fps: 30,
        seconds: 2,
        warmup: 1,
        repeats: 10,
        mode: archimedes::RenderMode::Perspective,
        turns: 12,
        tiers: archimedes::QualityTier::ALL.to_vec(),
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--fps" => out.fps = parse_u32(args.next(), "--fps")?,
            "--seconds" => out.seconds = parse_u32(args.next(), "--seconds")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--turns" => out.turns = parse_u32(args.next(), "--turns")?,
            "--mode" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --mode (2d|3d)"))?;
                out.mode = v.parse()?;
            }
            "--tier" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --tier (low|med|high)"))?;
                out.tiers = vec![v.parse()?];
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"archimedes-bench

Times sample + project + rasterize for each quality tier and prints a JSON report.

Usage:
  cargo run -q -p archimedes-bench
  cargo run -q -p archimedes-bench -- --repeats 20 --seconds 2 --fps 30
  cargo run -q -p archimedes-bench -- --mode 2d --tier high

Args:
  --width N      (default 800)
  --height N     (default 600)
  --fps N        (default 30)
  --seconds N    (default 2)
  --warmup N     (default 1)
  --repeats N    (default 10)
  --turns N      (default 12)
  --mode 2d|3d   (default 3d)
  --tier T       only bench one tier (low|med|high; default all)
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}
