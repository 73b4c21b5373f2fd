use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use crate::{
    animation::driver::AnimationDriver,
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder, VideoFormat, ensure_parent_dir},
    encode::png::{sequence_frame_path, write_png},
    foundation::core::{Fps, Rgb8},
    foundation::error::{ArchimedesError, ArchimedesResult},
    geometry::sampler::{SampleSet, sample},
    project::frame::project_frame,
    render::cpu::CpuSurface,
    render::surface::{DrawSurface, FrameRGBA, draw_frame},
    render::svg::SvgSurface,
    scene::Scene,
};

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    /// Frames in which at least one point had its depth clamped.
    pub frames_clamped: u64,
}

/// Project `samples` for the scene at `time_secs` and paint onto `surface`.
///
/// Returns the number of depth-clamped points.
fn paint_at<S: DrawSurface + ?Sized>(
    scene: &Scene,
    samples: &SampleSet,
    time_secs: f64,
    surface: &mut S,
) -> ArchimedesResult<usize> {
    let driver = AnimationDriver::at_time(scene.animation, time_secs)?;
    let frame = project_frame(
        samples,
        &driver.view(),
        &scene.projection,
        scene.mode,
        &scene.style,
    )?;
    draw_frame(surface, &frame, &scene.style)?;
    Ok(frame.clamped_points)
}

/// Sample + project + rasterize one frame at `time_secs`.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
#[tracing::instrument(skip(scene))]
pub fn render_frame(
    scene: &Scene,
    time_secs: f64,
    background: Option<Rgb8>,
) -> ArchimedesResult<FrameRGBA> {
    scene.validate()?;
    let samples = sample(&scene.params)?;
    let mut surface = CpuSurface::new(scene.projection.viewport, background)?;
    paint_at(scene, &samples, time_secs, &mut surface)?;
    surface.finish()
}

/// Render one frame as an SVG document.
#[tracing::instrument(skip(scene))]
pub fn render_svg(
    scene: &Scene,
    time_secs: f64,
    background: Option<Rgb8>,
) -> ArchimedesResult<String> {
    scene.validate()?;
    let samples = sample(&scene.params)?;
    let mut surface = SvgSurface::new(scene.projection.viewport, background);
    paint_at(scene, &samples, time_secs, &mut surface)?;
    Ok(surface.to_svg_string())
}

pub fn write_svg(
    scene: &Scene,
    time_secs: f64,
    background: Option<Rgb8>,
    path: &Path,
) -> ArchimedesResult<()> {
    use anyhow::Context as _;
    let svg = render_svg(scene, time_secs, background)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, svg).with_context(|| format!("write svg '{}'", path.display()))?;
    Ok(())
}

/// Render `frames` (frame indices at `fps`) with the scene's animation applied.
pub fn render_frames_with_stats(
    scene: &Scene,
    frames: Range<u64>,
    fps: Fps,
    background: Option<Rgb8>,
    threading: &RenderThreading,
) -> ArchimedesResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut out = Vec::with_capacity(frames.end.saturating_sub(frames.start).min(4096) as usize);
    let stats = for_each_chunk(scene, frames, fps, background, threading, |chunk| {
        out.extend(chunk);
        Ok(())
    })?;
    Ok((out, stats))
}

/// Write a numbered PNG sequence into `dir`. Returns the written paths in order.
#[tracing::instrument(skip(scene, threading))]
pub fn render_png_sequence(
    scene: &Scene,
    dir: &Path,
    frames: Range<u64>,
    fps: Fps,
    background: Option<Rgb8>,
    threading: &RenderThreading,
) -> ArchimedesResult<(Vec<PathBuf>, RenderStats)> {
    let mut paths = Vec::new();
    let mut next = frames.start;
    let stats = for_each_chunk(scene, frames, fps, background, threading, |chunk| {
        for frame in &chunk {
            let path = sequence_frame_path(dir, next);
            write_png(frame, &path)?;
            paths.push(path);
            next += 1;
        }
        Ok(())
    })?;
    Ok((paths, stats))
}

/// Options for [`render_to_video`].
#[derive(Clone, Debug)]
pub struct RenderToVideoOpts {
    /// Frame indices to render (start inclusive, end exclusive).
    pub frames: Range<u64>,
    /// Integer frame rate handed to the encoder.
    pub fps: u32,
    /// Background color frames are flattened over.
    pub background: Rgb8,
    pub overwrite: bool,
    /// Inferred from the output extension when `None`.
    pub format: Option<VideoFormat>,
    pub threading: RenderThreading,
}

impl Default for RenderToVideoOpts {
    fn default() -> Self {
        Self {
            frames: 0..1,
            fps: 30,
            background: Rgb8::new(0, 0, 0),
            overwrite: true,
            format: None,
            threading: RenderThreading::default(),
        }
    }
}

/// Render the scene to MP4/WebM/GIF through the system `ffmpeg` binary.
#[tracing::instrument(skip_all, fields(out = %out_path.display()))]
pub fn render_to_video(
    scene: &Scene,
    out_path: &Path,
    opts: &RenderToVideoOpts,
) -> ArchimedesResult<RenderStats> {
    let format = match opts.format {
        Some(f) => f,
        None => VideoFormat::from_path(out_path)?,
    };
    let fps = Fps::new(opts.fps, 1)?;
    let cfg = EncodeConfig {
        width: scene.projection.viewport.width,
        height: scene.projection.viewport.height,
        fps: opts.fps,
        format,
        out_path: out_path.to_path_buf(),
        overwrite: opts.overwrite,
    };
    let bg = opts.background;
    let mut enc = FfmpegEncoder::new(cfg, [bg.r, bg.g, bg.b, 255])?;
    let stats = for_each_chunk(
        scene,
        opts.frames.clone(),
        fps,
        Some(bg),
        &opts.threading,
        |chunk| {
            for frame in &chunk {
                enc.encode_frame(frame)?;
            }
            Ok(())
        },
    )?;
    enc.finish()?;
    Ok(stats)
}

/// Sample once, then render `frames` chunk by chunk and hand each chunk to `sink` in order.
fn for_each_chunk(
    scene: &Scene,
    frames: Range<u64>,
    fps: Fps,
    background: Option<Rgb8>,
    threading: &RenderThreading,
    mut sink: impl FnMut(Vec<FrameRGBA>) -> ArchimedesResult<()>,
) -> ArchimedesResult<RenderStats> {
    if frames.is_empty() {
        return Err(ArchimedesError::invalid_parameter(
            "render frame range must be non-empty",
        ));
    }
    scene.validate()?;
    let samples = sample(&scene.params)?;
    let viewport = scene.projection.viewport;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let render_one = |surface: &mut CpuSurface, f: u64| -> ArchimedesResult<(FrameRGBA, bool)> {
        let clamped = paint_at(scene, &samples, fps.frames_to_secs(f), surface)?;
        Ok((surface.finish()?, clamped > 0))
    };

    let mut stats = RenderStats::default();
    let mut chunk_start = frames.start;
    while chunk_start < frames.end {
        let chunk_end = (chunk_start + chunk_size).min(frames.end);

        let rendered: Vec<ArchimedesResult<(FrameRGBA, bool)>> = match &pool {
            Some(pool) => pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map_init(
                        || CpuSurface::new(viewport, background),
                        |surface, f| match surface {
                            Ok(s) => render_one(s, f),
                            Err(e) => Err(ArchimedesError::render(e.to_string())),
                        },
                    )
                    .collect()
            }),
            None => {
                let mut surface = CpuSurface::new(viewport, background)?;
                (chunk_start..chunk_end)
                    .map(|f| render_one(&mut surface, f))
                    .collect()
            }
        };

        let mut chunk = Vec::with_capacity(rendered.len());
        for item in rendered {
            let (frame, clamped) = item?;
            stats.frames_total += 1;
            stats.frames_clamped += u64::from(clamped);
            chunk.push(frame);
        }
        sink(chunk)?;
        chunk_start = chunk_end;
    }

    tracing::debug!(
        frames = stats.frames_total,
        clamped = stats.frames_clamped,
        "rendered frames"
    );
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> ArchimedesResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ArchimedesError::invalid_parameter(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ArchimedesError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
