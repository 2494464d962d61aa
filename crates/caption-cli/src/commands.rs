//! Command implementations

use crate::cli::RenderArgs;
use crate::config::RenderConfig;
use anyhow::{bail, Context, Result};
use caption_core::{resolve_style, Composition, StyleOverride, SubtitleStyleConfig, Transcript};
use caption_renderer::sequencer::Timeline;
use caption_renderer::{
    Compositor, ExportJob, ExportProgress, FontRegistry, Rasterizer, RenderContext, RenderError,
    SoftwareRasterizer,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Transcript, style and context assembled from flags and config
pub struct Session {
    pub config: RenderConfig,
    pub transcript: Transcript,
    pub style: SubtitleStyleConfig,
    pub context: RenderContext,
}

impl Session {
    pub fn open(args: &RenderArgs) -> Result<Self> {
        let config = args.apply(RenderConfig::load(args.config.as_deref())?);

        let transcript = read_transcript(&args.transcript)?;
        for issue in transcript.validate() {
            log::warn!("{}: {issue}", args.transcript.display());
        }

        let style_override = config
            .style_override
            .as_deref()
            .map(read_style_override)
            .transpose()?;
        let style = resolve_style(&config.style, style_override.as_ref());
        log::info!("style {} ({})", style.id, style.name);

        let duration_in_frames = match config.composition.duration_in_frames {
            Some(frames) => frames,
            None => {
                let end = Timeline::build(transcript.groups(), config.composition.fps).end_frame();
                u32::try_from(end.max(1)).context("transcript is too long for a composition")?
            }
        };
        let composition = Composition::new(
            config.composition.width,
            config.composition.height,
            config.composition.fps,
            duration_in_frames,
        );
        composition.validate().context("invalid composition")?;

        let fonts = Arc::new(FontRegistry::new());
        if config.system_fonts {
            fonts.load_system_fonts();
        }
        for dir in &config.font_dirs {
            fonts.load_fonts_dir(dir);
        }
        log::debug!("{} font faces available", fonts.face_count());

        let context = RenderContext::with_font_registry(composition, fonts).with_font_wait(config.font_wait());
        Ok(Self {
            config,
            transcript,
            style,
            context,
        })
    }

    fn compositor(self) -> Result<(RenderConfig, Compositor)> {
        let compositor = Compositor::new(self.context, Arc::new(self.transcript), Arc::new(self.style))?;
        Ok((self.config, compositor))
    }
}

fn read_transcript(path: &Path) -> Result<Transcript> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Transcript::from_json(&content).with_context(|| format!("Failed to parse transcript {}", path.display()))
}

fn read_style_override(path: &Path) -> Result<StyleOverride> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    StyleOverride::from_json(&content).with_context(|| format!("Failed to parse style override {}", path.display()))
}

pub fn timeline(args: &RenderArgs) -> Result<()> {
    let session = Session::open(args)?;
    let composition = *session.context.composition();
    let timeline = Timeline::build(session.transcript.groups(), composition.fps);

    println!(
        "{}x{} @ {} fps, {} frames",
        composition.width, composition.height, composition.fps, composition.duration_in_frames
    );
    for (window, group) in timeline.windows().iter().zip(session.transcript.groups()) {
        println!(
            "group {:>3} {:<12} frames {:>6}..{:<6} ({} lines)",
            window.group_index,
            group.id,
            window.from,
            window.end(),
            group.lines.len()
        );
        for line in &window.lines {
            let text = group.lines.get(line.line_index).map(|l| l.text()).unwrap_or_default();
            println!(
                "    line {:>2} +{:<5} {:>5} frames  {text}",
                line.line_index, line.from, line.duration
            );
        }
    }
    Ok(())
}

pub fn frame(args: &RenderArgs, frame: i64, png: Option<&Path>) -> Result<()> {
    let (_, compositor) = Session::open(args)?.compositor()?;
    let state = compositor.render_frame(frame)?;
    println!("{}", serde_json::to_string_pretty(&state)?);

    if let Some(path) = png {
        let rasterizer = SoftwareRasterizer::new(Arc::clone(compositor.context().fonts()));
        rasterizer.rasterize(&state)?.save_png(path)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

pub fn export(args: &RenderArgs, out: &Path, start: i64, end: Option<i64>) -> Result<()> {
    let (config, compositor) = Session::open(args)?.compositor()?;
    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let job = ExportJob::new(Arc::new(compositor))
        .with_batch_size(config.batch_size)
        .with_progress(report_progress);
    let full = job.frame_range();
    let range = start.max(full.start)..end.unwrap_or(full.end).min(full.end);
    if range.is_empty() {
        bail!("empty frame range {start}..{}", end.unwrap_or(full.end));
    }

    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let rasterizer = SoftwareRasterizer::new(Arc::clone(job.compositor().context().fonts()));
    let started = Instant::now();
    let written = job.run_mapped(
        range,
        |state| {
            let path = frame_path(out, state.frame);
            rasterizer.rasterize(&state)?.save_png(&path)?;
            Ok::<_, RenderError>(path)
        },
        |path| {
            log::trace!("wrote {}", path.display());
            Ok(())
        },
    )?;

    log::info!(
        "exported {written} frames to {} in {:.2}s",
        out.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn report_progress(progress: ExportProgress) {
    if progress.done == progress.total || progress.done % 100 == 0 {
        log::info!("frame {} ({}/{})", progress.frame, progress.done, progress.total);
    }
}

fn frame_path(dir: &Path, frame: i64) -> PathBuf {
    dir.join(format!("frame_{frame:05}.png"))
}
