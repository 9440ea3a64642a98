// SPDX-License-Identifier: MIT OR Apache-2.0
//! Subcommand implementations.
//!
//! Machine-readable output goes to the given writer; diagnostics go through
//! `tracing`.

use crate::cli::{Command, TemplateKind};
use crate::job::{CompositionSource, JobError, RenderJob};
use promo_reel_sequencer::{
    measure_spring, Composition, ShortTeaserProps, SlideshowProps, SpringConfig,
    DEFAULT_SETTLE_THRESHOLD,
};
use std::io::Write;
use std::path::Path;

/// Run a subcommand
pub fn run(command: Command, out: &mut impl Write) -> Result<(), JobError> {
    match command {
        Command::Inspect { job } => inspect(&load(&job)?, out),
        Command::Frame { job, frame } => {
            let composition = load(&job)?;
            let layers = composition.render_frame(frame)?;
            serde_json::to_writer_pretty(&mut *out, &layers)?;
            writeln!(out)?;
            Ok(())
        }
        Command::Render { job, start, end } => {
            let composition = load(&job)?;
            let start = start.unwrap_or(0);
            let end = end.unwrap_or(composition.duration());
            render(&composition, start, end, out)
        }
        Command::Template { kind } => {
            let source = match kind {
                TemplateKind::ShortTeaser => CompositionSource::ShortTeaser(ShortTeaserProps::default()),
                TemplateKind::Slideshow => CompositionSource::Slideshow(SlideshowProps::default()),
            };
            writeln!(out, "{}", RenderJob::new(source).to_ron()?)?;
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<Composition, JobError> {
    RenderJob::load(path)?.build()
}

fn inspect(composition: &Composition, out: &mut impl Write) -> Result<(), JobError> {
    let settings = composition.settings();
    writeln!(
        out,
        "{}: {} frames @ {} fps ({:.2}s), {}x{}",
        composition.name,
        settings.duration,
        settings.fps,
        settings.seconds(),
        settings.width,
        settings.height
    )?;

    let mut profiles: Vec<SpringConfig> = Vec::new();
    for (z_order, segment) in composition.segments().enumerate() {
        let visible = segment.effective_range(settings.duration);
        writeln!(
            out,
            "  [{z_order:>2}] {:<24} {:<7} frames {:>4}..{:<4} {}",
            segment.name,
            segment.content.kind.name(),
            visible.start,
            visible.end,
            if segment.end() > u64::from(settings.duration) { "(clamped)" } else { "" }
        )?;
        for motion in segment.elements.iter().filter_map(|e| e.motion) {
            if !profiles.contains(&motion) {
                profiles.push(motion);
            }
        }
    }

    for profile in profiles {
        let settle = measure_spring(settings.fps, &profile, DEFAULT_SETTLE_THRESHOLD)?;
        writeln!(
            out,
            "  spring damping {} mass {} stiffness {}: settles after {} frames",
            profile.damping, profile.mass, profile.stiffness, settle
        )?;
    }
    Ok(())
}

fn render(composition: &Composition, start: u32, end: u32, out: &mut impl Write) -> Result<(), JobError> {
    let results = composition.render_range(start..end);
    let total = results.len();
    let mut failed = 0;

    for result in results {
        match result {
            Ok(layers) => {
                serde_json::to_writer(&mut *out, &layers)?;
                writeln!(out)?;
            }
            Err(e) => {
                tracing::error!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(JobError::FramesFailed { failed, total });
    }
    tracing::info!("Rendered {total} frames");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use promo_reel_sequencer::FrameLayers;

    fn teaser() -> Composition {
        ShortTeaserProps::default().build().unwrap()
    }

    #[test]
    fn test_render_writes_json_lines() {
        let mut out = Vec::new();
        render(&teaser(), 48, 52, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let frames: Vec<FrameLayers> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(frames.iter().map(|f| f.frame).collect::<Vec<_>>(), vec![48, 49, 50, 51]);
    }

    #[test]
    fn test_render_reports_out_of_range_frames() {
        let mut out = Vec::new();
        let result = render(&teaser(), 178, 200, &mut out);
        assert!(matches!(result, Err(JobError::FramesFailed { failed: 20, total: 22 })));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_inspect_lists_segments_and_springs() {
        let mut out = Vec::new();
        inspect(&teaser(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("short-teaser: 180 frames @ 30 fps (6.00s), 1920x1080"));
        assert!(text.contains("bullet 2"));
        assert_eq!(text.matches("settles after").count(), 1);
    }

    #[test]
    fn test_template_prints_loadable_job() {
        let mut out = Vec::new();
        run(Command::Template { kind: TemplateKind::Slideshow }, &mut out).unwrap();
        let job = RenderJob::from_ron(&String::from_utf8(out).unwrap()).unwrap();
        assert!(matches!(job.composition, CompositionSource::Slideshow(_)));
    }
}
