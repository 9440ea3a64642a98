// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render job files.
//!
//! A job is a RON file naming either a built-in template with its inputs or
//! an explicit composition:
//!
//! ```ron
//! RenderJob(
//!     version: 1,
//!     composition: ShortTeaser((
//!         title: "Find your sport",
//!         bullets: ["Decode your sport identity in minutes"],
//!     )),
//! )
//! ```

use promo_reel_sequencer::{
    Composition, CompositionDef, ShortTeaserProps, SlideshowProps, TimelineError,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current job file format version
pub const JOB_FORMAT_VERSION: u32 = 1;

/// Error while loading or running a job
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Job file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// Job file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Job file is not valid RON
    #[error("Invalid job file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Job could not be written as RON
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Job was written by a newer version
    #[error("Job version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// Composition could not be built or queried
    #[error(transparent)]
    Timeline(#[from] TimelineError),

    /// Output could not be encoded
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Output could not be written
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    /// Some frames of a range failed
    #[error("{failed} of {total} frames failed to render")]
    FramesFailed {
        /// Failed frame count
        failed: usize,
        /// Requested frame count
        total: usize,
    },
}

/// What a job renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompositionSource {
    /// Landscape teaser with animated bullets
    ShortTeaser(ShortTeaserProps),
    /// Portrait image slideshow
    Slideshow(SlideshowProps),
    /// Explicit segment list
    Custom(CompositionDef),
}

impl CompositionSource {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShortTeaser(_) => "short-teaser",
            Self::Slideshow(_) => "slideshow",
            Self::Custom(_) => "custom",
        }
    }
}

/// A render job file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// What to render
    pub composition: CompositionSource,
}

fn default_version() -> u32 {
    JOB_FORMAT_VERSION
}

impl RenderJob {
    /// Wrap a source in a job of the current version
    pub fn new(composition: CompositionSource) -> Self {
        Self {
            version: JOB_FORMAT_VERSION,
            composition,
        }
    }

    /// Load a job from a file
    pub fn load(path: &Path) -> Result<Self, JobError> {
        let content = std::fs::read_to_string(path).map_err(|source| JobError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let job = Self::from_ron(&content)?;
        tracing::info!(
            "Loaded {} job from {:?}",
            job.composition.name(),
            path
        );
        Ok(job)
    }

    /// Parse a job and check its version
    pub fn from_ron(content: &str) -> Result<Self, JobError> {
        let job: RenderJob = ron::from_str(content)?;
        if job.version > JOB_FORMAT_VERSION {
            return Err(JobError::UnsupportedVersion {
                found: job.version,
                supported: JOB_FORMAT_VERSION,
            });
        }
        Ok(job)
    }

    /// Serialize the job as pretty RON
    pub fn to_ron(&self) -> Result<String, JobError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Build the composition the job describes
    pub fn build(&self) -> Result<Composition, JobError> {
        let composition = match &self.composition {
            CompositionSource::ShortTeaser(props) => props.build()?,
            CompositionSource::Slideshow(props) => props.build()?,
            CompositionSource::Custom(def) => def.clone().build()?,
        };
        Ok(composition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_round_trip() {
        let job = RenderJob::new(CompositionSource::ShortTeaser(ShortTeaserProps::default()));
        let ron = job.to_ron().unwrap();
        let loaded = RenderJob::from_ron(&ron).unwrap();
        assert_eq!(loaded, job);
        assert_eq!(loaded.build().unwrap().segment_count(), 13);
    }

    #[test]
    fn test_minimal_job() {
        let job = RenderJob::from_ron(r#"(composition: Slideshow((images: ["a.png", "b.png"])))"#).unwrap();
        assert_eq!(job.version, JOB_FORMAT_VERSION);
        let composition = job.build().unwrap();
        assert_eq!(composition.duration(), 900);
        assert_eq!(composition.settings().width, 1080);
    }

    #[test]
    fn test_custom_job() {
        let job = RenderJob::from_ron(
            r#"RenderJob(
                version: 1,
                composition: Custom((
                    name: "two layers",
                    settings: (duration: 90, fps: 30, width: 720, height: 1280),
                    segments: [
                        (start: 0, duration: 90, content: (kind: Video, source: "https://cdn/x.mp4")),
                        (start: 30, duration: 60, content: (kind: Text, source: "Now"), opacity: 0.5),
                    ],
                )),
            )"#,
        )
        .unwrap();
        let composition = job.build().unwrap();
        let frame = composition.render_frame(45).unwrap();
        assert_eq!(frame.layers.len(), 2);
        assert_eq!(frame.layers[0].content.source, "https://cdn/x.mp4");
        assert_eq!(frame.layers[1].opacity, 0.5);
    }

    #[test]
    fn test_newer_version_rejected() {
        let result = RenderJob::from_ron(r#"(version: 99, composition: Slideshow(()))"#);
        assert!(matches!(
            result,
            Err(JobError::UnsupportedVersion { found: 99, supported: JOB_FORMAT_VERSION })
        ));
    }

    #[test]
    fn test_invalid_composition_surfaces() {
        let job = RenderJob::from_ron(
            r#"(composition: Custom((name: "bad", settings: (duration: 0, fps: 30, width: 1, height: 1))))"#,
        )
        .unwrap();
        assert!(matches!(
            job.build(),
            Err(JobError::Timeline(TimelineError::InvalidComposition { .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = RenderJob::load(Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(JobError::Io { .. })));
    }
}
