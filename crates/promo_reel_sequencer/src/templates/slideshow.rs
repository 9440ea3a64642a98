// SPDX-License-Identifier: MIT OR Apache-2.0
//! Portrait image slideshow with an opening title card.

use crate::composition::{Composition, CompositionSettings};
use crate::content::ContentRef;
use crate::error::TimelineError;
use crate::palette::{BrandSignature, Palette};
use crate::segment::Segment;
use serde::{Deserialize, Serialize};

/// Default slideshow length: 30 seconds at 30 fps
pub const SLIDESHOW_DURATION: u32 = 900;

/// Seconds the title card stays up
const TITLE_SECONDS: u32 = 4;

/// Inputs of the slideshow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowProps {
    /// Title at the top of the opening card
    pub title: String,
    /// Subtitle at the bottom of the opening card
    pub subtitle: String,
    /// Images shown one after another
    pub images: Vec<String>,
    /// Seconds per image
    pub seconds: f64,
    /// Lottie badge shown with the title card
    pub lottie: Option<String>,
    /// Timing and size
    pub settings: CompositionSettings,
}

impl Default for SlideshowProps {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            images: Vec::new(),
            seconds: 1.2,
            lottie: None,
            settings: CompositionSettings::portrait(SLIDESHOW_DURATION),
        }
    }
}

impl SlideshowProps {
    /// Frames each image stays up: `round(seconds * fps)`
    pub fn frames_per_image(&self) -> Result<u32, TimelineError> {
        let frames = (self.seconds * f64::from(self.settings.fps)).round();
        if !frames.is_finite() || frames < 1.0 || frames > f64::from(u32::MAX) {
            return Err(TimelineError::invalid(format!(
                "{} seconds per image at {} fps is not a usable slide length",
                self.seconds, self.settings.fps
            )));
        }
        Ok(frames as u32)
    }

    /// Build the composition
    pub fn build(&self) -> Result<Composition, TimelineError> {
        let brand = BrandSignature {
            palette: Palette {
                background: "#000000".to_string(),
                ..Palette::default()
            },
            ..BrandSignature::default()
        };
        let mut composition = Composition::new("slideshow", self.settings, brand)?;

        let per_image = self.frames_per_image()?;
        for (index, image) in self.images.iter().enumerate() {
            let start = u32::try_from(index as u64 * u64::from(per_image))
                .map_err(|_| TimelineError::invalid("slideshow images overflow the frame clock"))?;
            composition.add_segment(Segment::new(
                format!("image {index}"),
                start,
                per_image,
                ContentRef::image(image),
            ))?;
        }

        let count = u32::try_from(self.images.len()).unwrap_or(u32::MAX);
        let content_frames = match per_image.saturating_mul(count) {
            0 => per_image,
            frames => frames,
        };
        let card = TITLE_SECONDS.saturating_mul(self.settings.fps).min(content_frames);

        for (name, text) in [("title", &self.title), ("subtitle", &self.subtitle)] {
            if !text.is_empty() {
                composition.add_segment(Segment::new(name, 0, card, ContentRef::text(text)))?;
            }
        }
        if let Some(lottie) = &self.lottie {
            composition.add_segment(Segment::new("badge", 0, card, ContentRef::lottie(lottie)))?;
        }

        tracing::debug!(
            "Built slideshow with {} images of {} frames",
            self.images.len(),
            per_image
        );
        Ok(composition)
    }
}
