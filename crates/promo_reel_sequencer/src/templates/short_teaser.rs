// SPDX-License-Identifier: MIT OR Apache-2.0
//! Six-second landscape teaser: footage, title, animated bullets, footer.

use crate::composition::{Composition, CompositionSettings};
use crate::content::ContentRef;
use crate::error::TimelineError;
use crate::palette::BrandSignature;
use crate::partition::{even_slices, slide_windows};
use crate::segment::{AnimatedElement, Segment};
use crate::spring::SpringConfig;
use serde::{Deserialize, Serialize};

/// Default teaser length: 6 seconds at 30 fps
pub const SHORT_TEASER_DURATION: u32 = 180;

/// Strength of the gradient laid over each footage item
const OVERLAY_STRENGTH: f64 = 0.85;

/// Shown when there are no bullets
const BULLET_PLACEHOLDER: &str = "Drop your key benefits here.";

const FALLBACK_FOOTAGE: &str = "assets/images/aa_teaser01.png";

/// Kind of footage item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FootageKind {
    /// Still image
    #[default]
    Image,
    /// Muted video
    Video,
}

/// Background media for the teaser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootageItem {
    /// Image or video
    #[serde(default)]
    pub kind: FootageKind,
    /// Path or URL
    pub src: String,
    /// Explicit first frame, evenly spread if `None`
    #[serde(default)]
    pub start_frame: Option<u32>,
    /// Explicit length, evenly spread if `None`
    #[serde(default)]
    pub duration: Option<u32>,
}

impl FootageItem {
    /// Evenly spread image
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            kind: FootageKind::Image,
            src: src.into(),
            start_frame: None,
            duration: None,
        }
    }

    fn content(&self) -> ContentRef {
        match self.kind {
            FootageKind::Image => ContentRef::image(&self.src),
            FootageKind::Video => ContentRef::video(&self.src),
        }
    }
}

/// Inputs of the short teaser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortTeaserProps {
    /// Headline
    pub title: String,
    /// Benefit lines, shown one after another
    pub bullets: Vec<String>,
    /// Background media, back to front
    pub footage: Vec<FootageItem>,
    /// Brand signature
    pub brand: BrandSignature,
    /// Footer line in the bottom-right corner
    pub footer: String,
    /// Timing and size
    pub settings: CompositionSettings,
}

impl Default for ShortTeaserProps {
    fn default() -> Self {
        Self {
            title: "SportSync — Personalized Motion".to_string(),
            bullets: vec![
                "Decode your sport identity in minutes".to_string(),
                "Layer-Z insights map mindset + movement".to_string(),
                "Micro-coaching prompts to keep momentum".to_string(),
            ],
            footage: vec![
                FootageItem::image("assets/images/aa_teaser01.png"),
                FootageItem::image("assets/images/ab_teaser02.png"),
                FootageItem::image("assets/images/ac_teaser03.png"),
            ],
            brand: BrandSignature {
                logo: Some("assets/brand/logo.png".to_string()),
                tagline: Some("Layer-Z Intelligence by SportSync".to_string()),
                ..BrandSignature::default()
            },
            footer: "SportSync • Layer-Z Intelligence".to_string(),
            settings: CompositionSettings::landscape(SHORT_TEASER_DURATION),
        }
    }
}

impl ShortTeaserProps {
    /// Build the composition
    pub fn build(&self) -> Result<Composition, TimelineError> {
        let mut composition = Composition::new("short-teaser", self.settings, self.brand.clone())?;
        let total = self.settings.duration;

        let fallback = [FootageItem::image(FALLBACK_FOOTAGE)];
        let media: &[FootageItem] = if self.footage.is_empty() {
            &fallback
        } else {
            &self.footage
        };
        let overlay = gradient(&self.brand.palette.overlay, OVERLAY_STRENGTH);

        for (index, (item, slice)) in media.iter().zip(even_slices(media.len(), total)).enumerate() {
            let start = item.start_frame.unwrap_or(slice.start);
            let duration = item.duration.unwrap_or(slice.duration);
            composition.add_segment(Segment::new(format!("footage {index}"), start, duration, item.content()))?;
            composition.add_segment(Segment::new(
                format!("footage {index} overlay"),
                start,
                duration,
                ContentRef::overlay(&overlay),
            ))?;
        }

        if let Some(logo) = &self.brand.logo {
            composition.add_segment(Segment::new("logo", 0, total, ContentRef::image(logo)))?;
        }
        if let Some(tagline) = &self.brand.tagline {
            composition.add_segment(Segment::new("tagline", 0, total, ContentRef::text(tagline)))?;
        }

        composition.add_segment(Segment::new("title", 0, total, ContentRef::text(&self.title)))?;

        if self.bullets.is_empty() {
            composition.add_segment(
                Segment::new("bullet placeholder", 0, total, ContentRef::text(BULLET_PLACEHOLDER))
                    .with_opacity(0.75),
            )?;
        } else {
            let windows = slide_windows(self.bullets.len(), total, self.settings.fps)?;
            for (index, (bullet, window)) in self.bullets.iter().zip(windows).enumerate() {
                composition.add_segment(
                    Segment::new(format!("bullet {index}"), window.start, window.duration, ContentRef::text(bullet))
                        .with_element(AnimatedElement::new().with_motion(SpringConfig::bullet_entrance())),
                )?;
            }
        }

        composition.add_segment(
            Segment::new("footer", 0, total, ContentRef::text(&self.footer)).with_opacity(0.8),
        )?;

        tracing::debug!(
            "Built short teaser with {} segments over {} frames",
            composition.segment_count(),
            total
        );
        Ok(composition)
    }
}

/// Top-to-bottom gradient darkening toward `color`
fn gradient(color: &str, strength: f64) -> String {
    format!(
        "linear-gradient(180deg, rgba(0,0,0,{}) 0%, {} {}%)",
        strength * 0.25,
        color,
        strength * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;

    fn starts(composition: &Composition, prefix: &str) -> Vec<u32> {
        composition
            .segments()
            .filter(|s| s.name.starts_with(prefix) && !s.name.ends_with("overlay"))
            .map(|s| s.start)
            .collect()
    }

    #[test]
    fn test_default_layout() {
        let composition = ShortTeaserProps::default().build().unwrap();
        assert_eq!(composition.duration(), 180);
        assert_eq!(starts(&composition, "bullet"), vec![0, 50, 100]);
        assert_eq!(starts(&composition, "footage"), vec![0, 60, 120]);

        // Three footage + overlay pairs, logo, tagline, title, three bullets, footer.
        assert_eq!(composition.segment_count(), 13);
        let names: Vec<&str> = composition.segments().map(|s| s.name.as_str()).collect();
        assert_eq!(&names[..2], &["footage 0", "footage 0 overlay"]);
        assert_eq!(names[12], "footer");
    }

    #[test]
    fn test_bullet_animates_from_its_own_start() {
        let composition = ShortTeaserProps::default().build().unwrap();

        let frame = composition.render_frame(50).unwrap();
        let bullet = frame
            .layers
            .iter()
            .find(|l| l.content == ContentRef::text("Layer-Z insights map mindset + movement"))
            .unwrap();
        assert_eq!(bullet.opacity, 0.0);
        assert_eq!(bullet.translate_y, 32.0);

        // First bullet is gone, the last second has no bullet at all.
        assert!(frame.layers.iter().all(|l| l.content != ContentRef::text("Decode your sport identity in minutes")));
        let outro = composition.render_frame(160).unwrap();
        assert!(outro.layers.iter().all(|l| l.element.is_none()));
    }

    #[test]
    fn test_explicit_footage_timing_and_video() {
        let props = ShortTeaserProps {
            footage: vec![
                FootageItem {
                    kind: FootageKind::Video,
                    src: "clip.mp4".to_string(),
                    start_frame: Some(30),
                    duration: Some(200),
                },
                FootageItem::image("still.png"),
            ],
            ..ShortTeaserProps::default()
        };
        let composition = props.build().unwrap();
        let clip = composition.segments().next().unwrap();
        assert_eq!(clip.content.kind, ContentKind::Video);
        assert_eq!((clip.start, clip.duration), (30, 200));

        let still = composition.segments().nth(2).unwrap();
        assert_eq!((still.start, still.duration), (90, 90));

        let last = composition.active_segments(179).unwrap();
        assert_eq!(last[0].effective_end, 180);
    }

    #[test]
    fn test_fallbacks() {
        let props = ShortTeaserProps {
            bullets: Vec::new(),
            footage: Vec::new(),
            brand: BrandSignature::default(),
            ..ShortTeaserProps::default()
        };
        let composition = props.build().unwrap();
        let first = composition.segments().next().unwrap();
        assert_eq!(first.content, ContentRef::image(FALLBACK_FOOTAGE));
        assert_eq!(first.duration, 180);

        let placeholder = composition
            .segments()
            .find(|s| s.name == "bullet placeholder")
            .unwrap();
        assert_eq!(placeholder.opacity, 0.75);
        assert!(composition.segments().all(|s| s.name != "logo" && s.name != "tagline"));
    }

    #[test]
    fn test_overlay_uses_palette() {
        let composition = ShortTeaserProps::default().build().unwrap();
        let overlay = composition.segments().nth(1).unwrap();
        assert_eq!(overlay.content.kind, ContentKind::Overlay);
        assert!(overlay.content.source.starts_with("linear-gradient(180deg, rgba(0,0,0,0.2125) 0%, rgba(13,22,40,0.82)"));
    }

    #[test]
    fn test_too_many_bullets_for_duration() {
        let props = ShortTeaserProps {
            settings: CompositionSettings::landscape(30),
            ..ShortTeaserProps::default()
        };
        assert!(matches!(props.build(), Err(TimelineError::InvalidComposition { .. })));
    }

    #[test]
    fn test_props_from_partial_ron() {
        let props: ShortTeaserProps = ron::from_str(r#"(title: "Run", bullets: ["Fast"])"#).unwrap();
        assert_eq!(props.title, "Run");
        assert_eq!(props.footage.len(), 3);
        assert_eq!(props.settings.duration, SHORT_TEASER_DURATION);
        let composition = props.build().unwrap();
        assert_eq!(starts(&composition, "bullet"), vec![0]);
        assert_eq!(composition.segments().find(|s| s.name == "bullet 0").unwrap().duration, 150);
    }
}
