// SPDX-License-Identifier: MIT OR Apache-2.0
//! Composition: the complete description of a renderable reel.

use crate::error::TimelineError;
use crate::evaluator::EntranceStyle;
use crate::palette::BrandSignature;
use crate::segment::{Segment, SegmentId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositionId(pub Uuid);

impl CompositionId {
    /// Create a new random composition ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompositionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed timing and size of a composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSettings {
    /// Total length in frames
    pub duration: u32,
    /// Frames per second
    pub fps: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CompositionSettings {
    /// Landscape 1080p at 30 fps
    pub fn landscape(duration: u32) -> Self {
        Self {
            duration,
            fps: 30,
            width: 1920,
            height: 1080,
        }
    }

    /// Portrait 1080x1920 at 30 fps
    pub fn portrait(duration: u32) -> Self {
        Self {
            duration,
            fps: 30,
            width: 1080,
            height: 1920,
        }
    }

    /// Reject zero duration, fps or dimensions
    pub fn validate(&self) -> Result<(), TimelineError> {
        for (name, value) in [
            ("duration", self.duration),
            ("fps", self.fps),
            ("width", self.width),
            ("height", self.height),
        ] {
            if value == 0 {
                return Err(TimelineError::invalid(format!(
                    "composition {name} must be at least 1"
                )));
            }
        }
        Ok(())
    }

    /// Length in seconds
    pub fn seconds(&self) -> f64 {
        f64::from(self.duration) / f64::from(self.fps)
    }
}

/// Ordered stack of segments over a fixed frame clock.
///
/// Declaration order is paint order, back to front. Duration, frame rate and
/// size are fixed at construction.
#[derive(Debug, Clone)]
pub struct Composition {
    /// Unique composition ID
    pub id: CompositionId,
    /// Composition name
    pub name: String,
    settings: CompositionSettings,
    brand: BrandSignature,
    entrance: EntranceStyle,
    segments: IndexMap<SegmentId, Segment>,
}

impl Composition {
    /// Create an empty composition
    pub fn new(
        name: impl Into<String>,
        settings: CompositionSettings,
        brand: BrandSignature,
    ) -> Result<Self, TimelineError> {
        settings.validate()?;
        Ok(Self {
            id: CompositionId::new(),
            name: name.into(),
            settings,
            brand,
            entrance: EntranceStyle::default(),
            segments: IndexMap::new(),
        })
    }

    /// Replace the entrance curves
    pub fn with_entrance_style(mut self, entrance: EntranceStyle) -> Self {
        self.entrance = entrance;
        self
    }

    /// Append a segment on top of the stack
    pub fn add_segment(&mut self, segment: Segment) -> Result<SegmentId, TimelineError> {
        segment.validate()?;
        let id = segment.id;
        if self.segments.contains_key(&id) {
            return Err(TimelineError::invalid(format!(
                "segment '{}' was added twice",
                segment.name
            )));
        }
        if segment.start >= self.settings.duration {
            tracing::warn!(
                "Segment '{}' starts at frame {} past the end of '{}' ({} frames) and will never show",
                segment.name,
                segment.start,
                self.name,
                self.settings.duration
            );
        }
        tracing::debug!(
            "Added segment '{}' [{}, {}) to '{}'",
            segment.name,
            segment.start,
            segment.end(),
            self.name
        );
        self.segments.insert(id, segment);
        Ok(id)
    }

    /// Remove a segment and its elements, keeping the order of the rest
    pub fn remove_segment(&mut self, segment_id: SegmentId) -> Option<Segment> {
        let removed = self.segments.shift_remove(&segment_id);
        if let Some(segment) = &removed {
            tracing::debug!("Removed segment '{}' from '{}'", segment.name, self.name);
        }
        removed
    }

    /// Get a segment
    pub fn segment(&self, segment_id: SegmentId) -> Option<&Segment> {
        self.segments.get(&segment_id)
    }

    /// Paint position of a segment
    pub fn z_order(&self, segment_id: SegmentId) -> Option<usize> {
        self.segments.get_index_of(&segment_id)
    }

    /// All segments, back to front
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Get segment count
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Timing and size
    pub fn settings(&self) -> &CompositionSettings {
        &self.settings
    }

    /// Total length in frames
    pub fn duration(&self) -> u32 {
        self.settings.duration
    }

    /// Frames per second
    pub fn fps(&self) -> u32 {
        self.settings.fps
    }

    /// Brand signature read by every segment
    pub fn brand(&self) -> &BrandSignature {
        &self.brand
    }

    /// Entrance curves
    pub fn entrance(&self) -> &EntranceStyle {
        &self.entrance
    }

    /// Last frame (exclusive) any segment covers, ignoring the composition end
    pub fn content_end(&self) -> u64 {
        self.segments.values().map(Segment::end).max().unwrap_or(0)
    }

    /// Convert seconds to a frame number, rounding down
    pub fn time_to_frame(&self, seconds: f64) -> u32 {
        (seconds * f64::from(self.settings.fps)) as u32
    }

    /// Convert a frame number to seconds
    pub fn frame_to_time(&self, frame: u32) -> f64 {
        f64::from(frame) / f64::from(self.settings.fps)
    }
}

/// Serializable description of a composition, validated by
/// [`CompositionDef::build`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionDef {
    /// Composition name
    pub name: String,
    /// Timing and size
    pub settings: CompositionSettings,
    /// Brand signature
    #[serde(default)]
    pub brand: BrandSignature,
    /// Segments, back to front
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl CompositionDef {
    /// Validate and build the composition
    pub fn build(self) -> Result<Composition, TimelineError> {
        let mut composition = Composition::new(self.name, self.settings, self.brand)?;
        for segment in self.segments {
            composition.add_segment(segment)?;
        }
        Ok(composition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRef;

    fn composition() -> Composition {
        Composition::new("test", CompositionSettings::landscape(180), BrandSignature::default()).unwrap()
    }

    #[test]
    fn test_rejects_zero_settings() {
        let brand = BrandSignature::default();
        for settings in [
            CompositionSettings::landscape(0),
            CompositionSettings { fps: 0, ..CompositionSettings::landscape(180) },
            CompositionSettings { width: 0, ..CompositionSettings::landscape(180) },
            CompositionSettings { height: 0, ..CompositionSettings::portrait(900) },
        ] {
            let result = Composition::new("bad", settings, brand.clone());
            assert!(matches!(result, Err(TimelineError::InvalidComposition { .. })));
        }
    }

    #[test]
    fn test_rejects_zero_duration_segment_eagerly() {
        let mut composition = composition();
        let result = composition.add_segment(Segment::new("empty", 0, 0, ContentRef::image("a.png")));
        assert!(matches!(result, Err(TimelineError::InvalidComposition { .. })));
        assert_eq!(composition.segment_count(), 0);
    }

    #[test]
    fn test_rejects_duplicate_segment() {
        let mut composition = composition();
        let segment = Segment::new("a", 0, 10, ContentRef::image("a.png"));
        composition.add_segment(segment.clone()).unwrap();
        assert!(composition.add_segment(segment).is_err());
    }

    #[test]
    fn test_remove_keeps_paint_order() {
        let mut composition = composition();
        let a = composition.add_segment(Segment::new("a", 0, 10, ContentRef::image("a.png"))).unwrap();
        let b = composition.add_segment(Segment::new("b", 0, 10, ContentRef::image("b.png"))).unwrap();
        let c = composition.add_segment(Segment::new("c", 0, 10, ContentRef::image("c.png"))).unwrap();

        assert_eq!(composition.remove_segment(a).map(|s| s.name), Some("a".to_string()));
        assert_eq!(composition.z_order(b), Some(0));
        assert_eq!(composition.z_order(c), Some(1));
        let names: Vec<&str> = composition.segments().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert!(composition.remove_segment(a).is_none());
    }

    #[test]
    fn test_time_conversion() {
        let composition = composition();
        assert_eq!(composition.time_to_frame(1.5), 45);
        assert_eq!(composition.frame_to_time(90), 3.0);
        assert_eq!(composition.settings().seconds(), 6.0);
    }

    #[test]
    fn test_def_from_ron() {
        let def: CompositionDef = ron::from_str(
            r#"(
                name: "custom",
                settings: (duration: 60, fps: 30, width: 640, height: 360),
                segments: [
                    (start: 0, duration: 60, content: (kind: Image, source: "bg.png")),
                    (start: 10, duration: 40, content: (kind: Text, source: "Hello"),
                     elements: [(offset: 5, motion: Some((damping: 18.0, mass: 0.6)))]),
                ],
            )"#,
        )
        .unwrap();
        let composition = def.build().unwrap();
        assert_eq!(composition.segment_count(), 2);
        assert_eq!(composition.content_end(), 60);

        let text = composition.segments().nth(1).unwrap();
        let motion = text.elements[0].motion.unwrap();
        assert_eq!(motion.stiffness, 100.0);
        assert_eq!(text.opacity, 1.0);
    }
}
