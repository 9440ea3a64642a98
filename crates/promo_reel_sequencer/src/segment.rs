// SPDX-License-Identifier: MIT OR Apache-2.0
//! Segments: time-bounded layers of a composition.

use crate::content::ContentRef;
use crate::error::TimelineError;
use crate::spring::SpringConfig;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use uuid::Uuid;

/// Unique identifier for a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub Uuid);

impl SegmentId {
    /// Create a new random segment ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::new()
    }
}

/// An animated sub-part of a segment, such as one bullet line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedElement {
    /// Start offset relative to the parent segment's first frame
    #[serde(default)]
    pub offset: u32,
    /// Frames the element stays visible, unbounded if `None`
    #[serde(default)]
    pub duration: Option<u32>,
    /// Content drawn instead of the segment's own content
    #[serde(default)]
    pub content: Option<ContentRef>,
    /// Entrance spring, static if `None`
    #[serde(default)]
    pub motion: Option<SpringConfig>,
}

impl AnimatedElement {
    /// Element starting with its parent, drawing the parent's content
    pub fn new() -> Self {
        Self {
            offset: 0,
            duration: None,
            content: None,
            motion: None,
        }
    }

    /// Delay the element by `offset` frames
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Limit how long the element stays visible
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Draw `content` instead of the parent's content
    pub fn with_content(mut self, content: ContentRef) -> Self {
        self.content = Some(content);
        self
    }

    /// Animate the entrance with a spring
    pub fn with_motion(mut self, motion: SpringConfig) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Element-local frame for a segment-local frame, if the element is visible
    pub fn local_frame(&self, segment_frame: u32) -> Option<u32> {
        let local = segment_frame.checked_sub(self.offset)?;
        match self.duration {
            Some(duration) if local >= duration => None,
            _ => Some(local),
        }
    }

    fn validate(&self) -> Result<(), TimelineError> {
        if self.duration == Some(0) {
            return Err(TimelineError::invalid("element duration must be at least 1 frame"));
        }
        if let Some(motion) = &self.motion {
            motion.validate()?;
        }
        Ok(())
    }
}

impl Default for AnimatedElement {
    fn default() -> Self {
        Self::new()
    }
}

/// A time-bounded layer in a composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique segment ID
    #[serde(default)]
    pub id: SegmentId,
    /// Segment name
    #[serde(default)]
    pub name: String,
    /// First visible frame
    pub start: u32,
    /// Number of visible frames
    pub duration: u32,
    /// What the layer shows
    pub content: ContentRef,
    /// Opacity multiplier applied to everything the segment draws
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Animated sub-parts; a segment without elements draws itself statically
    #[serde(default)]
    pub elements: Vec<AnimatedElement>,
}

fn default_opacity() -> f64 {
    1.0
}

impl Segment {
    /// Create a new segment
    pub fn new(name: impl Into<String>, start: u32, duration: u32, content: ContentRef) -> Self {
        Self {
            id: SegmentId::new(),
            name: name.into(),
            start,
            duration,
            content,
            opacity: 1.0,
            elements: Vec::new(),
        }
    }

    /// Set the opacity multiplier
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Add an animated element
    pub fn with_element(mut self, element: AnimatedElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Exclusive end frame as stored
    pub fn end(&self) -> u64 {
        u64::from(self.start) + u64::from(self.duration)
    }

    /// Whether the segment is visible at `frame`
    pub fn is_active(&self, frame: u32) -> bool {
        frame >= self.start && u64::from(frame) < self.end()
    }

    /// Visible frame range clamped to a composition of `total` frames.
    ///
    /// The stored duration is left untouched.
    pub fn effective_range(&self, total: u32) -> Range<u32> {
        let end = self.end().min(u64::from(total)) as u32;
        self.start.min(end)..end
    }

    /// Check duration, opacity and every element
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.duration == 0 {
            return Err(TimelineError::invalid(format!(
                "segment '{}' must last at least 1 frame",
                self.name
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(TimelineError::invalid(format!(
                "segment '{}' opacity must be within [0, 1], got {}",
                self.name, self.opacity
            )));
        }
        self.elements.iter().try_for_each(AnimatedElement::validate)
    }
}
