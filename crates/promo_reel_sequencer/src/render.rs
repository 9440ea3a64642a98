// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame rendering: the layer list a host compositor rasterizes.
//!
//! Every frame is a pure function of the composition and the frame number,
//! so frames can be produced in any order and on any thread.

use crate::composition::Composition;
use crate::content::ContentRef;
use crate::error::TimelineError;
use crate::evaluator::Motion;
use crate::scheduler::ActiveSegment;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One layer to composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedLayer {
    /// Paint position of the owning segment, back to front
    pub z_order: usize,
    /// Index of the element within its segment, `None` for the segment itself
    pub element: Option<usize>,
    /// Final opacity
    pub opacity: f64,
    /// Vertical offset in pixels
    pub translate_y: f64,
    /// What to draw
    pub content: ContentRef,
    /// Palette colour for text and overlays
    pub fill: Option<String>,
}

/// Everything visible at one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLayers {
    /// Frame number
    pub frame: u32,
    /// Background colour behind all layers
    pub background: String,
    /// Layers, back to front
    pub layers: Vec<RenderedLayer>,
}

impl Composition {
    /// Compute the layer list for `frame`
    pub fn render_frame(&self, frame: u32) -> Result<FrameLayers, TimelineError> {
        let mut layers = Vec::new();
        for active in self.active_segments(frame)? {
            self.push_layers(&active, &mut layers);
        }

        Ok(FrameLayers {
            frame,
            background: self.brand().palette.background.clone(),
            layers,
        })
    }

    /// Render a range of frames in parallel.
    ///
    /// Results keep frame order. Each frame fails or succeeds on its own.
    pub fn render_range(&self, frames: Range<u32>) -> Vec<Result<FrameLayers, TimelineError>> {
        tracing::info!(
            "Rendering frames {}..{} of '{}'",
            frames.start,
            frames.end,
            self.name
        );
        frames
            .into_par_iter()
            .map(|frame| self.render_frame(frame))
            .collect()
    }

    fn push_layers(&self, active: &ActiveSegment<'_>, layers: &mut Vec<RenderedLayer>) {
        let segment = active.segment;
        let palette = &self.brand().palette;

        if segment.elements.is_empty() {
            layers.push(RenderedLayer {
                z_order: active.z_order,
                element: None,
                opacity: segment.opacity,
                translate_y: 0.0,
                content: segment.content.clone(),
                fill: palette.fill_for(segment.content.kind).map(str::to_string),
            });
            return;
        }

        for (index, element) in segment.elements.iter().enumerate() {
            let Some(local_frame) = element.local_frame(active.local_frame) else {
                continue;
            };
            let motion = match &element.motion {
                Some(profile) => self.entrance().evaluate(local_frame, self.fps(), profile),
                None => Motion::settled(),
            };
            let content = element.content.as_ref().unwrap_or(&segment.content);

            layers.push(RenderedLayer {
                z_order: active.z_order,
                element: Some(index),
                opacity: segment.opacity * motion.opacity,
                translate_y: motion.translate_y,
                content: content.clone(),
                fill: palette.fill_for(content.kind).map(str::to_string),
            });
        }
    }
}
