// SPDX-License-Identifier: MIT OR Apache-2.0
//! Automatic placement of items along the timeline.
//!
//! Two rules are used by the templates:
//!
//! - [`slide_windows`] gives text items back-to-back windows of equal width and
//!   leaves the last second of the timeline free.
//! - [`even_slices`] spreads media across the whole timeline. Its start and
//!   width are rounded independently (`floor` and `ceil`), so neighbouring
//!   slices may overlap by a frame. Windows that end past the composition
//!   are clamped by the scheduler at render time.

use crate::error::TimelineError;
use serde::{Deserialize, Serialize};

/// Placement of one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// First frame
    pub start: u32,
    /// Number of frames
    pub duration: u32,
}

impl Window {
    /// Exclusive end frame
    pub fn end(&self) -> u64 {
        u64::from(self.start) + u64::from(self.duration)
    }
}

/// Width of each slide: `floor((duration - fps) / max(1, count))`.
pub fn slide_duration(count: usize, duration: u32, fps: u32) -> Result<u32, TimelineError> {
    let usable = duration.saturating_sub(fps);
    let slots = count.max(1) as u64;
    let slide = u64::from(usable) / slots;
    if slide == 0 {
        return Err(TimelineError::invalid(format!(
            "{count} slides do not fit in {duration} frames at {fps} fps"
        )));
    }
    Ok(slide as u32)
}

/// Windows for `count` slides: slide `i` starts at `i * slide_duration`.
pub fn slide_windows(count: usize, duration: u32, fps: u32) -> Result<Vec<Window>, TimelineError> {
    let slide = slide_duration(count, duration, fps)?;
    Ok((0..count as u32)
        .map(|i| Window {
            start: i * slide,
            duration: slide,
        })
        .collect())
}

/// Windows spreading `count` items over `total` frames.
///
/// Item `i` starts at `floor(i * total / count)` and lasts
/// `ceil(total / count)` frames.
pub fn even_slices(count: usize, total: u32) -> Vec<Window> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as u64;
    let total = u64::from(total);
    let width = total.div_ceil(n) as u32;
    (0..n)
        .map(|i| Window {
            start: (i * total / n) as u32,
            duration: width,
        })
        .collect()
}
