// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline scheduling: which segments are visible at a frame.

use crate::composition::Composition;
use crate::error::TimelineError;
use crate::segment::Segment;

/// A segment visible at the queried frame
#[derive(Debug, Clone, Copy)]
pub struct ActiveSegment<'a> {
    /// Paint position (declaration index)
    pub z_order: usize,
    /// The segment
    pub segment: &'a Segment,
    /// Frames since the segment became visible
    pub local_frame: u32,
    /// Exclusive end frame, clamped to the composition duration
    pub effective_end: u32,
}

impl ActiveSegment<'_> {
    /// Frames left before the segment disappears, including the current one
    pub fn remaining(&self) -> u32 {
        self.effective_end - (self.segment.start + self.local_frame)
    }
}

impl Composition {
    /// Check that `frame` lies in `[0, duration)`
    pub fn check_frame(&self, frame: u32) -> Result<(), TimelineError> {
        if frame >= self.duration() {
            return Err(TimelineError::FrameOutOfRange {
                frame,
                duration: self.duration(),
            });
        }
        Ok(())
    }

    /// Segments visible at `frame`, in declaration order.
    ///
    /// A segment is visible on `[start, start + duration)`. Frames at or past
    /// the composition duration are rejected rather than clamped.
    pub fn active_segments(&self, frame: u32) -> Result<Vec<ActiveSegment<'_>>, TimelineError> {
        self.check_frame(frame)?;

        let active = self
            .segments()
            .enumerate()
            .filter(|(_, segment)| segment.is_active(frame))
            .map(|(z_order, segment)| ActiveSegment {
                z_order,
                segment,
                local_frame: frame - segment.start,
                effective_end: segment.effective_range(self.duration()).end,
            })
            .collect();

        Ok(active)
    }
}
