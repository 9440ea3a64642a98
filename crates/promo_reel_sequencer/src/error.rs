// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for composition construction and frame queries.

/// Error raised by the sequencer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    /// Composition, segment, spring or curve parameters are invalid.
    /// Raised when the value is constructed, never at query time.
    #[error("Invalid composition: {reason}")]
    InvalidComposition {
        /// What was wrong
        reason: String,
    },

    /// Frame outside `[0, duration)`
    #[error("Frame {frame} out of range for composition of {duration} frames")]
    FrameOutOfRange {
        /// Requested frame
        frame: u32,
        /// Composition duration in frames
        duration: u32,
    },
}

impl TimelineError {
    /// Build an [`TimelineError::InvalidComposition`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidComposition {
            reason: reason.into(),
        }
    }
}
