// SPDX-License-Identifier: MIT OR Apache-2.0
//! Entrance animation evaluation.
//!
//! An element's local frame is turned into spring progress, and progress is
//! mapped through clamped curves to opacity and vertical offset.

use crate::curve::Curve;
use crate::spring::{spring, SpringConfig};
use serde::{Deserialize, Serialize};

/// Visual state of an element at one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Raw spring progress, may exceed 1 while overshooting
    pub progress: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
    /// Downward offset in pixels
    pub translate_y: f64,
}

impl Motion {
    /// Fully entered, used for elements without a spring
    pub fn settled() -> Self {
        Self {
            progress: 1.0,
            opacity: 1.0,
            translate_y: 0.0,
        }
    }
}

/// Curves mapping progress to visual properties
#[derive(Debug, Clone, PartialEq)]
pub struct EntranceStyle {
    /// Progress to opacity
    pub opacity: Curve,
    /// Progress to vertical offset
    pub translate_y: Curve,
}

impl Default for EntranceStyle {
    fn default() -> Self {
        Self {
            opacity: Curve::from_points(&[0.0, 0.15, 1.0], &[0.0, 0.7, 1.0]).clamped(),
            translate_y: Curve::from_points(&[0.0, 1.0], &[32.0, 0.0]).clamped(),
        }
    }
}

impl EntranceStyle {
    /// Map progress to visual properties
    pub fn apply(&self, progress: f64) -> Motion {
        Motion {
            progress,
            opacity: self.opacity.sample(progress),
            translate_y: self.translate_y.sample(progress),
        }
    }

    /// Evaluate an element `local_frame` frames after it became active
    pub fn evaluate(&self, local_frame: u32, fps: u32, profile: &SpringConfig) -> Motion {
        self.apply(spring(local_frame, fps, profile))
    }
}

/// Evaluate with the default entrance curves
pub fn evaluate(local_frame: u32, fps: u32, profile: &SpringConfig) -> Motion {
    EntranceStyle::default().evaluate(local_frame, fps, profile)
}
