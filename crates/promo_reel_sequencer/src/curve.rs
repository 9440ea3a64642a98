// SPDX-License-Identifier: MIT OR Apache-2.0
//! Piecewise-linear curves with configurable extrapolation.

use crate::error::TimelineError;
use serde::{Deserialize, Serialize};

/// Behaviour for inputs outside the breakpoint range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Extrapolate {
    /// Continue the outermost segment's slope
    #[default]
    Extend,
    /// Hold the boundary output
    Clamp,
    /// Return the input unchanged
    Identity,
    /// Wrap the input back into the outer segment
    Wrap,
}

/// Linear interpolation between two values
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear mapping from input breakpoints to output values
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    left: Extrapolate,
    right: Extrapolate,
}

impl Curve {
    /// Create a curve extending on both ends.
    ///
    /// Inputs must be finite and strictly increasing, with at least two
    /// breakpoints and one output per input.
    pub fn new(inputs: &[f64], outputs: &[f64]) -> Result<Self, TimelineError> {
        if inputs.len() != outputs.len() {
            return Err(TimelineError::invalid(format!(
                "curve has {} inputs but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }
        if inputs.len() < 2 {
            return Err(TimelineError::invalid("curve needs at least two breakpoints"));
        }
        if inputs.iter().chain(outputs).any(|v| !v.is_finite()) {
            return Err(TimelineError::invalid("curve breakpoints must be finite"));
        }
        if inputs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(TimelineError::invalid(
                "curve inputs must be strictly increasing",
            ));
        }
        Ok(Self::from_points(inputs, outputs))
    }

    /// Build from breakpoints already known to be valid
    pub(crate) fn from_points(inputs: &[f64], outputs: &[f64]) -> Self {
        Self {
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
            left: Extrapolate::Extend,
            right: Extrapolate::Extend,
        }
    }

    /// Set extrapolation on each side
    pub fn with_extrapolation(mut self, left: Extrapolate, right: Extrapolate) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Clamp on both sides
    pub fn clamped(self) -> Self {
        self.with_extrapolation(Extrapolate::Clamp, Extrapolate::Clamp)
    }

    /// Input breakpoints
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// Output values
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Index of the segment used for `input`.
    ///
    /// Inputs past either end select the outermost segment.
    fn segment_index(&self, input: f64) -> usize {
        let last = self.inputs.len() - 1;
        let mut i = 1;
        while i < last && self.inputs[i] < input {
            i += 1;
        }
        i - 1
    }

    /// Evaluate the curve
    pub fn sample(&self, input: f64) -> f64 {
        let i = self.segment_index(input);
        let (in_min, in_max) = (self.inputs[i], self.inputs[i + 1]);
        let (out_min, out_max) = (self.outputs[i], self.outputs[i + 1]);

        let mut x = input;
        if x < in_min {
            match self.left {
                Extrapolate::Identity => return x,
                Extrapolate::Clamp => x = in_min,
                Extrapolate::Wrap => x = wrap(x, in_min, in_max),
                Extrapolate::Extend => {}
            }
        }
        if x > in_max {
            match self.right {
                Extrapolate::Identity => return x,
                Extrapolate::Clamp => x = in_max,
                Extrapolate::Wrap => x = wrap(x, in_min, in_max),
                Extrapolate::Extend => {}
            }
        }

        if out_min == out_max {
            return out_min;
        }

        let t = (x - in_min) / (in_max - in_min);
        lerp(out_min, out_max, t)
    }
}

fn wrap(x: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    ((x - min) % range + range) % range + min
}
