// SPDX-License-Identifier: MIT OR Apache-2.0
//! Damped spring response used for entrance animations.
//!
//! The spring starts at rest at 0 and is pulled toward 1. It is advanced one
//! frame at a time using the closed-form oscillator solution for each step,
//! so the value at frame `n` depends only on `(n, fps, config)`:
//!
//! - `zeta < 1` uses the underdamped solution and overshoots past 1 before
//!   settling.
//! - `zeta >= 1` uses the critically damped solution and approaches 1 from
//!   below.
//!
//! where `zeta = damping / (2 * sqrt(stiffness * mass))`.

use crate::error::TimelineError;
use serde::{Deserialize, Serialize};

/// Largest simulated step in milliseconds. Low frame rates take coarser
/// steps than real time but never longer than this.
const MAX_STEP_MS: f64 = 64.0;

/// Default settle threshold for [`measure_spring`]
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 0.005;

/// Consecutive in-threshold frames required before a spring counts as settled
const SETTLE_WINDOW: u32 = 20;

/// Upper bound on simulated time when measuring, in seconds
const MAX_SETTLE_SECONDS: u32 = 600;

/// Physical parameters of a spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Damping coefficient
    pub damping: f64,
    /// Mass
    pub mass: f64,
    /// Stiffness
    pub stiffness: f64,
    /// Hold the output at 1 instead of overshooting
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Profile used by bullet lines: heavier damping, lighter mass
    pub fn bullet_entrance() -> Self {
        Self {
            damping: 18.0,
            mass: 0.6,
            ..Self::default()
        }
    }

    /// Reject non-finite or non-positive parameters
    pub fn validate(&self) -> Result<(), TimelineError> {
        for (name, value) in [
            ("damping", self.damping),
            ("mass", self.mass),
            ("stiffness", self.stiffness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::invalid(format!(
                    "spring {name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Damping ratio `zeta`
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Whether the raw response overshoots its target
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }
}

/// Frame-by-frame spring simulation
#[derive(Debug, Clone)]
pub struct SpringSimulation {
    config: SpringConfig,
    fps: f64,
    next_frame: u32,
    current: f64,
    velocity: f64,
    last_timestamp_ms: f64,
}

impl SpringSimulation {
    /// Start a simulation at rest at 0
    pub fn new(fps: u32, config: SpringConfig) -> Self {
        Self {
            config,
            fps: f64::from(fps),
            next_frame: 0,
            current: 0.0,
            velocity: 0.0,
            last_timestamp_ms: 0.0,
        }
    }

    /// Advance to the next frame and return the raw position
    pub fn step(&mut self) -> f64 {
        let now = (f64::from(self.next_frame) / self.fps) * 1000.0;
        self.advance(now);
        self.next_frame += 1;
        self.current
    }

    fn advance(&mut self, now_ms: f64) {
        const TARGET: f64 = 1.0;

        let c = self.config.damping;
        let m = self.config.mass;
        let k = self.config.stiffness;

        let delta_ms = (now_ms - self.last_timestamp_ms).min(MAX_STEP_MS);
        let v0 = -self.velocity;
        let x0 = TARGET - self.current;
        let zeta = c / (2.0 * (k * m).sqrt());
        let omega0 = (k / m).sqrt();
        let t = delta_ms / 1000.0;

        let (position, velocity) = if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let sin1 = (omega1 * t).sin();
            let cos1 = (omega1 * t).cos();
            let envelope = (-zeta * omega0 * t).exp();
            let frag = envelope * (sin1 * ((v0 + zeta * omega0 * x0) / omega1) + x0 * cos1);
            let velocity = zeta * omega0 * frag
                - envelope * (cos1 * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin1);
            (TARGET - frag, velocity)
        } else {
            let envelope = (-omega0 * t).exp();
            let position = TARGET - envelope * (x0 + (v0 + omega0 * x0) * t);
            let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
            (position, velocity)
        };

        self.current = position;
        self.velocity = velocity;
        self.last_timestamp_ms = now_ms;
    }
}

/// Spring progress at `frame`.
///
/// The raw response is returned, overshoot included, unless the config asks
/// for overshoot clamping.
pub fn spring(frame: u32, fps: u32, config: &SpringConfig) -> f64 {
    let mut simulation = SpringSimulation::new(fps, *config);
    let mut position = simulation.step();
    for _ in 0..frame {
        position = simulation.step();
    }

    if config.overshoot_clamping {
        position.min(1.0)
    } else {
        position
    }
}

/// Number of frames until the spring has settled.
///
/// Settled means the distance to the target stayed below `threshold` for
/// twenty consecutive frames; the returned frame is the first of that run.
pub fn measure_spring(fps: u32, config: &SpringConfig, threshold: f64) -> Result<u32, TimelineError> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(TimelineError::invalid(format!(
            "settle threshold must be finite and positive, got {threshold}"
        )));
    }
    if fps == 0 {
        return Err(TimelineError::invalid("fps must be at least 1"));
    }
    config.validate()?;

    let limit = fps.saturating_mul(MAX_SETTLE_SECONDS);
    let mut simulation = SpringSimulation::new(fps, *config);
    let mut frame = 0;
    let mut difference = (simulation.step() - 1.0).abs();

    while difference >= threshold {
        frame += 1;
        if frame > limit {
            return Err(TimelineError::invalid(format!(
                "spring does not settle within {MAX_SETTLE_SECONDS} seconds"
            )));
        }
        difference = (simulation.step() - 1.0).abs();
    }

    let mut finished = frame;
    let mut calm = 0;
    while calm < SETTLE_WINDOW {
        frame += 1;
        difference = (simulation.step() - 1.0).abs();
        if difference >= threshold {
            calm = 0;
            finished = frame + 1;
        }
        calm += 1;
    }

    Ok(finished)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_rest() {
        assert_eq!(spring(0, 30, &SpringConfig::default()), 0.0);
        assert_eq!(spring(0, 30, &SpringConfig::bullet_entrance()), 0.0);
    }

    #[test]
    fn test_default_spring_overshoots_then_converges() {
        let config = SpringConfig::default();
        assert!(config.is_underdamped());

        let peak = (0..60).map(|f| spring(f, 30, &config)).fold(0.0, f64::max);
        assert!(peak > 1.1, "peak was {peak}");

        let late = spring(300, 30, &config);
        assert!((late - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_overshoot_clamping() {
        let config = SpringConfig {
            overshoot_clamping: true,
            ..SpringConfig::default()
        };
        assert!((0..90).all(|f| spring(f, 30, &config) <= 1.0));
    }

    #[test]
    fn test_bullet_profile_is_monotonic() {
        let config = SpringConfig::bullet_entrance();
        assert!(!config.is_underdamped());

        let values: Vec<f64> = (0..120).map(|f| spring(f, 30, &config)).collect();
        assert!(values.windows(2).all(|w| w[1] >= w[0]));
        assert!(values.iter().all(|v| *v <= 1.0));
        assert!((values[119] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_simulation_matches_direct_query() {
        let config = SpringConfig::default();
        let mut simulation = SpringSimulation::new(24, config);
        for frame in 0..48 {
            assert_eq!(simulation.step().to_bits(), spring(frame, 24, &config).to_bits());
        }
    }

    #[test]
    fn test_low_fps_steps_are_capped() {
        // At 10 fps each frame is 100ms of wall time but only 64ms is simulated.
        let config = SpringConfig::default();
        let mut capped = SpringSimulation::new(10, config);
        capped.step();
        let coarse = capped.step();

        let mut fine = SpringSimulation::new(1000, config);
        let expected = (0..=64).map(|_| fine.step()).last().unwrap();
        assert!((coarse - expected).abs() < 1e-9);
    }

    #[test]
    fn test_measure_spring() {
        let default_settle = measure_spring(30, &SpringConfig::default(), DEFAULT_SETTLE_THRESHOLD).unwrap();
        let bullet_settle =
            measure_spring(30, &SpringConfig::bullet_entrance(), DEFAULT_SETTLE_THRESHOLD).unwrap();
        assert!(default_settle > bullet_settle);
        assert!(bullet_settle > 0);

        // Stays settled from the measured frame on.
        let config = SpringConfig::default();
        for frame in default_settle..default_settle + 20 {
            assert!((spring(frame, 30, &config) - 1.0).abs() < DEFAULT_SETTLE_THRESHOLD);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let config = SpringConfig {
            mass: 0.0,
            ..SpringConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(measure_spring(30, &SpringConfig::default(), 0.0).is_err());
        assert!(measure_spring(0, &SpringConfig::default(), 0.01).is_err());
    }
}
