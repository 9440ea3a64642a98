// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-accurate timing for promotional reels.
//!
//! This crate computes what a host compositor draws at any frame:
//! - Which segments are visible (timeline scheduling)
//! - Spring-driven entrance progress for animated elements
//! - Opacity and offset via clamped piecewise-linear curves
//! - Automatic slide and footage placement
//! - Built-in teaser and slideshow templates
//!
//! ## Architecture
//!
//! A [`Composition`] is built once and never changes while rendering.
//! [`Composition::render_frame`] is a pure function of the frame number, so a
//! host may render frames out of order or in parallel. Content references are
//! passed through untouched; decoding and rasterizing belong to the host.

pub mod composition;
pub mod content;
pub mod curve;
pub mod error;
pub mod evaluator;
pub mod palette;
pub mod partition;
pub mod render;
pub mod scheduler;
pub mod segment;
pub mod spring;
pub mod templates;

pub use composition::{Composition, CompositionDef, CompositionId, CompositionSettings};
pub use content::{ContentKind, ContentRef};
pub use curve::{lerp, Curve, Extrapolate};
pub use error::TimelineError;
pub use evaluator::{evaluate, EntranceStyle, Motion};
pub use palette::{BrandSignature, Palette};
pub use partition::{even_slices, slide_duration, slide_windows, Window};
pub use render::{FrameLayers, RenderedLayer};
pub use scheduler::ActiveSegment;
pub use segment::{AnimatedElement, Segment, SegmentId};
pub use spring::{measure_spring, spring, SpringConfig, SpringSimulation, DEFAULT_SETTLE_THRESHOLD};
pub use templates::{FootageItem, FootageKind, ShortTeaserProps, SlideshowProps};
