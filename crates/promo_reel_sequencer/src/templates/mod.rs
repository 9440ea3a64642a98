// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in reel templates.

pub mod short_teaser;
pub mod slideshow;

pub use short_teaser::{FootageItem, FootageKind, ShortTeaserProps, SHORT_TEASER_DURATION};
pub use slideshow::{SlideshowProps, SLIDESHOW_DURATION};
