// SPDX-License-Identifier: MIT OR Apache-2.0
//! Content references carried by segments.
//!
//! The sequencer never resolves or decodes content. A reference is an opaque
//! string (path, URL, literal text or colour) tagged with the kind of layer
//! the host should produce for it.

use serde::{Deserialize, Serialize};

/// Kind of layer a content reference describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// Still image
    Image,
    /// Video clip (played muted)
    Video,
    /// Text block, source is the literal text
    Text,
    /// Full-frame gradient overlay, source describes the gradient
    Overlay,
    /// Lottie animation data
    Lottie,
}

impl ContentKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Text => "Text",
            Self::Overlay => "Overlay",
            Self::Lottie => "Lottie",
        }
    }
}

/// Opaque reference to the content of a layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    /// Layer kind
    pub kind: ContentKind,
    /// Path, URL, text or descriptor, passed through unchanged
    pub source: String,
}

impl ContentRef {
    /// Reference an image
    pub fn image(source: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Image,
            source: source.into(),
        }
    }

    /// Reference a video
    pub fn video(source: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Video,
            source: source.into(),
        }
    }

    /// A text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            source: text.into(),
        }
    }

    /// A gradient overlay
    pub fn overlay(descriptor: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Overlay,
            source: descriptor.into(),
        }
    }

    /// Reference Lottie animation data
    pub fn lottie(source: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Lottie,
            source: source.into(),
        }
    }
}
