// SPDX-License-Identifier: MIT OR Apache-2.0
//! Brand palette shared by every segment of a composition.

use crate::content::ContentKind;
use serde::{Deserialize, Serialize};

/// Default background colour
pub const DEFAULT_BACKGROUND: &str = "#0d1628";
/// Default accent colour
pub const DEFAULT_ACCENT: &str = "#5dd0ff";
/// Default text colour
pub const DEFAULT_TEXT: &str = "#ffffff";
/// Default gradient overlay colour
pub const DEFAULT_OVERLAY: &str = "rgba(13,22,40,0.82)";

/// Colours used when painting a composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Frame background
    pub background: String,
    /// Accent (bullet markers, highlights)
    pub accent: String,
    /// Text colour
    pub text: String,
    /// Overlay gradient colour
    pub overlay: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
            text: DEFAULT_TEXT.to_string(),
            overlay: DEFAULT_OVERLAY.to_string(),
        }
    }
}

impl Palette {
    /// Colour the host should fill a layer of the given kind with.
    ///
    /// Media layers carry their own pixels and get `None`.
    pub fn fill_for(&self, kind: ContentKind) -> Option<&str> {
        match kind {
            ContentKind::Text => Some(&self.text),
            ContentKind::Overlay => Some(&self.overlay),
            ContentKind::Image | ContentKind::Video | ContentKind::Lottie => None,
        }
    }
}

/// Brand identity applied to a composition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandSignature {
    /// Colour palette
    pub palette: Palette,
    /// Logo image reference
    pub logo: Option<String>,
    /// Tagline shown next to the logo
    pub tagline: Option<String>,
}

impl BrandSignature {
    /// Whether there is anything to draw in the logo block
    pub fn has_logo_block(&self) -> bool {
        self.logo.is_some() || self.tagline.is_some()
    }
}
