// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Builder pattern for texture creation to reduce parameter count.

use crate::addressing::complete_level_count;
use crate::extent::Extent3d;
use crate::format::Format;
use crate::texture::{Target, Texture};

/// How many mipmap levels to allocate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LevelCount {
    /// Exactly this many levels.
    Explicit(usize),
    /// A complete chain down to 1×1×1.
    #[default]
    Complete,
}

impl LevelCount {
    /// Resolves to a concrete count for a texture of the given extent.
    pub fn resolve(self, extent: Extent3d) -> usize {
        match self {
            LevelCount::Explicit(levels) => levels,
            LevelCount::Complete => complete_level_count(extent),
        }
    }
}

/// Everything needed to allocate a [`Texture`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextureConfig<'a> {
    pub target: Target,
    pub format: Format,
    pub extent: Extent3d,
    pub levels: LevelCount,
    /// Array layers.  Must be 1 for non-array targets.
    pub layers: usize,
    /// Name used in log messages.
    pub debug_name: &'a str,
}

impl TextureConfig<'_> {
    #[inline] pub fn level_count(&self) -> usize {
        self.levels.resolve(self.extent)
    }
}

/// Builder for texture configurations with a cleaner API than long parameter lists.
///
/// ```
/// use ghosts::extent::Extent3d;
/// use ghosts::format::Format;
/// use ghosts::texture::{LevelCount, Target, TextureBuilder};
///
/// let texture = TextureBuilder::new(Target::Texture2DArray, Format::Rgba8Unorm, Extent3d::new_2d(16, 16), "atlas")
///     .with_layers(3)
///     .with_levels(LevelCount::Explicit(2))
///     .build();
/// assert_eq!(texture.layers(), 3);
/// assert_eq!(texture.levels(), 2);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct TextureBuilder<'a> {
    target: Target,
    format: Format,
    extent: Extent3d,
    debug_name: &'a str,
    levels: Option<LevelCount>,
    layers: Option<usize>,
}

impl<'a> TextureBuilder<'a> {
    /// Create a new texture builder with required parameters.
    pub fn new(target: Target, format: Format, extent: Extent3d, debug_name: &'a str) -> Self {
        Self {
            target,
            format,
            extent,
            debug_name,
            levels: None,
            layers: None,
        }
    }

    /// Set the number of mipmap levels.  Defaults to a single level.
    pub fn with_levels(mut self, levels: LevelCount) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Set the number of array layers.  Defaults to 1.
    pub fn with_layers(mut self, layers: usize) -> Self {
        self.layers = Some(layers);
        self
    }

    pub fn target(&self) -> Target {
        self.target
    }
    pub fn format(&self) -> Format {
        self.format
    }
    pub fn extent(&self) -> Extent3d {
        self.extent
    }
    pub fn debug_name(&self) -> &'a str {
        self.debug_name
    }
    /// Get the level count if set.
    pub fn levels(&self) -> Option<LevelCount> {
        self.levels
    }
    /// Get the layer count if set.
    pub fn layers(&self) -> Option<usize> {
        self.layers
    }

    /// The configuration this builder describes, with defaults filled in.
    pub fn config(&self) -> TextureConfig<'a> {
        TextureConfig {
            target: self.target,
            format: self.format,
            extent: self.extent,
            levels: self.levels.unwrap_or(LevelCount::Explicit(1)),
            layers: self.layers.unwrap_or(1),
            debug_name: self.debug_name,
        }
    }

    /// Allocates the texture.
    pub fn build(&self) -> Texture {
        Texture::with_config(&self.config())
    }
}
