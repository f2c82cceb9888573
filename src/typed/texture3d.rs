// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Volume textures.

use crate::addressing::complete_level_count;
use crate::extent::{Extent3d, Texel3};
use crate::format::Format;
use crate::texture::Image;
use crate::typed::Texture3D;

impl Texture3D {
    /// Allocates a zero-filled volume with `levels` mipmap levels.
    pub fn new(format: Format, extent: Extent3d, levels: usize) -> Self {
        Self::allocate(format, extent, 1, levels)
    }
    /// Allocates a zero-filled volume with a complete mipmap chain.
    pub fn new_complete(format: Format, extent: Extent3d) -> Self {
        Self::new(format, extent, complete_level_count(extent))
    }

    pub fn level(&self, level: usize) -> Image {
        self.image(0, 0, level)
    }

    /// Reads the texel at `coord` of `level` as `T`.
    ///
    /// # Panics
    /// Panics if the format is compressed, or `coord` or `level` is out of range.
    pub fn load<T: bytemuck::Pod>(&self, coord: Texel3, level: usize) -> T {
        self.load_at(0, 0, coord, level)
    }
    pub fn store<T: bytemuck::Pod>(&mut self, coord: Texel3, level: usize, value: T) {
        self.store_at(0, 0, coord, level, value)
    }
}
