// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! One-dimensional textures and arrays of them.

use std::ops::RangeInclusive;

use crate::addressing::complete_level_count;
use crate::extent::{Extent3d, Texel3};
use crate::format::Format;
use crate::texture::{Image, ViewError};
use crate::typed::{Texture1D, Texture1DArray};

impl Texture1D {
    /// Allocates a zero-filled texture with `levels` mipmap levels.
    pub fn new(format: Format, width: u32, levels: usize) -> Self {
        Self::allocate(format, Extent3d::new_1d(width), 1, levels)
    }
    /// Allocates a zero-filled texture with a complete mipmap chain.
    pub fn new_complete(format: Format, width: u32) -> Self {
        Self::new(format, width, complete_level_count(Extent3d::new_1d(width)))
    }

    /// Handle to `level`.
    pub fn level(&self, level: usize) -> Image {
        self.image(0, 0, level)
    }

    /// Reads texel `x` of `level` as `T`.
    ///
    /// # Panics
    /// Panics if the format is compressed, or `x` or `level` is out of range.
    pub fn load<T: bytemuck::Pod>(&self, x: u32, level: usize) -> T {
        self.load_at(0, 0, Texel3::from(x), level)
    }
    /// Writes texel `x` of `level`.
    pub fn store<T: bytemuck::Pod>(&mut self, x: u32, level: usize, value: T) {
        self.store_at(0, 0, Texel3::from(x), level, value)
    }
}

impl Texture1DArray {
    /// Allocates a zero-filled array with `levels` mipmap levels.
    pub fn new(format: Format, width: u32, layers: usize, levels: usize) -> Self {
        Self::allocate(format, Extent3d::new_1d(width), layers, levels)
    }
    pub fn new_complete(format: Format, width: u32, layers: usize) -> Self {
        Self::new(format, width, layers, complete_level_count(Extent3d::new_1d(width)))
    }

    /// Views a sub-range of layers and levels, sharing storage.
    pub fn view_layers(&self, layers: RangeInclusive<usize>, levels: RangeInclusive<usize>) -> Result<Self, ViewError> {
        Ok(Self::wrap(self.texture.view(layers, 0..=0, levels)?))
    }

    /// One layer as a [`Texture1D`], sharing storage.
    pub fn layer(&self, layer: usize) -> Result<Texture1D, ViewError> {
        let levels = self.levels().max(1) - 1;
        Texture1D::from_texture(self.texture.view(layer..=layer, 0..=0, 0..=levels)?)
    }

    pub fn load<T: bytemuck::Pod>(&self, x: u32, layer: usize, level: usize) -> T {
        self.load_at(layer, 0, Texel3::from(x), level)
    }
    pub fn store<T: bytemuck::Pod>(&mut self, x: u32, layer: usize, level: usize, value: T) {
        self.store_at(layer, 0, Texel3::from(x), level, value)
    }
}
