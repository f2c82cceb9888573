// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Cube maps and cube map arrays.
//!
//! Faces are numbered +X, -X, +Y, -Y, +Z, -Z.

use std::ops::RangeInclusive;

use crate::addressing::complete_level_count;
use crate::extent::{Extent3d, Texel, Texel3};
use crate::format::Format;
use crate::texture::ViewError;
use crate::typed::{Texture2D, TextureCube, TextureCubeArray};

impl TextureCube {
    /// Allocates a zero-filled cube map with `size`×`size` faces.
    pub fn new(format: Format, size: u32, levels: usize) -> Self {
        Self::allocate(format, Extent3d::new_2d(size, size), 1, levels)
    }
    pub fn new_complete(format: Format, size: u32) -> Self {
        Self::new(format, size, complete_level_count(Extent3d::new_2d(size, size)))
    }

    /// One face as a [`Texture2D`], sharing storage.
    pub fn face(&self, face: usize) -> Result<Texture2D, ViewError> {
        let levels = self.levels().max(1) - 1;
        let view = self.texture.view(0..=0, face..=face, 0..=levels)?;
        Texture2D::from_texture(view)
    }

    pub fn load<T: bytemuck::Pod>(&self, coord: Texel, face: usize, level: usize) -> T {
        self.load_at(0, face, Texel3::from(coord), level)
    }
    pub fn store<T: bytemuck::Pod>(&mut self, coord: Texel, face: usize, level: usize, value: T) {
        self.store_at(0, face, Texel3::from(coord), level, value)
    }
}

impl TextureCubeArray {
    pub fn new(format: Format, size: u32, layers: usize, levels: usize) -> Self {
        Self::allocate(format, Extent3d::new_2d(size, size), layers, levels)
    }
    pub fn new_complete(format: Format, size: u32, layers: usize) -> Self {
        Self::new(format, size, layers, complete_level_count(Extent3d::new_2d(size, size)))
    }

    /// Views a sub-range of layers and levels, sharing storage.
    pub fn view_layers(&self, layers: RangeInclusive<usize>, levels: RangeInclusive<usize>) -> Result<Self, ViewError> {
        Ok(Self::wrap(self.texture.view(layers, 0..=5, levels)?))
    }

    /// One layer as a [`TextureCube`], sharing storage.
    pub fn layer(&self, layer: usize) -> Result<TextureCube, ViewError> {
        let levels = self.levels().max(1) - 1;
        TextureCube::from_texture(self.texture.view(layer..=layer, 0..=5, 0..=levels)?)
    }

    pub fn load<T: bytemuck::Pod>(&self, coord: Texel, layer: usize, face: usize, level: usize) -> T {
        self.load_at(layer, face, Texel3::from(coord), level)
    }
    pub fn store<T: bytemuck::Pod>(&mut self, coord: Texel, layer: usize, face: usize, level: usize, value: T) {
        self.store_at(layer, face, Texel3::from(coord), level, value)
    }
}
