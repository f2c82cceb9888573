// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Two-dimensional textures and arrays of them.

use std::ops::RangeInclusive;

use crate::addressing::complete_level_count;
use crate::extent::{Extent3d, Texel, Texel3};
use crate::format::Format;
use crate::texture::{Image, ViewError};
use crate::typed::{Texture2D, Texture2DArray};

impl Texture2D {
    /// Allocates a zero-filled texture with `levels` mipmap levels.
    pub fn new(format: Format, width: u32, height: u32, levels: usize) -> Self {
        Self::allocate(format, Extent3d::new_2d(width, height), 1, levels)
    }
    /// Allocates a zero-filled texture with a complete mipmap chain.
    pub fn new_complete(format: Format, width: u32, height: u32) -> Self {
        Self::new(format, width, height, complete_level_count(Extent3d::new_2d(width, height)))
    }

    /// Handle to `level`.
    pub fn level(&self, level: usize) -> Image {
        self.image(0, 0, level)
    }

    /// Reads the texel at `coord` of `level` as `T`.
    ///
    /// `T` should be exactly one texel of [`Self::format`], e.g. `[u8; 4]` for
    /// RGBA8 or [`half::f16`] for R16 float.
    ///
    /// # Panics
    /// Panics if the format is compressed, or `coord` or `level` is out of range.
    pub fn load<T: bytemuck::Pod>(&self, coord: Texel, level: usize) -> T {
        self.load_at(0, 0, Texel3::from(coord), level)
    }
    /// Writes the texel at `coord` of `level`.
    pub fn store<T: bytemuck::Pod>(&mut self, coord: Texel, level: usize, value: T) {
        self.store_at(0, 0, Texel3::from(coord), level, value)
    }
}

impl Texture2DArray {
    pub fn new(format: Format, width: u32, height: u32, layers: usize, levels: usize) -> Self {
        Self::allocate(format, Extent3d::new_2d(width, height), layers, levels)
    }
    pub fn new_complete(format: Format, width: u32, height: u32, layers: usize) -> Self {
        Self::new(format, width, height, layers, complete_level_count(Extent3d::new_2d(width, height)))
    }

    /// Views a sub-range of layers and levels, sharing storage.
    pub fn view_layers(&self, layers: RangeInclusive<usize>, levels: RangeInclusive<usize>) -> Result<Self, ViewError> {
        Ok(Self::wrap(self.texture.view(layers, 0..=0, levels)?))
    }

    /// One layer as a [`Texture2D`], sharing storage.
    pub fn layer(&self, layer: usize) -> Result<Texture2D, ViewError> {
        let levels = self.levels().max(1) - 1;
        Texture2D::from_texture(self.texture.view(layer..=layer, 0..=0, 0..=levels)?)
    }

    pub fn load<T: bytemuck::Pod>(&self, coord: Texel, layer: usize, level: usize) -> T {
        self.load_at(layer, 0, Texel3::from(coord), level)
    }
    pub fn store<T: bytemuck::Pod>(&mut self, coord: Texel, layer: usize, level: usize, value: T) {
        self.store_at(layer, 0, Texel3::from(coord), level, value)
    }
}

#[cfg(test)]
mod tests {
    use crate::extent::Texel;
    use crate::format::Format;
    use crate::typed::{Texture2D, Texture2DArray};
    use half::f16;

    #[test]
    fn store_then_load() {
        let mut texture = Texture2D::new(Format::Rgba16Sfloat, 5, 3, 2);
        let value = [f16::from_f32(0.25), f16::from_f32(-1.0), f16::ZERO, f16::ONE];
        texture.store(Texel::new(4, 2), 0, value);
        texture.store(Texel::new(1, 0), 1, value);
        assert_eq!(texture.load::<[f16; 4]>(Texel::new(4, 2), 0), value);
        assert_eq!(texture.load::<[f16; 4]>(Texel::new(1, 0), 1), value);
        assert_eq!(texture.load::<[f16; 4]>(Texel::new(0, 0), 1), [f16::ZERO; 4]);
        assert_eq!(texture.dimensions(1), Texel::new(2, 1));
    }

    #[test]
    fn clear_one_level() {
        let mut texture = Texture2D::new(Format::Rgba8Unorm, 4, 4, 3);
        texture.clear_level_with(1, [1u8, 2, 3, 4]);
        assert_eq!(texture.load::<[u8; 4]>(Texel::new(1, 1), 1), [1, 2, 3, 4]);
        assert_eq!(texture.load::<[u8; 4]>(Texel::new(0, 0), 0), [0; 4]);
        assert_eq!(texture.load::<[u8; 4]>(Texel::new(0, 0), 2), [0; 4]);
        texture.clear();
        assert_eq!(texture.load::<[u8; 4]>(Texel::new(1, 1), 1), [0; 4]);
    }

    #[test]
    fn array_layers_share_storage() {
        let mut array = Texture2DArray::new_complete(Format::R32Uint, 4, 4, 2);
        assert_eq!(array.levels(), 3);
        let layer = array.layer(1).unwrap();
        array.store(Texel::new(0, 1), 1, 1, 77u32);
        assert_eq!(layer.load::<u32>(Texel::new(0, 1), 1), 77);
        assert!(layer.texture().same_storage(array.texture()));
    }
}
