// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Mipmap chain generation.

Each level is produced from the one before it by halving every filtered axis.
Layers and faces are filtered independently; a cube face never bleeds into its
neighbour.  The nearest filter copies texel bytes unchanged.  The linear filter decodes
texels to [`Channels`](crate::format::codec::Channels), averages and encodes
back, so every uncompressed format is supported, including packed and sRGB
ones.  Compressed formats are rejected.

# Examples

```
use ghosts::extent::Texel;
use ghosts::format::Format;
use ghosts::mipmap::Filter;
use ghosts::typed::Texture2D;

let mut source = Texture2D::new_complete(Format::Rgba8Unorm, 4, 4);
source.clear_level_with(0, [255u8, 0, 0, 255]);

let filtered = source.generate_mipmaps(Filter::Linear).unwrap();
assert_eq!(filtered.load::<[u8; 4]>(Texel::ZERO, 2), [255, 0, 0, 255]);
// the source is untouched
assert_eq!(source.load::<[u8; 4]>(Texel::ZERO, 2), [0, 0, 0, 0]);
```
*/

use crate::extent::{Extent3d, Texel3};
use crate::format::Format;
use crate::format::codec::{self, Channels};
use crate::texture::Texture;
use crate::typed::{Shape, TypedTexture};

/// How each texel of a smaller level is computed from the larger one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Copy the bytes of the texel at twice the destination coordinate.
    Nearest,
    /// Average the 2, 4 or 8 texels the destination texel covers.
    Linear,
}

/// How sample coordinates past the edge of a level are resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Wrap {
    /// Use the nearest edge texel.
    #[default]
    ClampToEdge,
    /// Wrap around to the opposite edge.
    Repeat,
    /// Reflect back from the edge.
    MirrorRepeat,
}

impl Wrap {
    /// Maps `coord` onto `0..len`.
    fn resolve(self, coord: u32, len: u32) -> u32 {
        let len = len.max(1);
        match self {
            Wrap::ClampToEdge => coord.min(len - 1),
            Wrap::Repeat => coord % len,
            Wrap::MirrorRepeat => {
                let m = coord % (2 * len);
                if m < len { m } else { 2 * len - 1 - m }
            }
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MipmapError {
    #[error("Can't filter compressed format {0:?}")]
    CompressedFormat(Format),
}

/// One source level of one layer and face.
struct SourceLevel {
    extent: Extent3d,
    block: usize,
    bytes: Vec<u8>,
    /// Decoded texels; only filled for [`Filter::Linear`].
    texels: Vec<Channels>,
}

impl SourceLevel {
    fn read(format: Format, extent: Extent3d, bytes: &[u8], filter: Filter) -> Self {
        let block = format.block_size();
        let texels = match filter {
            Filter::Nearest => Vec::new(),
            Filter::Linear => bytes
                .chunks_exact(block)
                .take(extent.texel_count())
                .map(|texel| codec::decode(format, texel))
                .collect(),
        };
        Self { extent, block, bytes: bytes.to_vec(), texels }
    }

    fn index(&self, x: u32, y: u32, z: u32, wrap: Wrap) -> usize {
        Texel3::new(
            wrap.resolve(x, self.extent.width),
            wrap.resolve(y, self.extent.height),
            wrap.resolve(z, self.extent.depth),
        )
        .linear_index(self.extent)
    }

    /// Raw bytes of the texel at twice `dst`.
    fn nearest(&self, dst: Texel3, wrap: Wrap) -> &[u8] {
        let start = self.index(2 * dst.x, 2 * dst.y, 2 * dst.z, wrap) * self.block;
        &self.bytes[start..start + self.block]
    }

    /// Average of the texels `dst` covers along the first `axes` axes.
    fn average(&self, dst: Texel3, axes: usize, wrap: Wrap) -> Channels {
        let span = |axis: usize| if axis < axes { 2 } else { 1 };
        let (sx, sy, sz) = (span(0), span(1), span(2));
        // unfiltered axes sample their own coordinate, which is 0
        let x = 2 * dst.x;
        let y = if axes > 1 { 2 * dst.y } else { dst.y };
        let z = if axes > 2 { 2 * dst.z } else { dst.z };
        let mut sum = [0.0f64; 4];
        for dz in 0..sz {
            for dy in 0..sy {
                for dx in 0..sx {
                    let texel = self.texels[self.index(x + dx, y + dy, z + dz, wrap)];
                    for (s, t) in sum.iter_mut().zip(texel) {
                        *s += t;
                    }
                }
            }
        }
        let count = (sx * sy * sz) as f64;
        sum.map(|s| s / count)
    }
}

/// Fills levels 1 and above of every layer and face from level 0.
///
/// Level indices are relative to `texture`, so generating on a view of
/// levels 2..=4 filters level 2 into 3 and 3 into 4 of the underlying
/// storage.  Level 0 is left untouched.  Nothing is reallocated.
pub fn generate_mipmaps_in_place(texture: &mut Texture, filter: Filter, wrap: Wrap) -> Result<(), MipmapError> {
    let format = texture.format();
    if format.is_compressed() {
        return Err(MipmapError::CompressedFormat(format));
    }
    let _interval = logwise::profile_begin!("generate_mipmaps_in_place");
    let axes = texture.target().axes();
    logwise::trace_sync!(
        "generating {levels} levels for {layers} layers, {faces} faces",
        levels = texture.levels(),
        layers = texture.layers(),
        faces = texture.faces()
    );
    for layer in 0..texture.layers() {
        for face in 0..texture.faces() {
            for level in 1..texture.levels() {
                let source = SourceLevel::read(
                    format,
                    texture.level_extent(level - 1),
                    &texture.data(layer, face, level - 1),
                    filter,
                );
                let extent = texture.level_extent(level);
                let mut dst = texture.data_mut(layer, face, level);
                let block = format.block_size();
                for z in 0..extent.depth {
                    for y in 0..extent.height {
                        for x in 0..extent.width {
                            let texel = Texel3::new(x, y, z);
                            let start = texel.linear_index(extent) * block;
                            let out = &mut dst[start..start + block];
                            match filter {
                                Filter::Nearest => out.copy_from_slice(source.nearest(texel, wrap)),
                                Filter::Linear => codec::encode(format, source.average(texel, axes, wrap), out),
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Copies `texture` and generates the copy's mipmaps, leaving `texture` untouched.
///
/// Uses [`Wrap::ClampToEdge`].
pub fn generate_mipmaps(texture: &Texture, filter: Filter) -> Result<Texture, MipmapError> {
    if texture.format().is_compressed() {
        return Err(MipmapError::CompressedFormat(texture.format()));
    }
    let mut copy = texture.duplicate();
    generate_mipmaps_in_place(&mut copy, filter, Wrap::ClampToEdge)?;
    Ok(copy)
}

impl<S: Shape> TypedTexture<S> {
    /// See [`generate_mipmaps_in_place`].
    pub fn generate_mipmaps_in_place(&mut self, filter: Filter, wrap: Wrap) -> Result<(), MipmapError> {
        generate_mipmaps_in_place(&mut self.texture, filter, wrap)
    }

    /// See [`generate_mipmaps`].
    pub fn generate_mipmaps(&self, filter: Filter) -> Result<Self, MipmapError> {
        Ok(Self::wrap(generate_mipmaps(&self.texture, filter)?))
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_mipmaps, generate_mipmaps_in_place, Filter, MipmapError, Wrap};
    use crate::extent::{Extent3d, Texel, Texel3};
    use crate::format::Format;
    use crate::texture::{Target, Texture};
    use crate::typed::{Texture1D, Texture2D, Texture2DArray, Texture3D, TextureCube};

    #[test]
    fn wrap_modes() {
        assert_eq!(Wrap::ClampToEdge.resolve(5, 4), 3);
        assert_eq!(Wrap::Repeat.resolve(5, 4), 1);
        assert_eq!(Wrap::MirrorRepeat.resolve(5, 4), 2);
        assert_eq!(Wrap::MirrorRepeat.resolve(8, 4), 0);
        assert_eq!(Wrap::ClampToEdge.resolve(1, 1), 0);
    }

    #[test]
    fn linear_averages_footprint() {
        let mut texture = Texture2D::new(Format::R8Unorm, 2, 2, 2);
        texture.store(Texel::new(0, 0), 0, 0u8);
        texture.store(Texel::new(1, 0), 0, 100u8);
        texture.store(Texel::new(0, 1), 0, 200u8);
        texture.store(Texel::new(1, 1), 0, 100u8);
        texture.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge).unwrap();
        assert_eq!(texture.load::<u8>(Texel::ZERO, 1), 100);
    }

    #[test]
    fn nearest_copies_even_texels() {
        let mut texture = Texture1D::new(Format::R32Uint, 8, 4);
        for x in 0..8 {
            texture.store(x, 0, x * 10);
        }
        texture.generate_mipmaps_in_place(Filter::Nearest, Wrap::ClampToEdge).unwrap();
        assert_eq!(texture.load::<u32>(1, 1), 20);
        assert_eq!(texture.load::<u32>(3, 1), 60);
        assert_eq!(texture.load::<u32>(1, 2), 40);
        assert_eq!(texture.load::<u32>(0, 3), 0);
    }

    #[test]
    fn one_dimensional_linear_uses_two_samples() {
        let mut texture = Texture1D::new(Format::R32Sfloat, 4, 2);
        for (x, v) in [1.0f32, 3.0, 5.0, 9.0].into_iter().enumerate() {
            texture.store(x as u32, 0, v);
        }
        texture.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge).unwrap();
        assert_eq!(texture.load::<f32>(0, 1), 2.0);
        assert_eq!(texture.load::<f32>(1, 1), 7.0);
    }

    #[test]
    fn volume_linear_uses_eight_samples() {
        let mut texture = Texture3D::new(Format::R32Sfloat, Extent3d::new(2, 2, 2), 2);
        texture.store(Texel3::new(1, 1, 1), 0, 8.0f32);
        texture.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge).unwrap();
        assert_eq!(texture.load::<f32>(Texel3::ZERO, 1), 1.0);
    }

    #[test]
    fn layers_do_not_blend() {
        let mut array = Texture2DArray::new(Format::R8Unorm, 2, 2, 2, 2);
        array.texture.view(1..=1, 0..=0, 0..=0).unwrap().clear_with(255u8);
        array.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge).unwrap();
        assert_eq!(array.load::<u8>(Texel::ZERO, 0, 1), 0);
        assert_eq!(array.load::<u8>(Texel::ZERO, 1, 1), 255);
    }

    #[test]
    fn cube_faces_do_not_blend() {
        let mut cube = TextureCube::new_complete(Format::Rgba8Unorm, 4);
        cube.store(Texel::new(0, 0), 2, 0, [255u8; 4]);
        cube.generate_mipmaps_in_place(Filter::Nearest, Wrap::ClampToEdge).unwrap();
        for face in 0..6 {
            let expected = if face == 2 { [255u8; 4] } else { [0; 4] };
            assert_eq!(cube.load::<[u8; 4]>(Texel::ZERO, face, 2), expected);
        }
    }

    #[test]
    fn view_generation_starts_at_view_base() {
        let mut texture = Texture2D::new(Format::R8Unorm, 8, 8, 4);
        texture.clear_level_with(1, 40u8);
        let mut tail = texture.view(1..=3).unwrap();
        tail.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge).unwrap();
        assert_eq!(texture.load::<u8>(Texel::ZERO, 0), 0);
        assert_eq!(texture.load::<u8>(Texel::ZERO, 3), 40);
    }

    #[test]
    fn wrapper_copies() {
        let mut source = Texture::new(Target::Texture2D, Format::Rgba8Unorm, Extent3d::new_2d(4, 4), 1, 1, 3);
        source.clear_level_with(0, [9u8, 9, 9, 9]);
        let before = source.duplicate();
        let generated = generate_mipmaps(&source, Filter::Linear).unwrap();
        assert_eq!(source, before);
        assert_ne!(generated, source);
        assert!(!generated.same_storage(&source));
        assert!(generated.data(0, 0, 2).iter().all(|b| *b == 9));
    }

    #[test]
    fn nearest_keeps_bytes_decode_would_change() {
        // 0x80 and 0x81 both decode to -1.0 in snorm
        let mut texture = Texture2D::new(Format::Rgba8Snorm, 2, 2, 2);
        texture.clear_level_with(0, [0x80u8; 4]);
        texture.generate_mipmaps_in_place(Filter::Nearest, Wrap::ClampToEdge).unwrap();
        assert_eq!(texture.load::<[u8; 4]>(Texel::ZERO, 1), [0x80; 4]);

        let mut nan = Texture1D::new(Format::R32Sfloat, 4, 3);
        nan.store(0, 0, 0x7FC0_1234u32);
        nan.generate_mipmaps_in_place(Filter::Nearest, Wrap::ClampToEdge).unwrap();
        assert_eq!(nan.load::<u32>(0, 2), 0x7FC0_1234);
    }

    #[test]
    fn compressed_is_rejected() {
        let mut texture = Texture::new(Target::Texture2D, Format::Bc7RgbaUnorm, Extent3d::new_2d(8, 8), 1, 1, 2);
        assert_eq!(
            generate_mipmaps_in_place(&mut texture, Filter::Linear, Wrap::ClampToEdge),
            Err(MipmapError::CompressedFormat(Format::Bc7RgbaUnorm))
        );
        let tail = Texture::new(Target::Texture2D, Format::Bc1RgbaUnorm, Extent3d::new_2d(18, 18), 1, 1, 3)
            .view_levels(1..=2)
            .unwrap();
        assert_eq!(
            generate_mipmaps(&tail, Filter::Linear),
            Err(MipmapError::CompressedFormat(Format::Bc1RgbaUnorm))
        );
    }
}
