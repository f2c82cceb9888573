// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Typed texture views: 1D, 2D, 3D, cube and array textures.

A [`TypedTexture`] wraps a generic [`Texture`] whose target matches its
[`Shape`], and adds texel access in the shape's native coordinates.  The
aliases [`Texture1D`], [`Texture2D`], [`Texture3D`], [`TextureCube`] and their
array forms are what you normally name.

Typed views share storage exactly like generic ones: converting between the
two, or taking a sub-range of levels, never copies bytes.

# Examples

```
use ghosts::extent::Texel;
use ghosts::format::Format;
use ghosts::typed::Texture2D;

let mut texture = Texture2D::new_complete(Format::Rgba8Unorm, 16, 16);
assert_eq!(texture.levels(), 5);
assert_eq!(texture.dimensions(2), Texel::new(4, 4));

texture.store(Texel::new(3, 1), 2, [255u8, 0, 0, 255]);
assert_eq!(texture.load::<[u8; 4]>(Texel::new(3, 1), 2), [255, 0, 0, 255]);
```
*/

mod cube;
pub mod png;
mod texture1d;
mod texture2d;
mod texture3d;

use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use crate::extent::{Extent3d, Texel, Texel3};
use crate::format::Format;
use crate::texture::{Image, Target, Texture, ViewError};

mod sealed {
    pub trait Sealed {}
}

/// The dimensionality of a typed texture.
///
/// This trait is sealed: the shapes are the zero-sized markers in this module.
pub trait Shape: sealed::Sealed + Debug + Copy + 'static {
    /// Target of the textures this shape wraps.
    const TARGET: Target;
    /// Texel coordinate in this shape's native arity.
    type Coord: Copy + Debug + PartialEq + Into<Texel3>;
    /// Projects an extent onto [`Shape::Coord`].
    fn project(extent: Extent3d) -> Self::Coord;
}

macro_rules! shape {
    ($(#[$doc:meta])* $name:ident, $target:ident, $coord:ty, $project:expr) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name;
        impl sealed::Sealed for $name {}
        impl Shape for $name {
            const TARGET: Target = Target::$target;
            type Coord = $coord;
            fn project(extent: Extent3d) -> $coord {
                let project: fn(Extent3d) -> $coord = $project;
                project(extent)
            }
        }
    };
}

shape!(/// One-dimensional.
    Line, Texture1D, u32, |e| e.width);
shape!(/// Array of one-dimensional layers.
    LineArray, Texture1DArray, u32, |e| e.width);
shape!(/// Two-dimensional.
    Plane, Texture2D, Texel, |e| Texel::new(e.width, e.height));
shape!(/// Array of two-dimensional layers.
    PlaneArray, Texture2DArray, Texel, |e| Texel::new(e.width, e.height));
shape!(/// Three-dimensional.
    Volume, Texture3D, Texel3, |e| Texel3::new(e.width, e.height, e.depth));
shape!(/// Six square faces.
    Cube, TextureCube, Texel, |e| Texel::new(e.width, e.height));
shape!(/// Array of cube maps.
    CubeArray, TextureCubeArray, Texel, |e| Texel::new(e.width, e.height));

pub type Texture1D = TypedTexture<Line>;
pub type Texture1DArray = TypedTexture<LineArray>;
pub type Texture2D = TypedTexture<Plane>;
pub type Texture2DArray = TypedTexture<PlaneArray>;
pub type Texture3D = TypedTexture<Volume>;
pub type TextureCube = TypedTexture<Cube>;
pub type TextureCubeArray = TypedTexture<CubeArray>;

/// Where one sub-image of a view starts, and how big it is.
///
/// Built once when the view is constructed so texel access needn't walk the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct LevelCache {
    /// Byte offset within the underlying storage.
    offset: usize,
    extent: Extent3d,
    #[cfg(debug_assertions)]
    size: usize,
}

/// A texture viewed through a [`Shape`].
#[derive(Clone, Debug)]
pub struct TypedTexture<S: Shape> {
    pub(crate) texture: Texture,
    caches: Vec<LevelCache>,
    shape: PhantomData<S>,
}

impl<S: Shape> TypedTexture<S> {
    /// Wraps a texture already known to have target `S::TARGET`.
    pub(crate) fn wrap(texture: Texture) -> Self {
        debug_assert_eq!(texture.target(), S::TARGET);
        let caches = texture
            .sub_images()
            .map(|sub| LevelCache {
                offset: sub.offset,
                extent: sub.extent,
                #[cfg(debug_assertions)]
                size: sub.size,
            })
            .collect();
        Self { texture, caches, shape: PhantomData }
    }

    fn allocate(format: Format, extent: Extent3d, layers: usize, levels: usize) -> Self {
        Self::wrap(Texture::new(S::TARGET, format, extent, layers, S::TARGET.faces(), levels))
    }

    /// Views a generic texture through this shape.
    ///
    /// Fails if the texture's target can't be viewed as `S::TARGET`.  Array and
    /// cube sources are narrowed to their first layer or face when the shape
    /// has none.
    pub fn from_texture(texture: Texture) -> Result<Self, ViewError> {
        Ok(Self::wrap(texture.retarget(S::TARGET)?))
    }

    /// Views a sub-range of this texture's levels, sharing storage.
    pub fn view(&self, levels: RangeInclusive<usize>) -> Result<Self, ViewError> {
        Ok(Self::wrap(self.texture.view_levels(levels)?))
    }

    #[inline] pub fn texture(&self) -> &Texture {
        &self.texture
    }
    #[inline] pub fn into_texture(self) -> Texture {
        self.texture
    }
    #[inline] pub fn format(&self) -> Format {
        self.texture.format()
    }
    #[inline] pub fn levels(&self) -> usize {
        self.texture.levels()
    }
    #[inline] pub fn layers(&self) -> usize {
        self.texture.layers()
    }
    #[inline] pub fn faces(&self) -> usize {
        self.texture.faces()
    }
    #[inline] pub fn size(&self) -> usize {
        self.texture.size()
    }
    #[inline] pub fn is_empty(&self) -> bool {
        self.texture.is_empty()
    }

    /// Extent of `level` in this shape's native coordinates.
    ///
    /// # Panics
    /// Panics if `level` is out of range.
    pub fn dimensions(&self, level: usize) -> S::Coord {
        S::project(self.texture.level_extent(level))
    }

    /// Handle to one sub-image.
    pub fn image(&self, layer: usize, face: usize, level: usize) -> Image {
        self.texture.image(layer, face, level)
    }

    pub fn clear(&mut self) {
        self.texture.clear();
    }
    /// Fills every sub-image with copies of `pattern`, byte for byte.
    pub fn clear_with<T: bytemuck::Pod>(&mut self, pattern: T) {
        self.texture.clear_with(pattern);
    }
    /// Fills every sub-image of `level` with copies of `pattern`, byte for byte.
    pub fn clear_level_with<T: bytemuck::Pod>(&mut self, level: usize, pattern: T) {
        self.texture.clear_level_with(level, pattern);
    }

    fn cache(&self, layer: usize, face: usize, level: usize) -> &LevelCache {
        assert!(layer < self.layers(), "layer {layer} out of range (layers: {})", self.layers());
        assert!(face < self.faces(), "face {face} out of range (faces: {})", self.faces());
        assert!(level < self.levels(), "level {level} out of range (levels: {})", self.levels());
        &self.caches[(layer * self.faces() + face) * self.levels() + level]
    }

    /// Byte range of one texel within the underlying storage.
    fn texel_range(&self, layer: usize, face: usize, coord: Texel3, level: usize, len: usize) -> std::ops::Range<usize> {
        let format = self.format();
        assert!(!format.is_compressed(), "texel access to compressed format {format:?}");
        debug_assert_eq!(len, format.block_size(), "texel type doesn't match {format:?}");
        let cache = self.cache(layer, face, level);
        assert!(cache.extent.contains(coord), "texel {coord:?} outside level {level} ({:?})", cache.extent);
        let start = cache.offset + coord.linear_index(cache.extent) * format.block_size();
        #[cfg(debug_assertions)]
        debug_assert!(start + len <= cache.offset + cache.size);
        start..start + len
    }

    pub(crate) fn load_at<T: bytemuck::Pod>(&self, layer: usize, face: usize, coord: Texel3, level: usize) -> T {
        let range = self.texel_range(layer, face, coord, level, size_of::<T>());
        bytemuck::pod_read_unaligned(&self.texture.storage().bytes(range))
    }

    pub(crate) fn store_at<T: bytemuck::Pod>(&mut self, layer: usize, face: usize, coord: Texel3, level: usize, value: T) {
        let range = self.texel_range(layer, face, coord, level, size_of::<T>());
        self.texture.storage().bytes_mut(range).copy_from_slice(bytemuck::bytes_of(&value));
    }
}

impl<S: Shape> PartialEq for TypedTexture<S> {
    fn eq(&self, other: &Self) -> bool {
        self.texture == other.texture
    }
}

impl<S: Shape> Eq for TypedTexture<S> {}

impl<S: Shape> TryFrom<Texture> for TypedTexture<S> {
    type Error = ViewError;
    fn try_from(texture: Texture) -> Result<Self, ViewError> {
        Self::from_texture(texture)
    }
}

impl<S: Shape> From<TypedTexture<S>> for Texture {
    fn from(typed: TypedTexture<S>) -> Texture {
        typed.texture
    }
}
