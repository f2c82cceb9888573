// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Generic textures: shared storage plus a window onto its sub-images.

A [`Texture`] is a cheap handle.  It holds a reference-counted [`Storage`] and
the range of layers, faces and levels of that storage it exposes.  Allocating a
texture creates the storage; [`Texture::view`] creates another handle onto the
same storage with a narrower range, without copying any bytes.  `Clone` is
likewise shallow.  Use [`Texture::duplicate`] for a deep copy.

All indices taken by this type (layer, face, level) are relative to the view.

# Examples

```
use ghosts::extent::Extent3d;
use ghosts::format::Format;
use ghosts::texture::{Target, Texture};

let texture = Texture::new(Target::Texture2DArray, Format::Rgba8Unorm, Extent3d::new_2d(8, 8), 4, 1, 4);
assert_eq!(texture.size(), 4 * (256 + 64 + 16 + 4));

// A view of layers 1..=2 and the two smallest levels, sharing the same bytes.
let mut view = texture.view(1..=2, 0..=0, 2..=3).unwrap();
assert_eq!(view.extent(), Extent3d::new_2d(2, 2));
view.data_mut(0, 0, 0).fill(7);
assert!(texture.data(1, 0, 2).iter().all(|b| *b == 7));
```
*/

pub mod builder;
pub mod image;

use std::cell::{Ref, RefMut};
use std::ops::{Range, RangeInclusive};
use std::rc::Rc;

use crate::addressing::Layout;
use crate::extent::Extent3d;
use crate::format::Format;
use crate::storage::{AllocError, Storage};

pub use builder::{LevelCount, TextureBuilder, TextureConfig};
pub use image::Image;

/// The kind of texture, which determines how its layers and faces are used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture3D,
    TextureCube,
    TextureCubeArray,
}

impl Target {
    /// Number of spatial axes a texel coordinate has.
    pub const fn axes(self) -> usize {
        match self {
            Target::Texture1D | Target::Texture1DArray => 1,
            Target::Texture3D => 3,
            _ => 2,
        }
    }
    pub const fn is_array(self) -> bool {
        matches!(self, Target::Texture1DArray | Target::Texture2DArray | Target::TextureCubeArray)
    }
    pub const fn is_cube(self) -> bool {
        matches!(self, Target::TextureCube | Target::TextureCubeArray)
    }
    /// Faces per layer.
    pub const fn faces(self) -> usize {
        if self.is_cube() { 6 } else { 1 }
    }

    /// True when a texture of this target may be wrapped as `other`.
    ///
    /// Wrapping may narrow the layer and face range (a 2D view of a cube map
    /// sees its first face) but never reinterprets dimensions.
    pub const fn can_view_as(self, other: Target) -> bool {
        use Target::*;
        match other {
            Texture1D | Texture1DArray => matches!(self, Texture1D | Texture1DArray),
            Texture2D => matches!(self, Texture2D | Texture2DArray | TextureCube | TextureCubeArray),
            Texture2DArray => matches!(self, Texture2D | Texture2DArray),
            Texture3D => matches!(self, Texture3D),
            TextureCube | TextureCubeArray => matches!(self, TextureCube | TextureCubeArray),
        }
    }

    /// Panics if the shape can't belong to this target.
    fn check_shape(self, extent: Extent3d, layers: usize, faces: usize) {
        match self.axes() {
            1 => assert!(extent.height == 1 && extent.depth == 1, "{self:?} must have height and depth 1, got {extent:?}"),
            2 => assert!(extent.depth == 1, "{self:?} must have depth 1, got {extent:?}"),
            _ => {}
        }
        if !self.is_array() {
            assert!(layers <= 1, "{self:?} can't have {layers} layers");
        }
        assert!(faces == self.faces() || layers == 0, "{self:?} must have {} faces, got {faces}", self.faces());
        if self.is_cube() {
            assert_eq!(extent.width, extent.height, "cube faces must be square");
        }
    }
}

/// A view construction request fell outside the source texture.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViewError {
    #[error("Can't view layers {base}..={max} of a texture with {count} layers")]
    LayerRange { base: usize, max: usize, count: usize },
    #[error("Can't view faces {base}..={max} of a texture with {count} faces")]
    FaceRange { base: usize, max: usize, count: usize },
    #[error("Can't view levels {base}..={max} of a texture with {count} levels")]
    LevelRange { base: usize, max: usize, count: usize },
    #[error("Can't view a {actual:?} as a {requested:?}")]
    IncompatibleTarget { actual: Target, requested: Target },
    #[error("Can't reinterpret {from:?} as {to:?}: block layouts differ")]
    IncompatibleFormat { from: Format, to: Format },
    #[error("Can't view an empty texture")]
    Empty,
}

/// Location of one sub-image, as handed to upload routines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubImage {
    /// Layer relative to the texture it was enumerated from.
    pub layer: usize,
    pub face: usize,
    pub level: usize,
    pub extent: Extent3d,
    /// Byte offset within the underlying storage buffer.
    pub offset: usize,
    /// Byte length, padded to whole blocks.
    pub size: usize,
}

/// A texture: shared storage plus the layers, faces and levels it exposes.
#[derive(Clone, Debug)]
pub struct Texture {
    storage: Option<Rc<Storage>>,
    target: Target,
    format: Format,
    layers: Range<usize>,
    faces: Range<usize>,
    levels: Range<usize>,
}

impl Default for Texture {
    /// An empty texture with no storage.
    fn default() -> Self {
        Self {
            storage: None,
            target: Target::Texture2D,
            format: Format::Rgba8Unorm,
            layers: 0..0,
            faces: 0..0,
            levels: 0..0,
        }
    }
}

/// Copies `pattern` positionally over `bytes`, repeating it as often as needed.
pub(crate) fn fill_pattern(bytes: &mut [u8], pattern: &[u8]) {
    if pattern.is_empty() {
        return;
    }
    for chunk in bytes.chunks_mut(pattern.len()) {
        chunk.copy_from_slice(&pattern[..chunk.len()]);
    }
}

pub(crate) fn warn_pattern_mismatch(format: Format, pattern_len: usize) {
    if pattern_len != format.block_size() {
        logwise::warn_sync!(
            "clear pattern is {pattern} bytes but {format} blocks are {block} bytes; copying bytes positionally",
            pattern = pattern_len,
            format = logwise::privacy::LogIt(&format),
            block = format.block_size()
        );
    }
}

impl Texture {
    fn from_storage(target: Target, storage: Storage) -> Self {
        let layout = storage.layout();
        let (layers, faces, levels, format) = (layout.layers(), layout.faces(), layout.levels(), layout.format());
        Self {
            storage: Some(Rc::new(storage)),
            target,
            format,
            layers: 0..layers,
            faces: 0..faces,
            levels: 0..levels,
        }
    }

    /// Allocates a zero-filled texture.
    ///
    /// # Panics
    ///
    /// Panics if the shape doesn't fit `target`: 1D textures must have height
    /// and depth 1, 2D and cube textures depth 1, cube textures 6 square faces,
    /// and non-array targets at most one layer.
    pub fn new(target: Target, format: Format, extent: Extent3d, layers: usize, faces: usize, levels: usize) -> Self {
        target.check_shape(extent, layers, faces);
        let layout = Layout::new(format, extent, layers, faces, levels);
        logwise::trace_sync!(
            "allocating {size} bytes of texture storage",
            size = layout.size()
        );
        Self::from_storage(target, Storage::new(layout))
    }

    /// Like [`Texture::new`], but reports allocation failure instead of aborting.
    pub fn try_new(target: Target, format: Format, extent: Extent3d, layers: usize, faces: usize, levels: usize) -> Result<Self, AllocError> {
        target.check_shape(extent, layers, faces);
        let layout = Layout::new(format, extent, layers, faces, levels);
        Ok(Self::from_storage(target, Storage::try_new(layout)?))
    }

    /// Wraps bytes already packed in layout order (layers, then faces, then levels).
    ///
    /// This is the entry point for loaders that produce a whole texture at once.
    ///
    /// # Panics
    ///
    /// Panics if the shape doesn't fit `target`, or `data` has the wrong length.
    pub fn from_bytes(target: Target, format: Format, extent: Extent3d, layers: usize, faces: usize, levels: usize, data: Vec<u8>) -> Self {
        target.check_shape(extent, layers, faces);
        Self::from_storage(target, Storage::from_bytes(Layout::new(format, extent, layers, faces, levels), data))
    }

    /// Allocates a texture described by `config`.
    pub fn with_config(config: &TextureConfig<'_>) -> Self {
        let levels = config.level_count();
        let texture = Self::new(config.target, config.format, config.extent, config.layers, config.target.faces(), levels);
        logwise::info_sync!(
            "allocated texture {name}: {size} bytes, {levels} levels",
            name = logwise::privacy::LogIt(&config.debug_name),
            size = texture.size(),
            levels = levels
        );
        texture
    }

    #[inline] fn layout(&self) -> Option<&Layout> {
        self.storage.as_deref().map(Storage::layout)
    }

    #[inline] pub fn target(&self) -> Target {
        self.target
    }
    #[inline] pub fn format(&self) -> Format {
        self.format
    }

    /// True when the texture exposes no bytes.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline] pub fn layers(&self) -> usize {
        self.layers.len()
    }
    #[inline] pub fn faces(&self) -> usize {
        self.faces.len()
    }
    #[inline] pub fn levels(&self) -> usize {
        self.levels.len()
    }

    /// First layer of the underlying storage this texture exposes.
    #[inline] pub fn base_layer(&self) -> usize {
        self.layers.start
    }
    /// Last layer of the underlying storage this texture exposes.
    ///
    /// Meaningless for an empty texture.
    #[inline] pub fn max_layer(&self) -> usize {
        self.layers.end.saturating_sub(1)
    }
    #[inline] pub fn base_face(&self) -> usize {
        self.faces.start
    }
    #[inline] pub fn max_face(&self) -> usize {
        self.faces.end.saturating_sub(1)
    }
    #[inline] pub fn base_level(&self) -> usize {
        self.levels.start
    }
    #[inline] pub fn max_level(&self) -> usize {
        self.levels.end.saturating_sub(1)
    }

    /// Extent of level 0 of this texture.
    pub fn extent(&self) -> Extent3d {
        if self.levels() == 0 {
            return Extent3d::default();
        }
        self.level_extent(0)
    }

    /// Extent of `level`.
    ///
    /// # Panics
    /// Panics if `level` is out of range.
    pub fn level_extent(&self, level: usize) -> Extent3d {
        assert!(level < self.levels(), "level {level} out of range (levels: {})", self.levels());
        self.layout().map(|l| l.level_extent(self.levels.start + level)).unwrap_or_default()
    }

    /// Bytes in one sub-image of `level`.
    ///
    /// # Panics
    /// Panics if `level` is out of range.
    pub fn level_size(&self, level: usize) -> usize {
        assert!(level < self.levels(), "level {level} out of range (levels: {})", self.levels());
        self.layout().map(|l| l.level_size(self.levels.start + level)).unwrap_or(0)
    }

    /// Bytes exposed by this texture, summed over every sub-image.
    pub fn size(&self) -> usize {
        let per_face: usize = (0..self.levels()).map(|level| self.level_size(level)).sum();
        per_face * self.faces() * self.layers()
    }

    /// Byte offset of a sub-image within the underlying storage.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub(crate) fn storage_offset(&self, layer: usize, face: usize, level: usize) -> usize {
        assert!(layer < self.layers(), "layer {layer} out of range (layers: {})", self.layers());
        assert!(face < self.faces(), "face {face} out of range (faces: {})", self.faces());
        assert!(level < self.levels(), "level {level} out of range (levels: {})", self.levels());
        self.layout()
            .map(|l| l.offset(self.layers.start + layer, self.faces.start + face, self.levels.start + level))
            .unwrap_or(0)
    }

    pub(crate) fn sub_image_range(&self, layer: usize, face: usize, level: usize) -> Range<usize> {
        let offset = self.storage_offset(layer, face, level);
        offset..offset + self.level_size(level)
    }

    /// # Panics
    /// Panics on an empty texture.
    pub(crate) fn storage(&self) -> &Rc<Storage> {
        self.storage.as_ref().expect("empty texture has no storage")
    }

    /// Borrows the bytes of one sub-image.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range, or the bytes are mutably borrowed
    /// through an aliasing view.
    pub fn data(&self, layer: usize, face: usize, level: usize) -> Ref<'_, [u8]> {
        let range = self.sub_image_range(layer, face, level);
        self.storage().bytes(range)
    }

    /// Mutably borrows the bytes of one sub-image.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range, or the bytes are borrowed through
    /// an aliasing view.
    pub fn data_mut(&mut self, layer: usize, face: usize, level: usize) -> RefMut<'_, [u8]> {
        let range = self.sub_image_range(layer, face, level);
        self.storage().bytes_mut(range)
    }

    /// Enumerates sub-images in layout order: layers outermost, then faces, then levels.
    pub fn sub_images(&self) -> impl Iterator<Item = SubImage> + '_ {
        let (layers, faces, levels) = (self.layers(), self.faces(), self.levels());
        (0..layers).flat_map(move |layer| {
            (0..faces).flat_map(move |face| {
                (0..levels).map(move |level| SubImage {
                    layer,
                    face,
                    level,
                    extent: self.level_extent(level),
                    offset: self.storage_offset(layer, face, level),
                    size: self.level_size(level),
                })
            })
        })
    }

    /// Handle to a single sub-image.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn image(&self, layer: usize, face: usize, level: usize) -> Image {
        Image::new(
            self.storage().clone(),
            self.sub_image_range(layer, face, level),
            self.level_extent(level),
            self.format,
        )
    }

    /// Creates a view of a sub-range of this texture's layers, faces and levels.
    ///
    /// The view shares storage with `self`; no bytes are copied.  Its extent is
    /// the extent of `levels.start()`.
    pub fn view(&self, layers: RangeInclusive<usize>, faces: RangeInclusive<usize>, levels: RangeInclusive<usize>) -> Result<Texture, ViewError> {
        if self.storage.is_none() {
            return Err(ViewError::Empty);
        }
        let check = |range: &RangeInclusive<usize>, count: usize| {
            range.start() <= range.end() && *range.end() < count
        };
        if !check(&layers, self.layers()) {
            return Err(ViewError::LayerRange { base: *layers.start(), max: *layers.end(), count: self.layers() });
        }
        if !check(&faces, self.faces()) {
            return Err(ViewError::FaceRange { base: *faces.start(), max: *faces.end(), count: self.faces() });
        }
        if !check(&levels, self.levels()) {
            return Err(ViewError::LevelRange { base: *levels.start(), max: *levels.end(), count: self.levels() });
        }
        logwise::trace_sync!(
            "view layers {l0}..={l1} faces {f0}..={f1} levels {m0}..={m1}",
            l0 = *layers.start(),
            l1 = *layers.end(),
            f0 = *faces.start(),
            f1 = *faces.end(),
            m0 = *levels.start(),
            m1 = *levels.end()
        );
        let narrow = |own: &Range<usize>, r: RangeInclusive<usize>| own.start + r.start()..own.start + r.end() + 1;
        Ok(Texture {
            storage: self.storage.clone(),
            target: self.target,
            format: self.format,
            layers: narrow(&self.layers, layers),
            faces: narrow(&self.faces, faces),
            levels: narrow(&self.levels, levels),
        })
    }

    /// Creates a view of a sub-range of levels, keeping every layer and face.
    pub fn view_levels(&self, levels: RangeInclusive<usize>) -> Result<Texture, ViewError> {
        if self.layers() == 0 || self.faces() == 0 {
            return Err(ViewError::Empty);
        }
        self.view(0..=self.layers() - 1, 0..=self.faces() - 1, levels)
    }

    /// Re-labels this texture as `target`, narrowing layers and faces to what
    /// `target` can address.
    pub(crate) fn retarget(&self, target: Target) -> Result<Texture, ViewError> {
        if !self.target.can_view_as(target) {
            return Err(ViewError::IncompatibleTarget { actual: self.target, requested: target });
        }
        if self.storage.is_none() || self.layers() == 0 {
            return Err(ViewError::Empty);
        }
        let layers = if target.is_array() { 0..=self.layers() - 1 } else { 0..=0 };
        let faces = if target.is_cube() { 0..=self.faces() - 1 } else { 0..=0 };
        let levels = 0..=self.levels().max(1) - 1;
        let mut view = self.view(layers, faces, levels)?;
        view.target = target;
        Ok(view)
    }

    /// Shares this texture's storage under a different format with the same block layout.
    pub fn reinterpret(&self, format: Format) -> Result<Texture, ViewError> {
        if !self.format.layout_compatible(format) {
            return Err(ViewError::IncompatibleFormat { from: self.format, to: format });
        }
        Ok(Texture { format, ..self.clone() })
    }

    /// Deep copy: fresh storage holding the same sub-images as this texture.
    ///
    /// The copy is laid out as a standalone texture, so its offsets start at 0
    /// even when `self` is a view.  Level extents are kept as they are in
    /// `self`, including for a tail of a block-compressed chain.
    pub fn duplicate(&self) -> Texture {
        if self.storage.is_none() {
            return Texture { target: self.target, format: self.format, ..Texture::default() };
        }
        let chain = self.storage().layout();
        let layout = Layout::starting_at(
            self.format,
            chain.extent(),
            chain.base_level() + self.levels.start,
            self.layers(),
            self.faces(),
            self.levels(),
        );
        let mut copy = Self::from_storage(self.target, Storage::new(layout));
        for sub in self.sub_images() {
            let source = self.data(sub.layer, sub.face, sub.level);
            copy.data_mut(sub.layer, sub.face, sub.level).copy_from_slice(&source);
        }
        copy
    }

    /// True when both textures expose the same bytes of the same storage.
    pub fn same_storage(&self, other: &Texture) -> bool {
        match (&self.storage, &other.storage) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Sets every byte of every sub-image to zero.
    pub fn clear(&mut self) {
        for sub in self.sub_images().collect::<Vec<_>>() {
            self.data_mut(sub.layer, sub.face, sub.level).fill(0);
        }
    }

    /// Fills every sub-image with copies of `pattern`.
    ///
    /// No conversion is performed: the bytes of `pattern` are copied
    /// positionally, one copy per `size_of::<T>()` bytes, so `T` should be the
    /// size of one block of [`Texture::format`].
    pub fn clear_with<T: bytemuck::Pod>(&mut self, pattern: T) {
        warn_pattern_mismatch(self.format, size_of::<T>());
        for sub in self.sub_images().collect::<Vec<_>>() {
            fill_pattern(&mut self.data_mut(sub.layer, sub.face, sub.level), bytemuck::bytes_of(&pattern));
        }
    }

    /// Fills every sub-image of `level` with copies of `pattern`.
    ///
    /// # Panics
    /// Panics if `level` is out of range.
    pub fn clear_level_with<T: bytemuck::Pod>(&mut self, level: usize, pattern: T) {
        warn_pattern_mismatch(self.format, size_of::<T>());
        for layer in 0..self.layers() {
            for face in 0..self.faces() {
                fill_pattern(&mut self.data_mut(layer, face, level), bytemuck::bytes_of(&pattern));
            }
        }
    }
}

impl PartialEq for Texture {
    /// Textures are equal when format, extent, level/layer/face counts and
    /// every stored byte match.  Target and storage identity are not compared.
    fn eq(&self, other: &Self) -> bool {
        if self.format != other.format
            || self.levels() != other.levels()
            || self.layers() != other.layers()
            || self.faces() != other.faces()
            || self.extent() != other.extent()
        {
            return false;
        }
        if self.same_storage(other)
            && self.layers == other.layers
            && self.faces == other.faces
            && self.levels == other.levels
        {
            return true;
        }
        self.sub_images().all(|sub| {
            *self.data(sub.layer, sub.face, sub.level) == *other.data(sub.layer, sub.face, sub.level)
        })
    }
}

impl Eq for Texture {}

#[cfg(test)]
mod tests {
    use super::{Target, Texture, ViewError};
    use crate::extent::Extent3d;
    use crate::format::Format;

    fn array_texture() -> Texture {
        let mut texture = Texture::new(Target::Texture2DArray, Format::R8Unorm, Extent3d::new_2d(4, 4), 3, 1, 3);
        for sub in texture.sub_images().collect::<Vec<_>>() {
            let value = (sub.layer * 10 + sub.level) as u8;
            texture.data_mut(sub.layer, 0, sub.level).fill(value);
        }
        texture
    }

    #[test]
    fn full_view_equals_source() {
        let texture = array_texture();
        let view = texture.view(0..=2, 0..=0, 0..=2).unwrap();
        assert_eq!(view, texture);
        assert!(view.same_storage(&texture));
    }

    #[test]
    fn view_offsets_are_relative() {
        let texture = array_texture();
        let view = texture.view(1..=2, 0..=0, 1..=2).unwrap();
        assert_eq!(view.layers(), 2);
        assert_eq!(view.levels(), 2);
        assert_eq!(view.base_layer(), 1);
        assert_eq!(view.max_level(), 2);
        assert_eq!(view.extent(), Extent3d::new_2d(2, 2));
        assert!(view.data(0, 0, 0).iter().all(|b| *b == 11));
        assert!(view.data(1, 0, 1).iter().all(|b| *b == 22));
    }

    #[test]
    fn view_of_view_composes() {
        let texture = array_texture();
        let outer = texture.view(1..=2, 0..=0, 0..=2).unwrap();
        let inner = outer.view(1..=1, 0..=0, 2..=2).unwrap();
        assert_eq!(inner.base_layer(), 2);
        assert_eq!(inner.base_level(), 2);
        assert!(inner.data(0, 0, 0).iter().all(|b| *b == 22));
    }

    #[test]
    fn overlapping_views_with_different_ranges_are_unequal() {
        let texture = array_texture();
        let a = texture.view(0..=1, 0..=0, 0..=2).unwrap();
        let b = texture.view(1..=2, 0..=0, 0..=2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn out_of_range_views_are_rejected() {
        let texture = array_texture();
        assert_eq!(
            texture.view(0..=3, 0..=0, 0..=0),
            Err(ViewError::LayerRange { base: 0, max: 3, count: 3 })
        );
        assert!(matches!(texture.view(0..=0, 0..=1, 0..=0), Err(ViewError::FaceRange { .. })));
        assert!(matches!(texture.view(0..=0, 0..=0, 2..=1), Err(ViewError::LevelRange { .. })));
        assert_eq!(Texture::default().view(0..=0, 0..=0, 0..=0), Err(ViewError::Empty));
    }

    #[test]
    fn duplicate_is_equal_and_independent() {
        let texture = array_texture();
        let view = texture.view(1..=1, 0..=0, 1..=2).unwrap();
        let mut copy = view.duplicate();
        assert_eq!(copy, view);
        assert!(!copy.same_storage(&view));
        copy.clear();
        assert_ne!(copy, view);
        assert!(view.data(0, 0, 0).iter().all(|b| *b == 11));
    }

    #[test]
    fn duplicate_of_compressed_tail_keeps_level_sizes() {
        let mut texture = Texture::new(Target::Texture2D, Format::Bc1RgbaUnorm, Extent3d::new_2d(18, 18), 1, 1, 3);
        texture.data_mut(0, 0, 2).fill(7);
        let tail = texture.view(0..=0, 0..=0, 1..=2).unwrap();
        assert_eq!(tail.level_extent(0), Extent3d::new_2d(12, 12));
        assert_eq!(tail.level_extent(1), Extent3d::new_2d(4, 4));

        let copy = tail.duplicate();
        assert_eq!(copy.level_extent(0), Extent3d::new_2d(12, 12));
        assert_eq!(copy.level_extent(1), Extent3d::new_2d(4, 4));
        assert_eq!(copy.size(), tail.size());
        assert_eq!(copy, tail);
        assert!(copy.data(0, 0, 1).iter().all(|b| *b == 7));

        // a duplicate of the duplicate is still rooted at the original chain
        assert_eq!(copy.view_levels(1..=1).unwrap().duplicate().level_extent(0), Extent3d::new_2d(4, 4));
    }

    #[test]
    fn clear_with_pattern_is_positional() {
        let mut texture = Texture::new(Target::Texture2D, Format::Rgba8Unorm, Extent3d::new_2d(2, 1), 1, 1, 1);
        texture.clear_with([1u8, 2, 3, 4]);
        assert_eq!(&*texture.data(0, 0, 0), &[1, 2, 3, 4, 1, 2, 3, 4]);
        // a 2-byte pattern is repeated, not converted
        texture.clear_with(0x0201u16.to_le());
        assert_eq!(&*texture.data(0, 0, 0), &[1, 2, 1, 2, 1, 2, 1, 2]);
    }

    #[test]
    fn clearing_a_view_leaves_the_rest_alone() {
        let texture = array_texture();
        let mut view = texture.view(0..=0, 0..=0, 1..=1).unwrap();
        view.clear_with(0xFFu8);
        assert!(texture.data(0, 0, 1).iter().all(|b| *b == 0xFF));
        assert!(texture.data(0, 0, 0).iter().all(|b| *b == 0));
        assert!(texture.data(0, 0, 2).iter().all(|b| *b == 2));
    }

    #[test]
    fn reinterpret_requires_matching_blocks() {
        let texture = Texture::new(Target::Texture2D, Format::Rgba8Unorm, Extent3d::new_2d(2, 2), 1, 1, 1);
        let as_uint = texture.reinterpret(Format::R32Uint).unwrap();
        assert_eq!(as_uint.format(), Format::R32Uint);
        assert!(as_uint.same_storage(&texture));
        assert!(matches!(texture.reinterpret(Format::R8Unorm), Err(ViewError::IncompatibleFormat { .. })));
    }

    #[test]
    fn retarget_narrows_layers() {
        let texture = Texture::new(Target::TextureCubeArray, Format::R8Unorm, Extent3d::new_2d(4, 4), 2, 6, 1);
        let cube = texture.retarget(Target::TextureCube).unwrap();
        assert_eq!(cube.layers(), 1);
        assert_eq!(cube.faces(), 6);
        let flat = texture.retarget(Target::Texture2D).unwrap();
        assert_eq!((flat.layers(), flat.faces()), (1, 1));
        assert!(matches!(texture.retarget(Target::Texture3D), Err(ViewError::IncompatibleTarget { .. })));
    }

    #[test]
    fn empty_textures() {
        let empty = Texture::default();
        assert!(empty.is_empty());
        assert_eq!(empty, Texture::default());
        assert_eq!(empty.sub_images().count(), 0);
        let no_layers = Texture::new(Target::Texture2DArray, Format::R8Unorm, Extent3d::new_2d(2, 2), 0, 1, 1);
        assert!(no_layers.is_empty());
    }

    #[test]
    fn packed_bytes_follow_layout_order() {
        let texture = Texture::from_bytes(Target::Texture1DArray, Format::R8Unorm, Extent3d::new_1d(2), 2, 1, 2, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(&*texture.data(0, 0, 1), &[3]);
        assert_eq!(&*texture.data(1, 0, 0), &[4, 5]);
        assert_eq!(&*texture.data(1, 0, 1), &[6]);
        let fresh = Texture::try_new(Target::Texture1DArray, Format::R8Unorm, Extent3d::new_1d(2), 2, 1, 2).unwrap();
        assert_eq!(fresh.size(), 6);
        assert_ne!(fresh, texture);
    }

    #[test]
    #[should_panic(expected = "must have 6 faces")]
    fn cube_needs_six_faces() {
        Texture::new(Target::TextureCube, Format::R8Unorm, Extent3d::new_2d(2, 2), 1, 1, 1);
    }
}
