// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! A handle to one sub-image of a texture.

use std::cell::{Ref, RefMut};
use std::ops::Range;
use std::rc::Rc;

use crate::extent::{Extent3d, Texel3};
use crate::format::Format;
use crate::storage::Storage;
use crate::texture::{fill_pattern, warn_pattern_mismatch};

/// A single (layer, face, level) of a texture.
///
/// Shares storage with the texture it came from; writes through an `Image`
/// are visible through every texture and view of that storage.
#[derive(Clone, Debug)]
pub struct Image {
    storage: Rc<Storage>,
    range: Range<usize>,
    extent: Extent3d,
    format: Format,
}

impl Image {
    pub(crate) fn new(storage: Rc<Storage>, range: Range<usize>, extent: Extent3d, format: Format) -> Self {
        Self { storage, range, extent, format }
    }

    #[inline] pub fn extent(&self) -> Extent3d {
        self.extent
    }
    #[inline] pub fn format(&self) -> Format {
        self.format
    }
    /// Bytes in this image.
    #[inline] pub fn size(&self) -> usize {
        self.range.len()
    }

    pub fn data(&self) -> Ref<'_, [u8]> {
        self.storage.bytes(self.range.clone())
    }
    pub fn data_mut(&mut self) -> RefMut<'_, [u8]> {
        self.storage.bytes_mut(self.range.clone())
    }

    fn texel_range(&self, texel: Texel3, len: usize) -> Range<usize> {
        assert!(!self.format.is_compressed(), "texel access to compressed format {:?}", self.format);
        assert!(self.extent.contains(texel), "texel {texel:?} outside {:?}", self.extent);
        debug_assert_eq!(len, self.format.block_size(), "texel type doesn't match {:?}", self.format);
        let start = texel.linear_index(self.extent) * self.format.block_size();
        start..start + len
    }

    /// Reads the texel at `texel` as `T`.
    ///
    /// # Panics
    /// Panics if the format is compressed or `texel` is outside the image.
    pub fn load<T: bytemuck::Pod>(&self, texel: Texel3) -> T {
        let range = self.texel_range(texel, size_of::<T>());
        bytemuck::pod_read_unaligned(&self.data()[range])
    }

    /// Writes `value` to the texel at `texel`.
    ///
    /// # Panics
    /// Panics if the format is compressed or `texel` is outside the image.
    pub fn store<T: bytemuck::Pod>(&mut self, texel: Texel3, value: T) {
        let range = self.texel_range(texel, size_of::<T>());
        self.data_mut()[range].copy_from_slice(bytemuck::bytes_of(&value));
    }

    pub fn clear(&mut self) {
        self.data_mut().fill(0);
    }

    /// Fills the image with copies of `pattern`, byte for byte.
    pub fn clear_with<T: bytemuck::Pod>(&mut self, pattern: T) {
        warn_pattern_mismatch(self.format, size_of::<T>());
        fill_pattern(&mut self.data_mut(), bytemuck::bytes_of(&pattern));
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        if self.format != other.format || self.extent != other.extent {
            return false;
        }
        if Rc::ptr_eq(&self.storage, &other.storage) && self.range == other.range {
            return true;
        }
        *self.data() == *other.data()
    }
}

impl Eq for Image {}
