// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The shared byte buffer behind every texture.

A [`Storage`] is allocated once, zero-filled, and then shared by reference
counting between the texture that allocated it and every view carved out of it.
Views never copy bytes; they only remember which sub-images of the storage they
expose.

Access to the bytes is single-threaded.  Borrows are tracked at runtime, so an
overlapping read and write through two aliasing views panics rather than racing.
*/

use std::cell::{Ref, RefCell, RefMut};
use std::collections::TryReserveError;
use std::ops::Range;

use crate::addressing::Layout;

/// Allocation failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AllocError {
    #[error("Can't allocate {size} bytes of texture storage: {source}")]
    OutOfMemory {
        size: usize,
        #[source]
        source: TryReserveError,
    },
}

/// An owning byte buffer plus the layout of the sub-images inside it.
#[derive(Debug)]
pub struct Storage {
    layout: Layout,
    data: RefCell<Box<[u8]>>,
}

impl Storage {
    /// Allocates zero-filled storage for `layout`.
    ///
    /// Aborts on allocation failure like any other Rust allocation; see
    /// [`Storage::try_new`] for a fallible variant.
    pub fn new(layout: Layout) -> Self {
        let data = vec![0u8; layout.size()].into_boxed_slice();
        Self { layout, data: RefCell::new(data) }
    }

    /// Allocates zero-filled storage for `layout`, reporting allocation failure.
    pub fn try_new(layout: Layout) -> Result<Self, AllocError> {
        let size = layout.size();
        let mut vec = Vec::new();
        vec.try_reserve_exact(size)
            .map_err(|source| AllocError::OutOfMemory { size, source })?;
        vec.resize(size, 0u8);
        Ok(Self { layout, data: RefCell::new(vec.into_boxed_slice()) })
    }

    /// Wraps bytes that are already in layout order.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not exactly `layout.size()` bytes.
    pub fn from_bytes(layout: Layout, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            layout.size(),
            "expected {} bytes for this layout, got {}",
            layout.size(),
            data.len()
        );
        Self { layout, data: RefCell::new(data.into_boxed_slice()) }
    }

    #[inline] pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Total number of bytes.
    #[inline] pub fn len(&self) -> usize {
        self.layout.size()
    }

    #[inline] pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range of the sub-image at (`layer`, `face`, `level`).
    pub fn sub_image_range(&self, layer: usize, face: usize, level: usize) -> Range<usize> {
        let offset = self.layout.offset(layer, face, level);
        offset..offset + self.layout.level_size(level)
    }

    /// Borrows `range` of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds, or the buffer is mutably borrowed.
    pub fn bytes(&self, range: Range<usize>) -> Ref<'_, [u8]> {
        Ref::map(self.data.borrow(), |d| &d[range])
    }

    /// Mutably borrows `range` of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds, or the buffer is already borrowed.
    pub fn bytes_mut(&self, range: Range<usize>) -> RefMut<'_, [u8]> {
        RefMut::map(self.data.borrow_mut(), |d| &mut d[range])
    }
}

#[cfg(test)]
mod tests {
    use super::Storage;
    use crate::addressing::Layout;
    use crate::extent::Extent3d;
    use crate::format::Format;

    #[test]
    fn allocation_is_zeroed_and_sized() {
        let layout = Layout::new(Format::Rgba8Unorm, Extent3d::new_2d(4, 4), 2, 1, 3);
        let storage = Storage::try_new(layout.clone()).unwrap();
        assert_eq!(storage.len(), layout.size());
        assert_eq!(storage.len(), 2 * (64 + 16 + 4));
        assert!(storage.bytes(0..storage.len()).iter().all(|b| *b == 0));
    }

    #[test]
    fn sub_image_ranges_do_not_overlap() {
        let storage = Storage::new(Layout::new(Format::R8Unorm, Extent3d::new_2d(4, 2), 2, 1, 2));
        assert_eq!(storage.sub_image_range(0, 0, 1), 8..10);
        assert_eq!(storage.sub_image_range(1, 0, 0), 10..18);
    }

    #[test]
    fn empty_layout_is_empty() {
        let storage = Storage::new(Layout::new(Format::R8Unorm, Extent3d::new_2d(4, 4), 0, 1, 1));
        assert!(storage.is_empty());
    }

    #[test]
    #[should_panic]
    fn from_bytes_checks_length() {
        Storage::from_bytes(Layout::new(Format::R8Unorm, Extent3d::new_2d(2, 2), 1, 1, 1), vec![0; 3]);
    }
}
