// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Texel addressing: where each sub-image of a texture lives in its byte buffer.

A texture is a sequence of *sub-images*, one per (layer, face, level).  They are
packed into one contiguous buffer in this order:

```text
layer 0 ┬ face 0 ┬ level 0
        │        ├ level 1
        │        └ ...
        ├ face 1 ┬ level 0
        │        └ ...
        └ ...
layer 1 ┬ ...
```

Levels are packed contiguously within a face, faces within a layer, and layers
outermost.  Each sub-image is padded to whole blocks of its format.

# Examples

```
use ghosts::addressing::{Layout, complete_level_count};
use ghosts::extent::Extent3d;
use ghosts::format::Format;

let extent = Extent3d::new_2d(17, 17);
assert_eq!(complete_level_count(extent), 5);

let layout = Layout::new(Format::Rgba8Unorm, extent, 1, 1, 5);
assert_eq!(layout.level_extent(4), Extent3d::new_2d(1, 1));
assert_eq!(layout.offset(0, 0, 1), 17 * 17 * 4);
```
*/

use crate::extent::Extent3d;
use crate::format::Format;

/// Extent of `level` for a texture whose level 0 is `base`.
///
/// Each dimension is shifted right by `level`, clamped to at least 1, then
/// rounded up to a whole number of the format's blocks.
pub fn level_extent(format: Format, base: Extent3d, level: usize) -> Extent3d {
    let block = format.block_extent();
    let shifted = base.shr(u32::try_from(level).unwrap_or(u32::MAX)).max(Extent3d::ONE);
    shifted.div_ceil(block).mul(block)
}

/// Bytes occupied by one sub-image of the given extent.
pub fn level_size(format: Format, level_extent: Extent3d) -> usize {
    level_extent.div_ceil(format.block_extent()).texel_count() * format.block_size()
}

/// Number of levels in a complete mipmap chain: `floor(log2(max dimension)) + 1`.
///
/// Zero-sized extents are treated as a single texel.
pub fn complete_level_count(extent: Extent3d) -> usize {
    extent.max_dimension().max(1).ilog2() as usize + 1
}

/// Layout of every sub-image of one allocation.
///
/// The per-level offsets within a face are computed once at construction; the
/// offset of any sub-image is then `layer * layer_size + face * face_size +
/// level_offsets[level]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    format: Format,
    extent: Extent3d,
    /// Level of the chain rooted at `extent` that this layout's level 0 is.
    base_level: usize,
    layers: usize,
    faces: usize,
    levels: usize,
    /// Cumulative byte offset of each level within a face, plus the face size at the end.
    level_offsets: Vec<usize>,
}

impl Layout {
    pub fn new(format: Format, extent: Extent3d, layers: usize, faces: usize, levels: usize) -> Self {
        Self::starting_at(format, extent, 0, layers, faces, levels)
    }

    /// Lays out `levels` levels of the chain rooted at `extent`, starting at
    /// `base_level` of that chain.
    ///
    /// Level extents are derived from `extent` rather than from the base
    /// level's own extent, so a block-compressed tail keeps the sizes it had
    /// in the full chain.
    pub fn starting_at(format: Format, extent: Extent3d, base_level: usize, layers: usize, faces: usize, levels: usize) -> Self {
        let mut level_offsets = Vec::with_capacity(levels + 1);
        let mut offset = 0;
        level_offsets.push(offset);
        for level in base_level..base_level + levels {
            offset += level_size(format, level_extent(format, extent, level));
            level_offsets.push(offset);
        }
        Self { format, extent, base_level, layers, faces, levels, level_offsets }
    }

    #[inline] pub fn format(&self) -> Format {
        self.format
    }
    /// Extent the level chain is rooted at.  Differs from level 0's extent
    /// when [`Layout::base_level`] is not 0.
    #[inline] pub fn extent(&self) -> Extent3d {
        self.extent
    }
    #[inline] pub fn base_level(&self) -> usize {
        self.base_level
    }
    #[inline] pub fn layers(&self) -> usize {
        self.layers
    }
    #[inline] pub fn faces(&self) -> usize {
        self.faces
    }
    #[inline] pub fn levels(&self) -> usize {
        self.levels
    }

    /// Bytes occupied by all levels of one face.
    #[inline] pub fn face_size(&self) -> usize {
        self.level_offsets[self.levels]
    }
    /// Bytes occupied by all faces of one layer.
    #[inline] pub fn layer_size(&self) -> usize {
        self.face_size() * self.faces
    }
    /// Bytes occupied by the whole allocation.
    #[inline] pub fn size(&self) -> usize {
        self.layer_size() * self.layers
    }

    /// # Panics
    /// Panics if `level` is out of range.
    pub fn level_extent(&self, level: usize) -> Extent3d {
        assert!(level < self.levels, "level {level} out of range (levels: {})", self.levels);
        level_extent(self.format, self.extent, self.base_level + level)
    }

    /// # Panics
    /// Panics if `level` is out of range.
    pub fn level_size(&self, level: usize) -> usize {
        assert!(level < self.levels, "level {level} out of range (levels: {})", self.levels);
        self.level_offsets[level + 1] - self.level_offsets[level]
    }

    /// Byte offset of the sub-image at (`layer`, `face`, `level`).
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn offset(&self, layer: usize, face: usize, level: usize) -> usize {
        assert!(layer < self.layers, "layer {layer} out of range (layers: {})", self.layers);
        assert!(face < self.faces, "face {face} out of range (faces: {})", self.faces);
        assert!(level < self.levels, "level {level} out of range (levels: {})", self.levels);
        layer * self.layer_size() + face * self.face_size() + self.level_offsets[level]
    }
}

#[cfg(test)]
mod tests {
    use super::{complete_level_count, level_extent, level_size, Layout};
    use crate::extent::Extent3d;
    use crate::format::Format;

    #[test]
    fn level_extents_shrink_but_never_below_a_block() {
        for format in Format::ALL {
            let block = format.block_extent();
            for base in [Extent3d::new(1, 1, 1), Extent3d::new(17, 5, 3), Extent3d::new(64, 64, 1)] {
                let mut previous = level_extent(format, base, 0);
                for level in 1..10 {
                    let e = level_extent(format, base, level);
                    assert!(e.width <= previous.width && e.height <= previous.height && e.depth <= previous.depth);
                    assert!(e.width >= block.width && e.height >= block.height && e.depth >= block.depth);
                    previous = e;
                }
            }
        }
    }

    #[test]
    fn compressed_levels_round_up_to_blocks() {
        let e = level_extent(Format::Bc1RgbaUnorm, Extent3d::new_2d(10, 6), 0);
        assert_eq!(e, Extent3d::new_2d(12, 8));
        assert_eq!(level_size(Format::Bc1RgbaUnorm, e), 3 * 2 * 8);
        let small = level_extent(Format::Bc1RgbaUnorm, Extent3d::new_2d(10, 6), 3);
        assert_eq!(small, Extent3d::new_2d(4, 4));
    }

    #[test]
    fn tail_layout_keeps_chain_extents() {
        let full = Layout::new(Format::Bc1RgbaUnorm, Extent3d::new_2d(18, 18), 1, 1, 3);
        let tail = Layout::starting_at(Format::Bc1RgbaUnorm, Extent3d::new_2d(18, 18), 1, 1, 1, 2);
        assert_eq!(tail.level_extent(0), Extent3d::new_2d(12, 12));
        assert_eq!(tail.level_extent(1), full.level_extent(2));
        assert_eq!(tail.level_size(1), full.level_size(2));
        assert_eq!(tail.size(), full.level_size(1) + full.level_size(2));
        // re-deriving from level 1's padded extent would give 8x8 here
        assert_eq!(level_extent(Format::Bc1RgbaUnorm, tail.level_extent(0), 1), Extent3d::new_2d(8, 8));
    }

    #[test]
    fn complete_chains() {
        assert_eq!(complete_level_count(Extent3d::ONE), 1);
        assert_eq!(complete_level_count(Extent3d::new_2d(16, 16)), 5);
        assert_eq!(complete_level_count(Extent3d::new_2d(17, 17)), 5);
        assert_eq!(complete_level_count(Extent3d::new(2, 3, 32)), 6);
        assert_eq!(complete_level_count(Extent3d::new(0, 0, 0)), 1);
    }

    /// Offsets enumerate sub-images contiguously in layer, face, level order.
    #[test]
    fn offsets_are_contiguous() {
        let layout = Layout::new(Format::Rgba16Sfloat, Extent3d::new_2d(9, 5), 3, 6, 4);
        let mut expected = 0;
        for layer in 0..3 {
            for face in 0..6 {
                for level in 0..4 {
                    assert_eq!(layout.offset(layer, face, level), expected);
                    expected += layout.level_size(level);
                }
            }
        }
        assert_eq!(expected, layout.size());
    }

    #[test]
    #[should_panic(expected = "face 6 out of range")]
    fn out_of_range_face_panics() {
        let layout = Layout::new(Format::R8Unorm, Extent3d::new_2d(4, 4), 1, 6, 1);
        layout.offset(0, 6, 0);
    }
}
