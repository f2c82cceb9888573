// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Texture format identifiers and their block layouts.
//!
//! Every [`Format`] maps to a static [`FormatDescriptor`] that records how the
//! format is laid out in memory:
//!
//! - Block size in bytes and block extent in texels (1×1×1 for uncompressed formats,
//!   4×4×1 for the BC family)
//! - Number of channels
//! - Whether the format is block compressed or bit-packed
//! - How each channel is interpreted numerically
//!
//! # Examples
//!
//! ```
//! use ghosts::format::{Format, NumericKind};
//!
//! let rgba8 = Format::Rgba8Unorm.description();
//! assert_eq!(rgba8.block_size, 4);
//! assert_eq!(rgba8.components, 4);
//! assert!(!rgba8.is_compressed);
//!
//! let bc1 = Format::Bc1RgbaUnorm.description();
//! assert_eq!(bc1.block_extent.width, 4);
//! assert_eq!(bc1.block_size, 8);
//! assert_eq!(bc1.kind, NumericKind::Unorm);
//! ```

/*
Quick note on type design.  We could carry the pixel format as a type parameter
(`Texture<Rgba8Unorm>`), which is great for typechecking writes.

Here the format is data: a view can be reinterpreted under another format with
the same block layout, storage can be loaded from a file whose format is only
known at runtime, and the mipmap generator has to dispatch on it anyway.  So the
format is an enum and typed access is checked against the block size instead.
 */
pub mod codec;
pub(crate) mod png_support;

use crate::extent::Extent3d;

/// How the bits of a channel are interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// Unsigned normalized: `[0, 2^n-1]` maps to `[0.0, 1.0]`.
    Unorm,
    /// Signed normalized: `[-(2^(n-1)-1), 2^(n-1)-1]` maps to `[-1.0, 1.0]`.
    Snorm,
    /// Unsigned integer, not normalized.
    Uint,
    /// Signed integer, not normalized.
    Sint,
    /// IEEE floating point (16 or 32 bit).
    Float,
    /// Unsigned floating point with a shared exponent.
    Ufloat,
}

/// Static description of a [`Format`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Bytes occupied by one block.
    pub block_size: u8,
    /// Texels covered by one block.
    pub block_extent: Extent3d,
    /// Number of channels.
    pub components: u8,
    pub is_compressed: bool,
    /// Channels share one machine word rather than occupying whole bytes.
    pub is_packed: bool,
    /// Stored in the sRGB transfer function.
    pub is_srgb: bool,
    pub kind: NumericKind,
}

const UNIT: Extent3d = Extent3d::ONE;
const BC_BLOCK: Extent3d = Extent3d { width: 4, height: 4, depth: 1 };

const fn plain(block_size: u8, components: u8, kind: NumericKind) -> FormatDescriptor {
    FormatDescriptor {
        block_size,
        block_extent: UNIT,
        components,
        is_compressed: false,
        is_packed: false,
        is_srgb: false,
        kind,
    }
}
const fn srgb(block_size: u8, components: u8) -> FormatDescriptor {
    FormatDescriptor { is_srgb: true, ..plain(block_size, components, NumericKind::Unorm) }
}
const fn packed(block_size: u8, components: u8, kind: NumericKind) -> FormatDescriptor {
    FormatDescriptor { is_packed: true, ..plain(block_size, components, kind) }
}
const fn compressed(block_size: u8, components: u8) -> FormatDescriptor {
    FormatDescriptor {
        block_extent: BC_BLOCK,
        is_compressed: true,
        ..plain(block_size, components, NumericKind::Unorm)
    }
}

/// Indexed by `Format as usize`; keep in declaration order.
static DESCRIPTORS: [FormatDescriptor; 25] = {
    use NumericKind::*;
    [
        plain(1, 1, Unorm),  // R8Unorm
        plain(2, 2, Unorm),  // Rg8Unorm
        plain(4, 4, Unorm),  // Rgba8Unorm
        plain(4, 4, Snorm),  // Rgba8Snorm
        srgb(4, 4),          // Rgba8Srgb
        plain(4, 4, Unorm),  // Bgra8Unorm
        srgb(4, 4),          // Bgra8Srgb
        plain(2, 1, Float),  // R16Sfloat
        plain(4, 2, Float),  // Rg16Sfloat
        plain(6, 3, Float),  // Rgb16Sfloat
        plain(8, 4, Float),  // Rgba16Sfloat
        plain(8, 4, Unorm),  // Rgba16Unorm
        plain(4, 1, Float),  // R32Sfloat
        plain(8, 2, Float),  // Rg32Sfloat
        plain(12, 3, Float), // Rgb32Sfloat
        plain(16, 4, Float), // Rgba32Sfloat
        plain(4, 1, Sint),   // R32Sint
        plain(4, 1, Uint),   // R32Uint
        packed(2, 4, Unorm), // Rgba4UnormPack16
        packed(4, 4, Unorm), // Rgb10A2UnormPack32
        packed(4, 4, Snorm), // Rgb10A2SnormPack32
        packed(4, 3, Ufloat), // Rgb9E5UfloatPack32
        compressed(8, 4),    // Bc1RgbaUnorm
        compressed(16, 4),   // Bc3RgbaUnorm
        compressed(16, 4),   // Bc7RgbaUnorm
    ]
};

/// A texture format identifier.
///
/// Multi-channel formats store channels in the order of the name.  For packed
/// formats the first channel occupies the least significant bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Format {
    R8Unorm,
    Rg8Unorm,
    Rgba8Unorm,
    Rgba8Snorm,
    Rgba8Srgb,
    Bgra8Unorm,
    Bgra8Srgb,
    R16Sfloat,
    Rg16Sfloat,
    Rgb16Sfloat,
    Rgba16Sfloat,
    Rgba16Unorm,
    R32Sfloat,
    Rg32Sfloat,
    Rgb32Sfloat,
    Rgba32Sfloat,
    R32Sint,
    R32Uint,
    /// Four 4-bit unorm channels in one `u16`.
    Rgba4UnormPack16,
    /// Three 10-bit unorm channels and 2-bit alpha in one `u32`.
    Rgb10A2UnormPack32,
    /// Three 10-bit snorm channels and 2-bit alpha in one `u32`.
    Rgb10A2SnormPack32,
    /// Three 9-bit mantissas sharing a 5-bit exponent in one `u32`.
    Rgb9E5UfloatPack32,
    /// BC1 (DXT1), 8 bytes per 4×4 block.
    Bc1RgbaUnorm,
    /// BC3 (DXT5), 16 bytes per 4×4 block.
    Bc3RgbaUnorm,
    /// BC7, 16 bytes per 4×4 block.
    Bc7RgbaUnorm,
}

impl Format {
    /// Every format this crate knows, in declaration order.
    pub const ALL: [Format; 25] = [
        Format::R8Unorm,
        Format::Rg8Unorm,
        Format::Rgba8Unorm,
        Format::Rgba8Snorm,
        Format::Rgba8Srgb,
        Format::Bgra8Unorm,
        Format::Bgra8Srgb,
        Format::R16Sfloat,
        Format::Rg16Sfloat,
        Format::Rgb16Sfloat,
        Format::Rgba16Sfloat,
        Format::Rgba16Unorm,
        Format::R32Sfloat,
        Format::Rg32Sfloat,
        Format::Rgb32Sfloat,
        Format::Rgba32Sfloat,
        Format::R32Sint,
        Format::R32Uint,
        Format::Rgba4UnormPack16,
        Format::Rgb10A2UnormPack32,
        Format::Rgb10A2SnormPack32,
        Format::Rgb9E5UfloatPack32,
        Format::Bc1RgbaUnorm,
        Format::Bc3RgbaUnorm,
        Format::Bc7RgbaUnorm,
    ];

    /// Looks up the block layout of this format.
    pub fn description(self) -> &'static FormatDescriptor {
        &DESCRIPTORS[self as usize]
    }

    #[inline] pub fn block_size(self) -> usize {
        self.description().block_size as usize
    }
    #[inline] pub fn block_extent(self) -> Extent3d {
        self.description().block_extent
    }
    #[inline] pub fn is_compressed(self) -> bool {
        self.description().is_compressed
    }

    /// True when views of one format may be reinterpreted as the other.
    ///
    /// Only the memory layout matters: both formats must use the same block
    /// size and block extent.
    pub fn layout_compatible(self, other: Format) -> bool {
        let (a, b) = (self.description(), other.description());
        a.block_size == b.block_size && a.block_extent == b.block_extent
    }
}
