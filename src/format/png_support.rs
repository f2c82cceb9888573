// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Mapping of decoded PNG pixel layouts onto storage formats.

use png::{BitDepth, ColorType};
use crate::format::Format;

/// How decoded PNG samples are arranged, and which [`Format`] stores them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PngLayout {
    pub format: Format,
    /// Samples per pixel in the decoded PNG stream.
    pub source_channels: usize,
    /// Bytes per sample in the decoded PNG stream (1 or 2).
    pub sample_bytes: usize,
}

impl PngLayout {
    /// Chooses a storage format for an (already expanded) PNG colour type.
    ///
    /// Returns `None` for layouts the expansion transform never produces
    /// (indexed colour, sub-byte depths).
    pub fn for_png(color: ColorType, depth: BitDepth) -> Option<Self> {
        let source_channels = match color {
            ColorType::Grayscale => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
            ColorType::Indexed => return None,
        };
        let (format, sample_bytes) = match (depth, color) {
            (BitDepth::Eight, ColorType::Grayscale) => (Format::R8Unorm, 1),
            (BitDepth::Eight, ColorType::GrayscaleAlpha) => (Format::Rg8Unorm, 1),
            (BitDepth::Eight, _) => (Format::Rgba8Srgb, 1),
            (BitDepth::Sixteen, _) => (Format::Rgba16Unorm, 2),
            _ => return None,
        };
        Some(Self { format, source_channels, sample_bytes })
    }

    /// True when the decoded stream must be rearranged before it matches
    /// `format`: channels are missing, or samples are big-endian 16-bit.
    pub fn needs_conversion(&self) -> bool {
        self.sample_bytes == 2 || self.format.block_size() != self.source_channels * self.sample_bytes
    }

    /// Rearranges decoded PNG pixels into texels of [`Self::format`].
    ///
    /// RGB gains an opaque alpha channel, 16-bit grayscale is replicated into
    /// RGB, and 16-bit samples are converted from PNG's big-endian order.
    pub fn convert(&self, decoded: &[u8], pixels: usize) -> Vec<u8> {
        let texel_size = self.format.block_size();
        let pixel_size = self.source_channels * self.sample_bytes;
        let mut out = vec![0u8; pixels * texel_size];
        for (src, dst) in decoded
            .chunks_exact(pixel_size)
            .zip(out.chunks_exact_mut(texel_size))
            .take(pixels)
        {
            match self.sample_bytes {
                1 => {
                    dst[..pixel_size].copy_from_slice(src);
                    if self.source_channels == 3 {
                        dst[3] = u8::MAX;
                    }
                }
                _ => {
                    let sample = |i: usize| u16::from_be_bytes([src[2 * i], src[2 * i + 1]]);
                    let rgba = match self.source_channels {
                        1 => [sample(0), sample(0), sample(0), u16::MAX],
                        2 => [sample(0), sample(0), sample(0), sample(1)],
                        3 => [sample(0), sample(1), sample(2), u16::MAX],
                        _ => [sample(0), sample(1), sample(2), sample(3)],
                    };
                    for (i, channel) in rgba.into_iter().enumerate() {
                        dst[2 * i..2 * i + 2].copy_from_slice(&channel.to_ne_bytes());
                    }
                }
            }
        }
        out
    }
}
