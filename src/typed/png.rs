// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Loading PNG images into [`Texture2D`].

Decoded images are converted to a storage format chosen from the PNG's colour
type: 8-bit grayscale to `R8Unorm`, 8-bit gray+alpha to `Rg8Unorm`, other 8-bit
images to `Rgba8Srgb`, and 16-bit images to `Rgba16Unorm`.  Palettes and
sub-byte depths are expanded first.

Level 0 holds the image; any further levels requested are generated with a
linear filter.
*/

use std::io::Cursor;
use std::path::Path;

use crate::format::png_support::PngLayout;
use crate::mipmap::{Filter, MipmapError, Wrap};
use crate::texture::LevelCount;
use crate::typed::Texture2D;
use crate::extent::Extent3d;

/// Loading an image failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("Can't read image: {0}")]
    Io(String),
    #[error("Can't decode PNG: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("Unsupported PNG layout: {color:?} at {depth:?}")]
    Unsupported { color: png::ColorType, depth: png::BitDepth },
    #[error(transparent)]
    Mipmap(#[from] MipmapError),
}

impl Texture2D {
    /// Decodes a PNG held in memory.
    ///
    /// ```
    /// use ghosts::format::Format;
    /// use ghosts::texture::LevelCount;
    /// use ghosts::typed::Texture2D;
    ///
    /// let mut png = Vec::new();
    /// {
    ///     let mut encoder = png::Encoder::new(&mut png, 4, 4);
    ///     encoder.set_color(png::ColorType::Grayscale);
    ///     encoder.set_depth(png::BitDepth::Eight);
    ///     let mut writer = encoder.write_header().unwrap();
    ///     writer.write_image_data(&[128; 16]).unwrap();
    /// }
    /// let texture = Texture2D::from_png_bytes(&png, LevelCount::Complete).unwrap();
    /// assert_eq!(texture.format(), Format::R8Unorm);
    /// assert_eq!(texture.levels(), 3);
    /// assert_eq!(texture.load::<u8>(ghosts::extent::Texel::ZERO, 2), 128);
    /// ```
    pub fn from_png_bytes(bytes: &[u8], levels: LevelCount) -> Result<Self, LoadError> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder.read_info()?;
        let (color, depth) = reader.output_color_type();
        let source_depth = reader.info().bit_depth;
        let layout = PngLayout::for_png(color, depth).ok_or(LoadError::Unsupported { color, depth })?;
        if source_depth != depth {
            logwise::warn_sync!(
                "PNG bit depth {from} widened to {to}",
                from = logwise::privacy::LogIt(&source_depth),
                to = logwise::privacy::LogIt(&depth)
            );
        }

        let (width, height) = (reader.info().width, reader.info().height);
        let pixels = width as usize * height as usize;
        let pixel_size = layout.source_channels * layout.sample_bytes;
        let mut decoded = vec![0u8; pixels * pixel_size];
        reader.next_frame(&mut decoded)?;

        let extent = Extent3d::new_2d(width, height);
        let level_count = levels.resolve(extent).max(1);
        let mut texture = Texture2D::new(layout.format, width, height, level_count);
        {
            let mut level0 = texture.texture.data_mut(0, 0, 0);
            if layout.needs_conversion() {
                level0.copy_from_slice(&layout.convert(&decoded, pixels));
            } else {
                level0.copy_from_slice(&decoded);
            }
        }
        if level_count > 1 {
            texture.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge)?;
        }
        logwise::info_sync!(
            "decoded {width}x{height} PNG into {levels} levels",
            width = width,
            height = height,
            levels = level_count
        );
        Ok(texture)
    }

    /// Reads and decodes a PNG file.
    pub async fn from_png_path(path: &Path, priority: async_file::Priority, levels: LevelCount) -> Result<Self, LoadError> {
        let file = async_file::File::open(path, priority)
            .await
            .map_err(|e| LoadError::Io(format!("{e:?}")))?;
        let data = file
            .read_all(priority)
            .await
            .map_err(|e| LoadError::Io(format!("{e:?}")))?;
        logwise::trace_sync!("read {bytes} bytes of PNG", bytes = data.len());
        Self::from_png_bytes(&data, levels)
    }
}
