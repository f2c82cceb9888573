// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Conversion of single uncompressed texels to and from a normalized working value.

Filtering needs arithmetic on texel values regardless of how they are stored, so
every uncompressed [`Format`] can be decoded to four `f64` channels and encoded
back.  `f64` represents every value of every supported channel type exactly
(including 32-bit integers), so decoding then encoding a texel reproduces its
bytes.

Missing channels decode as `(0, 0, 0, 1)`.  sRGB formats decode to linear light
and encode back through the sRGB transfer function.

# Examples

```
use ghosts::format::Format;
use ghosts::format::codec::{decode, encode};

let mut bytes = [0u8; 4];
encode(Format::Rgba8Unorm, [1.0, 0.5, 0.0, 1.0], &mut bytes);
assert_eq!(bytes, [255, 128, 0, 255]);
let value = decode(Format::Rgba8Unorm, &bytes);
assert_eq!(value[0], 1.0);
assert_eq!(value[2], 0.0);
```
*/

use crate::format::Format;
use half::f16;

/// Working value of one texel: red, green, blue, alpha.
pub type Channels = [f64; 4];

const DEFAULT: Channels = [0.0, 0.0, 0.0, 1.0];

/// Converts a linear color value to sRGB color space.
///
/// This is the standard sRGB transfer function:
/// - For values ≤ 0.0031308: `12.92 * linear`
/// - For values > 0.0031308: `1.055 * linear^(1/2.4) - 0.055`
///
/// ```
/// use ghosts::format::codec::linear_to_srgb;
///
/// let bright = linear_to_srgb(0.5);
/// assert!((bright - 0.7353569).abs() < 0.0001);
/// assert!((linear_to_srgb(1.0) - 1.0).abs() < 0.0001);
/// ```
#[inline] pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Inverse of [`linear_to_srgb`].
#[inline] pub fn srgb_to_linear(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

#[inline] fn unorm(v: u32, max: u32) -> f64 {
    v as f64 / max as f64
}
#[inline] fn snorm(v: i32, max: i32) -> f64 {
    (v as f64 / max as f64).max(-1.0)
}
#[inline] fn to_unorm(v: f64, max: u32) -> u32 {
    (v.clamp(0.0, 1.0) * max as f64).round() as u32
}
#[inline] fn to_snorm(v: f64, max: i32) -> i32 {
    (v.clamp(-1.0, 1.0) * max as f64).round() as i32
}

/// Sign-extends the low `bits` bits of `v`.
#[inline] fn sign_extend(v: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((v << shift) as i32) >> shift
}

#[inline] fn u16_at(bytes: &[u8], i: usize) -> u16 {
    u16::from_ne_bytes([bytes[2 * i], bytes[2 * i + 1]])
}
#[inline] fn u32_at(bytes: &[u8], i: usize) -> u32 {
    u32::from_ne_bytes([bytes[4 * i], bytes[4 * i + 1], bytes[4 * i + 2], bytes[4 * i + 3]])
}

const RGB9E5_MANTISSA_BITS: i32 = 9;
const RGB9E5_EXP_BIAS: i32 = 15;
const RGB9E5_MAX_EXP: i32 = 31;

fn decode_rgb9e5(packed: u32) -> Channels {
    let exponent = (packed >> 27) as i32;
    let scale = 2f64.powi(exponent - RGB9E5_EXP_BIAS - RGB9E5_MANTISSA_BITS);
    [
        (packed & 0x1FF) as f64 * scale,
        ((packed >> 9) & 0x1FF) as f64 * scale,
        ((packed >> 18) & 0x1FF) as f64 * scale,
        1.0,
    ]
}

fn encode_rgb9e5(value: Channels) -> u32 {
    let mantissa_values = (1 << RGB9E5_MANTISSA_BITS) as f64;
    let max_value = (mantissa_values - 1.0) / mantissa_values
        * 2f64.powi(RGB9E5_MAX_EXP - RGB9E5_EXP_BIAS);
    let r = value[0].clamp(0.0, max_value);
    let g = value[1].clamp(0.0, max_value);
    let b = value[2].clamp(0.0, max_value);
    let max_channel = r.max(g).max(b);

    let floor_log2 = if max_channel > 0.0 {
        max_channel.log2().floor() as i32
    } else {
        -RGB9E5_EXP_BIAS - 1
    };
    let mut exponent = floor_log2.max(-RGB9E5_EXP_BIAS - 1) + 1 + RGB9E5_EXP_BIAS;
    let mut scale = 2f64.powi(exponent - RGB9E5_EXP_BIAS - RGB9E5_MANTISSA_BITS);
    if (max_channel / scale + 0.5).floor() == mantissa_values {
        exponent += 1;
        scale *= 2.0;
    }
    let r = (r / scale + 0.5).floor() as u32;
    let g = (g / scale + 0.5).floor() as u32;
    let b = (b / scale + 0.5).floor() as u32;
    (exponent as u32) << 27 | b << 18 | g << 9 | r
}

/// Decodes the texel stored at the start of `bytes`.
///
/// # Panics
///
/// Panics if `format` is block compressed, or `bytes` is shorter than the
/// format's block size.
pub fn decode(format: Format, bytes: &[u8]) -> Channels {
    assert!(!format.is_compressed(), "{format:?} texels can't be decoded individually");
    let mut out = DEFAULT;
    match format {
        Format::R8Unorm | Format::Rg8Unorm | Format::Rgba8Unorm => {
            let n = format.description().components as usize;
            for (c, b) in out.iter_mut().zip(&bytes[..n]) {
                *c = unorm(*b as u32, 0xFF);
            }
        }
        Format::Rgba8Snorm => {
            for (c, b) in out.iter_mut().zip(&bytes[..4]) {
                *c = snorm(*b as i8 as i32, 0x7F);
            }
        }
        Format::Rgba8Srgb => {
            for (i, c) in out.iter_mut().enumerate() {
                let v = unorm(bytes[i] as u32, 0xFF);
                *c = if i < 3 { srgb_to_linear(v) } else { v };
            }
        }
        Format::Bgra8Unorm | Format::Bgra8Srgb => {
            let is_srgb = format == Format::Bgra8Srgb;
            for (i, source) in [2usize, 1, 0, 3].into_iter().enumerate() {
                let v = unorm(bytes[source] as u32, 0xFF);
                out[i] = if is_srgb && i < 3 { srgb_to_linear(v) } else { v };
            }
        }
        Format::R16Sfloat | Format::Rg16Sfloat | Format::Rgb16Sfloat | Format::Rgba16Sfloat => {
            let n = format.description().components as usize;
            for (i, c) in out.iter_mut().take(n).enumerate() {
                *c = f16::from_bits(u16_at(bytes, i)).to_f64();
            }
        }
        Format::Rgba16Unorm => {
            for (i, c) in out.iter_mut().enumerate() {
                *c = unorm(u16_at(bytes, i) as u32, 0xFFFF);
            }
        }
        Format::R32Sfloat | Format::Rg32Sfloat | Format::Rgb32Sfloat | Format::Rgba32Sfloat => {
            let n = format.description().components as usize;
            for (i, c) in out.iter_mut().take(n).enumerate() {
                *c = f32::from_bits(u32_at(bytes, i)) as f64;
            }
        }
        Format::R32Sint => out[0] = u32_at(bytes, 0) as i32 as f64,
        Format::R32Uint => out[0] = u32_at(bytes, 0) as f64,
        Format::Rgba4UnormPack16 => {
            let packed = u16_at(bytes, 0) as u32;
            for (i, c) in out.iter_mut().enumerate() {
                *c = unorm((packed >> (4 * i)) & 0xF, 0xF);
            }
        }
        Format::Rgb10A2UnormPack32 => {
            let packed = u32_at(bytes, 0);
            for (i, c) in out.iter_mut().take(3).enumerate() {
                *c = unorm((packed >> (10 * i)) & 0x3FF, 0x3FF);
            }
            out[3] = unorm(packed >> 30, 0x3);
        }
        Format::Rgb10A2SnormPack32 => {
            let packed = u32_at(bytes, 0);
            for (i, c) in out.iter_mut().take(3).enumerate() {
                *c = snorm(sign_extend((packed >> (10 * i)) & 0x3FF, 10), 0x1FF);
            }
            out[3] = snorm(sign_extend(packed >> 30, 2), 0x1);
        }
        Format::Rgb9E5UfloatPack32 => out = decode_rgb9e5(u32_at(bytes, 0)),
        Format::Bc1RgbaUnorm | Format::Bc3RgbaUnorm | Format::Bc7RgbaUnorm => unreachable!(),
    }
    out
}

/// Encodes `value` into the texel at the start of `out`.
///
/// Values outside the representable range are clamped; integer and normalized
/// channels round to nearest.
///
/// # Panics
///
/// Panics if `format` is block compressed, or `out` is shorter than the
/// format's block size.
pub fn encode(format: Format, value: Channels, out: &mut [u8]) {
    assert!(!format.is_compressed(), "{format:?} texels can't be encoded individually");
    match format {
        Format::R8Unorm | Format::Rg8Unorm | Format::Rgba8Unorm => {
            let n = format.description().components as usize;
            for (b, v) in out[..n].iter_mut().zip(value) {
                *b = to_unorm(v, 0xFF) as u8;
            }
        }
        Format::Rgba8Snorm => {
            for (b, v) in out[..4].iter_mut().zip(value) {
                *b = to_snorm(v, 0x7F) as i8 as u8;
            }
        }
        Format::Rgba8Srgb => {
            for (i, b) in out[..4].iter_mut().enumerate() {
                let v = if i < 3 { linear_to_srgb(value[i].clamp(0.0, 1.0)) } else { value[i] };
                *b = to_unorm(v, 0xFF) as u8;
            }
        }
        Format::Bgra8Unorm | Format::Bgra8Srgb => {
            let is_srgb = format == Format::Bgra8Srgb;
            for (i, target) in [2usize, 1, 0, 3].into_iter().enumerate() {
                let v = if is_srgb && i < 3 {
                    linear_to_srgb(value[i].clamp(0.0, 1.0))
                } else {
                    value[i]
                };
                out[target] = to_unorm(v, 0xFF) as u8;
            }
        }
        Format::R16Sfloat | Format::Rg16Sfloat | Format::Rgb16Sfloat | Format::Rgba16Sfloat => {
            let n = format.description().components as usize;
            for (i, v) in value.into_iter().take(n).enumerate() {
                out[2 * i..2 * i + 2].copy_from_slice(&f16::from_f64(v).to_bits().to_ne_bytes());
            }
        }
        Format::Rgba16Unorm => {
            for (i, v) in value.into_iter().enumerate() {
                out[2 * i..2 * i + 2].copy_from_slice(&(to_unorm(v, 0xFFFF) as u16).to_ne_bytes());
            }
        }
        Format::R32Sfloat | Format::Rg32Sfloat | Format::Rgb32Sfloat | Format::Rgba32Sfloat => {
            let n = format.description().components as usize;
            for (i, v) in value.into_iter().take(n).enumerate() {
                out[4 * i..4 * i + 4].copy_from_slice(&(v as f32).to_ne_bytes());
            }
        }
        Format::R32Sint => {
            let v = value[0].round().clamp(i32::MIN as f64, i32::MAX as f64) as i32;
            out[..4].copy_from_slice(&v.to_ne_bytes());
        }
        Format::R32Uint => {
            let v = value[0].round().clamp(0.0, u32::MAX as f64) as u32;
            out[..4].copy_from_slice(&v.to_ne_bytes());
        }
        Format::Rgba4UnormPack16 => {
            let mut packed = 0u16;
            for (i, v) in value.into_iter().enumerate() {
                packed |= (to_unorm(v, 0xF) as u16) << (4 * i);
            }
            out[..2].copy_from_slice(&packed.to_ne_bytes());
        }
        Format::Rgb10A2UnormPack32 => {
            let mut packed = to_unorm(value[3], 0x3) << 30;
            for (i, v) in value.into_iter().take(3).enumerate() {
                packed |= to_unorm(v, 0x3FF) << (10 * i);
            }
            out[..4].copy_from_slice(&packed.to_ne_bytes());
        }
        Format::Rgb10A2SnormPack32 => {
            let mut packed = ((to_snorm(value[3], 0x1) as u32) & 0x3) << 30;
            for (i, v) in value.into_iter().take(3).enumerate() {
                packed |= ((to_snorm(v, 0x1FF) as u32) & 0x3FF) << (10 * i);
            }
            out[..4].copy_from_slice(&packed.to_ne_bytes());
        }
        Format::Rgb9E5UfloatPack32 => {
            out[..4].copy_from_slice(&encode_rgb9e5(value).to_ne_bytes());
        }
        Format::Bc1RgbaUnorm | Format::Bc3RgbaUnorm | Format::Bc7RgbaUnorm => unreachable!(),
    }
}
