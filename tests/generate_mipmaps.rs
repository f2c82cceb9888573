// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Mipmap generation over formats, sizes, filters and texture targets.

use ghosts::extent::{Extent3d, Texel, Texel3};
use ghosts::format::Format;
use ghosts::format::codec::encode;
use ghosts::mipmap::{generate_mipmaps, Filter, Wrap};
use ghosts::texture::{Image, Target, Texture};
use ghosts::typed::{Texture1D, Texture2D, Texture2DArray, Texture3D, TextureCube};

const SIZES: [u32; 8] = [1, 2, 3, 15, 16, 17, 24, 32];
const FILTERS: [Filter; 2] = [Filter::Nearest, Filter::Linear];
const ORANGE: [f64; 4] = [1.0, 0.5, 0.0, 1.0];

fn texel_bytes(format: Format, value: [f64; 4]) -> Vec<u8> {
    let mut bytes = vec![0u8; format.block_size()];
    encode(format, value, &mut bytes);
    bytes
}

/// The colour each format is filled with.  Most use orange; the 8-bit
/// normalized formats use raw channel values.
fn color(format: Format) -> Vec<u8> {
    match format {
        Format::Rgba8Unorm => vec![255, 127, 0, 255],
        Format::Rgba8Snorm => [127i8, 63, 0, 1].map(|c| c as u8).to_vec(),
        _ => texel_bytes(format, ORANGE),
    }
}

fn uncompressed() -> impl Iterator<Item = Format> {
    Format::ALL.into_iter().filter(|f| !f.is_compressed())
}

fn fill(mut image: Image, texel: &[u8]) {
    for chunk in image.data_mut().chunks_exact_mut(texel.len()) {
        chunk.copy_from_slice(texel);
    }
}

fn uniform(image: &Image, texel: &[u8]) -> bool {
    image.data().chunks_exact(texel.len()).all(|chunk| chunk == texel)
}

/// A uniformly coloured level 0 must reach the last level unchanged, for
/// every format, size and filter, and generation must leave the source alone.
#[test]
fn uniform_color_survives_every_level() {
    for format in uncompressed() {
        let color = color(format);
        let black = texel_bytes(format, [0.0; 4]);
        for size in SIZES {
            let source = Texture2D::new_complete(format, size, size);
            let last = source.levels() - 1;
            fill(source.level(0), &color);
            assert!(uniform(&source.level(last), &black) || last == 0, "{format:?} {size}");
            let source_base = source.view(0..=0).unwrap();

            for filter in FILTERS {
                let generated = source.generate_mipmaps(filter).unwrap();
                for level in 0..generated.levels() {
                    assert!(uniform(&generated.level(level), &color), "{format:?} {size} {filter:?} level {level}");
                }
                assert_eq!(generated.view(0..=0).unwrap(), source_base, "{format:?} {size} {filter:?}");

                let mut in_place = Texture2D::from_texture(source.texture().duplicate()).unwrap();
                in_place.generate_mipmaps_in_place(filter, Wrap::ClampToEdge).unwrap();
                assert_eq!(in_place, generated, "{format:?} {size} {filter:?}");

                if last > 0 {
                    assert!(uniform(&source.level(last), &black), "source modified: {format:?} {size} {filter:?}");
                }
            }
        }
    }
}

#[test]
fn generation_is_idempotent() {
    for filter in FILTERS {
        let mut source = Texture2D::new_complete(Format::Rgba8Unorm, 17, 9);
        for y in 0..9 {
            for x in 0..17 {
                source.store(Texel::new(x, y), 0, [(x * 15) as u8, (y * 28) as u8, ((x ^ y) * 7) as u8, 255]);
            }
        }
        let a = source.generate_mipmaps(filter).unwrap();
        let b = source.generate_mipmaps(filter).unwrap();
        assert_eq!(a, b);
        let mut c = Texture2D::from_texture(a.texture().duplicate()).unwrap();
        c.generate_mipmaps_in_place(filter, Wrap::ClampToEdge).unwrap();
        assert_eq!(c, b);
    }
}

#[test]
fn single_texel_dilutes_under_linear() {
    let mut texture = Texture2D::new_complete(Format::Rgba8Unorm, 16, 16);
    assert_eq!(texture.levels(), 5);
    let color = [200u8, 40, 90, 255];
    texture.store(Texel::new(0, 0), 0, color);
    texture.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge).unwrap();
    assert_ne!(texture.load::<[u8; 4]>(Texel::ZERO, 4), color);
    assert_eq!(texture.load::<[u8; 4]>(Texel::ZERO, 0), color);
}

#[test]
fn nearest_keeps_the_origin_texel() {
    let mut texture = Texture2D::new_complete(Format::Rgba8Unorm, 16, 16);
    let color = [200u8, 40, 90, 255];
    texture.store(Texel::new(0, 0), 0, color);
    texture.generate_mipmaps_in_place(Filter::Nearest, Wrap::ClampToEdge).unwrap();
    for level in 0..5 {
        assert_eq!(texture.load::<[u8; 4]>(Texel::ZERO, level), color);
    }
}

#[test]
fn chain_lengths() {
    assert_eq!(Texture2D::new_complete(Format::R8Unorm, 1, 1).levels(), 1);
    let texture = Texture2D::new_complete(Format::R8Unorm, 17, 17);
    assert_eq!(texture.levels(), 5);
    assert_eq!(texture.dimensions(4), Texel::new(1, 1));
}

#[test]
fn every_target_filters_uniform_fields() {
    let color = texel_bytes(Format::Rgba16Sfloat, ORANGE);
    let check = |texture: &Texture| {
        for filter in FILTERS {
            let generated = generate_mipmaps(texture, filter).unwrap();
            for sub in generated.sub_images() {
                let image = generated.image(sub.layer, sub.face, sub.level);
                assert!(uniform(&image, &color), "{:?} {sub:?}", texture.target());
            }
        }
    };

    let line = Texture1D::new_complete(Format::Rgba16Sfloat, 24);
    fill(line.level(0), &color);
    check(line.texture());

    let volume = Texture3D::new_complete(Format::Rgba16Sfloat, Extent3d::new(8, 4, 16));
    fill(volume.level(0), &color);
    check(volume.texture());

    let array = Texture2DArray::new_complete(Format::Rgba16Sfloat, 15, 15, 3);
    for layer in 0..3 {
        fill(array.image(layer, 0, 0), &color);
    }
    check(array.texture());

    let cube = TextureCube::new_complete(Format::Rgba16Sfloat, 8);
    for face in 0..6 {
        fill(cube.image(0, face, 0), &color);
    }
    check(cube.texture());
}

#[test]
fn volume_filters_depth() {
    let mut volume = Texture3D::new(Format::R32Sfloat, Extent3d::new(1, 1, 4), 3);
    for (z, v) in [2.0f32, 4.0, 8.0, 16.0].into_iter().enumerate() {
        volume.store(Texel3::new(0, 0, z as u32), 0, v);
    }
    volume.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge).unwrap();
    assert_eq!(volume.load::<f32>(Texel3::new(0, 0, 0), 1), 3.0);
    assert_eq!(volume.load::<f32>(Texel3::new(0, 0, 1), 1), 12.0);
    assert_eq!(volume.load::<f32>(Texel3::ZERO, 2), 7.5);
}

#[test]
fn repeat_wrap_reaches_across_edges() {
    // a 1-texel-wide column filtered along x samples x=1, which wraps to 0
    let mut texture = Texture::new(Target::Texture2D, Format::R32Sfloat, Extent3d::new_2d(1, 2), 1, 1, 2);
    texture.data_mut(0, 0, 0).copy_from_slice(bytemuck::cast_slice(&[1.0f32, 3.0]));
    for wrap in [Wrap::ClampToEdge, Wrap::Repeat, Wrap::MirrorRepeat] {
        let mut copy = texture.duplicate();
        ghosts::mipmap::generate_mipmaps_in_place(&mut copy, Filter::Linear, wrap).unwrap();
        let level1: f32 = bytemuck::pod_read_unaligned(&copy.data(0, 0, 1));
        assert_eq!(level1, 2.0, "{wrap:?}");
    }
}
