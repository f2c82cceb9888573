/*! ghosts is the texture data model behind a small real-time renderer: how a
multi-level, multi-layer, multi-face image is laid out in memory, how views are
carved out of it without copying, and how mipmap chains are generated.

Here is how the pieces stack, leaves first:

| Module                 | Provides                                                               |
|------------------------|------------------------------------------------------------------------|
| [`format`]             | Format identifiers, their block layouts, and texel encode/decode       |
| [`extent`]             | Extents and texel coordinates                                          |
| [`addressing`]         | Per-level extents and sizes, and where each sub-image lives            |
| [`texture`]            | Reference-counted storage plus views of layers, faces and levels       |
| [`typed`]              | 1D/2D/3D/cube/array views with texel load and store, and PNG loading   |
| [`mipmap`]             | Nearest and linear mipmap generation                                   |
| [`resource`]           | The seam to a graphics device: create, upload, bind, destroy           |

# Memory layout

Every texture is one contiguous byte buffer.  Levels are packed contiguously
within a face, faces within a layer, and layers outermost.  Each sub-image is
padded to whole blocks of its format.  This is also the order in which
[`texture::Texture::sub_images`] enumerates sub-images for upload.

# Sharing

Textures and their views share storage by reference counting.  Views never copy
bytes; a write through one view is visible through every other view of the same
storage.  Access is single-threaded and borrows are checked at runtime.

# Indices

Out-of-range layer, face, level or texel indices are programming errors and
panic in every build profile.  Constructing a view with a bad range is a
recoverable [`texture::ViewError`].

```
use ghosts::extent::Texel;
use ghosts::format::Format;
use ghosts::mipmap::{Filter, Wrap};
use ghosts::typed::Texture2D;

let mut texture = Texture2D::new_complete(Format::Rgba8Unorm, 16, 16);
texture.store(Texel::new(0, 0), 0, [255u8, 255, 255, 255]);
texture.generate_mipmaps_in_place(Filter::Linear, Wrap::ClampToEdge).unwrap();

// one white texel in 256 fades away by the last level
let last = texture.load::<[u8; 4]>(Texel::ZERO, 4);
assert!(last[0] < 255);
assert_eq!(texture.load::<[u8; 4]>(Texel::ZERO, 0), [255, 255, 255, 255]);
```
*/

logwise::declare_logging_domain!();

pub mod addressing;
pub mod extent;
pub mod format;
pub mod mipmap;
pub mod resource;
pub mod storage;
pub mod texture;
pub mod typed;

pub use format::Format;
pub use texture::{Target, Texture};
