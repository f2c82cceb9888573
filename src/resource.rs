// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Device resource lifecycle.

A graphics backend is reached only through the narrow [`Device`] trait: create
a device texture, upload one sub-image, bind, destroy.  Resources that live on
a device implement [`Resource`], whose four operations take the device they
talk to.

[`TextureResource`] pairs a CPU-side [`Texture`] with its device handle.
Creating it uploads every sub-image in layout order; updating re-uploads them.
*/

pub mod library;

use std::fmt::Debug;

use crate::extent::Extent3d;
use crate::format::Format;
use crate::texture::{Target, Texture};

pub use library::TextureLibrary;

/// Shape of a device texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub target: Target,
    pub format: Format,
    pub extent: Extent3d,
    pub layers: usize,
    pub faces: usize,
    pub levels: usize,
}

impl TextureDescriptor {
    pub fn for_texture(texture: &Texture) -> Self {
        Self {
            target: texture.target(),
            format: texture.format(),
            extent: texture.extent(),
            layers: texture.layers(),
            faces: texture.faces(),
            levels: texture.levels(),
        }
    }
}

/// Bytes of one sub-image, handed to [`Device::upload`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Upload<'a> {
    pub layer: usize,
    pub face: usize,
    pub level: usize,
    pub extent: Extent3d,
    pub data: &'a [u8],
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeviceError {
    #[error("Resource has not been created on the device")]
    NotCreated,
    #[error("Resource was already created on the device")]
    AlreadyCreated,
    #[error("Device rejected the request: {0}")]
    Rejected(String),
}

/// The backend operations resources need.
pub trait Device {
    /// Identifies a device texture.
    type Handle: Copy + Eq + Debug;

    fn create_texture(&mut self, descriptor: &TextureDescriptor) -> Result<Self::Handle, DeviceError>;
    fn upload(&mut self, handle: Self::Handle, upload: &Upload<'_>) -> Result<(), DeviceError>;
    fn bind_texture(&mut self, handle: Self::Handle, unit: u32) -> Result<(), DeviceError>;
    fn destroy_texture(&mut self, handle: Self::Handle);
}

/// Something that lives on a [`Device`].
pub trait Resource<D: Device> {
    /// Allocates the device-side object and fills it.
    fn create(&mut self, device: &mut D) -> Result<(), DeviceError>;
    /// Releases the device-side object.  Does nothing if it was never created.
    fn destroy(&mut self, device: &mut D);
    /// Makes the resource current at `slot`.
    fn bind(&self, device: &mut D, slot: u32) -> Result<(), DeviceError>;
    /// Pushes CPU-side changes to the device.
    fn update(&mut self, device: &mut D) -> Result<(), DeviceError>;
}

/// A [`Texture`] and, once created, its device handle.
#[derive(Debug)]
pub struct TextureResource<D: Device> {
    texture: Texture,
    handle: Option<D::Handle>,
}

impl<D: Device> TextureResource<D> {
    pub fn new(texture: Texture) -> Self {
        Self { texture, handle: None }
    }

    #[inline] pub fn texture(&self) -> &Texture {
        &self.texture
    }
    /// Mutable access to the CPU-side texture.  Call [`Resource::update`] to
    /// push changes.
    #[inline] pub fn texture_mut(&mut self) -> &mut Texture {
        &mut self.texture
    }
    #[inline] pub fn handle(&self) -> Option<D::Handle> {
        self.handle
    }
    #[inline] pub fn is_created(&self) -> bool {
        self.handle.is_some()
    }

    fn upload_all(&self, device: &mut D, handle: D::Handle) -> Result<(), DeviceError> {
        for sub in self.texture.sub_images() {
            let data = self.texture.data(sub.layer, sub.face, sub.level);
            logwise::trace_sync!(
                "uploading layer {layer} face {face} level {level}: {size} bytes",
                layer = sub.layer,
                face = sub.face,
                level = sub.level,
                size = sub.size
            );
            device.upload(handle, &Upload {
                layer: sub.layer,
                face: sub.face,
                level: sub.level,
                extent: sub.extent,
                data: &*data,
            })?;
        }
        Ok(())
    }
}

impl<D: Device> Resource<D> for TextureResource<D> {
    fn create(&mut self, device: &mut D) -> Result<(), DeviceError> {
        if self.handle.is_some() {
            return Err(DeviceError::AlreadyCreated);
        }
        let handle = device.create_texture(&TextureDescriptor::for_texture(&self.texture))?;
        if let Err(e) = self.upload_all(device, handle) {
            device.destroy_texture(handle);
            return Err(e);
        }
        logwise::info_sync!(
            "created device texture {handle} ({size} bytes)",
            handle = logwise::privacy::LogIt(&handle),
            size = self.texture.size()
        );
        self.handle = Some(handle);
        Ok(())
    }

    fn destroy(&mut self, device: &mut D) {
        if let Some(handle) = self.handle.take() {
            device.destroy_texture(handle);
        }
    }

    fn bind(&self, device: &mut D, slot: u32) -> Result<(), DeviceError> {
        let handle = self.handle.ok_or(DeviceError::NotCreated)?;
        device.bind_texture(handle, slot)
    }

    fn update(&mut self, device: &mut D) -> Result<(), DeviceError> {
        let handle = self.handle.ok_or(DeviceError::NotCreated)?;
        self.upload_all(device, handle)
    }
}
