// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Extents and integer texel coordinates.

Every texture in this crate is addressed in three dimensions.  Dimensions a
target does not use (height and depth of a 1D texture, depth of a 2D texture)
are fixed at 1, so the same arithmetic serves all targets.
*/

/// The size of a texture, or of one level of it, in texels.
///
/// # Examples
///
/// ```
/// use ghosts::extent::Extent3d;
///
/// let extent = Extent3d::new_2d(17, 9);
/// assert_eq!(extent.depth, 1);
/// assert_eq!(extent.max_dimension(), 17);
/// assert_eq!(extent.texel_count(), 17 * 9);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Extent3d {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent3d {
    /// A single texel.
    pub const ONE: Extent3d = Extent3d { width: 1, height: 1, depth: 1 };

    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }
    pub const fn new_1d(width: u32) -> Self {
        Self { width, height: 1, depth: 1 }
    }
    pub const fn new_2d(width: u32, height: u32) -> Self {
        Self { width, height, depth: 1 }
    }

    /// The largest of the three dimensions.
    #[inline] pub const fn max_dimension(&self) -> u32 {
        let wh = if self.width > self.height { self.width } else { self.height };
        if wh > self.depth { wh } else { self.depth }
    }

    /// Number of texels (or blocks, when used as a block count) covered.
    #[inline] pub const fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Shifts each dimension right by `level`, saturating to zero for large shifts.
    #[inline] pub fn shr(self, level: u32) -> Self {
        Self {
            width: self.width.checked_shr(level).unwrap_or(0),
            height: self.height.checked_shr(level).unwrap_or(0),
            depth: self.depth.checked_shr(level).unwrap_or(0),
        }
    }

    /// Component-wise maximum.
    #[inline] pub const fn max(self, other: Self) -> Self {
        Self {
            width: if self.width > other.width { self.width } else { other.width },
            height: if self.height > other.height { self.height } else { other.height },
            depth: if self.depth > other.depth { self.depth } else { other.depth },
        }
    }

    /// Component-wise division rounding up.
    #[inline] pub const fn div_ceil(self, other: Self) -> Self {
        Self {
            width: self.width.div_ceil(other.width),
            height: self.height.div_ceil(other.height),
            depth: self.depth.div_ceil(other.depth),
        }
    }

    /// Component-wise product.
    #[inline] pub const fn mul(self, other: Self) -> Self {
        Self {
            width: self.width * other.width,
            height: self.height * other.height,
            depth: self.depth * other.depth,
        }
    }

    /// True when `texel` lies inside this extent.
    #[inline] pub const fn contains(&self, texel: Texel3) -> bool {
        texel.x < self.width && texel.y < self.height && texel.z < self.depth
    }
}

/// Integer coordinates of a texel in a two-dimensional image.
///
/// The origin (0, 0) is the first texel in memory; X varies fastest.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Texel {
    pub x: u32,
    pub y: u32,
}
impl Texel {
    /// The origin texel at coordinates (0, 0).
    pub const ZERO: Texel = Texel { x: 0, y: 0 };

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Integer coordinates of a texel in a volume.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Texel3 {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}
impl Texel3 {
    pub const ZERO: Texel3 = Texel3 { x: 0, y: 0, z: 0 };

    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Converts texel coordinates to a linear texel index within `extent`.
    ///
    /// Rows are contiguous, then slices.
    #[inline] pub(crate) const fn linear_index(&self, extent: Extent3d) -> usize {
        (self.z as usize * extent.height as usize + self.y as usize) * extent.width as usize
            + self.x as usize
    }
}

impl From<Texel> for Texel3 {
    fn from(t: Texel) -> Self {
        Texel3 { x: t.x, y: t.y, z: 0 }
    }
}
impl From<u32> for Texel3 {
    fn from(x: u32) -> Self {
        Texel3 { x, y: 0, z: 0 }
    }
}
