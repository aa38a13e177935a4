//! Colour-coded picking: every face of every cell gets a unique 24-bit
//! index, drawn as a flat RGB colour into the offscreen pick target.
//!
//! Index layout: `0` is the cleared background. Cell ordinal `n` (canonical
//! grid order) owns indices `1 + 6n ..= 6 + 6n`, one per face in canonical
//! face order. Empty cells own their indices too, so decoding never needs
//! to know which cells were drawn.

use voxbox_core::constants::{FACES_PER_BLOCK, PICK_BACKGROUND_INDEX, PICK_INDEX_MAX};
use voxbox_core::{Face, GridCoord};
use voxbox_world::VoxelGrid;

/// One pixel of the pick target.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PickColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PickColor {
    /// Clear colour of the pick target. Never assigned to a face.
    pub const BACKGROUND: PickColor = PickColor { r: 0, g: 0, b: 0 };

    /// Low byte in red, high byte in blue. Bits above 24 are dropped.
    pub fn from_index(index: u32) -> Self {
        Self {
            r: (index & 0xFF) as u8,
            g: ((index >> 8) & 0xFF) as u8,
            b: ((index >> 16) & 0xFF) as u8,
        }
    }

    pub fn index(self) -> u32 {
        self.r as u32 + ((self.g as u32) << 8) + ((self.b as u32) << 16)
    }

    pub fn is_background(self) -> bool {
        self.index() == PICK_BACKGROUND_INDEX
    }

    /// From a readback pixel (RGB or RGBA, extra bytes ignored).
    pub fn from_rgba(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [r, g, b, ..] => Some(Self {
                r: *r,
                g: *g,
                b: *b,
            }),
            _ => None,
        }
    }

    /// Normalized colour with opaque alpha, as a shader uniform expects.
    pub fn to_unit_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// A face of a cell, as recovered from a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickTarget {
    pub coord: GridCoord,
    pub face: Face,
}

impl PickTarget {
    /// The cell this face looks at; where a placed block goes.
    pub fn neighbor(&self) -> GridCoord {
        self.coord + self.face.offset()
    }
}

/// Index/colour arithmetic for a `W × H × D` grid.
pub struct PickCodec<const W: usize, const H: usize, const D: usize>;

impl<const W: usize, const H: usize, const D: usize> PickCodec<W, H, D> {
    /// Every face of a full grid must fit in the 24 bits of an RGB8 pixel.
    const FITS_IN_RGB8: () = assert!(
        W * H * D * FACES_PER_BLOCK <= PICK_INDEX_MAX as usize,
        "grid has more faces than an RGB8 pick target can encode"
    );

    /// Largest index this grid can produce.
    pub const MAX_INDEX: u32 = (W * H * D * FACES_PER_BLOCK) as u32;

    /// Pick index of `face` on `coord`, or None if `coord` is outside the grid.
    pub fn index_of(coord: GridCoord, face: Face) -> Option<u32> {
        let () = Self::FITS_IN_RGB8;
        let ordinal = VoxelGrid::<W, H, D>::linear_index(coord)?;
        Some((1 + ordinal * FACES_PER_BLOCK + face.index()) as u32)
    }

    pub fn encode(coord: GridCoord, face: Face) -> Option<PickColor> {
        Self::index_of(coord, face).map(PickColor::from_index)
    }

    /// Inverse of [`Self::encode`]. The background and any index past the
    /// end of the grid decode to None.
    pub fn decode(color: PickColor) -> Option<PickTarget> {
        let () = Self::FITS_IN_RGB8;
        let index = color.index();
        if index == PICK_BACKGROUND_INDEX {
            return None;
        }
        let global = (index - 1) as usize;
        let face = Face::from_index(global % FACES_PER_BLOCK)?;
        let coord = VoxelGrid::<W, H, D>::coord_at(global / FACES_PER_BLOCK)?;
        Some(PickTarget { coord, face })
    }
}
