use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::GridCoord;

/// Material of a grid cell. `Empty` is the "no block here" sentinel and is a
/// regular member of the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Dirt = 0,
    Grass = 1,
    Plank = 2,
    Brick = 3,
    Cobblestone = 4,
    Sandstone = 5,
    Mossystone = 6,
    LightBlueWool = 7,
    OrangeWool = 8,
    Snow = 9,
    Empty = 10,
}

impl BlockType {
    /// Every placeable material, in discriminant order.
    pub const MATERIALS: [BlockType; 10] = [
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Plank,
        BlockType::Brick,
        BlockType::Cobblestone,
        BlockType::Sandstone,
        BlockType::Mossystone,
        BlockType::LightBlueWool,
        BlockType::OrangeWool,
        BlockType::Snow,
    ];

    pub fn is_empty(self) -> bool {
        self == BlockType::Empty
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockType::Dirt => "Dirt",
            BlockType::Grass => "Grass",
            BlockType::Plank => "Plank",
            BlockType::Brick => "Brick",
            BlockType::Cobblestone => "Cobblestone",
            BlockType::Sandstone => "Sandstone",
            BlockType::Mossystone => "Mossystone",
            BlockType::LightBlueWool => "LightBlueWool",
            BlockType::OrangeWool => "OrangeWool",
            BlockType::Snow => "Snow",
            BlockType::Empty => "Empty",
        }
    }

    /// Case-insensitive lookup; underscores and dashes are ignored
    /// so `light_blue_wool` matches `LightBlueWool`.
    pub fn from_name(name: &str) -> Option<BlockType> {
        let wanted: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::MATERIALS
            .iter()
            .chain(std::iter::once(&BlockType::Empty))
            .copied()
            .find(|t| t.name().to_ascii_lowercase() == wanted)
    }

    /// Next placeable material, wrapping. `Empty` maps to the first material.
    pub fn next(self) -> BlockType {
        match Self::MATERIALS.iter().position(|t| *t == self) {
            Some(i) => Self::MATERIALS[(i + 1) % Self::MATERIALS.len()],
            None => Self::MATERIALS[0],
        }
    }

    /// Previous placeable material, wrapping. `Empty` maps to the last material.
    pub fn previous(self) -> BlockType {
        let n = Self::MATERIALS.len();
        match Self::MATERIALS.iter().position(|t| *t == self) {
            Some(i) => Self::MATERIALS[(i + n - 1) % n],
            None => Self::MATERIALS[n - 1],
        }
    }
}

/// Model matrix of a block. Fixed when the grid is built and never mutated;
/// the position it encodes is always the cell centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// Translation placing the unit cube on the centre of `coord`.
    pub fn at_cell(coord: GridCoord) -> Self {
        Self {
            matrix: Mat4::from_translation(coord.as_vec3()),
        }
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// Column-major copy for upload as a shader uniform.
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.matrix.to_cols_array()
    }
}

/// One cell of the grid.
///
/// Invariant: `is_visible` implies `block_type != Empty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub is_visible: bool,
    pub block_type: BlockType,
    pub transform: Transform,
}

impl Block {
    /// An empty, hidden cell at `coord`.
    pub fn empty_at(coord: GridCoord) -> Self {
        Self {
            is_visible: false,
            block_type: BlockType::Empty,
            transform: Transform::at_cell(coord),
        }
    }

    pub fn is_occupied(&self) -> bool {
        !self.block_type.is_empty()
    }
}
