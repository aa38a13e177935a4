use thiserror::Error;

use crate::block::BlockType;
use crate::types::GridCoord;

/// Reasons a grid edit was refused. Returned instead of silently
/// overwriting or writing outside the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("cell {0} is outside the grid")]
    InvalidCoordinate(GridCoord),

    #[error("cell {coord} already holds {}", existing.name())]
    Occupied {
        coord: GridCoord,
        existing: BlockType,
    },

    #[error("cannot place the Empty sentinel at {0}; remove the block instead")]
    EmptyMaterial(GridCoord),
}
