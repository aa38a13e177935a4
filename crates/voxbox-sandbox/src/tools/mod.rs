pub mod place;
pub mod remove;

use voxbox_core::{BlockType, EditError, GridCoord};

/// What an edit tool did with one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Removed {
        coord: GridCoord,
        block_type: BlockType,
    },
    Placed {
        coord: GridCoord,
        block_type: BlockType,
    },
    /// Nothing under the crosshair, or the pick pointed at an empty cell.
    NoSelection,
    /// The placement cell lies past the grid boundary; dropped.
    OutOfBounds(GridCoord),
    Rejected(EditError),
}

impl EditOutcome {
    /// Whether the grid changed.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            EditOutcome::Removed { .. } | EditOutcome::Placed { .. }
        )
    }
}
