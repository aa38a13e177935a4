use voxbox_core::BlockType;
use voxbox_render::PickTarget;
use voxbox_world::VoxelGrid;

use super::EditOutcome;

/// Execute the place tool: fill the cell the picked face looks at.
pub fn execute<const W: usize, const H: usize, const D: usize>(
    grid: &mut VoxelGrid<W, H, D>,
    target: Option<PickTarget>,
    block_type: BlockType,
) -> EditOutcome {
    let Some(target) = target else {
        return EditOutcome::NoSelection;
    };
    if !grid.is_occupied(target.coord) {
        return EditOutcome::NoSelection;
    }
    let coord = target.neighbor();
    if !VoxelGrid::<W, H, D>::is_valid_coordinate(coord) {
        log::debug!("Placement at {coord} is past the grid boundary; dropped");
        return EditOutcome::OutOfBounds(coord);
    }
    match grid.place_block(coord, block_type) {
        Ok(()) => {
            log::debug!("Placed {} at {coord}", block_type.name());
            EditOutcome::Placed { coord, block_type }
        }
        Err(err) => {
            log::warn!("Placement refused: {err}");
            EditOutcome::Rejected(err)
        }
    }
}
