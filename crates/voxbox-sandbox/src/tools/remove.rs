use voxbox_render::PickTarget;
use voxbox_world::VoxelGrid;

use super::EditOutcome;

/// Execute the break tool: empty the picked cell.
pub fn execute<const W: usize, const H: usize, const D: usize>(
    grid: &mut VoxelGrid<W, H, D>,
    target: Option<PickTarget>,
) -> EditOutcome {
    let Some(target) = target else {
        return EditOutcome::NoSelection;
    };
    match grid.remove_block(target.coord) {
        Some(block_type) => {
            log::debug!("Removed {} at {}", block_type.name(), target.coord);
            EditOutcome::Removed {
                coord: target.coord,
                block_type,
            }
        }
        None => EditOutcome::NoSelection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use voxbox_core::{BlockType, Face};

    #[test]
    fn test_remove_picked_block() {
        let mut grid = VoxelGrid::<10, 10, 10>::new();
        let coord = IVec3::new(3, 0, 3);
        grid.place_block(coord, BlockType::Plank).unwrap();
        let target = PickTarget {
            coord,
            face: Face::Top,
        };
        assert_eq!(
            execute(&mut grid, Some(target)),
            EditOutcome::Removed {
                coord,
                block_type: BlockType::Plank
            }
        );
        assert!(!grid.is_occupied(coord));
        // Same pick again finds nothing.
        assert_eq!(execute(&mut grid, Some(target)), EditOutcome::NoSelection);
    }

    #[test]
    fn test_no_selection_is_noop() {
        let mut grid = VoxelGrid::<10, 10, 10>::new();
        grid.place_block(IVec3::ZERO, BlockType::Dirt).unwrap();
        assert_eq!(execute(&mut grid, None), EditOutcome::NoSelection);
        assert_eq!(grid.occupied_count(), 1);
    }
}
