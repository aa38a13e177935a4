use voxbox_core::constants::{DEFAULT_DIRT_DEPTH, WORLD_HEIGHT};
use voxbox_core::{BlockType, GridCoord};

use crate::grid::VoxelGrid;
use crate::heightmap::{Heightmap, HeightmapError};

/// Which material goes where in a terrain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainPalette {
    /// Columns whose surface is at or above this y get a snow cap.
    pub snow_line: u32,
    /// Dirt cells between the surface and the cobblestone below.
    pub dirt_depth: u32,
}

impl TerrainPalette {
    /// Snow on the top quarter of a grid `height` cells tall.
    pub fn for_height(height: usize) -> Self {
        Self {
            snow_line: (height * 3 / 4) as u32,
            dirt_depth: DEFAULT_DIRT_DEPTH as u32,
        }
    }

    /// Material at `y` in a column whose surface is `surface`.
    /// Cells above the surface are `Empty`.
    pub fn material_at(&self, y: u32, surface: u32) -> BlockType {
        if y > surface {
            BlockType::Empty
        } else if y == surface {
            if surface >= self.snow_line {
                BlockType::Snow
            } else {
                BlockType::Grass
            }
        } else if surface - y <= self.dirt_depth {
            BlockType::Dirt
        } else {
            BlockType::Cobblestone
        }
    }
}

impl Default for TerrainPalette {
    fn default() -> Self {
        Self::for_height(WORLD_HEIGHT)
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub columns: usize,
    pub occupied: usize,
    pub visible: usize,
    pub hidden: usize,
}

/// Stamps a heightmap into a grid, then runs the one full occlusion pass.
#[derive(Debug, Clone, Default)]
pub struct WorldGenerator {
    palette: TerrainPalette,
}

impl WorldGenerator {
    pub fn new(palette: TerrainPalette) -> Self {
        Self { palette }
    }

    /// Overwrites every cell of `grid`. The heightmap is validated up front,
    /// so on error the grid is untouched.
    pub fn generate<const W: usize, const H: usize, const D: usize>(
        &self,
        grid: &mut VoxelGrid<W, H, D>,
        heightmap: &Heightmap,
    ) -> Result<GenerationStats, HeightmapError> {
        heightmap.validate(W, D, H)?;

        for x in 0..W {
            for z in 0..D {
                let Some(surface) = heightmap.get(x, z) else {
                    continue;
                };
                for y in 0..H {
                    let coord = GridCoord::new(x as i32, y as i32, z as i32);
                    grid.stamp(coord, self.palette.material_at(y as u32, surface));
                }
            }
        }

        let hidden = grid.occlusion_pass();
        let stats = GenerationStats {
            columns: W * D,
            occupied: grid.occupied_count(),
            visible: grid.visible_count(),
            hidden,
        };
        log::info!(
            "Generated {W}x{H}x{D} world: {} columns, {} occupied, {} visible, {} culled",
            stats.columns,
            stats.occupied,
            stats.visible,
            stats.hidden
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Small = VoxelGrid<10, 10, 10>;

    #[test]
    fn test_palette_layers() {
        let palette = TerrainPalette {
            snow_line: 7,
            dirt_depth: 2,
        };
        assert_eq!(palette.material_at(6, 5), BlockType::Empty);
        assert_eq!(palette.material_at(5, 5), BlockType::Grass);
        assert_eq!(palette.material_at(4, 5), BlockType::Dirt);
        assert_eq!(palette.material_at(3, 5), BlockType::Dirt);
        assert_eq!(palette.material_at(2, 5), BlockType::Cobblestone);
        assert_eq!(palette.material_at(0, 5), BlockType::Cobblestone);
        assert_eq!(palette.material_at(8, 8), BlockType::Snow);
        assert_eq!(palette.material_at(0, 0), BlockType::Grass);
    }

    #[test]
    fn test_default_palette() {
        let palette = TerrainPalette::default();
        assert_eq!(palette.snow_line, 24);
        assert_eq!(palette.dirt_depth, 3);
    }

    #[test]
    fn test_flat_slab_culls_interior() {
        let mut grid = Small::new();
        let map = Heightmap::from_fn(10, 10, |_, _| 2);
        let stats = WorldGenerator::new(TerrainPalette::for_height(10))
            .generate(&mut grid, &map)
            .unwrap();

        // Column fill is 0..=h: three layers.
        assert_eq!(stats.occupied, 300);
        assert_eq!(stats.columns, 100);
        // Only the middle layer's interior 8x8 is surrounded on every side.
        assert_eq!(stats.hidden, 64);
        assert_eq!(stats.visible, 236);
        assert!(!grid.get_block(GridCoord::new(4, 1, 4)).is_visible);
        assert!(grid.get_block(GridCoord::new(0, 1, 4)).is_visible);
        assert!(grid.get_block(GridCoord::new(4, 0, 4)).is_visible);
        let surface = grid.get_block(GridCoord::new(4, 2, 4));
        assert_eq!(surface.block_type, BlockType::Grass);
        assert!(!grid.is_occupied(GridCoord::new(4, 3, 4)));
    }

    #[test]
    fn test_existing_blocks_are_overwritten() {
        let mut grid = Small::new();
        grid.place_block(GridCoord::new(1, 8, 1), BlockType::Brick).unwrap();
        let map = Heightmap::from_fn(10, 10, |_, _| 0);
        let generator = WorldGenerator::default();
        generator.generate(&mut grid, &map).unwrap();
        assert!(!grid.is_occupied(GridCoord::new(1, 8, 1)));
        assert_eq!(grid.occupied_count(), 100);
    }

    #[test]
    fn test_bad_heightmap_leaves_grid_untouched() {
        let mut grid = Small::new();
        let mut heights = vec![1; 100];
        heights[57] = 10;
        let map = Heightmap::new(10, 10, heights).unwrap();
        let generator = WorldGenerator::default();
        let err = generator.generate(&mut grid, &map).unwrap_err();
        assert_eq!(
            err,
            HeightmapError::HeightOutOfRange {
                x: 7,
                z: 5,
                height: 10,
                limit: 10
            }
        );
        assert_eq!(grid.occupied_count(), 0);

        let narrow = Heightmap::from_fn(9, 10, |_, _| 1);
        assert!(generator.generate(&mut grid, &narrow).is_err());
    }
}
