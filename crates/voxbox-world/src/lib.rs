//! The voxel world: a dense block grid with an incrementally maintained
//! visibility cache, and the one-shot terrain generator that fills it.

pub mod generator;
pub mod grid;
pub mod heightmap;
pub mod terrain;

pub use generator::{GenerationStats, TerrainPalette, WorldGenerator};
pub use grid::{VoxelGrid, World};
pub use heightmap::{Heightmap, HeightmapError};
