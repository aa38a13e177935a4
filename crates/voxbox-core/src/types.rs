use glam::IVec3;

/// Integer cell coordinate in the voxel grid. May be out of range;
/// validity is decided by the grid, not by the type.
pub type GridCoord = IVec3;

/// Continuous world-space position. Block `(x, y, z)` is a unit cube
/// centred on `(x, y, z)`.
pub type WorldPos = glam::Vec3;
