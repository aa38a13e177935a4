//! Single source of truth for shared constants.
//! Grid extents are compile-time values; nothing here is runtime-configurable.

/// World extent along x, in blocks.
pub const WORLD_WIDTH: usize = 32;

/// World extent along y (vertical), in blocks.
pub const WORLD_HEIGHT: usize = 32;

/// World extent along z, in blocks.
pub const WORLD_DEPTH: usize = 32;

/// Faces per block. Each cell consumes this many pick indices.
pub const FACES_PER_BLOCK: usize = 6;

/// Pick index reserved for the cleared background (pure black).
pub const PICK_BACKGROUND_INDEX: u32 = 0;

/// Largest index representable in an 8-bit-per-channel RGB target (2^24 - 1).
pub const PICK_INDEX_MAX: u32 = 0x00FF_FFFF;

/// Pitch is clamped to +/- this many degrees.
pub const PITCH_LIMIT_DEG: f32 = 89.0;

/// Degrees of yaw/pitch per pixel of mouse motion.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.5;

/// World units per movement step.
pub const DEFAULT_CAMERA_SPEED: f32 = 0.5;

/// Vertical field of view of the perspective projection, in degrees.
pub const FOV_Y_DEG: f32 = 45.0;

/// Near clipping plane distance.
pub const Z_NEAR: f32 = 0.1;

/// Far clipping plane distance. Also bounds CPU pick ray length.
pub const Z_FAR: f32 = 150.0;

/// Cells below the surface block that are dirt before stone begins.
pub const DEFAULT_DIRT_DEPTH: usize = 3;
