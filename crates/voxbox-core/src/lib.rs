//! Shared vocabulary of the voxbox sandbox: grid constants, block and face
//! enumerations, the cube mesh layout, and edit errors.

pub mod block;
pub mod constants;
pub mod error;
pub mod face;
pub mod mesh;
pub mod types;

pub use block::{Block, BlockType, Transform};
pub use error::EditError;
pub use face::{Face, ALL_FACES};
pub use types::{GridCoord, WorldPos};
