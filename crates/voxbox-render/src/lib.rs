//! Picking: face/colour arithmetic, the renderer contract for the offscreen
//! pick pass, and a CPU raycast backend that implements it.

pub mod pick;
pub mod raycast;
pub mod renderer;

pub use pick::{PickCodec, PickColor, PickTarget};
pub use raycast::RaycastRenderer;
pub use renderer::{pick_at, pick_center, PickError, PickPass, PickRenderer};
