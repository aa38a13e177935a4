//! The interactive sandbox: camera, edit tools, configuration and the
//! command session that drives them.

pub mod camera;
pub mod config;
pub mod heightmap_image;
pub mod session;
pub mod tools;

pub use camera::{Camera, CameraSettings, Movement};
pub use config::{ConfigError, SandboxConfig, TerrainSource};
pub use session::{Command, CommandError, Reply, RunSummary, Session, SessionError};
pub use tools::EditOutcome;
