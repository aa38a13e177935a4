use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxbox_core::constants::{
    DEFAULT_CAMERA_SPEED, DEFAULT_MOUSE_SENSITIVITY, WORLD_DEPTH, WORLD_HEIGHT, WORLD_WIDTH,
};
use voxbox_core::BlockType;
use voxbox_world::{terrain, Heightmap, HeightmapError};

use crate::camera::CameraSettings;
use crate::heightmap_image;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config RON: {0}")]
    Parse(String),
    #[error("Failed to decode heightmap image {}: {message}", path.display())]
    Image { path: PathBuf, message: String },
    #[error("Invalid heightmap: {0}")]
    Heightmap(#[from] HeightmapError),
}

/// Where the starting terrain comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TerrainSource {
    /// Every column at this height.
    Flat(u32),
    /// Perlin hills around `base`.
    Noise {
        seed: u32,
        base: f32,
        amplitude: f32,
    },
    /// Grey-scale image; relative paths resolve against the config file.
    Image(PathBuf),
}

impl Default for TerrainSource {
    fn default() -> Self {
        TerrainSource::Noise {
            seed: 0,
            base: 12.0,
            amplitude: 6.0,
        }
    }
}

/// Runtime settings, loaded from RON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Pick target size in pixels.
    pub viewport: (u32, u32),
    pub camera_speed: f32,
    pub mouse_sensitivity: f32,
    pub spawn: (f32, f32, f32),
    pub collision: bool,
    pub active_block: BlockType,
    pub terrain: TerrainSource,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            viewport: (1280, 720),
            camera_speed: DEFAULT_CAMERA_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            spawn: (16.0, 28.0, 40.0),
            collision: true,
            active_block: BlockType::Dirt,
            terrain: TerrainSource::default(),
        }
    }
}

impl SandboxConfig {
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn camera_settings(&self) -> CameraSettings {
        let (x, y, z) = self.spawn;
        CameraSettings {
            eye: Vec3::new(x, y, z),
            speed: self.camera_speed,
            sensitivity: self.mouse_sensitivity,
            collision: self.collision,
        }
    }

    /// Heightmap for the default world. `base_dir` anchors relative image paths.
    pub fn heightmap(&self, base_dir: Option<&Path>) -> Result<Heightmap, ConfigError> {
        match &self.terrain {
            TerrainSource::Flat(height) => {
                let map = terrain::flat(WORLD_WIDTH, WORLD_DEPTH, WORLD_HEIGHT, *height);
                Ok(map)
            }
            TerrainSource::Noise {
                seed,
                base,
                amplitude,
            } => {
                let (w, d, h) = (WORLD_WIDTH, WORLD_DEPTH, WORLD_HEIGHT);
                Ok(terrain::noise(w, d, h, *seed, *base, *amplitude))
            }
            TerrainSource::Image(path) => {
                let resolved = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                heightmap_image::load(&resolved, WORLD_WIDTH, WORLD_DEPTH, WORLD_HEIGHT)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = SandboxConfig::from_ron_str("(collision: true)").unwrap();
        assert_eq!(config, SandboxConfig::default());
        assert_eq!(config.viewport, (1280, 720));
        assert!(config.collision);
    }

    #[test]
    fn test_partial_config() {
        let config = SandboxConfig::from_ron_str(
            r#"(
                spawn: (1.0, 2.0, 3.0),
                collision: false,
                active_block: LightBlueWool,
                terrain: Flat(5),
            )"#,
        )
        .unwrap();
        assert_eq!(config.active_block, BlockType::LightBlueWool);
        assert_eq!(config.terrain, TerrainSource::Flat(5));
        assert_eq!(config.camera_speed, DEFAULT_CAMERA_SPEED);

        let settings = config.camera_settings();
        assert_eq!(settings.eye, Vec3::new(1.0, 2.0, 3.0));
        assert!(!settings.collision);
    }

    #[test]
    fn test_noise_terrain_parses() {
        let text = "(terrain: Noise(seed: 9, base: 10.0, amplitude: 4.0))";
        let config = SandboxConfig::from_ron_str(text).unwrap();
        let map = config.heightmap(None).unwrap();
        assert!(map.validate(WORLD_WIDTH, WORLD_DEPTH, WORLD_HEIGHT).is_ok());
    }

    #[test]
    fn test_parse_errors_surface() {
        assert!(matches!(
            SandboxConfig::from_ron_str("(viewport: 12)"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SandboxConfig::from_ron_str("(active_block: Obsidian)"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/voxbox.ron");
        let err = SandboxConfig::load(path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("voxbox.ron"));
    }

    #[test]
    fn test_flat_terrain_clamped_to_world() {
        let config = SandboxConfig {
            terrain: TerrainSource::Flat(500),
            ..SandboxConfig::default()
        };
        let map = config.heightmap(None).unwrap();
        assert_eq!(map.max_height(), Some(WORLD_HEIGHT as u32 - 1));
    }
}
