//! Grey-scale heightmap images. Darker is lower.

use std::path::Path;

use image::GrayImage;
use voxbox_world::Heightmap;

use crate::config::ConfigError;

/// Decode `path` and sample it onto a `width × depth` column grid.
pub fn load(
    path: &Path,
    width: usize,
    depth: usize,
    height_limit: usize,
) -> Result<Heightmap, ConfigError> {
    let image = image::open(path)
        .map_err(|e| ConfigError::Image {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_luma8();
    if image.width() == 0 || image.height() == 0 {
        return Err(ConfigError::Image {
            path: path.to_path_buf(),
            message: "image has no pixels".into(),
        });
    }
    log::info!(
        "Sampling {}x{} heightmap {} onto {width}x{depth} columns",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(from_luma(&image, width, depth, height_limit))
}

/// Nearest-neighbour sample: image x runs along grid x, image rows along
/// grid z. Luminance 0 maps to y 0 and 255 to `height_limit - 1`.
pub fn from_luma(image: &GrayImage, width: usize, depth: usize, height_limit: usize) -> Heightmap {
    let top = height_limit.saturating_sub(1) as u32;
    let (img_w, img_h) = (image.width() as usize, image.height() as usize);
    Heightmap::from_fn(width, depth, |x, z| {
        let sx = (x * img_w / width.max(1)).min(img_w.saturating_sub(1));
        let sz = (z * img_h / depth.max(1)).min(img_h.saturating_sub(1));
        match image.get_pixel_checked(sx as u32, sz as u32) {
            Some(pixel) => pixel.0[0] as u32 * top / 255,
            None => 0,
        }
    })
}
