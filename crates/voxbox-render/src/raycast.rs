use std::collections::HashMap;

use glam::{IVec3, Mat4, Vec2, Vec3};
use voxbox_core::constants::Z_FAR;
use voxbox_core::{Face, GridCoord, Transform};

use crate::pick::PickColor;
use crate::renderer::{PickError, PickRenderer};

/// Upper bound on DDA steps per sample. A ray to the far plane crosses
/// fewer cells than this in any direction.
const MAX_STEPS: usize = 1024;

/// CPU stand-in for the offscreen pick target.
///
/// Faces drawn during a pass are recorded with their colour. Sampling casts
/// a ray through the pixel and returns the colour of the first recorded face
/// it enters, or the background. A cell containing the ray origin is
/// skipped, since the camera cannot see the inside of a cube.
pub struct RaycastRenderer {
    width: u32,
    height: u32,
    inv_view_proj: Mat4,
    far: f32,
    current: PickColor,
    drawn: HashMap<(GridCoord, Face), PickColor>,
    in_pass: bool,
}

impl RaycastRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self, PickError> {
        if width == 0 || height == 0 {
            return Err(PickError::TargetInit(format!(
                "viewport {width}x{height} has no pixels"
            )));
        }
        log::debug!("Created {width}x{height} raycast pick target");
        Ok(Self {
            width,
            height,
            inv_view_proj: Mat4::IDENTITY,
            far: Z_FAR,
            current: PickColor::BACKGROUND,
            drawn: HashMap::new(),
            in_pass: false,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PickError> {
        if width == 0 || height == 0 {
            return Err(PickError::TargetInit(format!(
                "viewport {width}x{height} has no pixels"
            )));
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn is_in_pass(&self) -> bool {
        self.in_pass
    }

    /// Faces recorded in the current pass.
    pub fn drawn_faces(&self) -> usize {
        self.drawn.len()
    }

    /// World-space ray through the centre of pixel `(x, y)`, from the near
    /// plane to the far plane.
    fn pixel_ray(&self, x: u32, y: u32) -> (Vec3, Vec3, f32) {
        let size = Vec2::new(self.width as f32, self.height as f32);
        let pixel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
        let ndc = Vec2::new(pixel.x / size.x * 2.0 - 1.0, 1.0 - pixel.y / size.y * 2.0);
        let near = self.inv_view_proj.project_point3(ndc.extend(0.0));
        let far = self.inv_view_proj.project_point3(ndc.extend(1.0));
        let span = far - near;
        let length = span.length().min(self.far);
        (near, span.normalize_or_zero(), length)
    }

    /// Walk cells along the ray and return the colour of the first drawn
    /// face entered. Cubes span ±0.5 around integer coordinates.
    fn first_drawn_face(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<PickColor> {
        if dir == Vec3::ZERO {
            return None;
        }
        let p = origin + Vec3::splat(0.5);
        let mut cell = p.floor().as_ivec3();

        let mut step = IVec3::ZERO;
        let mut t_delta = Vec3::splat(f32::MAX);
        let mut t_max = Vec3::splat(f32::MAX);
        for axis in 0..3 {
            let d = dir[axis];
            let frac = p[axis] - p[axis].floor();
            if d > 0.0 {
                step[axis] = 1;
                t_delta[axis] = 1.0 / d;
                t_max[axis] = (1.0 - frac) / d;
            } else if d < 0.0 {
                step[axis] = -1;
                t_delta[axis] = -1.0 / d;
                t_max[axis] = frac / -d;
            }
        }

        for _ in 0..MAX_STEPS {
            let axis = if t_max.x < t_max.y {
                if t_max.x < t_max.z {
                    0
                } else {
                    2
                }
            } else if t_max.y < t_max.z {
                1
            } else {
                2
            };
            let t = t_max[axis];
            if t > max_dist {
                break;
            }
            cell[axis] += step[axis];
            t_max[axis] += t_delta[axis];

            let mut offset = IVec3::ZERO;
            offset[axis] = -step[axis];
            let Some(entered) = Face::from_offset(offset) else {
                break;
            };
            if let Some(color) = self.drawn.get(&(cell, entered)) {
                return Some(*color);
            }
        }
        None
    }
}

impl PickRenderer for RaycastRenderer {
    fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `view_proj` must be invertible.
    fn set_camera(&mut self, view_proj: Mat4) {
        self.inv_view_proj = view_proj.inverse();
    }

    fn begin_pick_pass(&mut self) -> Result<(), PickError> {
        if self.in_pass {
            return Err(PickError::TargetUnavailable(
                "pick pass already in progress".into(),
            ));
        }
        self.drawn.clear();
        self.current = PickColor::BACKGROUND;
        self.in_pass = true;
        Ok(())
    }

    fn set_encoded_color(&mut self, color: PickColor) {
        self.current = color;
    }

    fn draw_face(&mut self, coord: GridCoord, _transform: &Transform, face: Face) {
        if !self.in_pass {
            log::warn!("draw_face outside a pick pass ignored");
            return;
        }
        self.drawn.insert((coord, face), self.current);
    }

    fn sample_color_at(&mut self, x: u32, y: u32) -> PickColor {
        if !self.in_pass || x >= self.width || y >= self.height {
            return PickColor::BACKGROUND;
        }
        let (origin, dir, length) = self.pixel_ray(x, y);
        self.first_drawn_face(origin, dir, length)
            .unwrap_or(PickColor::BACKGROUND)
    }

    fn end_pick_pass(&mut self) {
        self.in_pass = false;
        self.drawn.clear();
    }
}
