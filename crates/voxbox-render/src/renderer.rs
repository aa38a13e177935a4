use glam::Mat4;
use thiserror::Error;
use voxbox_core::{Face, GridCoord, Transform, ALL_FACES};
use voxbox_world::VoxelGrid;

use crate::pick::{PickCodec, PickColor, PickTarget};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    /// The offscreen target could not be created. Fatal at startup.
    #[error("failed to create pick target: {0}")]
    TargetInit(String),
    /// A pick pass could not begin on an existing target.
    #[error("pick target unavailable: {0}")]
    TargetUnavailable(String),
}

/// The part of a renderer that the picking pass drives.
///
/// Within one pass the caller sets a colour, then draws a face with it,
/// for every face of every occupied cell. The renderer owns all target
/// state; the codec only supplies colours.
pub trait PickRenderer {
    /// Size of the pick target in pixels.
    fn viewport(&self) -> (u32, u32);

    /// View-projection used by subsequent passes.
    fn set_camera(&mut self, view_proj: Mat4);

    /// Bind and clear the offscreen target to [`PickColor::BACKGROUND`].
    fn begin_pick_pass(&mut self) -> Result<(), PickError>;

    fn set_encoded_color(&mut self, color: PickColor);

    /// Draw one face of the cube at `coord` in the current colour.
    fn draw_face(&mut self, coord: GridCoord, transform: &Transform, face: Face);

    /// Read one pixel of the pick target. `(0, 0)` is the top-left corner;
    /// pixels outside the viewport read as background.
    fn sample_color_at(&mut self, x: u32, y: u32) -> PickColor;

    /// Unbind the offscreen target and restore the default one.
    fn end_pick_pass(&mut self);
}

/// An active pick pass. Ends the pass when dropped, on every exit path.
pub struct PickPass<'a, R: PickRenderer + ?Sized> {
    renderer: &'a mut R,
}

impl<'a, R: PickRenderer + ?Sized> PickPass<'a, R> {
    pub fn begin(renderer: &'a mut R) -> Result<Self, PickError> {
        renderer.begin_pick_pass()?;
        Ok(Self { renderer })
    }

    /// Draw all 6 faces of every occupied cell, hidden ones included, in
    /// canonical order. Returns the number of faces drawn.
    pub fn draw_grid<const W: usize, const H: usize, const D: usize>(
        &mut self,
        grid: &VoxelGrid<W, H, D>,
    ) -> usize {
        let mut faces = 0usize;
        for (coord, block) in grid.occupied() {
            for face in ALL_FACES {
                let Some(color) = PickCodec::<W, H, D>::encode(coord, face) else {
                    continue;
                };
                self.renderer.set_encoded_color(color);
                self.renderer.draw_face(coord, &block.transform, face);
                faces += 1;
            }
        }
        faces
    }

    pub fn sample(&mut self, x: u32, y: u32) -> PickColor {
        self.renderer.sample_color_at(x, y)
    }
}

impl<R: PickRenderer + ?Sized> Drop for PickPass<'_, R> {
    fn drop(&mut self) {
        self.renderer.end_pick_pass();
    }
}

/// Run a full pick pass and decode the pixel at `(x, y)`.
///
/// Ok(None) means no selection: the background, an index past the grid, or
/// a cell that is empty in `grid`.
pub fn pick_at<R, const W: usize, const H: usize, const D: usize>(
    renderer: &mut R,
    grid: &VoxelGrid<W, H, D>,
    x: u32,
    y: u32,
) -> Result<Option<PickTarget>, PickError>
where
    R: PickRenderer + ?Sized,
{
    let color = {
        let mut pass = PickPass::begin(renderer)?;
        let faces = pass.draw_grid(grid);
        log::trace!("Pick pass drew {faces} faces");
        pass.sample(x, y)
    };

    match PickCodec::<W, H, D>::decode(color) {
        None => {
            log::debug!("Pick at ({x}, {y}): nothing (index {})", color.index());
            Ok(None)
        }
        Some(target) if !grid.is_occupied(target.coord) => {
            log::debug!("Pick at ({x}, {y}) hit empty cell {}", target.coord);
            Ok(None)
        }
        Some(target) => {
            log::debug!("Pick at ({x}, {y}): {} {:?}", target.coord, target.face);
            Ok(Some(target))
        }
    }
}

/// [`pick_at`] the crosshair.
pub fn pick_center<R, const W: usize, const H: usize, const D: usize>(
    renderer: &mut R,
    grid: &VoxelGrid<W, H, D>,
) -> Result<Option<PickTarget>, PickError>
where
    R: PickRenderer + ?Sized,
{
    let (width, height) = renderer.viewport();
    pick_at(renderer, grid, width / 2, height / 2)
}
