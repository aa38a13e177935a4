use glam::{IVec3, Mat4, Vec2, Vec3};
use voxbox_core::constants::{
    DEFAULT_CAMERA_SPEED, DEFAULT_MOUSE_SENSITIVITY, FOV_Y_DEG, PITCH_LIMIT_DEG, Z_FAR, Z_NEAR,
};
use voxbox_core::WorldPos;
use voxbox_world::VoxelGrid;

const INITIAL_YAW_DEG: f32 = -90.0;

/// Starting state for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub eye: WorldPos,
    /// World units per movement step.
    pub speed: f32,
    /// Degrees per pixel of mouse motion.
    pub sensitivity: f32,
    pub collision: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-1.0, 0.0, -1.0),
            speed: DEFAULT_CAMERA_SPEED,
            sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            collision: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Movement {
    pub fn from_name(name: &str) -> Option<Movement> {
        match name {
            "forward" | "w" => Some(Movement::Forward),
            "back" | "backward" | "s" => Some(Movement::Backward),
            "left" | "a" => Some(Movement::Left),
            "right" | "d" => Some(Movement::Right),
            "up" | "space" => Some(Movement::Up),
            "down" | "shift" => Some(Movement::Down),
            _ => None,
        }
    }
}

/// First-person yaw/pitch camera. Moves are committed only when the
/// destination does not collide with a visible block.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: WorldPos,
    view_dir: Vec3,
    up: Vec3,
    /// Degrees.
    yaw: f32,
    /// Degrees, within ±PITCH_LIMIT_DEG.
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    collision: bool,
    last_mouse: Option<Vec2>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            eye: settings.eye,
            view_dir: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw: INITIAL_YAW_DEG,
            pitch: 0.0,
            speed: settings.speed,
            sensitivity: settings.sensitivity,
            collision: settings.collision,
            last_mouse: None,
        }
    }

    pub fn eye(&self) -> WorldPos {
        self.eye
    }

    pub fn view_dir(&self) -> Vec3 {
        self.view_dir
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision
    }

    /// Rotate by a relative mouse delta in pixels. Positive `dy` is the
    /// mouse moving down, which tilts the view down. Non-finite deltas are
    /// ignored.
    pub fn look(&mut self, dx: f32, dy: f32) {
        let yaw = self.yaw + dx * self.sensitivity;
        let pitch = self.pitch - dy * self.sensitivity;
        if !yaw.is_finite() || !pitch.is_finite() {
            log::debug!("Ignoring non-finite look delta ({dx}, {dy})");
            return;
        }
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);

        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.view_dir = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }

    /// Rotate from an absolute cursor sample. The first sample only
    /// records the position. Non-finite samples are dropped.
    pub fn mouse_look(&mut self, x: f32, y: f32) {
        let sample = Vec2::new(x, y);
        if !sample.is_finite() {
            return;
        }
        if let Some(last) = self.last_mouse {
            let delta = sample - last;
            self.look(delta.x, delta.y);
        }
        self.last_mouse = Some(sample);
    }

    /// Unit vector to the camera's right, in the horizontal plane when level.
    pub fn right(&self) -> Vec3 {
        self.view_dir.cross(self.up).normalize_or_zero()
    }

    /// Position one step away in `movement`, ignoring collision.
    pub fn candidate(&self, movement: Movement) -> WorldPos {
        let s = self.speed;
        match movement {
            Movement::Forward => self.eye + self.view_dir * s,
            Movement::Backward => self.eye - self.view_dir * s,
            Movement::Left => self.eye - self.right() * s,
            Movement::Right => self.eye + self.right() * s,
            Movement::Up => self.eye + Vec3::Y * s,
            Movement::Down => self.eye - Vec3::Y * s,
        }
    }

    /// Take one step. Returns false when collision suppressed the move.
    pub fn step<const W: usize, const H: usize, const D: usize>(
        &mut self,
        movement: Movement,
        grid: &VoxelGrid<W, H, D>,
    ) -> bool {
        let candidate = self.candidate(movement);
        if self.collision_at(candidate, grid) {
            log::trace!("{movement:?} blocked at {candidate}");
            return false;
        }
        self.eye = candidate;
        true
    }

    pub fn move_forward<const W: usize, const H: usize, const D: usize>(
        &mut self,
        grid: &VoxelGrid<W, H, D>,
    ) -> bool {
        self.step(Movement::Forward, grid)
    }

    pub fn move_backward<const W: usize, const H: usize, const D: usize>(
        &mut self,
        grid: &VoxelGrid<W, H, D>,
    ) -> bool {
        self.step(Movement::Backward, grid)
    }

    pub fn move_left<const W: usize, const H: usize, const D: usize>(
        &mut self,
        grid: &VoxelGrid<W, H, D>,
    ) -> bool {
        self.step(Movement::Left, grid)
    }

    pub fn move_right<const W: usize, const H: usize, const D: usize>(
        &mut self,
        grid: &VoxelGrid<W, H, D>,
    ) -> bool {
        self.step(Movement::Right, grid)
    }

    pub fn move_up<const W: usize, const H: usize, const D: usize>(
        &mut self,
        grid: &VoxelGrid<W, H, D>,
    ) -> bool {
        self.step(Movement::Up, grid)
    }

    pub fn move_down<const W: usize, const H: usize, const D: usize>(
        &mut self,
        grid: &VoxelGrid<W, H, D>,
    ) -> bool {
        self.step(Movement::Down, grid)
    }

    /// Whether `position` lands in a visible block. The position is
    /// truncated toward zero per axis to pick the cell. Always false with
    /// collision off.
    pub fn collision_at<const W: usize, const H: usize, const D: usize>(
        &self,
        position: WorldPos,
        grid: &VoxelGrid<W, H, D>,
    ) -> bool {
        if !self.collision {
            return false;
        }
        let cell = IVec3::new(position.x as i32, position.y as i32, position.z as i32);
        grid.block(cell).is_some_and(|block| block.is_visible)
    }

    /// Flip collision. Returns the new state.
    pub fn toggle_collision(&mut self) -> bool {
        self.collision = !self.collision;
        self.collision
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.eye + self.view_dir, self.up)
    }

    pub fn view_proj(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let proj = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR);
        proj * self.view_matrix()
    }
}
