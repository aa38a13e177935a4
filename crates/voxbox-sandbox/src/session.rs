//! Line-oriented driver standing in for the window's frame loop: each input
//! line is one frame's worth of input.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

use glam::Vec3;
use thiserror::Error;
use voxbox_core::BlockType;
use voxbox_render::{pick_center, PickError, PickRenderer, PickTarget, RaycastRenderer};
use voxbox_world::{World, WorldGenerator};

use crate::camera::{Camera, Movement};
use crate::config::{ConfigError, SandboxConfig};
use crate::tools::{self, EditOutcome};

/// Most steps a single move command may take in one frame.
pub const MAX_STEPS_PER_MOVE: u32 = 256;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pick(#[from] PickError),
    #[error("I/O error on command stream: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArguments {
        command: String,
        expected: &'static str,
    },
    #[error("unknown block `{0}`")]
    UnknownBlock(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Move { movement: Movement, steps: u32 },
    Look { dx: f32, dy: f32 },
    Break,
    Place,
    Select(BlockType),
    Next,
    Previous,
    ToggleCollision,
    Where,
    Stats,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield None.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.split('#').next().unwrap_or("").trim();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();
        let head_lower = head.to_ascii_lowercase();
        let bad = |expected: &'static str| CommandError::BadArguments {
            command: head_lower.clone(),
            expected,
        };

        if let Some(movement) = Movement::from_name(&head_lower) {
            let steps = match args.as_slice() {
                [] => 1,
                [n] => match n.parse() {
                    Ok(steps) if steps <= MAX_STEPS_PER_MOVE => steps,
                    _ => return Err(bad("an optional step count up to 256")),
                },
                _ => return Err(bad("an optional step count up to 256")),
            };
            return Ok(Some(Command::Move { movement, steps }));
        }

        let command = match (head_lower.as_str(), args.as_slice()) {
            ("look", [dx, dy]) => match (dx.parse::<f32>(), dy.parse::<f32>()) {
                (Ok(dx), Ok(dy)) if dx.is_finite() && dy.is_finite() => Command::Look { dx, dy },
                _ => return Err(bad("two numbers: dx dy")),
            },
            ("look", _) => return Err(bad("two numbers: dx dy")),
            ("break", []) => Command::Break,
            ("place", []) => Command::Place,
            ("select", [name]) => match BlockType::from_name(name) {
                Some(block) if !block.is_empty() => Command::Select(block),
                _ => return Err(CommandError::UnknownBlock(name.to_string())),
            },
            ("select", _) => return Err(bad("a block name")),
            ("next", []) => Command::Next,
            ("prev" | "previous", []) => Command::Previous,
            ("collision", []) => Command::ToggleCollision,
            ("where", []) => Command::Where,
            ("stats", []) => Command::Stats,
            ("quit" | "exit", []) => Command::Quit,
            (
                "break" | "place" | "next" | "prev" | "previous" | "collision" | "where" | "stats"
                | "quit" | "exit",
                _,
            ) => return Err(bad("no arguments")),
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(Some(command))
    }
}

/// Result of one command, printed back to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Moved {
        taken: u32,
        requested: u32,
        eye: Vec3,
    },
    Looked { yaw: f32, pitch: f32, dir: Vec3 },
    Edit(EditOutcome),
    Selected(BlockType),
    Collision(bool),
    Position {
        eye: Vec3,
        dir: Vec3,
        target: Option<PickTarget>,
        active: BlockType,
    },
    Stats {
        occupied: usize,
        visible: usize,
        frames: u64,
    },
    Quit,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Moved {
                taken,
                requested,
                eye,
            } => write!(
                f,
                "moved {taken}/{requested} to ({:.2}, {:.2}, {:.2})",
                eye.x, eye.y, eye.z
            ),
            Reply::Looked { yaw, pitch, dir } => write!(
                f,
                "yaw {yaw:.1} pitch {pitch:.1} dir ({:.3}, {:.3}, {:.3})",
                dir.x, dir.y, dir.z
            ),
            Reply::Edit(outcome) => match outcome {
                EditOutcome::Removed { coord, block_type } => {
                    write!(f, "removed {} at {coord}", block_type.name())
                }
                EditOutcome::Placed { coord, block_type } => {
                    write!(f, "placed {} at {coord}", block_type.name())
                }
                EditOutcome::NoSelection => write!(f, "no selection"),
                EditOutcome::OutOfBounds(coord) => write!(f, "{coord} is outside the world"),
                EditOutcome::Rejected(err) => write!(f, "rejected: {err}"),
            },
            Reply::Selected(block) => write!(f, "active block {}", block.name()),
            Reply::Collision(on) => write!(f, "collision {}", if *on { "on" } else { "off" }),
            Reply::Position {
                eye,
                dir,
                target,
                active,
            } => {
                write!(
                    f,
                    "eye ({:.2}, {:.2}, {:.2}) dir ({:.3}, {:.3}, {:.3}) active {}",
                    eye.x,
                    eye.y,
                    eye.z,
                    dir.x,
                    dir.y,
                    dir.z,
                    active.name()
                )?;
                match target {
                    Some(t) => write!(f, " looking at {} {:?}", t.coord, t.face),
                    None => write!(f, " looking at nothing"),
                }
            }
            Reply::Stats {
                occupied,
                visible,
                frames,
            } => write!(f, "{occupied} blocks, {visible} visible, {frames} frames"),
            Reply::Quit => write!(f, "bye"),
        }
    }
}

/// Totals from [`Session::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: usize,
    pub edits: usize,
    pub skipped: usize,
}

/// Owns the world, the camera and the pick renderer; one instance per process.
pub struct Session<R: PickRenderer = RaycastRenderer> {
    grid: World,
    camera: Camera,
    renderer: R,
    active_block: BlockType,
    frames: u64,
}

impl Session<RaycastRenderer> {
    /// Generate the world and create the pick target described by `config`.
    pub fn from_config(
        config: &SandboxConfig,
        base_dir: Option<&Path>,
    ) -> Result<Self, SessionError> {
        let heightmap = config.heightmap(base_dir)?;
        let mut grid = World::new();
        WorldGenerator::default()
            .generate(&mut grid, &heightmap)
            .map_err(ConfigError::from)?;
        let (width, height) = config.viewport;
        let renderer = RaycastRenderer::new(width, height)?;
        Ok(Self::new(
            grid,
            Camera::new(config.camera_settings()),
            renderer,
            config.active_block,
        ))
    }
}

impl<R: PickRenderer> Session<R> {
    pub fn new(grid: World, camera: Camera, renderer: R, active_block: BlockType) -> Self {
        Self {
            grid,
            camera,
            renderer,
            active_block,
            frames: 0,
        }
    }

    pub fn grid(&self) -> &World {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn active_block(&self) -> BlockType {
        self.active_block
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pick at the crosshair with the current camera.
    pub fn pick(&mut self) -> Result<Option<PickTarget>, PickError> {
        let (width, height) = self.renderer.viewport();
        self.renderer.set_camera(self.camera.view_proj(width, height));
        pick_center(&mut self.renderer, &self.grid)
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, PickError> {
        self.frames += 1;
        log::trace!("Frame {}: {command:?}", self.frames);

        let reply = match command {
            Command::Move { movement, steps } => {
                let allowed = steps.min(MAX_STEPS_PER_MOVE);
                let mut taken = 0;
                while taken < allowed && self.camera.step(movement, &self.grid) {
                    taken += 1;
                }
                Reply::Moved {
                    taken,
                    requested: steps,
                    eye: self.camera.eye(),
                }
            }
            Command::Look { dx, dy } => {
                self.camera.look(dx, dy);
                Reply::Looked {
                    yaw: self.camera.yaw(),
                    pitch: self.camera.pitch(),
                    dir: self.camera.view_dir(),
                }
            }
            Command::Break => {
                let target = self.pick()?;
                Reply::Edit(tools::remove::execute(&mut self.grid, target))
            }
            Command::Place => {
                let target = self.pick()?;
                let outcome = tools::place::execute(&mut self.grid, target, self.active_block);
                Reply::Edit(outcome)
            }
            Command::Select(block) => {
                self.active_block = block;
                Reply::Selected(block)
            }
            Command::Next => {
                self.active_block = self.active_block.next();
                Reply::Selected(self.active_block)
            }
            Command::Previous => {
                self.active_block = self.active_block.previous();
                Reply::Selected(self.active_block)
            }
            Command::ToggleCollision => {
                let on = self.camera.toggle_collision();
                log::info!("Collision {}", if on { "enabled" } else { "disabled" });
                Reply::Collision(on)
            }
            Command::Where => Reply::Position {
                eye: self.camera.eye(),
                dir: self.camera.view_dir(),
                target: self.pick()?,
                active: self.active_block,
            },
            Command::Stats => Reply::Stats {
                occupied: self.grid.occupied_count(),
                visible: self.grid.visible_count(),
                frames: self.frames,
            },
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    /// Execute commands from `input` until it ends or `quit`, writing one
    /// reply line per command to `output`. Bad lines are logged and skipped.
    pub fn run(
        &mut self,
        input: impl BufRead,
        output: &mut impl Write,
    ) -> Result<RunSummary, SessionError> {
        let mut summary = RunSummary::default();
        for (number, line) in input.lines().enumerate() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    log::warn!("Line {}: {err}; skipped", number + 1);
                    summary.skipped += 1;
                    continue;
                }
            };
            let reply = self.execute(command)?;
            summary.commands += 1;
            if matches!(&reply, Reply::Edit(outcome) if outcome.is_edit()) {
                summary.edits += 1;
            }
            writeln!(output, "{reply}")?;
            if reply == Reply::Quit {
                break;
            }
        }
        log::info!(
            "Session ended after {} commands ({} edits, {} skipped)",
            summary.commands,
            summary.edits,
            summary.skipped
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;
    use glam::IVec3;
    use voxbox_core::{EditError, Face};
    use voxbox_world::terrain;

    /// World with a single floor layer at y = 0 and a camera above (16, 0, 16)
    /// looking straight down.
    fn floor_session() -> Session {
        let mut grid = World::new();
        let map = terrain::flat(32, 32, 32, 0);
        WorldGenerator::default().generate(&mut grid, &map).unwrap();
        let mut camera = Camera::new(CameraSettings {
            eye: Vec3::new(16.0, 5.0, 16.0),
            ..CameraSettings::default()
        });
        camera.look(0.0, 1000.0);
        let renderer = RaycastRenderer::new(64, 48).unwrap();
        Session::new(grid, camera, renderer, BlockType::Brick)
    }

    fn empty_session(eye: Vec3) -> Session {
        let camera = Camera::new(CameraSettings {
            eye,
            ..CameraSettings::default()
        });
        let renderer = RaycastRenderer::new(64, 48).unwrap();
        Session::new(World::new(), camera, renderer, BlockType::Dirt)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(Command::parse("# just a comment"), Ok(None));
        assert_eq!(
            Command::parse("forward 3 # run"),
            Ok(Some(Command::Move {
                movement: Movement::Forward,
                steps: 3
            }))
        );
        assert_eq!(
            Command::parse("BACK"),
            Ok(Some(Command::Move {
                movement: Movement::Backward,
                steps: 1
            }))
        );
        assert_eq!(
            Command::parse("look -10 4.5"),
            Ok(Some(Command::Look { dx: -10.0, dy: 4.5 }))
        );
        assert_eq!(
            Command::parse("select orange_wool"),
            Ok(Some(Command::Select(BlockType::OrangeWool)))
        );
        assert_eq!(Command::parse("prev"), Ok(Some(Command::Previous)));
        assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("jump"),
            Err(CommandError::Unknown("jump".into()))
        );
        assert!(matches!(
            Command::parse("look 1"),
            Err(CommandError::BadArguments { .. })
        ));
        assert!(matches!(
            Command::parse("left many"),
            Err(CommandError::BadArguments { .. })
        ));
        assert!(matches!(
            Command::parse("break now"),
            Err(CommandError::BadArguments { .. })
        ));
        for line in ["look nan 0", "look 0 inf", "look -inf 1"] {
            assert!(Command::parse(line).is_err(), "{line}");
        }
        assert!(matches!(
            Command::parse("forward 4294967295"),
            Err(CommandError::BadArguments { .. })
        ));
        assert_eq!(
            Command::parse("forward 256"),
            Ok(Some(Command::Move {
                movement: Movement::Forward,
                steps: MAX_STEPS_PER_MOVE
            }))
        );
        assert_eq!(
            Command::parse("select empty"),
            Err(CommandError::UnknownBlock("empty".into()))
        );
        assert_eq!(
            Command::parse("select lava"),
            Err(CommandError::UnknownBlock("lava".into()))
        );
    }

    #[test]
    fn test_break_then_place_over_hole() {
        let mut session = floor_session();
        assert_eq!(session.grid().occupied_count(), 1024);

        let reply = session.execute(Command::Break).unwrap();
        assert_eq!(
            reply,
            Reply::Edit(EditOutcome::Removed {
                coord: IVec3::new(16, 0, 16),
                block_type: BlockType::Grass
            })
        );
        // Neighbors of the hole stay visible, the hole is not.
        assert!(session.grid().get_block(IVec3::new(17, 0, 16)).is_visible);
        assert!(!session.grid().get_block(IVec3::new(16, 0, 16)).is_visible);

        // Looking through the hole hits nothing below the world.
        let reply = session.execute(Command::Place).unwrap();
        assert_eq!(reply, Reply::Edit(EditOutcome::NoSelection));
        assert_eq!(session.grid().occupied_count(), 1023);
    }

    #[test]
    fn test_place_stacks_on_top_face() {
        let mut session = floor_session();
        assert_eq!(
            session.execute(Command::Place).unwrap(),
            Reply::Edit(EditOutcome::Placed {
                coord: IVec3::new(16, 1, 16),
                block_type: BlockType::Brick
            })
        );
        session.execute(Command::Next).unwrap();
        assert_eq!(session.active_block(), BlockType::Cobblestone);
        assert_eq!(
            session.execute(Command::Place).unwrap(),
            Reply::Edit(EditOutcome::Placed {
                coord: IVec3::new(16, 2, 16),
                block_type: BlockType::Cobblestone
            })
        );
        assert_eq!(session.grid().occupied_count(), 1026);
    }

    #[test]
    fn test_background_pick_on_empty_scene_mutates_nothing() {
        let mut session = empty_session(Vec3::new(16.0, 16.0, 40.0));
        for command in [Command::Break, Command::Place] {
            assert_eq!(
                session.execute(command).unwrap(),
                Reply::Edit(EditOutcome::NoSelection)
            );
        }
        assert_eq!(session.grid().occupied_count(), 0);
        assert_eq!(session.grid().visible_count(), 0);
    }

    #[test]
    fn test_two_block_adjacency() {
        let mut grid = World::new();
        let a = IVec3::new(16, 16, 16);
        grid.place_block(a, BlockType::Dirt).unwrap();
        let camera = Camera::new(CameraSettings {
            eye: Vec3::new(16.0, 16.0, 24.0),
            ..CameraSettings::default()
        });
        let renderer = RaycastRenderer::new(64, 48).unwrap();
        let mut session = Session::new(grid, camera, renderer, BlockType::Snow);

        // Place B against A's front face.
        let b = a + Face::Front.offset();
        assert_eq!(
            session.execute(Command::Place).unwrap(),
            Reply::Edit(EditOutcome::Placed {
                coord: b,
                block_type: BlockType::Snow
            })
        );

        // Placing against B's opposite face points back into A.
        let outcome = tools::place::execute(
            &mut session.grid,
            Some(PickTarget {
                coord: b,
                face: Face::Front.opposite(),
            }),
            BlockType::Snow,
        );
        assert_eq!(
            outcome,
            EditOutcome::Rejected(EditError::Occupied {
                coord: a,
                existing: BlockType::Dirt
            })
        );

        let grid = session.grid();
        assert_eq!(grid.occupied_count(), 2);
        assert!(grid.get_block(a).is_visible);
        assert!(grid.get_block(b).is_visible);
        assert!(!grid.is_fully_surrounded(a));
        assert!(!grid.is_fully_surrounded(b));
    }

    #[test]
    fn test_moves_stop_at_collision() {
        let mut grid = World::new();
        grid.place_block(IVec3::new(5, 5, 5), BlockType::Brick).unwrap();
        let camera = Camera::new(CameraSettings {
            eye: Vec3::new(5.2, 5.2, 7.9),
            ..CameraSettings::default()
        });
        let renderer = RaycastRenderer::new(64, 48).unwrap();
        let mut session = Session::new(grid, camera, renderer, BlockType::Dirt);

        let reply = session
            .execute(Command::Move {
                movement: Movement::Forward,
                steps: 10,
            })
            .unwrap();
        // 7.9 -> 7.4 -> 6.9 -> 6.4 -> 5.9 would land in (5,5,5).
        assert!(matches!(
            reply,
            Reply::Moved {
                taken: 3,
                requested: 10,
                ..
            }
        ));

        assert_eq!(
            session.execute(Command::ToggleCollision).unwrap(),
            Reply::Collision(false)
        );
        let reply = session
            .execute(Command::Move {
                movement: Movement::Forward,
                steps: 2,
            })
            .unwrap();
        assert!(matches!(
            reply,
            Reply::Moved {
                taken: 2,
                requested: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_move_is_capped_per_frame() {
        let mut session = empty_session(Vec3::new(16.0, 16.0, 16.0));
        let reply = session
            .execute(Command::Move {
                movement: Movement::Up,
                steps: u32::MAX,
            })
            .unwrap();
        let Reply::Moved {
            taken,
            requested,
            eye,
        } = reply
        else {
            panic!("expected a move reply, got {reply:?}");
        };
        assert_eq!(taken, MAX_STEPS_PER_MOVE);
        assert_eq!(requested, u32::MAX);
        let expected = 16.0 + 0.5 * MAX_STEPS_PER_MOVE as f32;
        assert!((eye.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_run_script() {
        let mut session = floor_session();
        let script = "\
# dig and rebuild
break
stats
bogus command
select plank
look 0 0
where
quit
break
";
        let mut out = Vec::new();
        let summary = session.run(script.as_bytes(), &mut out).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                commands: 6,
                edits: 1,
                skipped: 1
            }
        );
        assert_eq!(session.active_block(), BlockType::Plank);
        assert_eq!(session.frames(), 6);
        // The break after quit never ran.
        assert_eq!(session.grid().occupied_count(), 1023);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("removed Grass at"));
        assert_eq!(lines[1], "1023 blocks, 1023 visible, 2 frames");
        assert_eq!(lines[2], "active block Plank");
        assert!(lines[4].contains("looking at nothing"), "{}", lines[4]);
        assert_eq!(lines[5], "bye");
    }
}
