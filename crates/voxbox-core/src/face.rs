use glam::IVec3;
use std::ops::Range;

/// One of the 6 axis-aligned faces of a block.
///
/// The discriminant order is load-bearing: it is the order of the faces in
/// the cube index buffer and the order in which pick indices are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    Front = 0,
    Back = 1,
    Top = 2,
    Bottom = 3,
    Right = 4,
    Left = 5,
}

/// All 6 faces in canonical order.
pub const ALL_FACES: [Face; 6] = [
    Face::Front,
    Face::Back,
    Face::Top,
    Face::Bottom,
    Face::Right,
    Face::Left,
];

impl Face {
    /// Offset to the neighbor cell this face looks at. Y-up, Front = +z.
    pub fn offset(self) -> IVec3 {
        match self {
            Face::Front => IVec3::new(0, 0, 1),
            Face::Back => IVec3::new(0, 0, -1),
            Face::Top => IVec3::new(0, 1, 0),
            Face::Bottom => IVec3::new(0, -1, 0),
            Face::Right => IVec3::new(1, 0, 0),
            Face::Left => IVec3::new(-1, 0, 0),
        }
    }

    /// Outward unit normal.
    pub fn normal(self) -> glam::Vec3 {
        self.offset().as_vec3()
    }

    /// The face on the other side of the block.
    pub fn opposite(self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
        }
    }

    /// Position of this face in canonical order (0..6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Face::index`]. None for anything outside 0..6.
    pub fn from_index(index: usize) -> Option<Face> {
        ALL_FACES.get(index).copied()
    }

    /// The face whose outward normal is `offset`, if it is a unit axis step.
    pub fn from_offset(offset: IVec3) -> Option<Face> {
        ALL_FACES.iter().copied().find(|f| f.offset() == offset)
    }

    /// Slice of the cube index buffer that draws this face.
    pub fn index_range(self) -> Range<usize> {
        let start = self.index() * 6;
        start..start + 6
    }
}
