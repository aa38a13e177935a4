use voxbox_core::constants::{WORLD_DEPTH, WORLD_HEIGHT, WORLD_WIDTH};
use voxbox_core::face::ALL_FACES;
use voxbox_core::{Block, BlockType, EditError, GridCoord};

/// The default 32×32×32 world.
pub type World = VoxelGrid<WORLD_WIDTH, WORLD_HEIGHT, WORLD_DEPTH>;

/// Dense, fixed-size 3D grid of blocks with an incrementally maintained
/// visibility cache.
///
/// Storage order is the canonical traversal order: x outermost, then y,
/// z innermost. `linear_index` and `coord_at` are the only two places that
/// encode it, and every traversal (including pick index assignment) goes
/// through them.
///
/// `is_visible` caches "this block has at least one exposed face". Edits
/// update it for the 6-neighborhood only; `occlusion_pass` is the single
/// full-grid rescan and runs once after world generation.
pub struct VoxelGrid<const W: usize, const H: usize, const D: usize> {
    cells: Box<[Block]>,
}

impl<const W: usize, const H: usize, const D: usize> Default for VoxelGrid<W, H, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize, const D: usize> VoxelGrid<W, H, D> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;
    pub const DEPTH: usize = D;
    pub const CELLS: usize = W * H * D;

    /// An all-empty grid. Each cell's transform is fixed here.
    pub fn new() -> Self {
        let cells = (0..Self::CELLS)
            .map(|ordinal| Block::empty_at(Self::ordinal_to_coord(ordinal)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { cells }
    }

    /// Pure bounds check.
    pub fn is_valid_coordinate(coord: GridCoord) -> bool {
        coord.x >= 0
            && (coord.x as usize) < W
            && coord.y >= 0
            && (coord.y as usize) < H
            && coord.z >= 0
            && (coord.z as usize) < D
    }

    /// Position of `coord` in storage/traversal order:
    /// `z + y * D + x * H * D`. None when out of bounds.
    pub fn linear_index(coord: GridCoord) -> Option<usize> {
        if !Self::is_valid_coordinate(coord) {
            return None;
        }
        let (x, y, z) = (coord.x as usize, coord.y as usize, coord.z as usize);
        Some(z + y * D + x * H * D)
    }

    /// Exact inverse of [`Self::linear_index`].
    pub fn coord_at(ordinal: usize) -> Option<GridCoord> {
        if ordinal >= Self::CELLS {
            return None;
        }
        Some(Self::ordinal_to_coord(ordinal))
    }

    fn ordinal_to_coord(ordinal: usize) -> GridCoord {
        let z = ordinal % D;
        let y = (ordinal / D) % H;
        let x = ordinal / (D * H);
        GridCoord::new(x as i32, y as i32, z as i32)
    }

    /// Block at `coord`, or None when out of bounds.
    pub fn block(&self, coord: GridCoord) -> Option<&Block> {
        let index = Self::linear_index(coord)?;
        self.cells.get(index)
    }

    /// Block at a coordinate the caller already knows is valid.
    ///
    /// # Panics
    /// Panics if `coord` is out of bounds. Check with
    /// [`Self::is_valid_coordinate`] first when the coordinate came from
    /// neighbor arithmetic.
    pub fn get_block(&self, coord: GridCoord) -> &Block {
        match self.block(coord) {
            Some(block) => block,
            None => panic!("get_block: {coord} outside {W}x{H}x{D} grid"),
        }
    }

    fn block_mut(&mut self, coord: GridCoord) -> Option<&mut Block> {
        let index = Self::linear_index(coord)?;
        self.cells.get_mut(index)
    }

    /// Valid and not `Empty`. Out-of-bounds cells count as open space.
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.block(coord).is_some_and(Block::is_occupied)
    }

    /// All 6 face neighbors are occupied. Culling only; never used to
    /// decide whether a placement is allowed.
    pub fn is_fully_surrounded(&self, coord: GridCoord) -> bool {
        ALL_FACES
            .iter()
            .all(|face| self.is_occupied(coord + face.offset()))
    }

    /// Hide the block if it can no longer be seen from any side.
    /// No-op for out-of-range input.
    pub fn hide_if_surrounded(&mut self, coord: GridCoord) {
        if Self::is_valid_coordinate(coord) && self.is_fully_surrounded(coord) {
            if let Some(block) = self.block_mut(coord) {
                block.is_visible = false;
            }
        }
    }

    /// Mark an occupied cell visible without re-checking its surroundings.
    /// A cell next to a freshly emptied one always has an exposed face.
    pub fn reveal_neighbor(&mut self, coord: GridCoord) {
        if let Some(block) = self.block_mut(coord) {
            if block.is_occupied() {
                block.is_visible = true;
            }
        }
    }

    /// Reveal the 6 neighbors of `coord`. Run right after `coord` is emptied.
    pub fn reveal_surrounding_blocks(&mut self, coord: GridCoord) {
        for face in ALL_FACES {
            self.reveal_neighbor(coord + face.offset());
        }
    }

    /// Re-cull the 6 neighbors of `coord`. Run right after `coord` is filled.
    pub fn hide_surrounding_blocks(&mut self, coord: GridCoord) {
        for face in ALL_FACES {
            self.hide_if_surrounded(coord + face.offset());
        }
    }

    /// Empty the cell and expose its neighbors. Returns the removed type,
    /// or None (and changes nothing) if the cell is out of bounds or already empty.
    pub fn remove_block(&mut self, coord: GridCoord) -> Option<BlockType> {
        let block = self.block_mut(coord)?;
        if !block.is_occupied() {
            return None;
        }
        let removed = block.block_type;
        block.block_type = BlockType::Empty;
        block.is_visible = false;
        self.reveal_surrounding_blocks(coord);
        Some(removed)
    }

    /// Fill an empty cell and re-cull its neighbors. The new block is
    /// always visible.
    ///
    /// Refuses out-of-bounds cells, occupied cells, and the `Empty` sentinel.
    pub fn place_block(
        &mut self,
        coord: GridCoord,
        block_type: BlockType,
    ) -> Result<(), EditError> {
        if block_type.is_empty() {
            return Err(EditError::EmptyMaterial(coord));
        }
        let block = self
            .block_mut(coord)
            .ok_or(EditError::InvalidCoordinate(coord))?;
        if block.is_occupied() {
            return Err(EditError::Occupied {
                coord,
                existing: block.block_type,
            });
        }
        block.block_type = block_type;
        block.is_visible = true;
        self.hide_surrounding_blocks(coord);
        Ok(())
    }

    /// Write a cell during world generation: no neighbor updates, visible
    /// iff non-empty. Follow a batch of stamps with [`Self::occlusion_pass`].
    /// Returns false for out-of-bounds cells.
    pub fn stamp(&mut self, coord: GridCoord, block_type: BlockType) -> bool {
        match self.block_mut(coord) {
            Some(block) => {
                block.block_type = block_type;
                block.is_visible = !block_type.is_empty();
                true
            }
            None => false,
        }
    }

    /// Full-grid rescan: hide every fully surrounded cell. Returns the
    /// number of occupied cells it hid.
    pub fn occlusion_pass(&mut self) -> usize {
        let mut hidden = 0usize;
        for ordinal in 0..Self::CELLS {
            let coord = Self::ordinal_to_coord(ordinal);
            if self.is_fully_surrounded(coord) {
                let block = &mut self.cells[ordinal];
                if block.is_visible {
                    hidden += 1;
                }
                block.is_visible = false;
            }
        }
        hidden
    }

    /// Every cell in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Block)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(ordinal, block)| (Self::ordinal_to_coord(ordinal), block))
    }

    /// Occupied cells (visible or not) in canonical order.
    pub fn occupied(&self) -> impl Iterator<Item = (GridCoord, &Block)> + '_ {
        self.iter().filter(|(_, block)| block.is_occupied())
    }

    /// Cells the scene pass should draw, in canonical order.
    pub fn visible(&self) -> impl Iterator<Item = (GridCoord, &Block)> + '_ {
        self.iter().filter(|(_, block)| block.is_visible)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|b| b.is_occupied()).count()
    }

    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|b| b.is_visible).count()
    }
}
