use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeightmapError {
    #[error("heightmap has {got} samples, {width}x{depth} needs {expected}")]
    SampleCount {
        width: usize,
        depth: usize,
        expected: usize,
        got: usize,
    },
    #[error("heightmap is {got_width}x{got_depth}, grid columns are {width}x{depth}")]
    Dimensions {
        width: usize,
        depth: usize,
        got_width: usize,
        got_depth: usize,
    },
    #[error("column ({x}, {z}) has height {height}, grid height is {limit}")]
    HeightOutOfRange {
        x: usize,
        z: usize,
        height: u32,
        limit: usize,
    },
}

/// One terrain height per `(x, z)` column. Rows run along x, so sample
/// `(x, z)` lives at `heights[z * width + x]`, matching image row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    width: usize,
    depth: usize,
    heights: Vec<u32>,
}

impl Heightmap {
    pub fn new(width: usize, depth: usize, heights: Vec<u32>) -> Result<Self, HeightmapError> {
        let expected = width * depth;
        if heights.len() != expected {
            return Err(HeightmapError::SampleCount {
                width,
                depth,
                expected,
                got: heights.len(),
            });
        }
        Ok(Self {
            width,
            depth,
            heights,
        })
    }

    pub fn from_fn(width: usize, depth: usize, mut f: impl FnMut(usize, usize) -> u32) -> Self {
        let mut heights = Vec::with_capacity(width * depth);
        for z in 0..depth {
            for x in 0..width {
                heights.push(f(x, z));
            }
        }
        Self {
            width,
            depth,
            heights,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get(&self, x: usize, z: usize) -> Option<u32> {
        if x >= self.width || z >= self.depth {
            return None;
        }
        self.heights.get(z * self.width + x).copied()
    }

    pub fn max_height(&self) -> Option<u32> {
        self.heights.iter().copied().max()
    }

    /// Check the map covers exactly `width × depth` columns and every
    /// height is a valid y below `height_limit`.
    pub fn validate(
        &self,
        width: usize,
        depth: usize,
        height_limit: usize,
    ) -> Result<(), HeightmapError> {
        if self.width != width || self.depth != depth {
            return Err(HeightmapError::Dimensions {
                width,
                depth,
                got_width: self.width,
                got_depth: self.depth,
            });
        }
        for z in 0..self.depth {
            for x in 0..self.width {
                let height = self.heights[z * self.width + x];
                if height as usize >= height_limit {
                    return Err(HeightmapError::HeightOutOfRange {
                        x,
                        z,
                        height,
                        limit: height_limit,
                    });
                }
            }
        }
        Ok(())
    }
}
