//! Block module - the rolling block's pose and its transition function
//!
//! A block is a `short x short x long` cuboid. Its pose is an anchor cell (the
//! footprint's top-left corner) plus an [`Orientation`]. The footprint is
//! always derived from the pose, never stored.
//!
//! # Rolling
//!
//! A roll tips the block over the edge it is moving towards. Along the roll
//! axis the block's extent on the floor and its height swap places; the
//! extent on the other axis is unchanged. From that:
//!
//! - **Standing** lies down along the roll axis
//! - **Lying along the roll axis** stands up
//! - **Lying across the roll axis** stays lying and shifts by the short span
//!
//! Moving forward (`Down`/`Right`) the anchor advances by the old floor extent
//! on that axis; moving backward it retreats by the old height. Rolling one way
//! and then back restores the original pose.

use arrayvec::ArrayVec;

use crate::error::EngineError;
use crate::types::{
    Coord, Direction, Orientation, DEFAULT_LONG_SPAN, DEFAULT_SHORT_SPAN, MAX_FOOTPRINT,
};

/// Cells under the block, row-major from the anchor
pub type Footprint = ArrayVec<Coord, MAX_FOOTPRINT>;

/// Block edge lengths in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockDims {
    short_span: u8,
    long_span: u8,
}

impl BlockDims {
    /// Validate dimensions: `1 <= short < long` and a lying footprint must
    /// fit in [`MAX_FOOTPRINT`] cells.
    pub fn new(short_span: u8, long_span: u8) -> Result<Self, EngineError> {
        let lying_cells = short_span as usize * long_span as usize;
        if short_span == 0 || short_span >= long_span || lying_cells > MAX_FOOTPRINT {
            return Err(EngineError::InvalidDimensions {
                short_span,
                long_span,
            });
        }
        Ok(Self {
            short_span,
            long_span,
        })
    }

    pub fn short_span(&self) -> u8 {
        self.short_span
    }

    pub fn long_span(&self) -> u8 {
        self.long_span
    }

    /// `(rows, cols, height)` occupied in the given orientation
    fn extents(&self, orientation: Orientation) -> (i16, i16, i16) {
        let s = self.short_span as i16;
        let l = self.long_span as i16;
        match orientation {
            Orientation::Standing => (s, s, l),
            Orientation::LyingX => (s, l, s),
            Orientation::LyingZ => (l, s, s),
        }
    }

    fn orientation_for(&self, extents: (i16, i16, i16)) -> Option<Orientation> {
        Orientation::ALL
            .into_iter()
            .find(|&o| self.extents(o) == extents)
    }
}

impl Default for BlockDims {
    fn default() -> Self {
        Self {
            short_span: DEFAULT_SHORT_SPAN,
            long_span: DEFAULT_LONG_SPAN,
        }
    }
}

/// Block pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub anchor: Coord,
    pub orientation: Orientation,
    pub dims: BlockDims,
}

impl Block {
    /// Standing 1x1x2 block at `anchor`
    pub fn standing(anchor: Coord) -> Self {
        Self {
            anchor,
            orientation: Orientation::Standing,
            dims: BlockDims::default(),
        }
    }

    pub fn new(anchor: Coord, orientation: Orientation, dims: BlockDims) -> Self {
        Self {
            anchor,
            orientation,
            dims,
        }
    }

    /// `(rows, cols)` covered on the floor
    pub fn floor_extent(&self) -> (i16, i16) {
        let (rows, cols, _) = self.dims.extents(self.orientation);
        (rows, cols)
    }

    /// Cells under the block, row-major starting at the anchor
    pub fn footprint(&self) -> Footprint {
        let (rows, cols) = self.floor_extent();
        let mut cells = Footprint::new();
        for dr in 0..rows {
            for dc in 0..cols {
                cells.push(self.anchor.offset(dr, dc));
            }
        }
        cells
    }

    /// Whether `coord` is under the block
    pub fn covers(&self, coord: Coord) -> bool {
        let (rows, cols) = self.floor_extent();
        let dr = coord.row - self.anchor.row;
        let dc = coord.col - self.anchor.col;
        (0..rows).contains(&dr) && (0..cols).contains(&dc)
    }

    /// Pose after rolling one step in `direction`.
    ///
    /// Pure: the board is not consulted.
    pub fn roll(&self, direction: Direction) -> Result<Block, EngineError> {
        let (rows, cols, height) = self.dims.extents(self.orientation);

        // Floor extent along the roll axis swaps with the height.
        let (along, next_extents) = if direction.is_horizontal() {
            (cols, (rows, height, cols))
        } else {
            (rows, (height, cols, rows))
        };

        let orientation =
            self.dims
                .orientation_for(next_extents)
                .ok_or(EngineError::InvalidTransition {
                    orientation: self.orientation,
                    direction,
                })?;

        let distance = if direction.is_forward() { along } else { height };

        Ok(Block {
            anchor: self.anchor.step(direction, distance),
            orientation,
            dims: self.dims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standing_rolls_to_lying_on_the_matching_axis() {
        let b = Block::standing(Coord::new(5, 5));

        let r = b.roll(Direction::Right).unwrap();
        assert_eq!(r.orientation, Orientation::LyingX);
        assert_eq!(r.anchor, Coord::new(5, 6));

        let l = b.roll(Direction::Left).unwrap();
        assert_eq!(l.orientation, Orientation::LyingX);
        assert_eq!(l.anchor, Coord::new(5, 3));

        let d = b.roll(Direction::Down).unwrap();
        assert_eq!(d.orientation, Orientation::LyingZ);
        assert_eq!(d.anchor, Coord::new(6, 5));

        let u = b.roll(Direction::Up).unwrap();
        assert_eq!(u.orientation, Orientation::LyingZ);
        assert_eq!(u.anchor, Coord::new(3, 5));
    }

    #[test]
    fn lying_along_roll_axis_stands_up() {
        let b = Block::new(Coord::new(5, 5), Orientation::LyingX, BlockDims::default());
        let r = b.roll(Direction::Right).unwrap();
        assert_eq!((r.orientation, r.anchor), (Orientation::Standing, Coord::new(5, 7)));
        let l = b.roll(Direction::Left).unwrap();
        assert_eq!((l.orientation, l.anchor), (Orientation::Standing, Coord::new(5, 4)));
    }

    #[test]
    fn lying_across_roll_axis_slides_one_cell() {
        let b = Block::new(Coord::new(5, 5), Orientation::LyingX, BlockDims::default());
        let d = b.roll(Direction::Down).unwrap();
        assert_eq!((d.orientation, d.anchor), (Orientation::LyingX, Coord::new(6, 5)));
        let u = b.roll(Direction::Up).unwrap();
        assert_eq!((u.orientation, u.anchor), (Orientation::LyingX, Coord::new(4, 5)));
    }

    #[test]
    fn footprint_sizes() {
        let dims = BlockDims::default();
        let anchor = Coord::new(2, 2);
        assert_eq!(
            Block::new(anchor, Orientation::Standing, dims).footprint().as_slice(),
            &[Coord::new(2, 2)]
        );
        assert_eq!(
            Block::new(anchor, Orientation::LyingX, dims).footprint().as_slice(),
            &[Coord::new(2, 2), Coord::new(2, 3)]
        );
        assert_eq!(
            Block::new(anchor, Orientation::LyingZ, dims).footprint().as_slice(),
            &[Coord::new(2, 2), Coord::new(3, 2)]
        );
    }

    #[test]
    fn covers_matches_footprint() {
        let b = Block::new(Coord::new(0, 0), Orientation::LyingZ, BlockDims::default());
        assert!(b.covers(Coord::new(0, 0)));
        assert!(b.covers(Coord::new(1, 0)));
        assert!(!b.covers(Coord::new(0, 1)));
        assert!(!b.covers(Coord::new(2, 0)));
    }

    #[test]
    fn dims_validation() {
        assert!(BlockDims::new(1, 2).is_ok());
        assert!(BlockDims::new(2, 3).is_ok());
        assert!(BlockDims::new(0, 2).is_err());
        assert!(BlockDims::new(2, 2).is_err());
        assert!(BlockDims::new(3, 1).is_err());
        assert!(BlockDims::new(2, 5).is_err());
    }

    #[test]
    fn wider_block_rolls_by_its_spans() {
        let dims = BlockDims::new(2, 3).unwrap();
        let b = Block::new(Coord::new(10, 10), Orientation::Standing, dims);
        let r = b.roll(Direction::Right).unwrap();
        assert_eq!((r.orientation, r.anchor), (Orientation::LyingX, Coord::new(10, 12)));
        assert_eq!(r.footprint().len(), 6);
        assert_eq!(r.roll(Direction::Left).unwrap(), b);
    }
}
