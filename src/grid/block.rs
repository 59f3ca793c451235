use crate::math::Cell;

slotmap::new_key_type! {
    /// Identifier of an allocated 64×64 block in a grid's arena.
    pub struct BlockId;
}

/// Number of cells along one side of a block.
pub const BLOCK_SIDE: i32 = 64;

const BLOCK_SHIFT: u32 = 6;
const BLOCK_MASK: i32 = BLOCK_SIDE - 1;

/// One bit per cell: bit `x & 63` of `rows[z & 63]`.
pub type BlockRows = [u64; 64];

/// Coordinates of a 64×64 block.
///
/// Derived with an arithmetic shift, so negative cells floor into the block
/// below them: `-1 >> 6 == -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey {
    pub bx: i32,
    pub bz: i32,
}

impl BlockKey {
    /// Block containing `cell`.
    #[must_use]
    pub fn of(cell: Cell) -> Self {
        Self {
            bx: cell.x >> BLOCK_SHIFT,
            bz: cell.z >> BLOCK_SHIFT,
        }
    }

    /// Absolute cell for a local `(column, row)` inside this block.
    #[must_use]
    pub fn cell_at(self, column: u32, row: u32) -> Cell {
        // column and row are < 64, and bx << 6 stays within i32 for any block
        // produced by `of`.
        let local = |v: u32| i32::try_from(v).unwrap_or(0);
        Cell::new(
            (self.bx << BLOCK_SHIFT) | local(column),
            (self.bz << BLOCK_SHIFT) | local(row),
        )
    }
}

/// Row index and bit mask addressing `cell` inside its block.
#[must_use]
pub fn locate(cell: Cell) -> (usize, u64) {
    let row = (cell.z & BLOCK_MASK).unsigned_abs() as usize;
    let bit = 1u64 << (cell.x & BLOCK_MASK).unsigned_abs();
    (row, bit)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn negative_cells_floor() {
        assert_eq!(BlockKey::of(Cell::new(-1, -1)), BlockKey { bx: -1, bz: -1 });
        assert_eq!(BlockKey::of(Cell::new(-64, -64)), BlockKey { bx: -1, bz: -1 });
        assert_eq!(BlockKey::of(Cell::new(-65, 0)), BlockKey { bx: -2, bz: 0 });
        assert_eq!(BlockKey::of(Cell::new(63, 63)), BlockKey { bx: 0, bz: 0 });
        assert_eq!(BlockKey::of(Cell::new(64, 0)), BlockKey { bx: 1, bz: 0 });
    }

    #[test]
    fn locate_negative() {
        // -1 & 63 == 63
        assert_eq!(locate(Cell::new(-1, -1)), (63, 1u64 << 63));
        assert_eq!(locate(Cell::new(65, 2)), (2, 1u64 << 1));
    }

    #[test]
    fn cell_at_inverts_locate() {
        for cell in [Cell::new(-1, -1), Cell::new(-64, 70), Cell::new(130, -200)] {
            let key = BlockKey::of(cell);
            let (row, bit) = locate(cell);
            let column = bit.trailing_zeros();
            let row = u32::try_from(row).unwrap();
            assert_eq!(key.cell_at(column, row), cell);
        }
    }
}
