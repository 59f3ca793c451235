pub mod block;

pub use block::{BlockId, BlockKey, BlockRows, BLOCK_SIDE};

use crate::math::Cell;
use block::locate;
use slotmap::SlotMap;
use std::cell::Cell as CacheCell;
use std::collections::HashMap;

/// Sparse bitmap over the unbounded `i32 × i32` cell plane.
///
/// Storage is split into 64×64 blocks that are allocated on the first `true`
/// write. Blocks live in an arena; a key index maps block coordinates to
/// arena ids. The most recently resolved key is cached, including misses, so
/// runs of accesses inside one block skip the hash lookup.
///
/// The cache uses interior mutability, so a grid is not `Sync`. Each
/// computation owns its grids.
#[derive(Debug, Clone, Default)]
pub struct SparseBitGrid {
    blocks: SlotMap<BlockId, BlockRows>,
    index: HashMap<BlockKey, BlockId>,
    last: CacheCell<Option<(BlockKey, Option<BlockId>)>>,
}

impl SparseBitGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid with every cell of `cells` set.
    #[must_use]
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = Self::new();
        for cell in cells {
            grid.set(cell, true);
        }
        grid
    }

    fn resolve(&self, key: BlockKey) -> Option<BlockId> {
        if let Some((last_key, last_id)) = self.last.get() {
            if last_key == key {
                return last_id;
            }
        }
        let id = self.index.get(&key).copied();
        self.last.set(Some((key, id)));
        id
    }

    /// Reads the flag at `(x, z)`. Unset cells read `false`.
    #[must_use]
    pub fn get_flag(&self, x: i32, z: i32) -> bool {
        self.get(Cell::new(x, z))
    }

    /// Writes the flag at `(x, z)`.
    ///
    /// Setting `true` allocates the block if needed. Setting `false` on an
    /// absent block does nothing.
    pub fn set_flag(&mut self, x: i32, z: i32, value: bool) {
        self.set(Cell::new(x, z), value);
    }

    /// Cell-typed form of [`get_flag`](Self::get_flag).
    #[must_use]
    pub fn get(&self, cell: Cell) -> bool {
        let Some(id) = self.resolve(BlockKey::of(cell)) else {
            return false;
        };
        let (row, bit) = locate(cell);
        self.blocks.get(id).is_some_and(|rows| rows[row] & bit != 0)
    }

    /// Cell-typed form of [`set_flag`](Self::set_flag).
    pub fn set(&mut self, cell: Cell, value: bool) {
        let key = BlockKey::of(cell);
        let (row, bit) = locate(cell);
        let id = match self.resolve(key) {
            Some(id) => id,
            None if value => {
                let id = self.blocks.insert([0; 64]);
                self.index.insert(key, id);
                self.last.set(Some((key, Some(id))));
                id
            }
            None => return,
        };
        if let Some(rows) = self.blocks.get_mut(id) {
            if value {
                rows[row] |= bit;
            } else {
                rows[row] &= !bit;
            }
        }
    }

    /// Flag at `cell` displaced by `(dx, dz)`; out-of-range neighbours read
    /// `false`.
    #[must_use]
    pub fn get_offset(&self, cell: Cell, dx: i32, dz: i32) -> bool {
        cell.offset(dx, dz).is_some_and(|c| self.get(c))
    }

    /// Drops every block and resets the access cache.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.index.clear();
        self.last.set(None);
    }

    /// Number of set cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks
            .values()
            .flat_map(|rows| rows.iter())
            .map(|row| row.count_ones() as usize)
            .sum()
    }

    /// Returns true if no cell is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks
            .values()
            .all(|rows| rows.iter().all(|&row| row == 0))
    }

    /// Number of allocated blocks. Clearing flags does not release blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Iterates set cells, ordered by block key, then row, then column.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        let mut keys: Vec<(BlockKey, BlockId)> =
            self.index.iter().map(|(&k, &id)| (k, id)).collect();
        keys.sort_unstable_by_key(|&(k, _)| k);
        keys.into_iter().flat_map(move |(key, id)| {
            let rows = self.blocks.get(id).copied().unwrap_or([0; 64]);
            (0u32..64).flat_map(move |r| {
                let mut bits = rows[r as usize];
                std::iter::from_fn(move || {
                    if bits == 0 {
                        return None;
                    }
                    let column = bits.trailing_zeros();
                    bits &= bits - 1;
                    Some(key.cell_at(column, r))
                })
            })
        })
    }
}
