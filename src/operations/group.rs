use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::math::Cell;

/// One owned cell as reported by the claim-data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim<O> {
    pub owner: O,
    pub cell: Cell,
}

impl<O> Claim<O> {
    /// Creates a claim of `cell` by `owner`.
    #[must_use]
    pub fn new(owner: O, cell: Cell) -> Self {
        Self { owner, cell }
    }
}

/// All cells held by one owner, in input order and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerCells<O> {
    pub owner: O,
    pub cells: Vec<Cell>,
}

/// Groups a flat claim list by owner.
///
/// Owners are listed in order of first appearance. Repeated claims of the
/// same cell by the same owner keep only the first.
pub struct GroupClaims<O> {
    claims: Vec<Claim<O>>,
}

impl<O: Clone + Eq + Hash> GroupClaims<O> {
    /// Creates a new `GroupClaims` operation.
    pub fn new<I>(claims: I) -> Self
    where
        I: IntoIterator<Item = Claim<O>>,
    {
        Self {
            claims: claims.into_iter().collect(),
        }
    }

    /// Executes the grouping.
    #[must_use]
    pub fn execute(&self) -> Vec<OwnerCells<O>> {
        let mut groups: Vec<OwnerCells<O>> = Vec::new();
        let mut slots: HashMap<&O, (usize, HashSet<Cell>)> = HashMap::new();

        for claim in &self.claims {
            let (slot, seen) = slots.entry(&claim.owner).or_insert_with(|| {
                groups.push(OwnerCells {
                    owner: claim.owner.clone(),
                    cells: Vec::new(),
                });
                (groups.len() - 1, HashSet::new())
            });
            if seen.insert(claim.cell) {
                groups[*slot].cells.push(claim.cell);
            }
        }

        groups
    }
}
