use std::fmt::Display;

use crate::error::Result;
use crate::geometry::{polygon_id, PolygonSet};
use crate::math::Cell;

use super::extract::ExtractRegions;
use super::group::OwnerCells;
use super::trace::TraceOutline;
use super::OutlineParams;

/// Builds the identity → polygon mapping for one owner's cells.
///
/// Regions are traced in discovery order and named `owner__0`,
/// `owner__1`, ... The result depends only on the cells and their order.
pub struct AssemblePolygons<'a> {
    owner: String,
    cells: &'a [Cell],
    params: OutlineParams,
}

impl<'a> AssemblePolygons<'a> {
    /// Creates a new `AssemblePolygons` operation with default params.
    #[must_use]
    pub fn new(owner: impl Display, cells: &'a [Cell]) -> Self {
        Self {
            owner: owner.to_string(),
            cells,
            params: OutlineParams::default(),
        }
    }

    /// Sets custom params.
    #[must_use]
    pub fn with_params(mut self, params: OutlineParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the assembly.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidCellSize` for a bad cell size. Tracing
    /// errors cannot occur for extracted regions but are propagated if they do.
    pub fn execute(&self) -> Result<PolygonSet> {
        self.params.validate()?;

        let regions = ExtractRegions::new(self.cells).execute();
        let mut set = PolygonSet::new();
        for (index, region) in regions.iter().enumerate() {
            let polygon = TraceOutline::new(region).with_params(self.params).execute()?;
            set.insert(polygon_id(&self.owner, index), polygon);
        }

        tracing::debug!(
            owner = %self.owner,
            cells = self.cells.len(),
            regions = set.len(),
            vertices = set.vertex_count(),
            "assembled polygon set"
        );
        Ok(set)
    }
}

/// Assembles polygon sets for many owners.
///
/// Params are checked once up front. Tracing cannot fail for extracted
/// regions, so a batch either fails as a whole or yields every owner.
pub struct AssembleAll<'a, O> {
    groups: &'a [OwnerCells<O>],
    params: OutlineParams,
}

impl<'a, O: Display + Clone> AssembleAll<'a, O> {
    /// Creates a new `AssembleAll` operation with default params.
    #[must_use]
    pub fn new(groups: &'a [OwnerCells<O>]) -> Self {
        Self {
            groups,
            params: OutlineParams::default(),
        }
    }

    /// Sets custom params.
    #[must_use]
    pub fn with_params(mut self, params: OutlineParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the batch, returning one set per owner in group order.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidCellSize` for a bad cell size, before any
    /// owner is processed.
    pub fn execute(&self) -> Result<Vec<(O, PolygonSet)>> {
        self.params.validate()?;

        self.groups
            .iter()
            .map(|group| {
                let set = AssemblePolygons::new(&group.owner, &group.cells)
                    .with_params(self.params)
                    .execute()?;
                Ok((group.owner.clone(), set))
            })
            .collect()
    }
}
