//! Enumeration of the tile search space.
//!
//! Every shape listed in the selection table is crossed with each unroll
//! factor of its precision and validated; the surviving candidates are
//! deduplicated and sorted so that runs are reproducible. The same shape
//! is usually listed in many buckets, so duplicates are the norm.

use crate::{
    Result,
    observer::{LogRejections, RejectionObserver},
    parameters::ParameterTable,
    selection::SelectionTable,
};
use ahash::AHashSet;
use autogemm_ir::{Precision, TileCandidate, TileShape, Transpose, TransposePair};
use indexmap::IndexSet;
use itertools::{Itertools, iproduct};
use serde::{Deserialize, Serialize};

/// A validated selection table together with the per-precision
/// parameters needed to expand it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSpace {
    selection: SelectionTable,
    parameters: ParameterTable,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchSpaceConfig {
    selection: SelectionTable,
    #[serde(default)]
    parameters: ParameterTable,
}

/// Tiles for a single size regime, in preference order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSelection<T> {
    pub threshold: u32,
    pub fallback: Vec<T>,
    pub candidates: Vec<T>,
}

impl SearchSpace {
    pub fn new(selection: SelectionTable, parameters: ParameterTable) -> Result<Self> {
        selection.validate()?;
        parameters.validate()?;
        Ok(Self {
            selection,
            parameters,
        })
    }

    /// Loads a search space from JSON of the form
    /// `{"selection": {"s": [{"threshold": 0, "fallback": [16, 16, 1, 1], "candidates": [...]}], ...}, "parameters": {...}}`.
    /// `parameters` may be omitted to use the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchSpaceConfig = serde_json::from_str(json)?;
        Self::new(config.selection, config.parameters)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn selection(&self) -> &SelectionTable {
        &self.selection
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    /// All valid tiles of `precision`, deduplicated and sorted.
    /// Rejected candidates are logged.
    pub fn tiles_for_precision<T: TileCandidate>(&self, precision: Precision) -> Vec<T> {
        self.tiles_for_precision_with(precision, &mut LogRejections)
    }

    /// Same as [`tiles_for_precision`](Self::tiles_for_precision), reporting
    /// rejected candidates to `observer`.
    pub fn tiles_for_precision_with<T, O>(&self, precision: Precision, observer: &mut O) -> Vec<T>
    where
        T: TileCandidate,
        O: RejectionObserver<T> + ?Sized,
    {
        let mut tiles = Vec::new();
        for bucket in self.selection.buckets(precision) {
            for shape in &bucket.candidates {
                self.expand_shape(precision, *shape, observer, &mut tiles);
            }
            self.expand_shape(precision, bucket.fallback, observer, &mut tiles);
        }

        let expanded = tiles.len();
        let tiles: Vec<T> = tiles
            .into_iter()
            .collect::<AHashSet<_>>()
            .into_iter()
            .sorted()
            .collect();
        tracing::debug!(%precision, expanded, unique = tiles.len(), "enumerated tiles");
        tiles
    }

    /// Crosses `shape` with every unroll factor of `precision`,
    /// keeping the valid candidates.
    fn expand_shape<T, O>(
        &self,
        precision: Precision,
        shape: TileShape,
        observer: &mut O,
        tiles: &mut Vec<T>,
    ) where
        T: TileCandidate,
        O: RejectionObserver<T> + ?Sized,
    {
        for &unroll in self.parameters.unrolls(precision) {
            let tile = T::from_parts(shape, unroll);
            match tile.validate() {
                Ok(()) => tiles.push(tile),
                Err(reason) => observer.rejected(precision, &tile, &reason),
            }
        }
    }

    /// Every combination of A and B transposes supported by any precision.
    ///
    /// Single codes are ordered by first appearance, scanning precisions in
    /// declared order and each precision's codes in table order.
    pub fn transpose_choices(&self) -> Vec<TransposePair> {
        let singles: IndexSet<Transpose> = Precision::ALL
            .into_iter()
            .flat_map(|precision| self.parameters.transposes(precision).iter().copied())
            .collect();
        iproduct!(&singles, &singles)
            .map(|(a, b)| TransposePair::new(*a, *b))
            .collect()
    }

    /// Distinct `RxC` macro-tile labels across all precisions, in order
    /// of first appearance.
    pub fn tile_choices<T: TileCandidate>(&self) -> Vec<String> {
        Precision::ALL
            .into_iter()
            .flat_map(|precision| self.tiles_for_precision::<T>(precision))
            .map(|tile| tile.shape().macro_tile_label())
            .unique()
            .collect()
    }

    /// Tiles to try for matrices of dimension `size`, taken from the
    /// single bucket covering that size. Candidates keep the table's
    /// preference order (then unroll order), unlike the sorted output of
    /// [`tiles_for_precision`](Self::tiles_for_precision).
    pub fn select_for_size<T: TileCandidate>(
        &self,
        precision: Precision,
        size: u32,
    ) -> Option<TileSelection<T>> {
        let bucket = self.selection.bucket_for(precision, size)?;

        let mut fallback = Vec::new();
        self.expand_shape(precision, bucket.fallback, &mut LogRejections, &mut fallback);

        let mut candidates = Vec::new();
        for shape in &bucket.candidates {
            self.expand_shape(precision, *shape, &mut LogRejections, &mut candidates);
        }

        Some(TileSelection {
            threshold: bucket.threshold,
            fallback,
            candidates: candidates.into_iter().unique().collect(),
        })
    }
}

impl Default for SearchSpace {
    /// The Fiji selection table with default parameters.
    fn default() -> Self {
        Self {
            selection: SelectionTable::fiji(),
            parameters: ParameterTable::default(),
        }
    }
}
