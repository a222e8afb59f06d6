//! Tile shapes and the candidates built from them.
//!
//! A GEMM kernel computes `C` one macro-tile at a time. Each work-group
//! of `work_group_rows * work_group_cols` threads owns one macro-tile, and each
//! thread computes a `micro_tile_rows * micro_tile_cols` block of it.
//! Per iteration of the reduction loop, the work-group cooperatively
//! loads `unroll` columns of the A macro-tile and `unroll` rows of the B macro-tile.

use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    hash::Hash,
};

/// Largest work-group the generated kernels may be launched with.
pub const MAX_WORK_GROUP_SIZE: u32 = 256;

/// Work-group and micro-tile decomposition of a macro-tile.
///
/// Serialized as a `[wg_rows, wg_cols, micro_rows, micro_cols]` array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct TileShape {
    pub work_group_rows: u32,
    pub work_group_cols: u32,
    pub micro_tile_rows: u32,
    pub micro_tile_cols: u32,
}

impl TileShape {
    pub const fn new(
        work_group_rows: u32,
        work_group_cols: u32,
        micro_tile_rows: u32,
        micro_tile_cols: u32,
    ) -> Self {
        Self {
            work_group_rows,
            work_group_cols,
            micro_tile_rows,
            micro_tile_cols,
        }
    }

    pub fn work_group_size(&self) -> u64 {
        u64::from(self.work_group_rows) * u64::from(self.work_group_cols)
    }

    pub fn macro_tile_rows(&self) -> u64 {
        u64::from(self.work_group_rows) * u64::from(self.micro_tile_rows)
    }

    pub fn macro_tile_cols(&self) -> u64 {
        u64::from(self.work_group_cols) * u64::from(self.micro_tile_cols)
    }

    /// `RxC` label of the macro-tile, e.g. `64x64`.
    pub fn macro_tile_label(&self) -> String {
        format!("{}x{}", self.macro_tile_rows(), self.macro_tile_cols())
    }
}

impl From<[u32; 4]> for TileShape {
    fn from([wg_rows, wg_cols, micro_rows, micro_cols]: [u32; 4]) -> Self {
        Self::new(wg_rows, wg_cols, micro_rows, micro_cols)
    }
}

impl From<TileShape> for [u32; 4] {
    fn from(shape: TileShape) -> Self {
        [
            shape.work_group_rows,
            shape.work_group_cols,
            shape.micro_tile_rows,
            shape.micro_tile_cols,
        ]
    }
}

/// Reason a tile candidate cannot be turned into a kernel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTile {
    #[error("all tile dimensions and the unroll factor must be positive")]
    NonPositive,
    #[error("work-group of {size} threads exceeds the limit of {}", MAX_WORK_GROUP_SIZE)]
    WorkGroupTooLarge { size: u64 },
    #[error("{elements} elements of A per unroll step cannot be split evenly across {threads} threads")]
    UnevenLoadA { elements: u64, threads: u64 },
    #[error("{elements} elements of B per unroll step cannot be split evenly across {threads} threads")]
    UnevenLoadB { elements: u64, threads: u64 },
    #[error("macro-tile of {macro_tile} elements with unroll {unroll} is too large to load")]
    TooLarge { macro_tile: u64, unroll: u32 },
}

/// Capability the enumerators need from a tile configuration:
/// construction from a shape and unroll factor, a validity predicate,
/// a canonical name (`Display`) and a total order with matching
/// equality and hashing for deduplication.
///
/// Implementations must keep `Eq`, `Hash` and `Ord` consistent with
/// each other over the five integers the candidate was built from.
pub trait TileCandidate: Clone + Eq + Hash + Ord + Debug + Display {
    fn from_parts(shape: TileShape, unroll: u32) -> Self;

    fn shape(&self) -> TileShape;

    fn unroll(&self) -> u32;

    fn validate(&self) -> Result<(), InvalidTile>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn name(&self) -> String {
        self.to_string()
    }
}

/// Default tile candidate, following the cooperative load rules
/// of the generated OpenCL kernels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileParameters {
    pub shape: TileShape,
    pub unroll: u32,
}

impl TileParameters {
    pub const fn new(shape: TileShape, unroll: u32) -> Self {
        Self { shape, unroll }
    }

    fn sort_key(&self) -> [u64; 7] {
        let shape = &self.shape;
        [
            shape.macro_tile_rows(),
            shape.macro_tile_cols(),
            self.unroll.into(),
            shape.work_group_rows.into(),
            shape.work_group_cols.into(),
            shape.micro_tile_rows.into(),
            shape.micro_tile_cols.into(),
        ]
    }
}

impl TileCandidate for TileParameters {
    fn from_parts(shape: TileShape, unroll: u32) -> Self {
        Self::new(shape, unroll)
    }

    fn shape(&self) -> TileShape {
        self.shape
    }

    fn unroll(&self) -> u32 {
        self.unroll
    }

    fn validate(&self) -> Result<(), InvalidTile> {
        let shape = &self.shape;
        if <[u32; 4]>::from(*shape).contains(&0) || self.unroll == 0 {
            return Err(InvalidTile::NonPositive);
        }

        let threads = shape.work_group_size();
        if threads > u64::from(MAX_WORK_GROUP_SIZE) {
            return Err(InvalidTile::WorkGroupTooLarge { size: threads });
        }

        // Fewer elements than threads leaves some threads idle, which is fine.
        // Otherwise every thread must load the same number of elements.
        let uneven = |elements: u64| elements >= threads && elements % threads != 0;
        let loaded = |macro_tile: u64| {
            macro_tile
                .checked_mul(self.unroll.into())
                .ok_or(InvalidTile::TooLarge {
                    macro_tile,
                    unroll: self.unroll,
                })
        };

        let elements = loaded(shape.macro_tile_rows())?;
        if uneven(elements) {
            return Err(InvalidTile::UnevenLoadA { elements, threads });
        }
        let elements = loaded(shape.macro_tile_cols())?;
        if uneven(elements) {
            return Err(InvalidTile::UnevenLoadB { elements, threads });
        }

        Ok(())
    }
}

impl PartialOrd for TileParameters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TileParameters {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Kernel-name fragment such as `MX064_NX064_KX16`.
///
/// Work-groups other than the customary 16x16 get a `_WG{rows}x{cols}` suffix
/// so that tiles with the same macro-tile never share a name.
impl Display for TileParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let shape = &self.shape;
        write!(
            f,
            "MX{:03}_NX{:03}_KX{:02}",
            shape.macro_tile_rows(),
            shape.macro_tile_cols(),
            self.unroll
        )?;
        if (shape.work_group_rows, shape.work_group_cols) != (16, 16) {
            write!(f, "_WG{}x{}", shape.work_group_rows, shape.work_group_cols)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tile(wg: u32, micro: u32, unroll: u32) -> TileParameters {
        TileParameters::new(TileShape::new(wg, wg, micro, micro), unroll)
    }

    #[rstest]
    #[case(tile(16, 1, 1))]
    #[case(tile(16, 1, 16))]
    #[case(tile(16, 6, 16))]
    #[case(tile(16, 6, 1))]
    #[case(tile(8, 6, 8))]
    #[case(tile(16, 4, 8))]
    fn valid_tiles(#[case] tile: TileParameters) {
        assert_eq!(tile.validate(), Ok(()));
    }

    #[rstest]
    #[case(tile(16, 5, 8), InvalidTile::UnevenLoadA { elements: 640, threads: 256 })]
    #[case(tile(16, 3, 8), InvalidTile::UnevenLoadA { elements: 384, threads: 256 })]
    #[case(tile(16, 0, 8), InvalidTile::NonPositive)]
    #[case(tile(16, 1, 0), InvalidTile::NonPositive)]
    #[case(tile(32, 1, 1), InvalidTile::WorkGroupTooLarge { size: 1024 })]
    #[case(
        TileParameters::new(TileShape::new(16, 16, 4, 5), 8),
        InvalidTile::UnevenLoadB { elements: 640, threads: 256 }
    )]
    fn invalid_tiles(#[case] tile: TileParameters, #[case] reason: InvalidTile) {
        assert_eq!(tile.validate(), Err(reason));
        assert!(!tile.is_valid());
    }

    #[test]
    fn oversized_loads_are_rejected() {
        let shape = TileShape::new(256, 1, u32::MAX, 1);
        let tile = TileParameters::new(shape, u32::MAX);
        assert_eq!(
            tile.validate(),
            Err(InvalidTile::TooLarge {
                macro_tile: 256 * u64::from(u32::MAX),
                unroll: u32::MAX
            })
        );

        let shape = TileShape::new(1, 256, 1, u32::MAX);
        let tile = TileParameters::new(shape, 1 << 31);
        assert!(matches!(tile.validate(), Err(InvalidTile::TooLarge { .. })));
        assert_eq!(TileParameters::new(shape, 1).validate(), Ok(()));
    }

    #[test]
    fn names() {
        assert_eq!(tile(16, 4, 16).name(), "MX064_NX064_KX16");
        assert_eq!(tile(16, 1, 1).name(), "MX016_NX016_KX01");
        assert_eq!(tile(8, 6, 8).name(), "MX048_NX048_KX08_WG8x8");
        assert_ne!(tile(8, 6, 8).name(), tile(16, 3, 8).name());
    }

    #[test]
    fn ordering_is_by_macro_tile_then_unroll() {
        let mut tiles = vec![tile(16, 2, 1), tile(16, 1, 8), tile(16, 1, 1), tile(8, 6, 1)];
        tiles.sort();
        assert_eq!(
            tiles,
            vec![tile(16, 1, 1), tile(16, 1, 8), tile(16, 2, 1), tile(8, 6, 1)]
        );
    }

    #[test]
    fn ordering_agrees_with_equality() {
        let a = tile(8, 6, 8);
        let b = tile(16, 3, 8);
        assert_eq!(a.shape.macro_tile_label(), b.shape.macro_tile_label());
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn macro_tile_is_derived() {
        let shape = TileShape::new(16, 8, 3, 5);
        assert_eq!(shape.macro_tile_rows(), 48);
        assert_eq!(shape.macro_tile_cols(), 40);
        assert_eq!(shape.work_group_size(), 128);
        assert_eq!(shape.macro_tile_label(), "48x40");
    }
}
