//! Kernel selection data: for every precision, the tile shapes
//! known to perform well at each matrix size.

use crate::{Error, Result};
use autogemm_ir::{Precision, TileShape};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tile shapes for matrices whose dimension is at least `threshold`
/// (and below the threshold of the previous bucket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeBucket {
    pub threshold: u32,
    /// Shape used when none of the candidates apply to a problem.
    pub fallback: TileShape,
    /// Shapes worth trying at this size, best first.
    pub candidates: Vec<TileShape>,
}

impl SizeBucket {
    pub fn new(
        threshold: u32,
        fallback: impl Into<TileShape>,
        candidates: impl IntoIterator<Item = impl Into<TileShape>>,
    ) -> Self {
        Self {
            threshold,
            fallback: fallback.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

/// Size buckets per precision, each list ordered from the largest
/// threshold down to a terminal bucket with threshold 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionTable(IndexMap<Precision, Vec<SizeBucket>>);

impl SelectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(
        mut self,
        precision: Precision,
        buckets: impl IntoIterator<Item = SizeBucket>,
    ) -> Self {
        self.0.insert(precision, buckets.into_iter().collect());
        self
    }

    /// Buckets of `precision` in table order. Empty if the
    /// precision has no entry.
    pub fn buckets(&self, precision: Precision) -> &[SizeBucket] {
        self.0.get(&precision).map(Vec::as_slice).unwrap_or_default()
    }

    /// Finds the bucket responsible for matrices of dimension `size`:
    /// the first one whose threshold does not exceed it.
    pub fn bucket_for(&self, precision: Precision, size: u32) -> Option<&SizeBucket> {
        self.buckets(precision)
            .iter()
            .find(|bucket| size >= bucket.threshold)
    }

    pub fn validate(&self) -> Result<()> {
        for precision in Precision::ALL {
            let buckets = self.buckets(precision);
            let Some(last) = buckets.last() else {
                return Err(Error::MissingBuckets(precision));
            };

            if let Some(pair) = buckets
                .windows(2)
                .find(|pair| pair[0].threshold <= pair[1].threshold)
            {
                return Err(Error::UnorderedThresholds {
                    precision,
                    previous: pair[0].threshold,
                    next: pair[1].threshold,
                });
            }

            if let Some(bucket) = buckets.iter().find(|bucket| {
                std::iter::once(&bucket.fallback)
                    .chain(&bucket.candidates)
                    .any(|shape| <[u32; 4]>::from(*shape).contains(&0))
            }) {
                return Err(Error::ZeroDimension {
                    precision,
                    threshold: bucket.threshold,
                });
            }

            if last.threshold != 0 {
                return Err(Error::MissingCatchAll {
                    precision,
                    threshold: last.threshold,
                });
            }
        }
        Ok(())
    }

    /// Selection data tuned on an AMD Fiji GPU.
    pub fn fiji() -> Self {
        const S66: [u32; 4] = [16, 16, 6, 6];
        const S55: [u32; 4] = [16, 16, 5, 5];
        const S44: [u32; 4] = [16, 16, 4, 4];
        const S33: [u32; 4] = [16, 16, 3, 3];
        const S22: [u32; 4] = [16, 16, 2, 2];
        const S11: [u32; 4] = [16, 16, 1, 1];
        const W8_66: [u32; 4] = [8, 8, 6, 6];

        Self::new()
            .with_buckets(
                Precision::Single,
                [
                    SizeBucket::new(3072, S66, [S66, S55, S44]),
                    SizeBucket::new(2240, S66, [S66, S44, S55, S33]),
                    SizeBucket::new(1760, S44, [S66, S44, S55, S33]),
                    SizeBucket::new(1600, S44, [S44, S66, S55, S33]),
                    SizeBucket::new(1056, S44, [S44, S66, S55, S33, S22]),
                    SizeBucket::new(960, S44, [S44, S55, S33, S22]),
                    SizeBucket::new(736, S33, [S44, S33, S55, S22]),
                    SizeBucket::new(528, S33, [S44, S33, S22, S11]),
                    SizeBucket::new(432, S22, [S33, S22, S11]),
                    SizeBucket::new(320, S22, [S22, S11]),
                    SizeBucket::new(0, S11, [S11]),
                ],
            )
            .with_buckets(
                Precision::Double,
                [
                    SizeBucket::new(3200, S44, [S44, S55, S22, W8_66]),
                    SizeBucket::new(1632, S22, [S44, S22, S55, W8_66]),
                    SizeBucket::new(1280, S22, [S44, S22, S55, W8_66, S11]),
                    SizeBucket::new(1056, S22, [S22, S11]),
                    SizeBucket::new(672, S22, [S11]),
                    SizeBucket::new(0, S11, [S11]),
                ],
            )
            .with_buckets(
                Precision::ComplexSingle,
                [
                    SizeBucket::new(2240, S44, [S44, S66]),
                    SizeBucket::new(1440, S44, [S44, S66, S55, S22]),
                    SizeBucket::new(1088, S22, [S44, S33, S22, S55]),
                    SizeBucket::new(704, S22, [S22, S33, S55]),
                    SizeBucket::new(528, S22, [S22, S33, S11]),
                    SizeBucket::new(336, S22, [S22, S11]),
                    SizeBucket::new(0, S11, [S11]),
                ],
            )
            .with_buckets(
                Precision::ComplexDouble,
                [
                    SizeBucket::new(2528, S22, [S44, S22, S33]),
                    SizeBucket::new(1872, S22, [S22, S33, S11]),
                    SizeBucket::new(1040, S22, [S22, S11]),
                    SizeBucket::new(768, S11, [S22, S11]),
                    SizeBucket::new(0, S11, [S11]),
                ],
            )
    }
}
