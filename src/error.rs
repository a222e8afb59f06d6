use autogemm_ir::{Precision, Transpose};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Defects in a search-space configuration. These are reported
/// when the configuration is built, never during enumeration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no size buckets configured for precision {0}")]
    MissingBuckets(Precision),
    #[error(
        "size bucket thresholds for precision {precision} must strictly decrease, \
         but {previous} is followed by {next}"
    )]
    UnorderedThresholds {
        precision: Precision,
        previous: u32,
        next: u32,
    },
    #[error("last size bucket for precision {precision} has threshold {threshold} instead of 0")]
    MissingCatchAll { precision: Precision, threshold: u32 },
    #[error("size bucket {threshold} of precision {precision} lists a tile shape with a zero dimension")]
    ZeroDimension { precision: Precision, threshold: u32 },
    #[error("unroll factor 0 configured for precision {0}")]
    ZeroUnroll(Precision),
    #[error("no unroll factors configured for precision {0}")]
    MissingUnrolls(Precision),
    #[error("no transpose codes configured for precision {0}")]
    MissingTransposes(Precision),
    #[error("transpose {transpose} is not supported by real precision {precision}")]
    ConjugateOfReal {
        precision: Precision,
        transpose: Transpose,
    },
    #[error("no matrix orders configured")]
    MissingOrders,
    #[error("no beta values configured")]
    MissingBetas,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
