use autogemm_ir::{InvalidTile, Precision, TileCandidate};

/// Notified of every tile candidate dropped during enumeration.
///
/// Rejections are expected (not every shape works with every unroll
/// factor), so observers only report them.
pub trait RejectionObserver<T> {
    fn rejected(&mut self, precision: Precision, candidate: &T, reason: &InvalidTile);
}

/// Logs rejections at `INFO` level through `tracing`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogRejections;

impl<T: TileCandidate> RejectionObserver<T> for LogRejections {
    fn rejected(&mut self, precision: Precision, candidate: &T, reason: &InvalidTile) {
        tracing::info!(%precision, tile = %candidate, "skipping tile: {reason}");
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct IgnoreRejections;

impl<T> RejectionObserver<T> for IgnoreRejections {
    fn rejected(&mut self, _precision: Precision, _candidate: &T, _reason: &InvalidTile) {}
}

impl<T, F> RejectionObserver<T> for F
where
    F: FnMut(Precision, &T, &InvalidTile),
{
    fn rejected(&mut self, precision: Precision, candidate: &T, reason: &InvalidTile) {
        self(precision, candidate, reason)
    }
}
