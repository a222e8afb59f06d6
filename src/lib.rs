//! Search space of GEMM kernel tile configurations.
//!
//! A [`SearchSpace`] pairs a [`SelectionTable`] (per precision, the tile shapes
//! that perform well at each matrix size) with a [`ParameterTable`] (unroll
//! factors, transposes, orders and betas). From it the kernel generator
//! obtains:
//! * [`SearchSpace::tiles_for_precision`]: every valid tile candidate of a precision,
//!   deduplicated and sorted,
//! * [`SearchSpace::transpose_choices`]: all A/B transpose combinations,
//! * [`SearchSpace::tile_choices`]: the distinct macro-tile sizes, as `RxC` labels,
//! * [`SearchSpace::kernel_choices`]: the full parameter sets of the kernels to build.
//!
//! Tile validity, naming and ordering come from the [`TileCandidate`]
//! implementation the enumerators are instantiated with, normally
//! [`TileParameters`].

pub mod error;
pub mod kernel;
pub mod observer;
pub mod parameters;
pub mod search_space;
pub mod selection;

#[doc(inline)]
pub use self::{
    error::{Error, Result},
    kernel::KernelParameters,
    observer::{IgnoreRejections, LogRejections, RejectionObserver},
    parameters::ParameterTable,
    search_space::{SearchSpace, TileSelection},
    selection::{SelectionTable, SizeBucket},
};
/// Re-export of the tile vocabulary from `autogemm-ir`.
pub use autogemm_ir::{
    InvalidTile, Order, Precision, TileCandidate, TileParameters, TileShape, Transpose,
    TransposePair,
};
