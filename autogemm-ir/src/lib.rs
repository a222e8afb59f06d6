//! Core vocabulary of the GEMM tile search space
//! (precisions, transposes, tile shapes and tile candidates)
//! that is independent of any particular selection table.

pub mod precision;
pub mod tile;
pub mod transpose;

#[doc(inline)]
pub use self::{
    precision::{ParsePrecisionError, Precision},
    tile::{InvalidTile, TileCandidate, TileParameters, TileShape},
    transpose::{Order, ParseTransposeError, Transpose, TransposePair},
};
