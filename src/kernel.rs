use crate::search_space::SearchSpace;
use autogemm_ir::{Order, Precision, TileCandidate, TransposePair};
use itertools::iproduct;
use std::fmt::{Display, Formatter};

/// Full parameter set of one kernel to generate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelParameters<T> {
    pub precision: Precision,
    pub order: Order,
    pub transposes: TransposePair,
    pub beta: u32,
    pub tile: T,
}

/// Kernel function name, e.g. `sgemm_Col_NT_B1_MX064_NX064_KX16`.
impl<T: TileCandidate> Display for KernelParameters<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}gemm_{}_{}_B{}_{}",
            self.precision,
            self.order.short_name(),
            self.transposes,
            self.beta,
            self.tile
        )
    }
}

impl SearchSpace {
    /// Every kernel to generate for `precision`: orders, then transposes
    /// of A and B supported by the precision, then betas, then tiles
    /// in [`tiles_for_precision`](Self::tiles_for_precision) order.
    pub fn kernel_choices<T: TileCandidate>(
        &self,
        precision: Precision,
    ) -> Vec<KernelParameters<T>> {
        let parameters = self.parameters();
        let transposes = parameters.transposes(precision);
        let tiles = self.tiles_for_precision::<T>(precision);

        iproduct!(
            &parameters.orders,
            transposes,
            transposes,
            &parameters.betas,
            &tiles
        )
        .map(|(order, a, b, beta, tile)| KernelParameters {
            precision,
            order: *order,
            transposes: TransposePair::new(*a, *b),
            beta: *beta,
            tile: tile.clone(),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autogemm_ir::{TileParameters, TileShape, Transpose};
    use itertools::Itertools;

    #[test]
    fn kernel_names() {
        let kernel = KernelParameters {
            precision: Precision::Single,
            order: Order::ColMajor,
            transposes: TransposePair::new(Transpose::None, Transpose::Transpose),
            beta: 1,
            tile: TileParameters::new(TileShape::new(16, 16, 4, 4), 16),
        };
        assert_eq!(kernel.to_string(), "sgemm_Col_NT_B1_MX064_NX064_KX16");

        let kernel = KernelParameters {
            precision: Precision::Double,
            order: Order::RowMajor,
            transposes: TransposePair::new(Transpose::Transpose, Transpose::Transpose),
            beta: 0,
            tile: TileParameters::new(TileShape::new(8, 8, 6, 6), 8),
        };
        assert_eq!(kernel.to_string(), "dgemm_Row_TT_B0_MX048_NX048_KX08_WG8x8");
    }

    #[test]
    fn kernel_choices_cover_every_combination() {
        let space = SearchSpace::default();
        for precision in Precision::ALL {
            let tiles = space.tiles_for_precision::<TileParameters>(precision);
            let transposes = space.parameters().transposes(precision).len();
            let kernels = space.kernel_choices::<TileParameters>(precision);

            assert_eq!(kernels.len(), transposes * transposes * 2 * tiles.len());
            let names = kernels.iter().map(ToString::to_string);
            assert_eq!(names.unique().count(), kernels.len());
            assert!(kernels.iter().all(|kernel| kernel.precision == precision));
        }
    }

    #[test]
    fn complex_kernels_include_conjugate_transposes() {
        let space = SearchSpace::default();
        let kernels = space.kernel_choices::<TileParameters>(Precision::ComplexSingle);
        let first = &kernels[0];
        assert_eq!(first.to_string(), "cgemm_Col_NN_B0_MX016_NX016_KX01");
        assert!(
            kernels
                .iter()
                .any(|kernel| kernel.transposes.to_string() == "CT")
        );

        let real = space.kernel_choices::<TileParameters>(Precision::Double);
        assert!(real.iter().all(|kernel| {
            kernel.transposes.a != Transpose::ConjugateTranspose
                && kernel.transposes.b != Transpose::ConjugateTranspose
        }));
    }
}
