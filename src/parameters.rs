use crate::{Error, Result};
use autogemm_ir::{Order, Precision, Transpose};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Non-tile kernel parameters: which transposes and unroll factors each
/// precision supports, and which orders and betas kernels are generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterTable {
    pub transposes: IndexMap<Precision, Vec<Transpose>>,
    pub unrolls: IndexMap<Precision, Vec<u32>>,
    pub orders: Vec<Order>,
    /// Beta values kernels are specialized for. `0` kernels skip reading `C`.
    pub betas: Vec<u32>,
}

impl ParameterTable {
    pub fn transposes(&self, precision: Precision) -> &[Transpose] {
        self.transposes
            .get(&precision)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn unrolls(&self, precision: Precision) -> &[u32] {
        self.unrolls
            .get(&precision)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        for precision in Precision::ALL {
            let unrolls = self.unrolls(precision);
            if unrolls.is_empty() {
                return Err(Error::MissingUnrolls(precision));
            }
            if unrolls.contains(&0) {
                return Err(Error::ZeroUnroll(precision));
            }
            let transposes = self.transposes(precision);
            if transposes.is_empty() {
                return Err(Error::MissingTransposes(precision));
            }
            if !precision.is_complex() && transposes.contains(&Transpose::ConjugateTranspose) {
                return Err(Error::ConjugateOfReal {
                    precision,
                    transpose: Transpose::ConjugateTranspose,
                });
            }
        }
        if self.orders.is_empty() {
            return Err(Error::MissingOrders);
        }
        if self.betas.is_empty() {
            return Err(Error::MissingBetas);
        }
        Ok(())
    }
}

impl Default for ParameterTable {
    fn default() -> Self {
        let real = vec![Transpose::None, Transpose::Transpose];
        let complex = vec![
            Transpose::None,
            Transpose::Transpose,
            Transpose::ConjugateTranspose,
        ];
        Self {
            transposes: IndexMap::from([
                (Precision::Single, real.clone()),
                (Precision::Double, real),
                (Precision::ComplexSingle, complex.clone()),
                (Precision::ComplexDouble, complex),
            ]),
            unrolls: IndexMap::from([
                (Precision::Single, vec![16, 8, 1]),
                (Precision::Double, vec![8, 1]),
                (Precision::ComplexSingle, vec![8, 1]),
                (Precision::ComplexDouble, vec![8, 1]),
            ]),
            orders: vec![Order::ColMajor],
            betas: vec![0, 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let parameters = ParameterTable::default();
        parameters.validate().unwrap();
        assert_eq!(parameters.unrolls(Precision::Single), &[16, 8, 1]);
        assert_eq!(
            parameters.transposes(Precision::ComplexDouble),
            &[
                Transpose::None,
                Transpose::Transpose,
                Transpose::ConjugateTranspose
            ]
        );
    }

    #[test]
    fn empty_lists_are_rejected() {
        let mut parameters = ParameterTable::default();
        parameters.unrolls.insert(Precision::Double, vec![]);
        assert!(matches!(
            parameters.validate(),
            Err(Error::MissingUnrolls(Precision::Double))
        ));

        let mut parameters = ParameterTable::default();
        parameters.transposes.shift_remove(&Precision::ComplexSingle);
        assert!(matches!(
            parameters.validate(),
            Err(Error::MissingTransposes(Precision::ComplexSingle))
        ));

        let mut parameters = ParameterTable::default();
        parameters
            .transposes
            .insert(Precision::Single, vec![Transpose::ConjugateTranspose]);
        assert!(matches!(
            parameters.validate(),
            Err(Error::ConjugateOfReal {
                precision: Precision::Single,
                ..
            })
        ));

        let mut parameters = ParameterTable::default();
        parameters.unrolls.insert(Precision::Single, vec![16, 0, 1]);
        assert!(matches!(
            parameters.validate(),
            Err(Error::ZeroUnroll(Precision::Single))
        ));

        let mut parameters = ParameterTable::default();
        parameters.orders.clear();
        assert!(matches!(parameters.validate(), Err(Error::MissingOrders)));

        let mut parameters = ParameterTable::default();
        parameters.betas.clear();
        assert!(matches!(parameters.validate(), Err(Error::MissingBetas)));
    }
}
