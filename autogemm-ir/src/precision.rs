use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Numeric element type a GEMM kernel operates on.
///
/// Each precision is identified by the single-character BLAS prefix
/// (`s`, `d`, `c`, `z`), which is also how it appears in serialized
/// tables and generated kernel names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Precision {
    /// Real 32-bit floating point.
    #[serde(rename = "s")]
    Single,
    /// Real 64-bit floating point.
    #[serde(rename = "d")]
    Double,
    /// Complex with 32-bit real and imaginary parts.
    #[serde(rename = "c")]
    ComplexSingle,
    /// Complex with 64-bit real and imaginary parts.
    #[serde(rename = "z")]
    ComplexDouble,
}

impl Precision {
    /// All precisions in declared order. Enumerations that
    /// span precisions iterate in this order.
    pub const ALL: [Precision; 4] = [
        Precision::Single,
        Precision::Double,
        Precision::ComplexSingle,
        Precision::ComplexDouble,
    ];

    pub fn code(self) -> char {
        match self {
            Precision::Single => 's',
            Precision::Double => 'd',
            Precision::ComplexSingle => 'c',
            Precision::ComplexDouble => 'z',
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Precision::ComplexSingle | Precision::ComplexDouble)
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown precision code {0:?} (expected one of s, d, c, z)")]
pub struct ParsePrecisionError(pub String);

impl TryFrom<char> for Precision {
    type Error = ParsePrecisionError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Precision::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| ParsePrecisionError(code.to_string()))
    }
}

impl FromStr for Precision {
    type Err = ParsePrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Precision::try_from(code),
            _ => Err(ParsePrecisionError(s.to_owned())),
        }
    }
}
