use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// How a single GEMM operand is read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Transpose {
    /// Used as stored.
    #[serde(rename = "N")]
    None,
    #[serde(rename = "T")]
    Transpose,
    /// Conjugate transpose. Only meaningful for complex precisions.
    #[serde(rename = "C")]
    ConjugateTranspose,
}

impl Transpose {
    pub fn code(self) -> char {
        match self {
            Transpose::None => 'N',
            Transpose::Transpose => 'T',
            Transpose::ConjugateTranspose => 'C',
        }
    }
}

impl Display for Transpose {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transpose code {0:?} (expected one of N, T, C)")]
pub struct ParseTransposeError(pub String);

impl TryFrom<char> for Transpose {
    type Error = ParseTransposeError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'N' => Ok(Transpose::None),
            'T' => Ok(Transpose::Transpose),
            'C' => Ok(Transpose::ConjugateTranspose),
            _ => Err(ParseTransposeError(code.to_string())),
        }
    }
}

impl FromStr for Transpose {
    type Err = ParseTransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Transpose::try_from(code),
            _ => Err(ParseTransposeError(s.to_owned())),
        }
    }
}

/// Transpose modes of the A and B operands, displayed
/// as a two-character code such as `NT`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransposePair {
    pub a: Transpose,
    pub b: Transpose,
}

impl TransposePair {
    pub fn new(a: Transpose, b: Transpose) -> Self {
        Self { a, b }
    }
}

impl Display for TransposePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.a, self.b)
    }
}

impl FromStr for TransposePair {
    type Err = ParseTransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => Ok(Self::new(a.try_into()?, b.try_into()?)),
            _ => Err(ParseTransposeError(s.to_owned())),
        }
    }
}

/// Storage order of the matrices a kernel is generated for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Order {
    ColMajor,
    RowMajor,
}

impl Order {
    /// Short form used inside kernel names.
    pub fn short_name(self) -> &'static str {
        match self {
            Order::ColMajor => "Col",
            Order::RowMajor => "Row",
        }
    }
}
