//! Positive item counts used by listings and requests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest accepted quantity. Keeps values inside a PostgreSQL `INTEGER`.
pub const QUANTITY_MAX: u32 = 1_000_000;

/// Validation errors for [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("quantity must be at least 1")]
    Zero,
    #[error("quantity must be at most {max}")]
    TooLarge { max: u32 },
}

/// Number of portions, packs or items. Never zero.
///
/// No reconciliation happens between a request's quantity and the listing it
/// references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Validate and construct a [`Quantity`].
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        match value {
            0 => Err(QuantityError::Zero),
            v if v > QUANTITY_MAX => Err(QuantityError::TooLarge { max: QUANTITY_MAX }),
            v => Ok(Self(v)),
        }
    }

    /// Raw count.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Err(QuantityError::Zero))]
    #[case(1, Ok(1))]
    #[case(QUANTITY_MAX, Ok(QUANTITY_MAX))]
    #[case(QUANTITY_MAX + 1, Err(QuantityError::TooLarge { max: QUANTITY_MAX }))]
    fn enforces_bounds(#[case] raw: u32, #[case] expected: Result<u32, QuantityError>) {
        assert_eq!(Quantity::new(raw).map(Quantity::get), expected);
    }
}
