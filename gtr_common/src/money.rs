use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";
pub const INR_CURRENCY_CODE_LOWER: &str = "inr";

//--------------------------------------       Paise         ---------------------------------------------------------

/// An amount of Indian rupees, held in minor units (1 rupee = 100 paise).
///
/// All prices and order totals are carried as `Paise` so that money arithmetic stays in exact integer space.
/// Floating point only appears at the serialization boundary, via [`Paise::from_rupees_f64`] and
/// [`Paise::to_rupees_f64`].
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, AddAssign, add_assign);
op!(inplace Paise, SubAssign, sub_assign);
op!(unary Paise, Neg, neg);

impl Mul<i64> for Paise {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Paise {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Paise {}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{:.2}", self.0 as f64 / 100.0)
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// A whole number of rupees, e.g. `Paise::from_rupees(200)` is ₹200.00.
    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Converts a rupee amount into minor units, rounding half away from zero. `1999.99` becomes
    /// `199999` paise exactly, even though the nearest f64 to `1999.99 * 100` sits just below the integer.
    pub fn from_rupees_f64(rupees: f64) -> Result<Self, PaiseConversionError> {
        if !rupees.is_finite() {
            return Err(PaiseConversionError(format!("{rupees} is not a finite amount")));
        }
        let paise = (rupees * 100.0).round();
        if paise < i64::MIN as f64 || paise > i64::MAX as f64 {
            return Err(PaiseConversionError(format!("{rupees} rupees does not fit into an i64 of paise")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(paise as i64))
    }

    pub fn to_rupees_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}
