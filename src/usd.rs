use serde::Deserialize;

use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{AddAssign, Mul},
};

/// Represents an amount of money in USD currency.
///
/// The amount is stored unrounded as a number of dollars, exactly as it was
/// read from the input, so that totals accumulate without drift from early
/// rounding. Use [`Usd::rounded`] to get the two-decimal figure for display.
///
/// The [`Display`] implementation prints the shortest decimal form of the
/// value, with no currency sign and no trailing zeros: `2.5`, `0`, `12.34`.
#[derive(Clone, Copy, Default, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Usd(f64);

impl Usd {
    #[must_use]
    pub const fn new(dollars: f64) -> Self {
        Self(dollars)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the amount rounded to whole cents.
    ///
    /// Halves are rounded away from zero, so `0.125` becomes `0.13` and
    /// `-0.125` becomes `-0.13`. Because the amount is binary floating point,
    /// a value such as `1.005` is really slightly below the halfway point and
    /// rounds down to `1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compute_sales::Usd;
    /// assert_eq!(Usd::new(12.345_678).rounded(), Usd::new(12.35));
    /// assert_eq!(Usd::new(0.125).rounded().to_string(), "0.13");
    /// ```
    #[must_use]
    pub fn rounded(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Debug for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // -0.0 would otherwise print as "-0"
        if self.0 == 0.0 {
            return f.write_str("0");
        }
        write!(f, "{}", self.0)
    }
}

impl AddAssign for Usd {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Usd {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Usd {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}
