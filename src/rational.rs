//! Exact non-negative rationals and the small helpers the normalizer is built from.
use std::fmt::Display;

/// Greatest common divisor of two integers (Euclid).
///
/// `gcd(n, 0)` is `n`, so callers must not divide by the result when both inputs are zero.
#[must_use]
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// An exact value `numerator / denominator`.
///
/// The denominator is always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    numerator: u64,
    denominator: u64,
}

impl Rational {
    /// Return a new rational, or `None` if the denominator is zero.
    #[must_use]
    pub fn new(numerator: u64, denominator: u64) -> Option<Self> {
        (denominator != 0).then_some(Self {
            numerator,
            denominator,
        })
    }

    /// The numerator as stored (not necessarily reduced).
    #[must_use]
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// The denominator as stored (not necessarily reduced).
    #[must_use]
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Return the fraction in lowest terms. Zero reduces to `0/1`.
    #[must_use]
    pub fn reduced(self) -> Self {
        if self.numerator == 0 {
            return Self {
                numerator: 0,
                denominator: 1,
            };
        }
        let divisor = gcd(self.numerator, self.denominator);
        Self {
            numerator: self.numerator / divisor,
            denominator: self.denominator / divisor,
        }
    }

    /// The value as a whole number, if the denominator divides the numerator.
    #[must_use]
    pub fn as_whole(&self) -> Option<u64> {
        (self.numerator % self.denominator == 0).then(|| self.numerator / self.denominator)
    }

    /// Split into a whole part and a proper fractional remainder.
    #[must_use]
    pub fn to_mixed(self) -> MixedNumber {
        MixedNumber {
            whole: self.numerator / self.denominator,
            numerator: self.numerator % self.denominator,
            denominator: self.denominator,
        }
    }

    /// Multiply by `factor_numerator / factor_denominator`, or `None` on overflow or a zero
    /// factor denominator.
    #[must_use]
    pub fn scaled(self, factor_numerator: u64, factor_denominator: u64) -> Option<Self> {
        Self::new(
            self.numerator.checked_mul(factor_numerator)?,
            self.denominator.checked_mul(factor_denominator)?,
        )
    }

    /// Render rounded to one decimal place, halves rounding up, with a trailing ".0" removed.
    ///
    /// ```
    /// use recipe_scaler::rational::Rational;
    ///
    /// assert_eq!(Rational::new(7, 4).unwrap().round_to_tenths(), "1.8");
    /// assert_eq!(Rational::new(3, 1).unwrap().round_to_tenths(), "3");
    /// ```
    #[must_use]
    pub fn round_to_tenths(&self) -> String {
        // Work in u128: 20 * u64::MAX does not fit in u64.
        let numerator = u128::from(self.numerator);
        let denominator = u128::from(self.denominator);
        let tenths = (20 * numerator + denominator) / (2 * denominator);
        let (whole, tenth) = (tenths / 10, tenths % 10);
        if tenth == 0 {
            whole.to_string()
        } else {
            format!("{whole}.{tenth}")
        }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A whole number plus a fraction, as written in a recipe ("2 3/4").
///
/// A bare integer is `whole/0/1`; a bare fraction has a zero whole part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedNumber {
    /// Whole-number part.
    pub whole: u64,
    /// Numerator of the fractional part.
    pub numerator: u64,
    /// Denominator of the fractional part.
    pub denominator: u64,
}

impl MixedNumber {
    /// A mixed number with no fractional part.
    #[must_use]
    pub fn whole(whole: u64) -> Self {
        Self {
            whole,
            numerator: 0,
            denominator: 1,
        }
    }

    /// Convert to a single (possibly improper) fraction.
    ///
    /// Returns `None` for a zero denominator or when the value does not fit.
    #[must_use]
    pub fn to_improper(&self) -> Option<Rational> {
        let numerator = self
            .whole
            .checked_mul(self.denominator)?
            .checked_add(self.numerator)?;
        Rational::new(numerator, self.denominator)
    }
}
