//! Turning a scaled quantity back into something a cook can read.
//!
//! A scaled value is reduced and then shown, in order of preference, as a whole number, as a
//! fraction over one of the "nice" denominators, as the closest nice fraction within the error
//! tolerance, or as a decimal with one place.
use std::fmt::Display;

use crate::rational::{MixedNumber, Rational};
use crate::scale::ScaleRatio;

/// Denominators common in recipes: halves, thirds, quarters, fifths and eighths.
pub const NICE_DENOMINATORS: &[u32] = &[2, 3, 4, 5, 8];

/// Largest accepted approximation error, in percent (exclusive).
pub const ACCEPTABLE_PCT_ERR: u32 = 5;

/// Record of a value that was replaced by a nearby nice fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approximation {
    /// The exact, reduced value before approximation.
    pub exact: Rational,
    /// `100 * |exact - shown|`, always below the tolerance.
    pub pct_err: f64,
}

/// How a normalized value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A bare integer.
    Whole(u64),
    /// A proper fraction with an optional whole part; the numerator is never zero.
    Fraction(MixedNumber),
    /// No nice fraction fits, shown rounded to one decimal place.
    Decimal(Rational),
}

/// A scaled value in display form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    shape: Shape,
    approximation: Option<Approximation>,
}

impl Normalized {
    fn exact(shape: Shape) -> Self {
        Self {
            shape,
            approximation: None,
        }
    }

    /// The display shape.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Set when the displayed fraction differs from the exact value.
    #[must_use]
    pub fn approximation(&self) -> Option<Approximation> {
        self.approximation
    }
}

impl Display for Normalized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.shape {
            Shape::Whole(whole) => write!(f, "{whole}"),
            Shape::Fraction(MixedNumber {
                whole: 0,
                numerator,
                denominator,
            }) => write!(f, "{numerator}/{denominator}"),
            Shape::Fraction(MixedNumber {
                whole,
                numerator,
                denominator,
            }) => write!(f, "{whole} {numerator}/{denominator}"),
            Shape::Decimal(value) => f.write_str(&value.round_to_tenths()),
        }
    }
}

/// Normalizes scaled mixed numbers.
///
/// The nice denominators are tried in the order given when approximating, so the first
/// acceptable one wins even if a later one would be closer.
#[derive(Debug, Clone)]
pub struct Normalizer {
    nice_denominators: Vec<u32>,
    tolerance: u32,
}

impl Default for Normalizer {
    /// Return a normalizer with [`NICE_DENOMINATORS`] and [`ACCEPTABLE_PCT_ERR`].
    fn default() -> Self {
        Self::new(NICE_DENOMINATORS.iter().copied(), ACCEPTABLE_PCT_ERR)
    }
}

impl Normalizer {
    /// Create a normalizer. Zero denominators are ignored.
    pub fn new<I: IntoIterator<Item = u32>>(nice_denominators: I, tolerance: u32) -> Self {
        Self {
            nice_denominators: nice_denominators.into_iter().filter(|d| *d != 0).collect(),
            tolerance,
        }
    }

    /// The nice denominators, in approximation order.
    #[must_use]
    pub fn nice_denominators(&self) -> &[u32] {
        &self.nice_denominators
    }

    /// The approximation tolerance in percent.
    #[must_use]
    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    /// Scale `mixed` by `ratio` and bring it into display form.
    ///
    /// ```
    /// use recipe_scaler::normalizer::Normalizer;
    /// use recipe_scaler::rational::MixedNumber;
    /// use recipe_scaler::scale::ScaleRatio;
    ///
    /// let half = MixedNumber { whole: 0, numerator: 1, denominator: 2 };
    /// let ratio = ScaleRatio::new(2, 3).unwrap();
    /// let scaled = Normalizer::default().normalize(half, ratio).unwrap();
    /// assert_eq!(scaled.to_string(), "3/4");
    /// ```
    ///
    /// Returns `None` if the denominator is zero or the scaled value does not fit in 64 bits.
    #[must_use]
    pub fn normalize(&self, mixed: MixedNumber, ratio: ScaleRatio) -> Option<Normalized> {
        let value = mixed
            .to_improper()?
            .scaled(ratio.desired(), ratio.original())?;
        Some(self.normalize_rational(value))
    }

    /// Bring an exact value into display form.
    #[must_use]
    pub fn normalize_rational(&self, value: Rational) -> Normalized {
        let value = value.reduced();

        if let Some(whole) = value.as_whole() {
            return Normalized::exact(Shape::Whole(whole));
        }

        if self.is_nice(value.denominator()) {
            return Normalized::exact(Shape::Fraction(value.to_mixed()));
        }

        match self.approximate(value) {
            Some((approximated, pct_err)) => {
                // The approximation can land on a whole number: 31/32 becomes 2/2.
                let shape = approximated
                    .as_whole()
                    .map_or_else(|| Shape::Fraction(approximated.to_mixed()), Shape::Whole);
                Normalized {
                    shape,
                    approximation: Some(Approximation {
                        exact: value,
                        pct_err,
                    }),
                }
            }
            None => Normalized::exact(Shape::Decimal(value)),
        }
    }

    fn is_nice(&self, denominator: u64) -> bool {
        self.nice_denominators
            .iter()
            .any(|nice| u64::from(*nice) == denominator)
    }

    /// Find the first nice denominator whose nearest fraction is nonzero and within tolerance.
    fn approximate(&self, value: Rational) -> Option<(Rational, f64)> {
        let numerator = u128::from(value.numerator());
        let denominator = u128::from(value.denominator());

        self.nice_denominators.iter().find_map(|&nice| {
            let candidate = u128::from(nice);
            // value * candidate, kept as a fraction over `denominator`
            let target = numerator * candidate;
            let rounded = (2 * target + denominator) / (2 * denominator);
            if rounded == 0 {
                return None;
            }

            // pct error = 100 * |target / denominator - rounded| / candidate
            let deviation = target.abs_diff(rounded * denominator);
            let limit = u128::from(self.tolerance) * denominator * candidate;
            if 100 * deviation >= limit {
                return None;
            }

            #[allow(clippy::cast_precision_loss)]
            let pct_err = 100.0 * deviation as f64 / (denominator * candidate) as f64;
            let approximated = Rational::new(u64::try_from(rounded).ok()?, u64::from(nice))?;
            Some((approximated.reduced(), pct_err))
        })
    }
}
