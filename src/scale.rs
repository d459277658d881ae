//! The ratio between the servings a recipe was written for and the servings wanted.
use crate::error::Error;

/// A validated pair of serving counts.
///
/// Both counts are positive integers; quantities are multiplied by `desired / original`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleRatio {
    original: u64,
    desired: u64,
}

impl ScaleRatio {
    /// Build a ratio from the original and desired serving counts.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidScaleInput`][`Error::InvalidScaleInput`] if either count is zero or negative.
    pub fn new(original: i64, desired: i64) -> Result<Self, Error> {
        Ok(Self {
            original: positive(original)?,
            desired: positive(desired)?,
        })
    }

    /// Build a ratio from counts as the user typed them.
    ///
    /// ```
    /// use recipe_scaler::scale::ScaleRatio;
    ///
    /// assert!(ScaleRatio::parse("2", "4").is_ok());
    /// assert!(ScaleRatio::parse("2", "1.5").is_err());
    /// assert!(ScaleRatio::parse("", "4").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`InvalidScaleInput`][`Error::InvalidScaleInput`] if either count is missing,
    /// non-integral, zero or negative.
    pub fn parse(original: &str, desired: &str) -> Result<Self, Error> {
        Self::new(parse_count(original)?, parse_count(desired)?)
    }

    /// The count the recipe was written for.
    #[must_use]
    pub fn original(&self) -> u64 {
        self.original
    }

    /// The count the recipe is scaled to.
    #[must_use]
    pub fn desired(&self) -> u64 {
        self.desired
    }

    /// The scale factor as a float, for display only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn factor(&self) -> f64 {
        self.desired as f64 / self.original as f64
    }
}

/// Parse a single serving count as typed, without checking its sign.
///
/// # Errors
///
/// Returns [`InvalidScaleInput`][`Error::InvalidScaleInput`] if the count is missing or not an
/// integer.
pub fn parse_count(count: &str) -> Result<i64, Error> {
    let count = count.trim();
    if count.is_empty() {
        return Err(Error::InvalidScaleInput("missing count".to_string()));
    }
    count
        .parse()
        .map_err(|_| Error::InvalidScaleInput(format!("{count} is not an integer")))
}

fn positive(count: i64) -> Result<u64, Error> {
    u64::try_from(count)
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| Error::InvalidScaleInput(format!("{count} is not positive")))
}
