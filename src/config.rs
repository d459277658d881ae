//! Configuration struct for scaling and report generation.
use std::borrow::Cow;

use crate::error::Error;
use crate::matcher::{Matcher, get_matcher};
use crate::normalizer::{ACCEPTABLE_PCT_ERR, NICE_DENOMINATORS, Normalizer};
use crate::units::UnitVocabulary;

/// Struct for scaling configuration.
///
/// At present, configuration contains the original and desired serving counts plus optional
/// overrides for the unit vocabulary, the nice denominators and the approximation tolerance.
///
/// Construct via [`ConfigBuilder`] or [`default()`][`Self::default`].
///
/// # Examples
///
/// Use [`Config::builder()`][`Config::builder`] to get a [`ConfigBuilder`] and then chain calls to set the desired configuration.
/// Call [`build()`][`ConfigBuilder::build`] to get a `Config`.
///
/// ```
/// use recipe_scaler::config::Config;
/// let config = Config::builder().original_servings(2).servings(6).tolerance(3).build();
/// ```
pub struct Config {
    pub(crate) original_servings: i64,
    pub(crate) servings: i64,
    pub(crate) units: Option<UnitVocabulary>,
    pub(crate) nice_denominators: Option<Vec<u32>>,
    pub(crate) tolerance: Option<u32>,
}

impl Default for Config {
    /// Return a default [`Config`] that keeps quantities as they are (one serving to one) with
    /// the default units, nice denominators and tolerance.
    fn default() -> Self {
        ConfigBuilder::default().build()
    }
}

impl Config {
    /// Return a [`ConfigBuilder`] for building a `Config`.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The matcher for this configuration: the shared default one unless something was overridden.
    pub(crate) fn matcher(&self) -> Result<Cow<'static, Matcher>, Error> {
        if self.units.is_none() && self.nice_denominators.is_none() && self.tolerance.is_none() {
            return Ok(Cow::Borrowed(get_matcher()));
        }

        let normalizer = Normalizer::new(
            self.nice_denominators
                .clone()
                .unwrap_or_else(|| NICE_DENOMINATORS.to_vec()),
            self.tolerance.unwrap_or(ACCEPTABLE_PCT_ERR),
        );
        let units = self.units.clone().unwrap_or_default();
        Ok(Cow::Owned(Matcher::new(&units, normalizer)?))
    }
}

/// Builder for building a [`Config`].
pub struct ConfigBuilder {
    original_servings: i64,
    servings: i64,
    units: Option<UnitVocabulary>,
    nice_denominators: Option<Vec<u32>>,
    tolerance: Option<u32>,
}

impl Default for ConfigBuilder {
    /// Return a default [`ConfigBuilder`] with one original serving, one serving and no overrides.
    fn default() -> Self {
        Self {
            original_servings: 1,
            servings: 1,
            units: None,
            nice_denominators: None,
            tolerance: None,
        }
    }
}

impl ConfigBuilder {
    /// Set the number of servings the recipe was written for.
    ///
    /// Not validated until the configuration is used.
    pub fn original_servings(&mut self, original_servings: i64) -> &mut Self {
        self.original_servings = original_servings;
        self
    }

    /// Set the number of servings to scale the recipe to.
    ///
    /// Not validated until the configuration is used.
    pub fn servings(&mut self, servings: i64) -> &mut Self {
        self.servings = servings;
        self
    }

    /// Replace the default unit vocabulary.
    pub fn units(&mut self, units: UnitVocabulary) -> &mut Self {
        self.units = Some(units);
        self
    }

    /// Replace the default nice denominators. They are tried in the order given.
    pub fn nice_denominators<I: IntoIterator<Item = u32>>(&mut self, denominators: I) -> &mut Self {
        self.nice_denominators = Some(denominators.into_iter().collect());
        self
    }

    /// Set the approximation tolerance, in percent.
    pub fn tolerance(&mut self, tolerance: u32) -> &mut Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Return a new [`Config`] based on the builder's properties.
    pub fn build(&mut self) -> Config {
        Config {
            original_servings: self.original_servings,
            servings: self.servings,
            units: self.units.clone(),
            nice_denominators: self.nice_denominators.clone(),
            tolerance: self.tolerance,
        }
    }
}
