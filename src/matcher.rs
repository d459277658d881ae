//! Finding "quantity + unit" tokens in free-form recipe text and rewriting them.
//!
//! Three numeric shapes are recognized, tried in this order at every position:
//!
//! * an integer: `0` or digits without a leading zero (`007` is not a number here),
//! * a decimal: `3`, `3.`, `3.5` or `.5`,
//! * a fraction with an optional whole part: `3/4`, `2 3/4`, `2 3 / 4`.
//!
//! The number must be followed by a unit from the [`UnitVocabulary`] and the whole token must
//! stand on word boundaries, so `14px` or `a2cups` are left alone.
use std::num::ParseIntError;
use std::ops::Range;
use std::sync::OnceLock;

use log::{debug, trace};
use regex::{Captures, Regex};
use serde::Serialize;
use thiserror::Error;

use crate::error::Error;
use crate::normalizer::{Approximation, Normalizer};
use crate::rational::{MixedNumber, Rational};
use crate::scale::ScaleRatio;
use crate::units::UnitVocabulary;

/// A base 10 integer without superfluous leading zeros.
const INTEGER: &str = "(?:0|[1-9][0-9]*)";

/// Global `Matcher` with the default units, nice denominators and tolerance.
static MATCHER: OnceLock<Matcher> = OnceLock::new();

/// Get the global default [`Matcher`].
///
/// The matcher is built once, on first use, and only read afterwards.
///
/// # Example
/// ```
/// use recipe_scaler::matcher::get_matcher;
/// use recipe_scaler::scale::ScaleRatio;
///
/// let ratio = ScaleRatio::new(2, 4).unwrap();
/// assert_eq!(get_matcher().scan_and_replace("2 cups flour", ratio), "4 cups flour");
/// ```
#[allow(clippy::expect_used)]
pub fn get_matcher() -> &'static Matcher {
    MATCHER.get_or_init(|| {
        Matcher::new(&UnitVocabulary::default(), Normalizer::default())
            .expect("default unit vocabulary should compile")
    })
}

/// The number part of a match, as captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericToken<'t> {
    /// A plain integer, such as `2`.
    Integer(&'t str),
    /// A decimal, such as `3.5`, `3.` or `.5`.
    Decimal(&'t str),
    /// A simple fraction or mixed number.
    Fraction {
        /// Whole part of a mixed number.
        whole: Option<&'t str>,
        /// Numerator digits.
        numerator: &'t str,
        /// Denominator digits.
        denominator: &'t str,
    },
}

/// One quantity found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedQuantity<'t> {
    /// The number.
    pub number: NumericToken<'t>,
    /// The unit exactly as written.
    pub unit: &'t str,
    /// Byte range of the whole match in the scanned text.
    pub span: Range<usize>,
}

impl<'t> MatchedQuantity<'t> {
    fn from_captures(captures: &Captures<'t>) -> Option<Self> {
        let group = |name| captures.name(name).map(|m| m.as_str());

        let number = if let Some(integer) = group("integer") {
            NumericToken::Integer(integer)
        } else if let Some(decimal) = group("decimal").or_else(|| group("bare_decimal")) {
            NumericToken::Decimal(decimal)
        } else {
            NumericToken::Fraction {
                whole: group("whole"),
                numerator: group("numerator")?,
                denominator: group("denominator")?,
            }
        };

        let whole_match = captures.get(0)?;
        Some(Self {
            number,
            unit: group("unit")?,
            span: whole_match.range(),
        })
    }
}

/// Report of a single rewritten quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledQuantity<'t> {
    /// The matched text, number and unit.
    pub original: &'t str,
    /// The replacement text, number and unit.
    pub scaled: String,
    /// The unit exactly as written.
    pub unit: &'t str,
    /// Percent error when the scaled value was approximated by a nice fraction.
    pub pct_err: Option<f64>,
    /// Byte range of the original text.
    #[serde(skip)]
    pub span: Range<usize>,
}

/// Reasons a match is left as it was.
#[derive(Error, Debug)]
enum MalformedMatch {
    #[error("{0:?} is not a 64-bit integer")]
    Number(String, #[source] ParseIntError),

    #[error("zero denominator")]
    ZeroDenominator,

    #[error("scaled value out of range")]
    Overflow,
}

/// Scaled number text plus the approximation behind it, if any.
struct Rewrite {
    number: String,
    approximation: Option<Approximation>,
}

/// Finds quantities and scales them.
///
/// Holds only read-only configuration and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    normalizer: Normalizer,
}

impl Matcher {
    /// Build a matcher for the given units, rendering scaled values with `normalizer`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyUnitVocabulary`][`Error::EmptyUnitVocabulary`] if there are no units and
    /// [`InvalidUnitPattern`][`Error::InvalidUnitPattern`] if a unit pattern does not compile.
    pub fn new(units: &UnitVocabulary, normalizer: Normalizer) -> Result<Self, Error> {
        if units.patterns().is_empty() {
            return Err(Error::EmptyUnitVocabulary);
        }
        let regex = Regex::new(&build_pattern(units))?;
        Ok(Self { regex, normalizer })
    }

    /// The normalizer used for integers and fractions.
    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Find every quantity in `text`, left to right, without rewriting anything.
    pub fn scan<'t>(&self, text: &'t str) -> impl Iterator<Item = MatchedQuantity<'t>> {
        self.regex
            .captures_iter(text)
            .filter_map(|captures| MatchedQuantity::from_captures(&captures))
    }

    /// Scale every quantity in `text` by `ratio`, leaving everything else untouched.
    #[must_use]
    pub fn scan_and_replace(&self, text: &str, ratio: ScaleRatio) -> String {
        self.regex
            .replace_all(text, |captures: &Captures| {
                let matched = &captures[0];
                MatchedQuantity::from_captures(captures)
                    .and_then(|quantity| self.scale(&quantity, ratio))
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }

    /// Scale every quantity in `text` by `ratio` and report each rewrite.
    ///
    /// Quantities that cannot be scaled are left out, as they are left unchanged in the text.
    #[must_use]
    pub fn scale_quantities<'t>(&self, text: &'t str, ratio: ScaleRatio) -> Vec<ScaledQuantity<'t>> {
        self.scan(text)
            .filter_map(|quantity| {
                let rewrite = self.rewrite_logged(&quantity, ratio)?;
                Some(ScaledQuantity {
                    original: &text[quantity.span.clone()],
                    scaled: format!("{} {}", rewrite.number, quantity.unit),
                    unit: quantity.unit,
                    pct_err: rewrite.approximation.map(|a| a.pct_err),
                    span: quantity.span,
                })
            })
            .collect()
    }

    fn scale(&self, quantity: &MatchedQuantity, ratio: ScaleRatio) -> Option<String> {
        self.rewrite_logged(quantity, ratio)
            .map(|rewrite| format!("{} {}", rewrite.number, quantity.unit))
    }

    fn rewrite_logged(&self, quantity: &MatchedQuantity, ratio: ScaleRatio) -> Option<Rewrite> {
        match self.rewrite(quantity, ratio) {
            Ok(rewrite) => {
                trace!("{:?} -> {} {}", quantity.number, rewrite.number, quantity.unit);
                Some(rewrite)
            }
            Err(e) => {
                debug!("leaving {:?} unchanged: {e}", quantity.number);
                None
            }
        }
    }

    fn rewrite(&self, quantity: &MatchedQuantity, ratio: ScaleRatio) -> Result<Rewrite, MalformedMatch> {
        match quantity.number {
            NumericToken::Decimal(decimal) => {
                let scaled = parse_decimal(decimal)?
                    .scaled(ratio.desired(), ratio.original())
                    .ok_or(MalformedMatch::Overflow)?;
                Ok(Rewrite {
                    number: scaled.round_to_tenths(),
                    approximation: None,
                })
            }
            NumericToken::Integer(integer) => self.rewrite_mixed(
                MixedNumber::whole(parse_integer(integer)?),
                ratio,
            ),
            NumericToken::Fraction {
                whole,
                numerator,
                denominator,
            } => {
                let mixed = MixedNumber {
                    whole: whole.map_or(Ok(0), parse_integer)?,
                    numerator: parse_integer(numerator)?,
                    denominator: parse_integer(denominator)?,
                };
                if mixed.denominator == 0 {
                    return Err(MalformedMatch::ZeroDenominator);
                }
                self.rewrite_mixed(mixed, ratio)
            }
        }
    }

    fn rewrite_mixed(&self, mixed: MixedNumber, ratio: ScaleRatio) -> Result<Rewrite, MalformedMatch> {
        let normalized = self
            .normalizer
            .normalize(mixed, ratio)
            .ok_or(MalformedMatch::Overflow)?;
        Ok(Rewrite {
            number: normalized.to_string(),
            approximation: normalized.approximation(),
        })
    }
}

/// Compose the full pattern: number, optional whitespace, unit.
///
/// A decimal starting with "." only sits on a word boundary when it follows a word character,
/// so ".5" after whitespace or at the start of the text needs its own branch.
fn build_pattern(units: &UnitVocabulary) -> String {
    let integer = format!("(?P<integer>{INTEGER})");
    let decimal = format!(r"(?P<decimal>{INTEGER}\.?|{INTEGER}?\.[0-9]+)");
    let fraction = format!(
        r"(?:(?P<whole>{INTEGER})\s+)?(?P<numerator>{INTEGER})\s*/\s*(?P<denominator>{INTEGER})"
    );
    let bare_decimal = r"(?P<bare_decimal>\.[0-9]+)";
    format!(
        r"(?i)(?:\b(?:{integer}|{decimal}|{fraction})|\B{bare_decimal})\s*(?P<unit>{})\b",
        units.pattern()
    )
}

fn parse_integer(digits: &str) -> Result<u64, MalformedMatch> {
    digits
        .parse()
        .map_err(|e| MalformedMatch::Number(digits.to_string(), e))
}

fn parse_decimal(decimal: &str) -> Result<Rational, MalformedMatch> {
    let (integer, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));
    let numerator = parse_integer(&format!("{integer}{fraction}"))?;
    let places = u32::try_from(fraction.len()).map_err(|_| MalformedMatch::Overflow)?;
    let denominator = 10_u64.checked_pow(places).ok_or(MalformedMatch::Overflow)?;
    Rational::new(numerator, denominator).ok_or(MalformedMatch::ZeroDenominator)
}
