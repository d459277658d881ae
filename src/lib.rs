//! A Rust library for scaling the quantities in free-form recipe text to a new number of servings.
//!
//! Every "quantity + unit" token (`2 cups`, `1 1/2 tsp`, `3.5 tbsp`) is multiplied by
//! `servings / original servings` and written back in the friendliest form available: a whole
//! number, a fraction over 2, 3, 4, 5 or 8, the closest such fraction when it is within 5%,
//! or a decimal with one place. Units are kept exactly as written and everything else in the
//! text is left alone.
//!
//! ```
//! assert_eq!(recipe_scaler::convert("1/2 tsp salt", 2, 3).unwrap(), "3/4 tsp salt");
//! ```
//!
//! Scaled recipes can also be rendered through [Jinja2][00]-style templates, see
//! [`render_template_with_config`].
//!
//! [00]: https://jinja.palletsprojects.com/en/stable/
use config::Config;
use filters::{numeric_filter, scale_filter};
use matcher::{Matcher, ScaledQuantity, get_matcher};
use minijinja::Environment;
use serde::Serialize;

pub mod config;
pub mod error;
mod filters;
pub mod matcher;
pub mod normalizer;
pub mod rational;
pub mod scale;
pub mod units;

pub use error::Error;
pub use scale::ScaleRatio;

/// Scale every quantity in `text` from `original_count` servings to `new_count` servings.
///
/// Text that is not a recognized quantity, including numbers without a known unit, is returned
/// unchanged.
///
/// # Errors
///
/// Returns [`InvalidScaleInput`][`Error::InvalidScaleInput`] if either count is not positive.
pub fn convert(text: &str, original_count: i64, new_count: i64) -> Result<String, Error> {
    let ratio = ScaleRatio::new(original_count, new_count)?;
    Ok(get_matcher().scan_and_replace(text, ratio))
}

/// Context passed to the template.
#[derive(Serialize)]
struct RecipeContext<'a> {
    original_servings: u64,
    servings: u64,
    scale: f64,
    original: &'a str,
    recipe: String,
    quantities: Vec<ScaledQuantity<'a>>,
}

impl<'a> RecipeContext<'a> {
    fn new(matcher: &Matcher, recipe: &'a str, ratio: ScaleRatio) -> Self {
        RecipeContext {
            original_servings: ratio.original(),
            servings: ratio.desired(),
            scale: ratio.factor(),
            original: recipe,
            recipe: matcher.scan_and_replace(recipe, ratio),
            quantities: matcher.scale_quantities(recipe, ratio),
        }
    }
}

/// Render a recipe with the default configuration.
///
/// This is equivalent to calling [`render_template_with_config`] with a default [`Config`],
/// which keeps every quantity at its original value apart from normalizing how it is written.
///
/// # Errors
///
/// Returns [`TemplateError`][`Error::TemplateError`] if the template has a syntax error or rendering fails.
pub fn render_template(recipe: &str, template: &str) -> Result<String, Error> {
    render_template_with_config(recipe, template, &Config::default())
}

/// Render a scaled recipe to a String with the provided [`Config`].
///
/// On success, returns a String with the recipe as rendered by the template.
///
/// # Parameters
///
/// * `recipe` is free-form recipe text.
/// * `template` is a template. It sees `recipe` (the scaled text), `original` (the text as
///   given), `servings`, `original_servings`, `scale` and `quantities`, a list of every rewrite
///   with `original`, `scaled`, `unit` and `pct_err` fields. The `scale(original, servings)` and
///   `numeric` filters are available.
/// * `config` is a [`Config`][`config::Config`] with the serving counts and scaling options.
///
/// # Errors
///
/// Returns [`InvalidScaleInput`][`Error::InvalidScaleInput`] if the configured counts are not positive.
///
/// Returns [`EmptyUnitVocabulary`][`Error::EmptyUnitVocabulary`] or
/// [`InvalidUnitPattern`][`Error::InvalidUnitPattern`] if configured units are unusable.
///
/// Returns [`TemplateError`][`Error::TemplateError`] if the template has a syntax error or rendering fails.
pub fn render_template_with_config(
    recipe: &str,
    template: &str,
    config: &Config,
) -> Result<String, Error> {
    let ratio = ScaleRatio::new(config.original_servings, config.servings)?;
    let matcher = config.matcher()?;

    let template_context = RecipeContext::new(&matcher, recipe, ratio);
    let template_environment = template_environment(template)?;

    let template: minijinja::Template<'_, '_> = template_environment.get_template("base")?;
    Ok(template.render(template_context)?)
}

/// Build an environment for the given template.
fn template_environment(template: &str) -> Result<Environment<'_>, Error> {
    let mut env = Environment::new();
    env.add_template("base", template)?;
    env.add_filter("scale", scale_filter);
    env.add_filter("numeric", numeric_filter);
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitVocabulary;
    use indoc::indoc;
    use test_case::test_case;

    #[test_case("2 cups flour", 2, 4, "4 cups flour"; "whole number doubled")]
    #[test_case("1/2 tsp salt", 2, 3, "3/4 tsp salt"; "nice fraction")]
    #[test_case("1 1/3 cups sugar", 3, 5, "2 1/4 cups sugar"; "approximated fraction")]
    #[test_case("3.5 tbsp butter", 2, 1, "1.8 tbsp butter"; "decimal")]
    #[test_case("5 eggs", 2, 4, "5 eggs"; "no unit")]
    fn scenarios(text: &str, original: i64, new: i64, expected: &str) {
        assert_eq!(convert(text, original, new).unwrap(), expected);
    }

    #[test_case(0, 4; "zero original")]
    #[test_case(2, 0; "zero new")]
    #[test_case(-2, 4; "negative")]
    fn invalid_counts(original: i64, new: i64) {
        let error = convert("2 cups flour", original, new).unwrap_err();
        assert!(matches!(error, Error::InvalidScaleInput(_)));
    }

    #[test]
    fn units_are_preserved() {
        let recipe = "2 Cups flour, 1 TSP salt, 1 1/2 fl oz rum, 250 mL milk, 1.5 Kg potatoes";
        let ratio = ScaleRatio::new(3, 7).unwrap();
        let quantities = get_matcher().scale_quantities(recipe, ratio);
        assert_eq!(quantities.len(), 5);
        for quantity in quantities {
            assert!(quantity.original.ends_with(quantity.unit));
            assert!(quantity.scaled.ends_with(&format!(" {}", quantity.unit)));
        }
    }

    #[test]
    fn identity_scale_only_normalizes() {
        let recipe = indoc! {"
            2 cups flour
            1 1/2 tsp salt
            3/4 cup milk
            2 eggs
            Bake at 350 for 20 minutes.
        "};
        assert_eq!(convert(recipe, 3, 3).unwrap(), recipe);
        assert_eq!(
            convert("2.0 cups, 4/8 tsp, 6/4 lb", 2, 2).unwrap(),
            "2 cups, 1/2 tsp, 1 1/2 lb"
        );
    }

    #[test]
    fn whole_recipe() {
        let recipe = indoc! {"
            Chocolate chip cookies (24 cookies)

            2 1/4 cups all-purpose flour
            1 tsp baking soda
            1 tsp salt
            1 cup butter, softened
            3/4 cup granulated sugar
            2 large eggs
            2 cups chocolate chips
        "};
        let expected = indoc! {"
            Chocolate chip cookies (24 cookies)

            3 3/8 cups all-purpose flour
            1 1/2 tsp baking soda
            1 1/2 tsp salt
            1 1/2 cup butter, softened
            1 1/8 cup granulated sugar
            2 large eggs
            3 cups chocolate chips
        "};
        assert_eq!(convert(recipe, 24, 36).unwrap(), expected);
    }

    #[test]
    fn simple_template() {
        let recipe = "2 cups flour\n3 eggs";
        let template = indoc! {"
            # Serves {{ servings }} ({{ scale }}x)
            {{ recipe }}
        "};

        let config = Config::builder().original_servings(2).servings(4).build();
        let result = render_template_with_config(recipe, template, &config).unwrap();
        let expected = indoc! {"
            # Serves 4 (2.0x)
            4 cups flour
            3 eggs"};
        assert_eq!(result, expected);
    }

    #[test]
    fn default_config_keeps_quantities() {
        let result = render_template("6/4 cups flour", "{{ original }} / {{ recipe }}").unwrap();
        assert_eq!(result, "6/4 cups flour / 1 1/2 cups flour");
    }

    #[test]
    fn quantities_report() {
        let recipe = "1 1/3 cups sugar\n2 eggs\n3 tbsp butter";
        let template = indoc! {"
            # Changes for {{ servings }} (was {{ original_servings }})
            {%- for quantity in quantities %}
            - {{ quantity.original }} -> {{ quantity.scaled }}{% if quantity.pct_err is not none %} (approximate){% endif %}
            {%- endfor %}
        "};

        let config = Config::builder().original_servings(3).servings(5).build();
        let result = render_template_with_config(recipe, template, &config).unwrap();
        let expected = indoc! {"
            # Changes for 5 (was 3)
            - 1 1/3 cups -> 2 1/4 cups (approximate)
            - 3 tbsp -> 5 tbsp"};
        assert_eq!(result, expected);
    }

    #[test]
    fn filters() {
        let template = indoc! {"
            {{ '1 cup rice' | scale(1, servings) }}
            {{ quantities[0].original | numeric }}
        "};
        let config = Config::builder().original_servings(2).servings(3).build();
        let result = render_template_with_config("1 1/2 cups water", template, &config).unwrap();
        let expected = indoc! {"
            3 cup rice
            1.5"};
        assert_eq!(result, expected);
    }

    #[test]
    fn custom_units_and_denominators() {
        let config = Config::builder()
            .original_servings(1)
            .servings(3)
            .units(UnitVocabulary::from_terms(["cloves", "clove"]))
            .nice_denominators([2])
            .build();
        let result =
            render_template_with_config("1/3 clove garlic, 1 cup rice", "{{ recipe }}", &config)
                .unwrap();
        assert_eq!(result, "1 clove garlic, 1 cup rice");
        let result =
            render_template_with_config("1/4 clove garlic", "{{ recipe }}", &config).unwrap();
        assert_eq!(result, "0.8 clove garlic");
    }

    #[test]
    fn err_invalid_servings() {
        let config = Config::builder().original_servings(0).build();
        let error = render_template_with_config("2 cups", "{{ recipe }}", &config).unwrap_err();
        assert!(matches!(error, Error::InvalidScaleInput(_)));
    }

    #[test]
    fn err_template_syntax() {
        let error = render_template("2 cups", "{% for q in quantities %}").unwrap_err();
        assert!(matches!(error, Error::TemplateError(_)));
        assert!(error.format_with_source().contains("syntax error"));
    }
}
