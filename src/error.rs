//! Error types for the recipe-scaler library.

use thiserror::Error;

/// Error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The original or desired serving count is missing, zero, negative or not an integer.
    #[error("invalid count(s) specified: only nonzero integers permitted ({0})")]
    InvalidScaleInput(String),

    /// A custom unit vocabulary has no units, so every number would match.
    #[error("unit vocabulary is empty")]
    EmptyUnitVocabulary,

    /// A custom unit vocabulary does not compile into a pattern.
    #[error("invalid unit pattern")]
    InvalidUnitPattern(#[from] regex::Error),

    /// An error occurred when generating a report from a template.
    #[error("template error")]
    TemplateError(#[from] minijinja::Error),
}

impl Error {
    /// Format the error with full context including source chain and helpful hints
    ///
    /// This method provides comprehensive error formatting that includes:
    /// - The main error message
    /// - The complete chain of error causes
    /// - Template-specific context for common errors
    /// - A hint on valid serving counts
    ///
    /// # Example
    /// ```
    /// use recipe_scaler::convert;
    ///
    /// let error = convert("2 cups flour", 0, 4).unwrap_err();
    /// assert!(error.format_with_source().contains("positive whole numbers"));
    /// ```
    #[must_use]
    pub fn format_with_source(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        match self {
            Error::TemplateError(minijinja_err) => {
                // minijinja's debug display includes line numbers and source context
                let _ = write!(output, "{}", minijinja_err.display_debug_info());

                match minijinja_err.kind() {
                    minijinja::ErrorKind::SyntaxError => {
                        output.push_str("\n\nHint: This is a syntax error. Check for:");
                        output.push_str("\n  • Missing closing tags ({% endfor %}, {% endif %}, etc.)");
                        output.push_str("\n  • Invalid Jinja2 syntax");
                        output.push_str("\n  • Unclosed strings or brackets");
                    }
                    minijinja::ErrorKind::UndefinedError => {
                        output.push_str("\n\nHint: A variable or attribute is undefined. Check that:");
                        output.push_str(
                            "\n  • Only recipe, original, quantities, servings, original_servings and scale are used",
                        );
                        output.push_str("\n  • Property names are spelled correctly");
                    }
                    minijinja::ErrorKind::InvalidOperation => {
                        output.push_str("\n\nHint: Invalid operation. Check that:");
                        output.push_str("\n  • The scale filter gets two serving counts");
                        output.push_str("\n  • Filters are applied to compatible values");
                    }
                    _ => {}
                }
            }
            Error::InvalidScaleInput(_) => {
                let _ = write!(output, "Error: {self:#}");
                output.push_str("\n\nHint: Serving counts must be positive whole numbers, such as 2 or 4.");
            }
            Error::EmptyUnitVocabulary | Error::InvalidUnitPattern(_) => {
                let _ = write!(output, "Error: {self:#}");
            }
        }

        // Traverse the error chain
        let mut current_error: &dyn std::error::Error = self;
        while let Some(source) = current_error.source() {
            let _ = write!(output, "\n\nCaused by:\n    {source:#}");
            current_error = source;
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_input_message() {
        let error = Error::InvalidScaleInput("0 is not positive".to_string());
        assert_eq!(
            error.to_string(),
            "invalid count(s) specified: only nonzero integers permitted (0 is not positive)"
        );
        assert!(error.format_with_source().contains("Hint: Serving counts"));
    }

    #[test]
    fn unit_pattern_has_cause() {
        let error = Error::from(regex::Regex::new("(").unwrap_err());
        let formatted = error.format_with_source();
        assert!(formatted.starts_with("Error: invalid unit pattern"));
        assert!(formatted.contains("Caused by:"));
    }

    #[test]
    fn template_syntax_hint() {
        let mut env = minijinja::Environment::new();
        let error = Error::from(env.add_template("bad", "{% for x in y %}").unwrap_err());
        assert!(error.format_with_source().contains("Hint: This is a syntax error"));
    }
}
