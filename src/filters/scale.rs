use minijinja::{Error, ErrorKind::InvalidOperation};

/// Scale every quantity in `value` from `original` servings to `servings`.
pub fn scale_filter(value: &str, original: i64, servings: i64) -> Result<String, Error> {
    crate::convert(value, original, servings)
        .map_err(|e| Error::new(InvalidOperation, e.to_string()))
}
