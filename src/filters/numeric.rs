use minijinja::{Error, ErrorKind::InvalidOperation};

/// Parse the leading number of a quantity: an integer, a decimal, a fraction or a mixed number.
pub fn numeric_filter(value: &str) -> Result<f64, Error> {
    // Find the first character that cannot be part of a (mixed) number
    let numeric_part = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(*c, '.' | '/' | ' '))
        .collect::<String>();

    let parts: Vec<&str> = numeric_part.split_whitespace().collect();
    let number = match parts.as_slice() {
        [whole, fraction, ..] if fraction.contains('/') => {
            parse_simple(whole).and_then(|whole| Some(whole + parse_fraction(fraction)?))
        }
        [first, ..] => parse_simple(first),
        [] => None,
    };

    number
        .filter(|number| number.is_finite())
        .ok_or_else(|| Error::new(InvalidOperation, "could not parse numeric"))
}

fn parse_simple(part: &str) -> Option<f64> {
    if part.contains('/') {
        parse_fraction(part)
    } else {
        part.parse().ok()
    }
}

fn parse_fraction(part: &str) -> Option<f64> {
    let (numerator, denominator) = part.split_once('/')?;
    Some(numerator.parse::<f64>().ok()? / denominator.parse::<f64>().ok()?)
}
