use std::io::{self, Write};
use std::num::ParseFloatError;

/// Number of digits after the decimal point every value is written with.
pub const FRACTIONAL_DIGITS: usize = 8;

/// Formats values as one line of fixed-point numbers separated by single spaces.
/// No trailing space, no newline.
pub fn format_flat_line(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format!("{value:.FRACTIONAL_DIGITS$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes values as a single newline terminated line, an empty slice produces an empty line.
pub fn write_flat_line<W: Write>(writer: &mut W, values: &[f64]) -> io::Result<()> {
    let mut first = true;
    for value in values {
        if !first {
            writer.write_all(b" ")?;
        }
        write!(writer, "{value:.FRACTIONAL_DIGITS$}")?;
        first = false;
    }

    writer.write_all(b"\n")?;
    writer.flush()
}

/// Parses a line written by write_flat_line back into values.
pub fn parse_flat_line(line: &str) -> Result<Vec<f64>, ParseFloatError> {
    line.split_whitespace().map(str::parse::<f64>).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(values: &[f64]) -> String {
        let mut buffer = Vec::new();
        write_flat_line(&mut buffer, values).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_fixed_precision() {
        assert_eq!(written(&[1., 0.5, 123.456789123]), "1.00000000 0.50000000 123.45678912\n");
    }

    #[test]
    fn test_empty_is_empty_line() {
        assert_eq!(written(&[]), "\n");
        assert_eq!(format_flat_line(&[]), "");
    }

    #[test]
    fn test_single_value_has_no_separator() {
        assert_eq!(written(&[6.]), "6.00000000\n");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_flat_line(&[-2.25, 14.]), "-2.25000000 14.00000000");
    }

    #[test]
    fn test_format_matches_writer() {
        let values = [0.1, 0.2, 0.30000000000000004, 9999.99999999];
        assert_eq!(format!("{}\n", format_flat_line(&values)), written(&values));
    }

    #[test]
    fn test_parse_round_trip() {
        let line = "6.00000000 8.00000000 12.00000000 14.00000000";

        let values = parse_flat_line(line).unwrap();

        assert_eq!(values, vec![6., 8., 12., 14.]);
        assert_eq!(format_flat_line(&values), line);
    }

    #[test]
    fn test_parse_rejects_text() {
        assert!(parse_flat_line("1.0 batchsize=2").is_err());
    }
}
