use crate::{error::ErrorKind, interpreter::Value};

/// Resolves the text following a `#` marker into a value.
///
/// Numbers are tried first, then quoted strings, then the boolean literals.
pub fn resolve(source: &str) -> Result<Value, ErrorKind> {
    number(source)
        .or_else(|| string(source))
        .or_else(|| boolean(source))
        .ok_or_else(|| ErrorKind::UnknownConstant(source.to_string()))
}

fn number(source: &str) -> Option<Value> {
    let unsigned = source.strip_prefix(['-', '+']).unwrap_or(source);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    if !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return None;
    }

    source.parse().ok().map(Value::Number)
}

fn is_digits(source: &str) -> bool {
    !source.is_empty() && source.chars().all(|c| c.is_ascii_digit())
}

fn string(source: &str) -> Option<Value> {
    let quote = source.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if source.len() < 2 || !source.ends_with(quote) {
        return None;
    }

    let body = &source[1..source.len() - 1];
    Some(Value::String(
        body.replace("\\n", "\n")
            .replace("\\r", "\r")
            .replace("\\t", "\t"),
    ))
}

fn boolean(source: &str) -> Option<Value> {
    match source {
        "true" => Some(Value::Boolean(true)),
        "false" => Some(Value::Boolean(false)),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(resolve("5").unwrap(), Value::Number(5.0));
        assert_eq!(resolve("-2.5").unwrap(), Value::Number(-2.5));
        assert_eq!(resolve("+7").unwrap(), Value::Number(7.0));
    }

    #[test]
    fn test_malformed_numbers() {
        for source in ["1.", ".5", "1.2.3", "-", "1e5", "0x10"] {
            assert!(
                matches!(resolve(source), Err(ErrorKind::UnknownConstant(_))),
                "{source} should not resolve"
            );
        }
    }

    #[test]
    fn test_strings() {
        assert_eq!(resolve("\"hi\"").unwrap(), Value::String("hi".to_string()));
        assert_eq!(resolve("'hi'").unwrap(), Value::String("hi".to_string()));
        assert_eq!(resolve("\"\"").unwrap(), Value::String(String::new()));
        assert_eq!(
            resolve("'a\\nb\\tc'").unwrap(),
            Value::String("a\nb\tc".to_string())
        );
    }

    #[test]
    fn test_mismatched_quotes() {
        assert!(resolve("\"hi'").is_err());
        assert!(resolve("\"").is_err());
        assert!(resolve("hi\"").is_err());
    }

    #[test]
    fn test_quoted_number_is_a_string() {
        assert_eq!(resolve("\"5\"").unwrap(), Value::String("5".to_string()));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(resolve("true").unwrap(), Value::Boolean(true));
        assert_eq!(resolve("false").unwrap(), Value::Boolean(false));
        assert!(resolve("True").is_err());
    }
}
