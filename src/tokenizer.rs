use crate::error::ErrorKind;

/// Splits a statement body into operand and operator tokens.
///
/// Tokens are separated by spaces that are neither escaped nor inside a
/// double-quoted run. Quote characters are kept in the token; the constant
/// resolver strips them later. The final token is always emitted, even when
/// it is empty.
pub fn tokens(source: &str) -> Result<Vec<String>, ErrorKind> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;

    for c in source.chars() {
        if escaped {
            escaped = false;
            current.push(escape(c)?);
            continue;
        }
        match c {
            ' ' if !quoted => tokens.push(std::mem::take(&mut current)),
            '\\' => escaped = true,
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            _ => current.push(c),
        }
    }
    tokens.push(current);

    Ok(tokens)
}

fn escape(c: char) -> Result<char, ErrorKind> {
    match c {
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        't' => Ok('\t'),
        ' ' => Ok(' '),
        '\\' => Ok('\\'),
        '"' => Ok('"'),
        c => Err(ErrorKind::UnableToEscape(c)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("a + b").unwrap(), strings(&["a", "+", "b"]));
    }

    #[test]
    fn test_tokens_with_quotes() {
        assert_eq!(
            tokens("#\"hello world\" + b").unwrap(),
            strings(&["#\"hello world\"", "+", "b"])
        );
    }

    #[test]
    fn test_tokens_with_escaped_space() {
        assert_eq!(tokens("a\\ b c").unwrap(), strings(&["a b", "c"]));
    }

    #[test]
    fn test_tokens_with_escapes() {
        assert_eq!(
            tokens("#\"a\\tb\\n\" \\\\").unwrap(),
            strings(&["#\"a\tb\n\"", "\\"])
        );
    }

    #[test]
    fn test_escaped_quote_does_not_toggle_quoting() {
        assert_eq!(
            tokens("#\"a b\\\" c\" d").unwrap(),
            strings(&["#\"a b\" c\"", "d"])
        );
    }

    #[test]
    fn test_trailing_empty_token() {
        assert_eq!(tokens("a ").unwrap(), strings(&["a", ""]));
        assert_eq!(tokens("").unwrap(), strings(&[""]));
    }

    #[test]
    fn test_unknown_escape() {
        assert!(matches!(tokens("a\\x"), Err(ErrorKind::UnableToEscape('x'))));
    }
}
