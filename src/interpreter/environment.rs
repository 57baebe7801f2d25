use std::{fmt::Debug, io::BufRead};

use rustc_hash::FxHashMap;

use super::Value;
use crate::{ast::Operand, constant, error::ErrorKind};

pub const UNICODE_IN: &str = "unicode_in";
pub const STRING_IN: &str = "string_in";

/// The single name to value mapping of a run.
#[derive(Default)]
pub struct Environment {
    variables: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.variables.clear();
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.variables.insert(name, value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    pub fn lookup(&self, operand: &Operand) -> Result<&Value, ErrorKind> {
        self.get(operand.name())
            .ok_or_else(|| ErrorKind::UnknownVariable(operand.name().to_string()))
    }

    /// Binds the value of a special operand before it is looked up.
    ///
    /// Input names consume from `stdin` on every use and are unbound at end
    /// of input. Constants are re-resolved on every use and bound under their
    /// full `#` name. Ordinary names are left untouched.
    pub fn resolve(
        &mut self,
        operand: &Operand,
        stdin: &mut dyn BufRead,
    ) -> Result<(), ErrorKind> {
        let name = operand.name();
        if name == UNICODE_IN {
            let code_point = read_char(stdin)?.map(|c| Value::Number(f64::from(u32::from(c))));
            self.bind_input(name, code_point);
        } else if name == STRING_IN {
            self.bind_input(name, read_line(stdin)?.map(Value::String));
        } else if let Some(constant) = operand.constant() {
            let value = constant::resolve(constant)?;
            self.set(name.to_string(), value);
        }
        Ok(())
    }

    fn bind_input(&mut self, name: &str, value: Option<Value>) {
        match value {
            Some(value) => self.set(name.to_string(), value),
            None => {
                tracing::debug!(name, "end of input");
                self.remove(name);
            }
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut variables = self.variables.iter().collect::<Vec<_>>();
        variables.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_map()
            .entries(variables.into_iter().map(|(name, value)| (name, value.to_string())))
            .finish()
    }
}

/// Reads a single UTF-8 encoded character, or `None` at end of input.
fn read_char(stdin: &mut dyn BufRead) -> Result<Option<char>, ErrorKind> {
    let mut buf = [0u8; 4];
    if stdin.read(&mut buf[..1])? == 0 {
        return Ok(None);
    }

    let width = match buf[0] {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Err(ErrorKind::InvalidInput),
    };
    stdin.read_exact(&mut buf[1..width]).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => ErrorKind::InvalidInput,
        _ => ErrorKind::IO(e),
    })?;

    std::str::from_utf8(&buf[..width])
        .ok()
        .and_then(|s| s.chars().next())
        .map(Some)
        .ok_or(ErrorKind::InvalidInput)
}

/// Reads a single line without its terminator, or `None` at end of input.
fn read_line(stdin: &mut dyn BufRead) -> Result<Option<String>, ErrorKind> {
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_char() {
        let mut input = Cursor::new("aé€😀".as_bytes());
        assert_eq!(read_char(&mut input).unwrap(), Some('a'));
        assert_eq!(read_char(&mut input).unwrap(), Some('é'));
        assert_eq!(read_char(&mut input).unwrap(), Some('€'));
        assert_eq!(read_char(&mut input).unwrap(), Some('😀'));
        assert_eq!(read_char(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_char_invalid_utf8() {
        let mut input = Cursor::new(vec![0xFFu8]);
        assert!(matches!(read_char(&mut input), Err(ErrorKind::InvalidInput)));

        let mut truncated = Cursor::new(vec![0xE2u8, 0x82]);
        assert!(matches!(read_char(&mut truncated), Err(ErrorKind::InvalidInput)));
    }

    #[test]
    fn test_read_line() {
        let mut input = Cursor::new("first\r\nsecond\nlast");
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("first"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("second"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_resolve_constant_binds_full_name() {
        let mut environment = Environment::new();
        let operand = Operand::new("#5");
        environment.resolve(&operand, &mut Cursor::new("")).unwrap();
        assert_eq!(environment.get("#5"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn test_resolve_unknown_constant() {
        let mut environment = Environment::new();
        let operand = Operand::new("#nope");
        assert!(matches!(
            environment.resolve(&operand, &mut Cursor::new("")),
            Err(ErrorKind::UnknownConstant(_))
        ));
    }

    #[test]
    fn test_end_of_input_unbinds() {
        let mut environment = Environment::new();
        let operand = Operand::new(STRING_IN);
        let mut input = Cursor::new("hello\n");

        environment.resolve(&operand, &mut input).unwrap();
        assert_eq!(
            environment.lookup(&operand).unwrap(),
            &Value::String("hello".to_string())
        );

        environment.resolve(&operand, &mut input).unwrap();
        assert!(matches!(
            environment.lookup(&operand),
            Err(ErrorKind::UnknownVariable(_))
        ));
    }

    #[test]
    fn test_plain_names_are_untouched() {
        let mut environment = Environment::new();
        let operand = Operand::new("a");
        environment.resolve(&operand, &mut Cursor::new("")).unwrap();
        assert!(environment.lookup(&operand).is_err());
    }
}
