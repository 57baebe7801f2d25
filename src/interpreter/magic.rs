use std::io::Write;

use super::{environment::Environment, Value};
use crate::error::ErrorKind;

pub const STRING_OUT: &str = "string_out";
pub const UNICODE_OUT: &str = "unicode_out";
pub const POINTER: &str = "pointer";

/// Applies the side effects of the magic variables after a statement has
/// been bound, in a fixed order: `string_out`, `unicode_out`, `pointer`.
///
/// Each magic variable is consumed: it is removed from the environment once
/// acted upon. Returns the index of the next statement when `pointer` was
/// set.
pub fn apply(
    environment: &mut Environment,
    stdout: &mut dyn Write,
) -> Result<Option<i64>, ErrorKind> {
    if let Some(value) = environment.remove(STRING_OUT) {
        write!(stdout, "{}", value)?;
        stdout.flush()?;
    }

    if let Some(value) = environment.remove(UNICODE_OUT) {
        let c = code_point(&value)?;
        write!(stdout, "{}", c)?;
        stdout.flush()?;
    }

    match environment.remove(POINTER) {
        Some(Value::Number(n)) => Ok(Some(jump_target(n))),
        Some(value) => Err(ErrorKind::InvalidType {
            name: POINTER.to_string(),
            expected: "Number",
            found: value.kind(),
        }),
        None => Ok(None),
    }
}

/// Pointer values are 1-based over the compiled statements: assigning `N`
/// makes statement `N - 1` (0-based) the next one to run.
fn jump_target(pointer: f64) -> i64 {
    (pointer.trunc() as i64).saturating_sub(1)
}

fn code_point(value: &Value) -> Result<char, ErrorKind> {
    let Value::Number(n) = value else {
        return Err(ErrorKind::InvalidType {
            name: UNICODE_OUT.to_string(),
            expected: "Number",
            found: value.kind(),
        });
    };

    u32::try_from(n.trunc() as i64)
        .ok()
        .and_then(char::from_u32)
        .ok_or(ErrorKind::InvalidCodePoint(*n))
}
