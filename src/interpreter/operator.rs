use super::{Interpreter, Value};
use crate::{
    ast::{InfixOperator, Operand, Operator},
    error::ErrorKind,
};

impl Interpreter {
    /// Evaluates the right-hand side of a statement.
    ///
    /// Every operand is resolved and checked for presence, in order, before
    /// the operator looks at any value. A failing statement leaves its target
    /// untouched.
    pub(super) fn evaluate(&mut self, operator: &Operator) -> Result<Value, ErrorKind> {
        for operand in operator.operands() {
            self.environment
                .resolve(operand, &mut *self.stdin.borrow_mut())?;
            self.environment.lookup(operand)?;
        }

        let environment = &self.environment;
        match operator {
            Operator::Reference(a) => Ok(environment.lookup(a)?.clone()),
            Operator::If(condition, then, otherwise) => {
                let branch = if boolean(condition, environment.lookup(condition)?)? {
                    then
                } else {
                    otherwise
                };
                Ok(environment.lookup(branch)?.clone())
            }
            Operator::Not(a) => Ok(Value::Boolean(!boolean(a, environment.lookup(a)?)?)),
            Operator::Infix(a, op, b) => infix(
                *op,
                (a, environment.lookup(a)?),
                (b, environment.lookup(b)?),
            ),
        }
    }
}

type Bound<'a> = (&'a Operand, &'a Value);

fn infix(op: InfixOperator, a: Bound, b: Bound) -> Result<Value, ErrorKind> {
    match op {
        InfixOperator::Addition => match (a.1, b.1) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{}{}", a.1, b.1)))
            }
            _ => Ok(Value::Number(number(a)? + number(b)?)),
        },
        InfixOperator::Multiplication => match (a.1, b.1) {
            (Value::String(_), Value::String(_)) => Err(mismatch(b.0, "Number", b.1)),
            (Value::String(s), _) => repeat(s, number(b)?),
            (_, Value::String(s)) => repeat(s, number(a)?),
            _ => Ok(Value::Number(number(a)? * number(b)?)),
        },
        InfixOperator::Subtraction => Ok(Value::Number(number(a)? - number(b)?)),
        InfixOperator::Division => Ok(Value::Number(number(a)? / number(b)?)),
        InfixOperator::Or => {
            let (a, b) = (boolean(a.0, a.1)?, boolean(b.0, b.1)?);
            Ok(Value::Boolean(a || b))
        }
        InfixOperator::And => {
            let (a, b) = (boolean(a.0, a.1)?, boolean(b.0, b.1)?);
            Ok(Value::Boolean(a && b))
        }
        InfixOperator::Equals => Ok(Value::Boolean(a.1 == b.1)),
        InfixOperator::LessThan => Ok(Value::Boolean(number(a)? < number(b)?)),
        InfixOperator::GreaterThan => Ok(Value::Boolean(number(a)? > number(b)?)),
    }
}

fn number((operand, value): Bound) -> Result<f64, ErrorKind> {
    match value {
        Value::Number(n) => Ok(*n),
        _ => Err(mismatch(operand, "Number", value)),
    }
}

fn boolean(operand: &Operand, value: &Value) -> Result<bool, ErrorKind> {
    match value {
        Value::Boolean(b) => Ok(*b),
        _ => Err(mismatch(operand, "Boolean", value)),
    }
}

fn mismatch(operand: &Operand, expected: &'static str, found: &Value) -> ErrorKind {
    ErrorKind::InvalidType {
        name: operand.name().to_string(),
        expected,
        found: found.kind(),
    }
}

/// Repeats `s` by the truncated `count`; negative and NaN counts give an
/// empty string and counts beyond `i32::MAX` are rejected.
fn repeat(s: &str, count: f64) -> Result<Value, ErrorKind> {
    let times = count.trunc().max(0.0);
    if times > f64::from(i32::MAX) {
        return Err(ErrorKind::InvalidRepeat(count));
    }
    let times = times as usize;

    s.len()
        .checked_mul(times)
        .filter(|len| *len <= isize::MAX as usize)
        .ok_or(ErrorKind::InvalidRepeat(count))?;
    Ok(Value::String(s.repeat(times)))
}
