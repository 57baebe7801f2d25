mod environment;
mod magic;
mod operator;

use std::{
    cell::RefCell,
    fmt::{Debug, Display},
    io::{BufRead, Write},
    rc::Rc,
};

use crate::{ast::Program, error::Error};

use self::environment::Environment;

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    String(String),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Boxed-double equality: NaN equals itself, 0 and -0 differ.
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Runs compiled programs against a flat variable environment.
///
/// Input is consumed on demand by the `unicode_in` and `string_in` operands;
/// output is produced by assignments to `string_out` and `unicode_out`.
pub struct Interpreter {
    environment: Environment,
    stdin: Rc<RefCell<dyn BufRead>>,
    stdout: Rc<RefCell<dyn Write>>,
}

impl Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("environment", &self.environment)
            .finish()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(
            Rc::new(RefCell::new(std::io::stdin().lock())),
            Rc::new(RefCell::new(std::io::stdout())),
        )
    }
}

impl Interpreter {
    pub fn new(stdin: Rc<RefCell<dyn BufRead>>, stdout: Rc<RefCell<dyn Write>>) -> Self {
        Self {
            environment: Environment::new(),
            stdin,
            stdout,
        }
    }

    /// Executes `program` from its first statement until the program counter
    /// leaves the statement range or a statement fails.
    ///
    /// The environment starts empty on every run.
    pub fn interpret(&mut self, program: &Program) -> Result<(), Error> {
        self.environment.clear();
        tracing::debug!(statements = program.len(), "starting run");

        let mut pc: i64 = 0;
        let mut steps: u64 = 0;
        while let Some(statement) = usize::try_from(pc).ok().and_then(|i| program.0.get(i)) {
            tracing::trace!(pc, line = statement.line, %statement, "executing");
            steps += 1;

            let value = self
                .evaluate(&statement.operator)
                .map_err(|e| e.at_line(statement.line))?;
            self.environment.set(statement.target.clone(), value);

            let jump = magic::apply(&mut self.environment, &mut *self.stdout.borrow_mut())
                .map_err(|e| e.at_line(statement.line))?;

            pc = match jump {
                Some(target) => {
                    tracing::trace!(from = pc, to = target, "jump");
                    target
                }
                None => pc + 1,
            };
        }

        tracing::debug!(pc, steps, "run finished");
        Ok(())
    }

    /// Reads a variable from the environment left behind by the last run.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.environment.get(name)
    }
}
