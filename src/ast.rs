use std::fmt::Display;

/// A compiled program. Statement indices are independent of source lines
/// because comments and blank lines produce no statement.
#[derive(Debug, Default)]
pub struct Program(pub Vec<Statement>);

impl Program {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub target: String,
    pub operator: Operator,
    pub line: usize,
}

/// The right-hand side of an assignment. Operands are always plain names or
/// `#` constants, never nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Reference(Operand),
    If(Operand, Operand, Operand),
    Not(Operand),
    Infix(Operand, InfixOperator, Operand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Or,
    And,
    Equals,
    LessThan,
    GreaterThan,
}

impl InfixOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let operator = match symbol {
            "+" => InfixOperator::Addition,
            "-" => InfixOperator::Subtraction,
            "*" => InfixOperator::Multiplication,
            "/" => InfixOperator::Division,
            "|" => InfixOperator::Or,
            "&" => InfixOperator::And,
            "=" => InfixOperator::Equals,
            "<" => InfixOperator::LessThan,
            ">" => InfixOperator::GreaterThan,
            _ => return None,
        };
        Some(operator)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            InfixOperator::Addition => "+",
            InfixOperator::Subtraction => "-",
            InfixOperator::Multiplication => "*",
            InfixOperator::Division => "/",
            InfixOperator::Or => "|",
            InfixOperator::And => "&",
            InfixOperator::Equals => "=",
            InfixOperator::LessThan => "<",
            InfixOperator::GreaterThan => ">",
        }
    }
}

/// Either a variable name or a `#` constant. The full text, marker included,
/// is also the environment key the resolved value is bound under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand(String);

impl Operand {
    pub fn new(name: impl Into<String>) -> Self {
        Operand(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn constant(&self) -> Option<&str> {
        self.0.strip_prefix('#')
    }
}

impl Operator {
    pub fn operands(&self) -> Vec<&Operand> {
        match self {
            Operator::Reference(a) | Operator::Not(a) => vec![a],
            Operator::Infix(a, _, b) => vec![a, b],
            Operator::If(condition, then, otherwise) => vec![condition, then, otherwise],
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, statement) in self.0.iter().enumerate() {
            writeln!(f, "{:4} {}", index + 1, statement)?;
        }
        Ok(())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.target, self.operator)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Reference(a) => write!(f, "{}", a),
            Operator::If(condition, then, otherwise) => {
                write!(f, "{} ? {} : {}", condition, then, otherwise)
            }
            Operator::Not(a) => write!(f, "! {}", a),
            Operator::Infix(a, op, b) => write!(f, "{} {} {}", a, op.symbol(), b),
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
