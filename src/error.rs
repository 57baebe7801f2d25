use std::fmt::Display;

/// The broad family an [`ErrorKind`] belongs to. This is the name printed in
/// front of every diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    SyntaxError,
    InvalidNameError,
    UnknownConstantError,
    UnknownVariableError,
    TypeError,
    IOFailure,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::SyntaxError => "SyntaxError",
            Category::InvalidNameError => "InvalidNameError",
            Category::UnknownConstantError => "UnknownConstantError",
            Category::UnknownVariableError => "UnknownVariableError",
            Category::TypeError => "TypeError",
            Category::IOFailure => "IOFailure",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error(": expected")]
    MissingColon,
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Unable to resolve expression {0}")]
    UnresolvedExpression(String),
    #[error("Unable to escape '{0}'")]
    UnableToEscape(char),
    #[error("Non [a-zA-Z0-9_] character in variable name {0}")]
    InvalidName(String),
    #[error("Unknown constant: {0}")]
    UnknownConstant(String),
    #[error("Unknown variable {0}")]
    UnknownVariable(String),
    #[error("Expected variable {name} to be of type {expected} but found {found}")]
    InvalidType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Cannot repeat string {0} times")]
    InvalidRepeat(f64),
    #[error("Expected variable unicode_out to hold a code point but found {0}")]
    InvalidCodePoint(f64),
    #[error("Failed to read input: invalid UTF-8")]
    InvalidInput,
    #[error("{0}")]
    IO(#[from] std::io::Error),
}

impl ErrorKind {
    pub fn category(&self) -> Category {
        match self {
            ErrorKind::MissingColon
            | ErrorKind::EmptyExpression
            | ErrorKind::UnresolvedExpression(_)
            | ErrorKind::UnableToEscape(_) => Category::SyntaxError,
            ErrorKind::InvalidName(_) => Category::InvalidNameError,
            ErrorKind::UnknownConstant(_) => Category::UnknownConstantError,
            ErrorKind::UnknownVariable(_) => Category::UnknownVariableError,
            ErrorKind::InvalidType { .. }
            | ErrorKind::InvalidRepeat(_)
            | ErrorKind::InvalidCodePoint(_) => Category::TypeError,
            ErrorKind::InvalidInput | ErrorKind::IO(_) => Category::IOFailure,
        }
    }

    pub fn at_line(self, line: usize) -> Error {
        Error {
            kind: self,
            line: Some(line),
        }
    }
}

/// A fatal failure while loading or running a program, annotated with the
/// 1-based source line of the statement that caused it when known.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub line: Option<usize>,
}

impl Error {
    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.category())?;
        if let Some(line) = self.line {
            write!(f, "Line {}: ", line)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind, line: None }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        ErrorKind::IO(error).into()
    }
}
