pub mod ast;
mod constant;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod tokenizer;

pub use error::{Error, ErrorKind};

/// Compiles and runs `source` against the process's standard streams.
pub fn interpret(source: &str) -> Result<(), Error> {
    let program = parser::program(source)?;
    interpreter::Interpreter::default().interpret(&program)
}
