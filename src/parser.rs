use crate::{
    ast::{InfixOperator, Operand, Operator, Program, Statement},
    error::{Error, ErrorKind},
    tokenizer,
};

/// Compiles source text into a program.
///
/// Every line is trimmed first. Blank lines and lines starting with `#` are
/// skipped but still count towards the 1-based line numbers used in
/// diagnostics. Loading stops at the first error.
pub fn program(source: &str) -> Result<Program, Error> {
    let mut statements = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let statement = statement(line, line_number).map_err(|e| e.at_line(line_number))?;
        tracing::trace!(line = line_number, %statement, "compiled statement");
        statements.push(statement);
    }

    tracing::debug!(statements = statements.len(), "loaded program");
    Ok(Program(statements))
}

/// Parses a single `target: <expression>` line.
pub fn statement(line: &str, line_number: usize) -> Result<Statement, ErrorKind> {
    let mut words = line.split_whitespace();
    let target = words
        .next()
        .and_then(|word| word.strip_suffix(':'))
        .ok_or(ErrorKind::MissingColon)?;

    let body = words.collect::<Vec<_>>().join(" ");
    let tokens = tokenizer::tokens(&body)?;
    let operator = operator(&body, &tokens)?;

    for operand in operator.operands() {
        validate(operand)?;
    }

    Ok(Statement {
        target: target.to_string(),
        operator,
        line: line_number,
    })
}

fn operator(body: &str, tokens: &[String]) -> Result<Operator, ErrorKind> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ErrorKind::EmptyExpression);
    }
    let unresolved = || ErrorKind::UnresolvedExpression(body.to_string());
    let tokens = tokens.iter().map(String::as_str).collect::<Vec<_>>();

    match tokens.as_slice() {
        [a] => Ok(Operator::Reference(Operand::new(*a))),
        [condition, "?", then, separator, otherwise] => {
            if *separator != ":" {
                return Err(unresolved());
            }
            Ok(Operator::If(
                Operand::new(*condition),
                Operand::new(*then),
                Operand::new(*otherwise),
            ))
        }
        ["!", rest @ ..] => match rest {
            [a] => Ok(Operator::Not(Operand::new(*a))),
            _ => Err(unresolved()),
        },
        [a, symbol, b] => {
            let op = InfixOperator::from_symbol(symbol).ok_or_else(unresolved)?;
            Ok(Operator::Infix(Operand::new(*a), op, Operand::new(*b)))
        }
        _ => Err(unresolved()),
    }
}

fn validate(operand: &Operand) -> Result<(), ErrorKind> {
    if operand.constant().is_some() {
        return Ok(());
    }

    let name = operand.name();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ErrorKind::InvalidName(name.to_string()));
    }
    Ok(())
}
