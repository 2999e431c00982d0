//! Invocation script lines: `<caller> <function> [args...]`.
//!
//! Arguments are whitespace separated. Double quotes group words and may
//! contain `\"` and `\\`. A `#` outside quotes starts a comment.

use hl_lifecycle::Invocation;
use thiserror::Error;

/// Script syntax errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// A quoted argument never closes.
    #[error("line {0}: unterminated quote")]
    UnterminatedQuote(usize),

    /// Only a caller, no function.
    #[error("line {0}: expected `<caller> <function> [args...]`")]
    MissingFunction(usize),
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// Invoking identity.
    pub caller: String,
    /// Function and arguments.
    pub invocation: Invocation,
}

fn tokenize(line: &str, line_no: usize) -> Result<Vec<String>, ScriptError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '#' => break,
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err(ScriptError::UnterminatedQuote(line_no)),
                        },
                        Some(other) => current.push(other),
                        None => return Err(ScriptError::UnterminatedQuote(line_no)),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parse one line. Blank and comment-only lines yield `None`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<ScriptLine>, ScriptError> {
    let mut tokens = tokenize(line, line_no)?.into_iter();
    let Some(caller) = tokens.next() else {
        return Ok(None);
    };
    let function = tokens.next().ok_or(ScriptError::MissingFunction(line_no))?;
    Ok(Some(ScriptLine {
        caller,
        invocation: Invocation::new(function, tokens),
    }))
}
