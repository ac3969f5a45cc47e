//! Diagnostic script parser
//!
//! One directive per line. Blank lines and `#` comments are skipped.
//!
//! ```text
//! logger [ignore]      open a nested logger
//! end                  close the innermost script logger
//! context <label>      push a context label on the active logger
//! leave                pop the innermost context label
//! clear                clear the active logger
//! <severity> <text>    report text, e.g. `warning unknown element`
//! ```

use gdlog_core::Severity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Logger { ignore: bool },
    End,
    Context(String),
    Leave,
    Clear,
    Report(Severity, String),
}

/// A directive with its 1-based source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub directive: Directive,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown directive '{word}'")]
    UnknownDirective { line: usize, word: String },

    #[error("line {line}: '{directive}' needs an argument")]
    MissingArgument { line: usize, directive: String },

    #[error("line {line}: unexpected argument '{arg}' to '{directive}'")]
    UnexpectedArgument {
        line: usize,
        directive: String,
        arg: String,
    },

    #[error("line {line}: 'leave' with no open context")]
    NothingToLeave { line: usize },

    #[error("line {line}: 'end' with no open logger")]
    NothingToEnd { line: usize },
}

pub fn parse(source: &str) -> Result<Vec<Line>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(parse_line(idx + 1, trimmed))
            }
        })
        .collect()
}

fn parse_line(number: usize, text: &str) -> Result<Line, ScriptError> {
    let (word, rest) = match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    };

    let directive = match word {
        "logger" => match rest {
            "" => Directive::Logger { ignore: false },
            "ignore" => Directive::Logger { ignore: true },
            other => return Err(unexpected(number, word, other)),
        },
        "end" => no_argument(number, word, rest, Directive::End)?,
        "leave" => no_argument(number, word, rest, Directive::Leave)?,
        "clear" => no_argument(number, word, rest, Directive::Clear)?,
        "context" => Directive::Context(required(number, word, rest)?),
        _ => match word.parse::<Severity>() {
            Ok(severity) => Directive::Report(severity, required(number, word, rest)?),
            Err(_) => {
                return Err(ScriptError::UnknownDirective {
                    line: number,
                    word: word.to_string(),
                })
            }
        },
    };

    Ok(Line { number, directive })
}

fn required(line: usize, directive: &str, rest: &str) -> Result<String, ScriptError> {
    if rest.is_empty() {
        Err(ScriptError::MissingArgument {
            line,
            directive: directive.to_string(),
        })
    } else {
        Ok(rest.to_string())
    }
}

fn no_argument(
    line: usize,
    word: &str,
    rest: &str,
    directive: Directive,
) -> Result<Directive, ScriptError> {
    if rest.is_empty() {
        Ok(directive)
    } else {
        Err(unexpected(line, word, rest))
    }
}

fn unexpected(line: usize, directive: &str, arg: &str) -> ScriptError {
    ScriptError::UnexpectedArgument {
        line,
        directive: directive.to_string(),
        arg: arg.to_string(),
    }
}
