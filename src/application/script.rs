//! Reader for generated navigation scripts.
//!
//! Only the subset a documentation generator emits is understood: a sequence of
//! `var NAME = <literal>;` statements, with block or line comments between them.
//! Literals are kept as text with every string literal re-quoted in JSON form,
//! so single-quoted strings and `\'` escapes parse as JSON.

use regex::Regex;
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::{ApplicationError, ApplicationResult};

/// One `var NAME = <literal>;` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptVar {
    pub name: String,
    pub literal: String,
}

/// Declarations of a script in source order.
#[derive(Debug, Clone, Default)]
pub struct ScriptVars {
    vars: Vec<ScriptVar>,
}

impl ScriptVars {
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|v| v.name.as_str())
    }

    /// Literal text of `name`; a later declaration shadows an earlier one.
    pub fn literal(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .rev()
            .find(|v| v.name == name)
            .map(|v| v.literal.as_str())
    }

    /// Parse the literal of `name` as JSON.
    pub fn json(&self, name: &str) -> Option<Result<Value, serde_json::Error>> {
        self.literal(name).map(serde_json::from_str)
    }

    /// Decode the literal of `name` as a string.
    pub fn string(&self, name: &str) -> Option<ApplicationResult<String>> {
        let literal = self.literal(name)?;
        Some(serde_json::from_str::<String>(literal).map_err(|e| {
            ApplicationError::script(format!("{} is not a string literal: {}", name, e))
        }))
    }
}

/// Splits a script into declarations.
pub struct ScriptReader {
    declaration: Regex,
}

impl Default for ScriptReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptReader {
    pub fn new() -> Self {
        Self {
            declaration: Regex::new(r"^var\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*")
                .expect("declaration pattern is valid"),
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn read(&self, text: &str) -> ApplicationResult<ScriptVars> {
        let mut vars = Vec::new();

        for statement in split_statements(text)? {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            let Some(caps) = self.declaration.captures(statement) else {
                debug!("Skipping statement: {:.40}", statement);
                continue;
            };
            let name = caps[1].to_string();
            let literal = statement[caps[0].len()..].trim();
            if literal.is_empty() {
                return Err(ApplicationError::script(format!(
                    "declaration of {} has no value",
                    name
                )));
            }
            debug!("Found declaration: {}", name);
            vars.push(ScriptVar {
                name,
                literal: literal.to_string(),
            });
        }

        Ok(ScriptVars { vars })
    }
}

/// Read all declarations of `text`.
pub fn read_variables(text: &str) -> ApplicationResult<ScriptVars> {
    ScriptReader::new().read(text)
}

#[derive(Clone, Copy)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Split on `;` at bracket depth 0, dropping comments outside string literals.
/// String literals come out double-quoted with JSON escapes.
fn split_statements(text: &str) -> ApplicationResult<Vec<String>> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    let mut state = State::Code;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                    current.push(' ');
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                    current.push(' ');
                }
                '"' | '\'' => {
                    state = State::Str(c);
                    current.push('"');
                }
                '[' | '{' | '(' => {
                    depth += 1;
                    current.push(c);
                }
                ']' | '}' | ')' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| ApplicationError::script(format!("unbalanced '{}'", c)))?;
                    current.push(c);
                }
                ';' if depth == 0 => statements.push(std::mem::take(&mut current)),
                _ => current.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                    current.push('\n');
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Str(quote) => match c {
                '\\' => {
                    let escaped = chars
                        .next()
                        .ok_or_else(|| ApplicationError::script("unterminated string literal"))?;
                    push_escape(&mut current, escaped);
                }
                c if c == quote => {
                    state = State::Code;
                    current.push('"');
                }
                // only reachable inside a single-quoted literal
                '"' => current.push_str("\\\""),
                '\n' => return Err(ApplicationError::script("unterminated string literal")),
                _ => current.push(c),
            },
        }
    }

    match state {
        State::BlockComment => return Err(ApplicationError::script("unterminated block comment")),
        State::Str(_) => return Err(ApplicationError::script("unterminated string literal")),
        State::Code | State::LineComment => {}
    }
    if depth != 0 {
        return Err(ApplicationError::script("unbalanced brackets at end of script"));
    }
    if !current.trim().is_empty() {
        if current.trim_start().starts_with("var") {
            return Err(ApplicationError::script("unterminated statement at end of script"));
        }
        statements.push(current);
    }

    Ok(statements)
}

/// Rewrite one escape sequence of a string literal as its JSON equivalent.
fn push_escape(out: &mut String, escaped: char) {
    match escaped {
        '\'' => out.push('\''),
        '0' => out.push_str("\\u0000"),
        'v' => out.push_str("\\u000b"),
        // line continuation
        '\n' => {}
        other => {
            out.push('\\');
            out.push(other);
        }
    }
}
