//! Syntax highlighting for the REPL.
//!
//! Works token by token on whitespace boundaries, the same way the outer
//! interpreter reads its input.

use std::borrow::Cow;

use threadcell_foundation::{Value, parse_number};

const RESET: &str = "\x1b[0m";
const NUMBER: &str = "\x1b[35m";
const DEFINITION: &str = "\x1b[1;32m";
const COMMENT: &str = "\x1b[2;3m";
const STRING: &str = "\x1b[33m";

/// What the highlighter expects the next token to be.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Expect {
    Any,
    /// The name following `:` or another defining word.
    Name,
    /// Inside `( ... )`.
    Comment,
    /// Inside `." ..."` or `S" ..."`.
    Text,
}

/// Highlighter for threadcell source.
#[derive(Debug, Default)]
pub struct ThreadcellHighlighter;

impl ThreadcellHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut expect = Expect::Any;
        let mut rest = line;

        while !rest.is_empty() {
            let token_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            if token_len == 0 {
                let space_len = rest
                    .find(|c: char| !c.is_whitespace())
                    .unwrap_or(rest.len());
                result.push_str(&rest[..space_len]);
                rest = &rest[space_len..];
                continue;
            }

            let token = &rest[..token_len];
            rest = &rest[token_len..];
            let upper = token.to_ascii_uppercase();

            match expect {
                Expect::Comment => {
                    paint(&mut result, COMMENT, token);
                    if token.ends_with(')') {
                        expect = Expect::Any;
                    }
                }
                Expect::Text => {
                    paint(&mut result, STRING, token);
                    if token.ends_with('"') {
                        expect = Expect::Any;
                    }
                }
                Expect::Name => {
                    paint(&mut result, DEFINITION, token);
                    expect = Expect::Any;
                }
                Expect::Any => match upper.as_str() {
                    "\\" => {
                        paint(&mut result, COMMENT, token);
                        paint(&mut result, COMMENT, rest);
                        rest = "";
                    }
                    "(" => {
                        paint(&mut result, COMMENT, token);
                        expect = Expect::Comment;
                    }
                    ".\"" | "S\"" => {
                        paint(&mut result, STRING, token);
                        expect = Expect::Text;
                    }
                    ":" | "CREATE" | "VARIABLE" | "CONSTANT" => {
                        paint(&mut result, DEFINITION, token);
                        expect = Expect::Name;
                    }
                    ";" => paint(&mut result, DEFINITION, token),
                    _ if is_literal(token) => paint(&mut result, NUMBER, token),
                    _ => result.push_str(token),
                },
            }
        }

        Cow::Owned(result)
    }
}

fn is_literal(token: &str) -> bool {
    parse_number(token, 10).is_some() || Value::parse_literal(token).is_some()
}

fn paint(out: &mut String, color: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str(color);
    out.push_str(text);
    out.push_str(RESET);
}
