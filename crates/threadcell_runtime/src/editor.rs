//! Line editing for the REPL.
//!
//! [`LineEditor`] abstracts the terminal so the REPL can run against
//! rustyline or a scripted editor in tests. [`EditorInput`] adapts any
//! editor into the engine's [`InputSource`], so the outer interpreter pulls
//! lines from the terminal as it needs them.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Context, Editor, Helper, Hinter, Validator};
use threadcell_engine::InputSource;
use threadcell_foundation::{Error, ErrorKind, Result};

use crate::highlight::ThreadcellHighlighter;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Replace the words offered for completion.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

// =============================================================================
// Rustyline
// =============================================================================

#[derive(Helper, Hinter, Validator)]
struct ThreadcellHelper {
    completer: WordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    highlighter: ThreadcellHighlighter,
}

impl Completer for ThreadcellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.completer.complete(line, pos))
    }
}

impl Highlighter for ThreadcellHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes dictionary words. Matching ignores case.
#[derive(Debug, Default)]
struct WordCompleter {
    keywords: Vec<String>,
}

impl WordCompleter {
    fn complete(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        let word = line[start..pos].to_ascii_uppercase();
        if word.is_empty() {
            return (start, Vec::new());
        }

        let mut candidates: Vec<Pair> = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(&word))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw.clone(),
            })
            .collect();
        candidates.sort_by(|a, b| a.display.cmp(&b.display));
        candidates.dedup_by(|a, b| a.display == b.display);
        (start, candidates)
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ThreadcellHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor keeping `history_size` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new(history_size: usize) -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .check_cursor_position(true)
            .max_history_size(history_size)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let helper = ThreadcellHelper {
            completer: WordCompleter::default(),
            hinter: HistoryHinter::new(),
            highlighter: ThreadcellHighlighter::new(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Io(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::debug!(error = %e, "history entry dropped");
        }
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.keywords = keywords;
        }
    }
}

// =============================================================================
// Engine input adapter
// =============================================================================

/// Words whose next token names a new dictionary entry.
const DEFINING_WORDS: &[&str] = &[":", "CREATE", "VARIABLE", "CONSTANT"];

/// Feeds the engine from a line editor, one line at a time.
///
/// Each line is delivered with a trailing newline. Ctrl+C delivers an empty
/// line; Ctrl+D and editor failures end the input. Names introduced by
/// defining words are added to the editor's completions as lines are read.
pub struct EditorInput<E: LineEditor> {
    editor: Rc<RefCell<E>>,
    prompt: String,
    line: Vec<char>,
    pos: usize,
    keywords: Vec<String>,
}

impl<E: LineEditor> EditorInput<E> {
    /// Creates an adapter prompting with `prompt`.
    pub fn new(editor: Rc<RefCell<E>>, prompt: impl Into<String>) -> Self {
        Self {
            editor,
            prompt: prompt.into(),
            line: Vec::new(),
            pos: 0,
            keywords: Vec::new(),
        }
    }

    /// Seeds the completion list and hands it to the editor.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.editor.borrow_mut().set_keywords(keywords.clone());
        self.keywords = keywords;
        self
    }

    /// The current completion list.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn fill(&mut self) -> bool {
        let result = self.editor.borrow_mut().read_line(&self.prompt);
        match result {
            Ok(ReadResult::Line(line)) => {
                if !line.trim().is_empty() {
                    self.editor.borrow_mut().add_history(&line);
                }
                self.learn(&line);
                self.line = line.chars().chain(std::iter::once('\n')).collect();
            }
            Ok(ReadResult::Interrupted) => self.line = vec!['\n'],
            Ok(ReadResult::Eof) => return false,
            Err(err) => {
                tracing::warn!(error = %err, "line editor failed");
                return false;
            }
        }
        self.pos = 0;
        true
    }

    fn learn(&mut self, line: &str) {
        let mut learned = false;
        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            let upper = token.to_ascii_uppercase();
            if !DEFINING_WORDS.contains(&upper.as_str()) {
                continue;
            }
            if let Some(name) = tokens.next() {
                let name = name.to_ascii_uppercase();
                if !self.keywords.contains(&name) {
                    self.keywords.push(name);
                    learned = true;
                }
            }
        }
        if learned {
            self.editor.borrow_mut().set_keywords(self.keywords.clone());
        }
    }
}

impl<E: LineEditor> InputSource for EditorInput<E> {
    fn next_char(&mut self) -> Option<char> {
        while self.pos >= self.line.len() {
            if !self.fill() {
                return None;
            }
        }
        let c = self.line[self.pos];
        self.pos += 1;
        Some(c)
    }

    fn discard_line(&mut self) {
        self.line.clear();
        self.pos = 0;
    }
}
