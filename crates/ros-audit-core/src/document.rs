//! Configuration document model.
//!
//! A [`ConfigDocument`] wraps the raw text of a RouterOS export and the
//! structured view built from it in a single parse pass:
//!
//! ```text
//! /ip service                      <- section header (path "/ip service")
//! set telnet address="" disabled=no  <- statement (verb, target, properties)
//! ```
//!
//! Parsing never fails. Fragments that do not look like statements are
//! skipped, which only reduces what the rules can see.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Path of the implicit section holding statements that precede any header.
pub const ROOT_PATH: &str = "/";

/// Command words that end a section path on a header line.
const VERBS: &[&str] = &["add", "set", "remove", "print", "enable", "disable", "edit"];

/// Errors raised while loading a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The export could not be opened or read.
    #[error("Failed to read configuration export {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Byte range into the normalized document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single command inside a section (`set ...`, `add ...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    verb: String,
    target: Option<String>,
    selector: Option<String>,
    properties: Vec<(String, String)>,
    flags: Vec<String>,
    line: usize,
    text: String,
    span: Span,
}

impl Statement {
    /// Command word (`set`, `add`, ...).
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Item the statement applies to.
    ///
    /// This is the positional argument of `set telnet ...`, or the `name=` /
    /// `default-name=` operand of a `[ find ... ]` selector.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Raw contents of the bracketed selector, without the brackets.
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// Value of the first `key=value` pair with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a bare flag word (e.g. `passive`) is present.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// 1-based line where the statement starts.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Logical line text with continuations joined.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Location of the statement in the document text.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }
}

/// One occurrence of a section header and the statements under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    path: String,
    line: usize,
    span: Span,
    statements: Vec<Statement>,
}

impl Section {
    /// Normalized path, e.g. `/ip service`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 1-based line of the header (0 for the implicit root section).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// From the header up to the next header or the end of the text.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Statements in source order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// Immutable configuration export with its parsed sections.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    text: String,
    sections: Vec<Section>,
}

impl ConfigDocument {
    /// Builds a document from raw export text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = normalize_newlines(text.into());
        let sections = parse_sections(&text);
        Self { text, sections }
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let bytes = std::fs::read(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Normalized raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text covered by `span`, or an empty string if out of bounds.
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// All section occurrences in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Occurrences of the section with the given path.
    ///
    /// The path is normalized first, so `/ip/service` and `/ip service`
    /// are the same section.
    pub fn sections_at<'a>(&'a self, path: &str) -> impl Iterator<Item = &'a Section> + 'a {
        let path = normalize_path(path);
        self.sections.iter().filter(move |s| s.path == path)
    }

    /// Statements of every occurrence of a section, in document order.
    pub fn statements_in<'a>(&'a self, path: &str) -> impl Iterator<Item = &'a Statement> + 'a {
        self.sections_at(path).flat_map(|s| s.statements.iter())
    }
}

fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

/// Canonical form of a section path: `/` followed by space-separated words.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let words: Vec<&str> = path
        .split(|c: char| c == '/' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    format!("/{}", words.join(" "))
}

/// A physical line joined with its `\` continuations.
struct LogicalLine {
    text: String,
    line: usize,
    span: Span,
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut current: Option<LogicalLine> = None;
    let mut offset = 0;

    for (idx, raw) in text.split('\n').enumerate() {
        let start = offset;
        offset += raw.len() + 1;
        let end = start + raw.len();

        // A trailing `\` on a comment line is part of the comment.
        let comment = current.is_none() && raw.trim_start().starts_with('#');
        let (body, continues) = match raw.trim_end().strip_suffix('\\') {
            Some(body) if !comment => (body, true),
            _ => (raw.trim_end(), false),
        };

        match current.as_mut() {
            Some(open) => {
                open.text.push_str(body.trim_start());
                open.span.end = end;
            }
            None => {
                current = Some(LogicalLine {
                    text: body.to_string(),
                    line: idx + 1,
                    span: Span::new(start, end),
                });
            }
        }

        if !continues {
            if let Some(done) = current.take() {
                lines.push(done);
            }
        }
    }

    if let Some(open) = current.take() {
        lines.push(open);
    }
    lines
}

fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for logical in logical_lines(text) {
        let trimmed = logical.text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens = tokenize(trimmed);

        if trimmed.starts_with('/') {
            if let Some(previous) = sections.last_mut() {
                previous.span.end = logical.span.start;
            }

            let split = tokens
                .iter()
                .position(|t| !matches!(t, Token::Word(w) if !VERBS.contains(&w.as_str())))
                .unwrap_or(tokens.len());
            let path_words: Vec<&str> = tokens[..split]
                .iter()
                .filter_map(|t| match t {
                    Token::Word(w) => Some(w.as_str()),
                    _ => None,
                })
                .collect();

            let mut section = Section {
                path: normalize_path(&path_words.join(" ")),
                line: logical.line,
                span: Span::new(logical.span.start, text.len()),
                statements: Vec::new(),
            };
            if split < tokens.len() {
                if let Some(statement) = build_statement(&tokens[split..], &logical) {
                    section.statements.push(statement);
                }
            }
            sections.push(section);
            continue;
        }

        let Some(statement) = build_statement(&tokens, &logical) else {
            trace!(line = logical.line, "skipping unrecognized fragment");
            continue;
        };

        if sections.is_empty() {
            sections.push(Section {
                path: ROOT_PATH.to_string(),
                line: 0,
                span: Span::new(0, text.len()),
                statements: Vec::new(),
            });
        }
        if let Some(section) = sections.last_mut() {
            section.statements.push(statement);
        }
    }

    sections
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Property(String, String),
    Selector(String),
}

fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '[' {
            chars.next();
            let mut depth = 1usize;
            let mut in_quote = false;
            let mut inner = String::new();
            while let Some(ch) = chars.next() {
                match ch {
                    '\\' if in_quote => {
                        inner.push(ch);
                        if let Some(escaped) = chars.next() {
                            inner.push(escaped);
                        }
                        continue;
                    }
                    '"' => in_quote = !in_quote,
                    '[' if !in_quote => depth += 1,
                    ']' if !in_quote => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                inner.push(ch);
            }
            tokens.push(Token::Selector(inner.trim().to_string()));
            continue;
        }

        let mut word = String::new();
        let mut in_quote = false;
        while let Some(&ch) = chars.peek() {
            if ch.is_whitespace() && !in_quote {
                break;
            }
            chars.next();
            match ch {
                '\\' if in_quote => {
                    word.push(ch);
                    if let Some(escaped) = chars.next() {
                        word.push(escaped);
                    }
                    continue;
                }
                '"' => in_quote = !in_quote,
                _ => {}
            }
            word.push(ch);
        }

        tokens.push(match word.split_once('=') {
            Some((key, value)) if !key.is_empty() && !key.contains('"') => {
                Token::Property(key.to_string(), unquote(value).to_string())
            }
            _ => Token::Word(unquote(&word).to_string()),
        });
    }

    tokens
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn build_statement(tokens: &[Token], logical: &LogicalLine) -> Option<Statement> {
    let (first, rest) = tokens.split_first()?;
    let Token::Word(verb) = first else {
        return None;
    };
    if verb.is_empty() || !verb.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }

    let mut statement = Statement {
        verb: verb.clone(),
        target: None,
        selector: None,
        properties: Vec::new(),
        flags: Vec::new(),
        line: logical.line,
        text: logical.text.trim().to_string(),
        span: logical.span,
    };

    for token in rest {
        match token {
            Token::Property(key, value) => statement.properties.push((key.clone(), value.clone())),
            Token::Selector(inner) => {
                if statement.target.is_none() {
                    statement.target = selector_target(inner);
                }
                statement.selector = Some(inner.clone());
            }
            Token::Word(word) => {
                let positional = statement.verb != "add"
                    && statement.target.is_none()
                    && statement.selector.is_none()
                    && statement.properties.is_empty();
                if positional {
                    statement.target = Some(word.clone());
                } else {
                    statement.flags.push(word.clone());
                }
            }
        }
    }

    Some(statement)
}

fn selector_target(inner: &str) -> Option<String> {
    let tokens = tokenize(inner);
    ["name", "default-name"].iter().find_map(|wanted| {
        tokens.iter().find_map(|t| match t {
            Token::Property(key, value) if key == wanted => Some(value.clone()),
            _ => None,
        })
    })
}
