//! Matcher primitives shared by every rule.
//!
//! Structured lookups work on the parsed sections of a [`ConfigDocument`]:
//! a [`Pattern`] names one section path and the assignments a statement in
//! that section must carry. Only statements of sections whose path equals
//! the pattern path are considered, so a value set in a later, unrelated
//! section can never satisfy the pattern.
//!
//! [`find_text`] is the raw-text escape hatch for content that is not a
//! statement, such as the metadata comments at the top of an export.

use crate::document::{normalize_path, ConfigDocument, Span, Statement};
use regex::Regex;

/// Structured search expression over the statements of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    section: String,
    verb: Option<String>,
    target: Option<String>,
    conditions: Vec<(String, String)>,
    required: Vec<String>,
    flags: Vec<String>,
    captures: Vec<String>,
}

impl Pattern {
    /// Matches statements in the section with the given path.
    #[must_use]
    pub fn section(path: &str) -> Self {
        Self {
            section: normalize_path(path),
            verb: None,
            target: None,
            conditions: Vec::new(),
            required: Vec::new(),
            flags: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// Restricts matches to statements with this command word.
    #[must_use]
    pub fn verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    /// Restricts matches to statements applying to this item.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Requires `key=value` on the statement.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((key.into(), value.into()));
        self
    }

    /// Requires the key to be assigned, whatever its value.
    #[must_use]
    pub fn has(mut self, key: impl Into<String>) -> Self {
        self.required.push(key.into());
        self
    }

    /// Requires a bare flag word on the statement.
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Captures the value of `key` as the next group.
    ///
    /// Groups are numbered from 1 in the order captures are declared; a
    /// statement lacking the key still matches with an empty group.
    #[must_use]
    pub fn capture(mut self, key: impl Into<String>) -> Self {
        self.captures.push(key.into());
        self
    }

    /// Returns true if the statement satisfies every constraint.
    #[must_use]
    pub fn matches(&self, statement: &Statement) -> bool {
        self.verb.as_deref().map_or(true, |v| statement.verb() == v)
            && self
                .target
                .as_deref()
                .map_or(true, |t| statement.target() == Some(t))
            && self
                .conditions
                .iter()
                .all(|(k, v)| statement.get(k) == Some(v.as_str()))
            && self.required.iter().all(|k| statement.get(k).is_some())
            && self.flags.iter().all(|f| statement.has_flag(f))
    }

    fn to_match<'d>(&self, statement: &'d Statement) -> Match<'d> {
        let mut groups = Vec::with_capacity(self.captures.len() + 1);
        let mut names = Vec::with_capacity(self.captures.len() + 1);
        groups.push(Some(statement.text()));
        names.push(None);
        for key in &self.captures {
            groups.push(statement.get(key));
            names.push(Some(key.clone()));
        }
        Match {
            span: statement.span(),
            line: Some(statement.line()),
            statement: Some(statement),
            groups,
            names,
        }
    }
}

/// A located region of the document with its captured groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'d> {
    span: Span,
    line: Option<usize>,
    statement: Option<&'d Statement>,
    groups: Vec<Option<&'d str>>,
    names: Vec<Option<String>>,
}

impl<'d> Match<'d> {
    /// Captured group `i`; group 0 is the whole matched text.
    #[must_use]
    pub fn group(&self, i: usize) -> Option<&'d str> {
        self.groups.get(i).copied().flatten()
    }

    /// Captured group by name (the captured key for structured patterns).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'d str> {
        self.names
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .and_then(|i| self.group(i))
    }

    /// Statement behind a structured match.
    #[must_use]
    pub fn statement(&self) -> Option<&'d Statement> {
        self.statement
    }

    /// Location of the match in the document text.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// 1-based line of the match, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

/// Returns the first statement matching `pattern`.
#[must_use]
pub fn find_first<'a>(doc: &'a ConfigDocument, pattern: &Pattern) -> Option<Match<'a>> {
    doc.statements_in(&pattern.section)
        .find(|s| pattern.matches(s))
        .map(|s| pattern.to_match(s))
}

/// Returns every statement matching `pattern`, in document order.
///
/// The iterator is lazy; calling `find_all` again restarts the search.
pub fn find_all<'a>(
    doc: &'a ConfigDocument,
    pattern: &'a Pattern,
) -> impl Iterator<Item = Match<'a>> + 'a {
    doc.statements_in(&pattern.section)
        .filter(move |s| pattern.matches(s))
        .map(move |s| pattern.to_match(s))
}

/// Returns the first regex match over the raw document text.
#[must_use]
pub fn find_text<'a>(doc: &'a ConfigDocument, regex: &Regex) -> Option<Match<'a>> {
    let text = doc.text();
    let captures = regex.captures(text)?;
    let whole = captures.get(0)?;
    let groups = captures.iter().map(|g| g.map(|m| m.as_str())).collect();
    let names = regex.capture_names().map(|n| n.map(String::from)).collect();
    let line = text[..whole.start()].matches('\n').count() + 1;

    Some(Match {
        span: Span::new(whole.start(), whole.end()),
        line: Some(line),
        statement: None,
        groups,
        names,
    })
}

/// Span from the first occurrence of a section header to the next header.
///
/// Formats that repeat a header later in the export yield only the first
/// block; use [`ConfigDocument::sections_at`] to visit every occurrence.
#[must_use]
pub fn find_block(doc: &ConfigDocument, header: &str) -> Option<Span> {
    doc.sections_at(header).next().map(crate::Section::span)
}
