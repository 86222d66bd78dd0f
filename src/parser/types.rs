use serde::Serialize;
use std::fmt;

/// File name and 1-based physical line number, attached to every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub filename: String,
    pub line_nr: usize,
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line_nr)
    }
}

/// Which comment-like prefix turned a line into code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentinelKind {
    /// `!$omp`
    Directive,
    /// `!$`
    Conditional,
}

/// A sentinel stripped from a physical line, kept so it can be put back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentinel {
    pub kind: SentinelKind,
    /// Marker as written in the source, e.g. `!$OMP`.
    pub marker: String,
    /// Leading spaces before the marker.
    pub indent: usize,
}

impl Sentinel {
    /// Indentation plus marker, as it stood in the source.
    pub fn prefix(&self) -> String {
        format!("{}{}", " ".repeat(self.indent), self.marker)
    }
}

/// One separator-delimited piece of a physical line (before joining).
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Text with the sentinel prefix removed.
    pub text: String,
    pub sentinel: Option<Sentinel>,
    pub line_nr: usize,
    /// Ended at a statement separator.
    pub terminated: bool,
}

impl Fragment {
    /// The fragment as it appeared in the source, sentinel included.
    pub fn raw(&self) -> String {
        match &self.sentinel {
            Some(sentinel) => format!("{}{}", sentinel.prefix(), self.text),
            None => self.text.clone(),
        }
    }
}

/// One complete statement, joined across continuation lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogicalLine {
    /// Joined code with continuation markers, separator and comments removed.
    pub code: String,
    /// Trailing comment of every physical line consumed (may be empty).
    pub comments: Vec<String>,
    /// Physical lines (or fragments) consumed, verbatim.
    pub lines: Vec<String>,
    /// Sentinel of the first code-bearing fragment, if any.
    pub sentinel: Option<Sentinel>,
    pub first_line: usize,
    pub last_line: usize,
    /// Statement was closed by `;` rather than the end of the line.
    pub separated: bool,
}

impl LogicalLine {
    /// Nothing was read: the source is exhausted.
    pub fn is_end_of_input(&self) -> bool {
        self.code.is_empty() && self.comments.is_empty() && self.lines.is_empty()
    }

    /// Line came from an `!$omp` directive.
    pub fn is_omp_directive(&self) -> bool {
        matches!(
            self.sentinel,
            Some(Sentinel {
                kind: SentinelKind::Directive,
                ..
            })
        )
    }

    pub(crate) fn record(&mut self, fragment: &Fragment) {
        if self.lines.is_empty() {
            self.first_line = fragment.line_nr;
        }
        self.last_line = fragment.line_nr;
        self.lines.push(fragment.raw());
    }
}
