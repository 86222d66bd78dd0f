use super::fragments::{split_fragments, SEPARATOR};
use super::options::ReaderOptions;
use super::scanner::{scan_code, CodeSpan, ScanStop};
use super::sentinel::is_preprocessor_line;
use super::source::PhysicalLines;
use super::types::{Fragment, LogicalLine, SourcePosition};
use crate::error::ReaderError;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const CONTINUATION: char = '&';

/// Reads logical Fortran lines from a source of physical lines.
///
/// Multi-line character constants are not supported: a string has to be
/// closed on the physical line that opens it.
pub struct InputStream<R> {
    physical: PhysicalLines<R>,
    pending: VecDeque<Fragment>,
    filename: String,
    finished: bool,
}

impl InputStream<BufReader<File>> {
    /// Open a file; its path becomes the filename in diagnostics.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReaderError::Io {
            position: SourcePosition {
                filename: path.display().to_string(),
                line_nr: 0,
            },
            source,
        })?;
        Ok(Self::new(BufReader::new(file)).with_filename(path.display().to_string()))
    }
}

impl<R: BufRead> InputStream<R> {
    /// Wrap a source; diagnostics name it `<input>` until renamed.
    pub fn new(source: R) -> Self {
        let options = ReaderOptions::default();
        Self {
            physical: PhysicalLines::new(source, options.tab_width),
            pending: VecDeque::new(),
            filename: "<input>".to_string(),
            finished: false,
        }
    }

    /// Name to report in error positions.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Apply reader options to lines not yet read.
    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.physical.set_tab_width(options.tab_width);
        self
    }

    /// Name used in error positions.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Number of physical lines read so far.
    pub fn line_nr(&self) -> usize {
        self.physical.line_nr()
    }

    fn source_position(&self, line_nr: usize) -> SourcePosition {
        SourcePosition {
            filename: self.filename.clone(),
            line_nr,
        }
    }

    /// Next fragment, reading and splitting a new physical line only once
    /// every fragment of the previous one has been handed out.
    fn next_fragment(&mut self) -> Result<Option<Fragment>, ReaderError> {
        if let Some(fragment) = self.pending.pop_front() {
            return Ok(Some(fragment));
        }

        match self.physical.next() {
            None => Ok(None),
            Some(Err(source)) => Err(ReaderError::Io {
                position: self.source_position(self.physical.line_nr() + 1),
                source,
            }),
            Some(Ok((line_nr, line))) => {
                self.pending.extend(split_fragments(&line, line_nr));
                Ok(self.pending.pop_front())
            }
        }
    }

    /// Read a group of physical lines connected by `&`, or the next statement
    /// of a line holding several `;`-separated ones.
    ///
    /// At end of input, and when the input ends inside a continued statement,
    /// the returned line satisfies [`LogicalLine::is_end_of_input`].
    pub fn next_logical_line(&mut self) -> Result<LogicalLine, ReaderError> {
        let mut logical = LogicalLine::default();
        let mut continuation = false;

        loop {
            let Some(fragment) = self.next_fragment()? else {
                if !logical.lines.is_empty() {
                    tracing::warn!(
                        file = %self.filename,
                        line_nr = logical.last_line,
                        "input ends inside a continued statement"
                    );
                }
                return Ok(LogicalLine::default());
            };

            logical.record(&fragment);

            if fragment.sentinel.is_none() && is_preprocessor_line(&fragment.text) {
                logical
                    .comments
                    .push(fragment.text.trim_end_matches(['\r', '\n']).to_string());
                break;
            }

            // a sentinel on a line that continues existing code is dropped
            if logical.code.trim().is_empty() && logical.sentinel.is_none() {
                logical.sentinel = fragment.sentinel.clone();
            }

            let span = scan_code(&fragment.text);
            let (code, comment) = self.split_comment(&fragment, &span)?;

            let mut code = code.trim();
            if fragment.terminated {
                code = code.strip_suffix(SEPARATOR).unwrap_or(code).trim_end();
                logical.separated = true;
            }

            if !code.is_empty() {
                continuation = false;
            }
            if code.ends_with(CONTINUATION) {
                if span.ends_in_string() {
                    return Err(ReaderError::Parse {
                        position: self.source_position(fragment.line_nr),
                        message: "character constant continues onto the next line; \
                                  multi-line strings are not supported"
                            .to_string(),
                    });
                }
                continuation = true;
            }

            logical
                .comments
                .push(comment.trim_end_matches(['\r', '\n']).to_string());
            logical.code.push_str(code.trim_matches(CONTINUATION));

            if !continuation {
                break;
            }
        }

        tracing::debug!(
            first_line = logical.first_line,
            last_line = logical.last_line,
            fragments = logical.lines.len(),
            "assembled logical line"
        );
        Ok(logical)
    }

    /// Split a fragment into code and trailing comment.
    fn split_comment<'f>(
        &self,
        fragment: &'f Fragment,
        span: &CodeSpan,
    ) -> Result<(&'f str, &'f str), ReaderError> {
        let text = fragment.text.as_str();
        match span.stop {
            ScanStop::Comment(pos) => {
                if span.code_end.unwrap_or(0) != pos {
                    return Err(ReaderError::Internal {
                        position: self.source_position(fragment.line_nr),
                        message: format!(
                            "comment marker at byte {} does not follow the code ending at {:?}",
                            pos, span.code_end
                        ),
                    });
                }
                Ok(text.split_at(pos))
            }
            // runs to the end of the text, or ends with an open string
            ScanStop::Exhausted => Ok((text, "")),
        }
    }
}

impl<R: BufRead> Iterator for InputStream<R> {
    type Item = Result<LogicalLine, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_logical_line() {
            Ok(logical) if logical.is_end_of_input() => {
                self.finished = true;
                None
            }
            Ok(logical) => Some(Ok(logical)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
