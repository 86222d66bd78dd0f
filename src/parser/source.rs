use std::io::{self, BufRead};

/// Physical lines of a source, tabs expanded, numbered from 1.
pub struct PhysicalLines<R> {
    source: R,
    line_nr: usize,
    tab: String,
}

impl<R: BufRead> PhysicalLines<R> {
    /// Start reading `source` at line 1.
    pub fn new(source: R, tab_width: usize) -> Self {
        Self {
            source,
            line_nr: 0,
            tab: " ".repeat(tab_width),
        }
    }

    /// Number of the last line read, 0 before the first.
    pub fn line_nr(&self) -> usize {
        self.line_nr
    }

    /// Change the tab substitution for lines still to come.
    pub fn set_tab_width(&mut self, tab_width: usize) {
        self.tab = " ".repeat(tab_width);
    }
}

impl<R: BufRead> Iterator for PhysicalLines<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.source.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                self.line_nr += 1;
                tracing::trace!(line_nr = self.line_nr, "read physical line");
                Some(Ok((self.line_nr, line.replace('\t', &self.tab))))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
