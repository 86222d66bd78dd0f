pub const COMMENT: char = '!';

fn is_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

/// Quoting state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    Bare,
    /// Inside a string opened by the given quote character.
    Quoted(char),
}

/// Why the scanner stopped yielding characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStop {
    /// Unquoted comment marker at this byte offset.
    Comment(usize),
    /// Input ran out.
    Exhausted,
}

/// Filters `(byte offset, char)` pairs down to the characters that are code.
///
/// Characters inside a string are consumed silently, along with the opening
/// quote; the closing quote is yielded so the end of a trailing string still
/// counts as code. The first unquoted `!` ends the sequence without being
/// yielded, and [`CharFilter::stop`] then reports where it was.
pub struct CharFilter<I> {
    chars: I,
    quoting: Quoting,
    stop: Option<ScanStop>,
}

impl<I> CharFilter<I>
where
    I: Iterator<Item = (usize, char)>,
{
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            quoting: Quoting::Bare,
            stop: None,
        }
    }

    /// Quoting state after the last character consumed.
    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// `None` until the sequence has ended.
    pub fn stop(&self) -> Option<ScanStop> {
        self.stop
    }
}

impl<I> Iterator for CharFilter<I>
where
    I: Iterator<Item = (usize, char)>,
{
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        if self.stop.is_some() {
            return None;
        }

        for (pos, ch) in self.chars.by_ref() {
            match self.quoting {
                Quoting::Quoted(q) if ch == q => {
                    self.quoting = Quoting::Bare;
                    return Some((pos, ch));
                }
                Quoting::Quoted(_) => continue,
                Quoting::Bare if ch == COMMENT => {
                    self.stop = Some(ScanStop::Comment(pos));
                    return None;
                }
                Quoting::Bare if is_quote(ch) => {
                    self.quoting = Quoting::Quoted(ch);
                }
                Quoting::Bare => return Some((pos, ch)),
            }
        }

        self.stop = Some(ScanStop::Exhausted);
        None
    }
}

/// Code/comment boundary of one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSpan {
    /// Byte offset one past the last code character, `None` if there is none.
    pub code_end: Option<usize>,
    pub stop: ScanStop,
    /// Quoting state when the scan stopped.
    pub quoting: Quoting,
}

impl CodeSpan {
    /// Ran out of text inside a string.
    pub fn ends_in_string(&self) -> bool {
        self.stop == ScanStop::Exhausted && matches!(self.quoting, Quoting::Quoted(_))
    }
}

/// Find where the true code of `text` ends.
pub fn scan_code(text: &str) -> CodeSpan {
    let mut filter = CharFilter::new(text.char_indices());
    let mut code_end = None;
    for (pos, ch) in filter.by_ref() {
        code_end = Some(pos + ch.len_utf8());
    }

    CodeSpan {
        code_end,
        stop: filter.stop().unwrap_or(ScanStop::Exhausted),
        quoting: filter.quoting(),
    }
}
