mod fragments;
mod options;
mod scanner;
mod sentinel;
mod source;
mod stream;
mod types;

pub use fragments::{split_fragments, SEPARATOR};
pub use options::ReaderOptions;
pub use scanner::{scan_code, CharFilter, CodeSpan, Quoting, ScanStop, COMMENT};
pub use sentinel::{detect_sentinel, is_preprocessor_line};
pub use source::PhysicalLines;
pub use stream::{InputStream, CONTINUATION};
pub use types::{Fragment, LogicalLine, Sentinel, SentinelKind, SourcePosition};
