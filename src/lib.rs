//! Reconstruction of logical Fortran source lines.
//!
//! [`InputStream`] turns physical lines into logical ones: statements
//! continued with `&` are joined, lines holding several `;`-separated
//! statements are split, and trailing `!` comments are set aside per physical
//! line. Separators and comment markers inside strings are left alone.
//! OpenMP sentinels (`!$omp`, `!$`) are stripped so the directive text joins
//! like ordinary code, and recorded so a caller can put them back.

pub mod error;
pub mod parser;

pub use error::ReaderError;
pub use parser::{InputStream, LogicalLine, ReaderOptions, SourcePosition};
