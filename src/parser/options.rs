use serde::Deserialize;

/// Knobs for [`InputStream`](super::InputStream).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Every tab is replaced by this many spaces, regardless of column.
    pub tab_width: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { tab_width: 8 }
    }
}
