use super::types::{Sentinel, SentinelKind};
use once_cell::sync::Lazy;
use regex::Regex;

// `!$omp` must win over `!$`; the trailing group keeps `!$acc` a comment.
static SENTINEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<indent> *)(?P<marker>!\$omp|!\$)(?:[\s&]|$)")
        .expect("valid sentinel regex")
});

/// Strip a conditional-directive sentinel from the start of `line`.
///
/// Returns the sentinel and the text that follows the marker, or `None` when
/// the line is not sentinel-bearing.
pub fn detect_sentinel(line: &str) -> Option<(Sentinel, &str)> {
    let caps = SENTINEL_RE.captures(line)?;
    let indent = caps.name("indent")?;
    let marker = caps.name("marker")?;

    let kind = if marker.len() > 2 {
        SentinelKind::Directive
    } else {
        SentinelKind::Conditional
    };

    let sentinel = Sentinel {
        kind,
        marker: marker.as_str().to_string(),
        indent: indent.len(),
    };
    Some((sentinel, &line[marker.end()..]))
}

/// Preprocessor records (`#if`, `#include`, ...) are passed through untouched.
pub fn is_preprocessor_line(raw: &str) -> bool {
    raw.starts_with('#')
}
