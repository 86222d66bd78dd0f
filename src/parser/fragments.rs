use super::scanner::CharFilter;
use super::sentinel::{detect_sentinel, is_preprocessor_line};
use super::types::{Fragment, Sentinel};

pub const SEPARATOR: char = ';';

/// Split one physical line into fragments at unquoted `;` separators.
///
/// A sentinel is stripped before scanning and carried by every fragment. The
/// trailing comment, if any, stays with the last fragment. A whitespace-only
/// tail after the last separator is folded into the fragment before it.
/// Preprocessor lines are never split.
pub fn split_fragments(line: &str, line_nr: usize) -> Vec<Fragment> {
    if is_preprocessor_line(line) {
        return vec![make_fragment(line, &None, line_nr, false)];
    }

    let (sentinel, body) = match detect_sentinel(line) {
        Some((sentinel, rest)) => (Some(sentinel), rest),
        None => (None, line),
    };

    // (start, end, terminated) byte ranges into `body`
    let mut parts: Vec<(usize, usize, bool)> = Vec::new();
    let mut start = 0usize;

    for (pos, ch) in CharFilter::new(body.char_indices()) {
        if ch == SEPARATOR {
            let end = pos + ch.len_utf8();
            parts.push((start, end, true));
            start = end;
        }
    }

    if start < body.len() || parts.is_empty() {
        parts.push((start, body.len(), false));
    }

    if let [.., _, (tail_start, tail_end, _)] = parts[..] {
        if body[tail_start..tail_end].trim().is_empty() {
            parts.pop();
            if let Some(prev) = parts.last_mut() {
                prev.1 = tail_end;
            }
        }
    }

    parts
        .into_iter()
        .map(|(start, end, terminated)| {
            make_fragment(&body[start..end], &sentinel, line_nr, terminated)
        })
        .collect()
}

fn make_fragment(
    text: &str,
    sentinel: &Option<Sentinel>,
    line_nr: usize,
    terminated: bool,
) -> Fragment {
    Fragment {
        text: text.to_string(),
        sentinel: sentinel.clone(),
        line_nr,
        terminated,
    }
}
