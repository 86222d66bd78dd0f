// tests/sentinel_scenarios.rs
// OpenMP sentinels mixed with separators, continuations and comments

use fortran_lines::parser::SentinelKind;
use fortran_lines::{InputStream, LogicalLine};
use std::io::Cursor;

#[cfg(test)]
mod sentinel_tests {
    use super::*;

    fn read_all(content: &str) -> Vec<LogicalLine> {
        InputStream::new(Cursor::new(content.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .expect("source should reconstruct")
    }

    #[test]
    fn test_conditional_line_with_separator() {
        let lines = read_all("!$ a = 1; b = 2\n");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].code, "a = 1");
        assert_eq!(lines[1].code, "b = 2");
        assert_eq!(lines[0].lines, vec!["!$ a = 1;"]);
        assert_eq!(lines[1].lines, vec!["!$ b = 2\n"]);
        for line in &lines {
            let sentinel = line.sentinel.as_ref().expect("conditional sentinel");
            assert_eq!(sentinel.kind, SentinelKind::Conditional);
        }
    }

    #[test]
    fn test_conditional_continuation_merges_into_code() {
        let lines = read_all("call foo(a, &\n!$ b, &\nc)\n");

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].code, "call foo(a, b, c)");
        assert!(lines[0].sentinel.is_none());
        assert_eq!(lines[0].lines[1], "!$ b, &\n");
    }

    #[test]
    fn test_directive_comment_is_extracted() {
        let lines = read_all("!$omp parallel do ! hot loop\n");

        assert_eq!(lines[0].code, "parallel do");
        assert_eq!(lines[0].comments, vec!["! hot loop"]);
        assert!(lines[0].is_omp_directive());
    }

    #[test]
    fn test_directive_separator_and_continuation_on_one_line() {
        let lines = read_all("!$omp barrier; x = 1 &\n  + 2\n");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].code, "barrier");
        assert!(lines[0].separated);

        assert_eq!(lines[1].code, "x = 1 + 2");
        assert!(lines[1].is_omp_directive());
        assert_eq!(lines[1].lines, vec!["!$omp x = 1 &\n", "  + 2\n"]);
        assert_eq!((lines[1].first_line, lines[1].last_line), (1, 2));
    }

    #[test]
    fn test_directive_continuation_with_ampersand_after_marker() {
        let lines = read_all("!$omp parallel &\n!$omp& private(i)\n");

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].code, "parallel  private(i)");
    }

    #[test]
    fn test_sentinel_is_case_insensitive() {
        let lines = read_all("    !$OMP END PARALLEL\n");
        let sentinel = lines[0].sentinel.as_ref().unwrap();

        assert_eq!(lines[0].code, "END PARALLEL");
        assert_eq!(sentinel.marker, "!$OMP");
        assert_eq!(sentinel.prefix(), "    !$OMP");
    }

    #[test]
    fn test_other_directives_stay_comments() {
        let lines = read_all("!$acc kernels\n");

        assert_eq!(lines[0].code, "");
        assert_eq!(lines[0].comments, vec!["!$acc kernels"]);
        assert!(lines[0].sentinel.is_none());
    }
}

#[cfg(test)]
mod separator_tests {
    use super::*;

    #[test]
    fn test_fragments_drained_before_next_line() {
        let mut input = InputStream::new(Cursor::new("x = &\n 1; y = 2\nz = 3\n".to_string()));

        let first = input.next_logical_line().unwrap();
        assert_eq!(first.code, "x = 1");
        assert_eq!(first.lines, vec!["x = &\n", " 1;"]);
        assert_eq!(input.line_nr(), 2);

        let second = input.next_logical_line().unwrap();
        assert_eq!(second.code, "y = 2");
        assert_eq!(input.line_nr(), 2, "queued fragment served without reading");

        let third = input.next_logical_line().unwrap();
        assert_eq!(third.code, "z = 3");
        assert_eq!(input.line_nr(), 3);
    }

    #[test]
    fn test_comment_marker_in_string_before_continuation() {
        let mut input = InputStream::new(Cursor::new("print *, \"a ! b\", &\n  c\n".to_string()));
        let line = input.next_logical_line().unwrap();

        assert_eq!(line.code, "print *, \"a ! b\", c");
    }

    #[test]
    fn test_empty_statements() {
        let codes: Vec<String> = InputStream::new(Cursor::new("a;;b\n".to_string()))
            .map(|l| l.unwrap().code)
            .collect();

        assert_eq!(codes, vec!["a", "", "b"]);
    }

    #[test]
    fn test_logical_line_serializes() {
        let line = InputStream::new(Cursor::new(" !$ n = 4 ! threads\n".to_string()))
            .next_logical_line()
            .unwrap();
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["code"], "n = 4");
        assert_eq!(value["sentinel"]["kind"], "conditional");
        assert_eq!(value["sentinel"]["indent"], 1);
        assert_eq!(value["separated"], false);
    }
}
