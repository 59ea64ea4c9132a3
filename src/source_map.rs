//! Functionality for looking up the source line that contains a byte position.
use crate::span::{Bytes, Span};

/// Finds the line containing `target_position`. A position at the very end of the source
/// (as used for "unexpected end of input") maps to the last line.
pub fn find_line(source: &str, target_position: Bytes) -> LineContext {
    let lines = inclusive_split_lines(source);
    let last_line = lines.len();

    let mut position = Bytes::new(0);
    for (line_idx, line) in lines.into_iter().enumerate() {
        let end_position = position + line.len();
        let is_last = line_idx + 1 == last_line;
        if target_position >= position && (target_position < end_position || is_last) {
            return LineContext {
                source: line,
                range: Span::new(position, end_position),
                line_no: line_idx + 1,
            };
        }
        position = end_position;
    }

    unreachable!("inclusive_split_lines always yields at least one line")
}

fn inclusive_split_lines(source: &str) -> Vec<&str> {
    let mut seen_lines = vec![];
    let mut start = 0;
    let mut position = 0;

    let mut char_enum = source.chars().peekable();

    while let Some(ch) = char_enum.next() {
        position += ch.len_utf8();

        // If we find an \r followed by an \n, delay recognising the line until the next iteration.
        if ch == '\n' || (ch == '\r' && char_enum.peek() != Some(&'\n')) {
            seen_lines.push(&source[start..position]);
            start = position;
        }
    }
    seen_lines.push(&source[start..position]);

    seen_lines
}

/// Contains a slice pointing to a single line in the program,
/// enhanced with contextual information describing its line number and byte range.
pub struct LineContext<'a> {
    source: &'a str,
    range: Span,
    line_no: usize,
}
impl LineContext<'_> {
    pub fn for_display(&self) -> String {
        self.source.replace(['\r', '\n'], "")
    }

    pub fn range(&self) -> Span {
        self.range
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn find_line_first_character_of_empty_source() {
        let context = find_line("", Bytes::new(0));

        assert_eq!(context.line_no, 1);
        assert_eq!(context.range, Span::new(Bytes::new(0), Bytes::new(0)));
        assert_eq!(context.source, "");
    }

    #[test]
    pub fn find_line_first_character_of_next_line() {
        let context = find_line("a: int;\n{ }", Bytes::new(9));

        assert_eq!(context.line_no, 2);
        assert_eq!(context.range, Span::new(Bytes::new(8), Bytes::new(11)));
        assert_eq!(context.for_display(), "{ }");
    }

    #[test]
    pub fn find_line_end_of_input_maps_to_last_line() {
        let context = find_line("{\n x = 1;\n", Bytes::new(10));

        assert_eq!(context.line_no, 3);
        assert_eq!(context.for_display(), "");
    }

    #[test]
    pub fn inclusive_split_lines_mixed_endings() {
        let lines = inclusive_split_lines("abc\r\nd\r\n\ne\rf");

        assert_eq!(vec!["abc\r\n", "d\r\n", "\n", "e\r", "f"], lines)
    }
}
