//! Rendering of positional errors against the source they were found in.
use std::iter;

use crate::{error::PositionalError, source_map::find_line, span::Span};

/// Describes an error by printing the offending source line, underlined at the error position.
pub fn describe_error<E: PositionalError + ?Sized>(err: &E, content: &str) -> String {
    let range = err.range();
    let line = find_line(content, range.start());
    // Columns count characters, so that carets line up under non-ASCII text.
    let padding = Span::new(line.range().start(), range.start())
        .lookup(content)
        .chars()
        .count();
    let underline = range.lookup(content).chars().count().max(1);

    fn pad_char(ch: char, times: usize) -> String {
        iter::repeat(ch).take(times).collect()
    }

    let gutter = format!("{}", line.line_no());

    format!(
        "{gutter}| {}\n{}| {}{}--- {}",
        line.for_display(),
        pad_char(' ', gutter.len()),
        pad_char(' ', padding),
        pad_char('^', underline),
        err.describe()
    )
}
