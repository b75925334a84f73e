use core::time::Duration;
use std::{io::Write, thread::sleep};

use crate::farewell;

pub const DEFAULT_LINE_DELAY: Duration = Duration::from_millis(50);

/// Prints `text` one line at a time, pausing `delay` after each line, like an
/// old modem link painting the screen.
///
/// Splitting keeps empty segments, so `""` still prints one empty line and a
/// trailing newline yields a trailing empty line. Returns the number of lines
/// written, which is short only when a farewell started mid-render.
pub fn render_animated<W: Write>(out: &mut W, text: &str, delay: Duration) -> std::io::Result<usize> {
    let mut written = 0;

    for line in text.split('\n') {
        if farewell::in_progress() {
            break;
        }

        writeln!(out, "{line}")?;
        out.flush()?;
        written += 1;

        sleep(delay);
    }

    Ok(written)
}
