use std::{
    io::{self, Write},
    sync::Arc,
};

use termion::{
    clear, cursor,
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
    style,
};

use crate::farewell::Farewell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// What the user sees, may carry color
    pub label: String,
    /// What selecting it yields
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Choice {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a> {
    Picked(&'a Choice),
    Cancelled,
}

/// Runs the single-select menu on the real terminal. Raw mode is only
/// entered when stdout is a tty. It is restored before returning, and is
/// lent to `farewell` meanwhile so an exit from another thread undoes it too.
pub fn prompt_terminal<'a>(farewell: &Farewell, choices: &'a [Choice]) -> io::Result<Selection<'a>> {
    let stdout = io::stdout();
    let keys = io::stdin().keys();

    if !termion::is_tty(&stdout) {
        let mut out = stdout;
        return prompt_choice(keys, &mut out, choices);
    }

    let raw = Arc::new(stdout.into_raw_mode()?);
    farewell.hold_terminal(raw.clone());

    let selection = prompt_choice(keys, &mut io::stdout(), choices);

    farewell.release_terminal();
    // last handle, dropping it leaves raw mode
    drop(raw);

    selection
}

/// Draws `choices` as a list with the active row marked and a key-help line
/// underneath, then reacts to `keys` until one is picked or the user leaves.
///
/// Enter picks. Esc, Ctrl-C, Ctrl-D and running out of keys cancel. An error
/// from the key source is returned as is, never as a cancellation.
pub fn prompt_choice<'a, I, W>(keys: I, out: &mut W, choices: &'a [Choice]) -> io::Result<Selection<'a>>
where
    I: IntoIterator<Item = io::Result<Key>>,
    W: Write,
{
    if choices.is_empty() {
        return Ok(Selection::Cancelled);
    }

    let count = choices.len();
    let mut active = 0;

    write!(out, "{}", cursor::Hide)?;
    draw(out, choices, active)?;

    let mut selection = Selection::Cancelled;
    for key in keys {
        match key? {
            Key::Up | Key::Char('k') => active = (active + count - 1) % count,
            Key::Down | Key::Char('j') => active = (active + 1) % count,
            Key::Char(c @ '1'..='9') => {
                let row = c as usize - '1' as usize;
                if row < count {
                    active = row;
                }
            }
            Key::Char('\n') => {
                selection = Selection::Picked(&choices[active]);
                break;
            }
            Key::Esc | Key::Ctrl('c') | Key::Ctrl('d') => break,
            _ => continue,
        }

        erase(out, count)?;
        draw(out, choices, active)?;
    }

    erase(out, count)?;
    if let Selection::Picked(choice) = selection {
        write!(out, "{}\r\n", choice.label)?;
    }
    write!(out, "{}", cursor::Show)?;
    out.flush()?;

    Ok(selection)
}

fn draw<W: Write>(out: &mut W, choices: &[Choice], active: usize) -> io::Result<()> {
    for (idx, choice) in choices.iter().enumerate() {
        if idx == active {
            write!(
                out,
                "{}❯{} {}\r\n",
                termion::color::Fg(termion::color::Cyan),
                termion::color::Fg(termion::color::Reset),
                choice.label
            )?;
        } else {
            write!(out, "  {}\r\n", choice.label)?;
        }
    }

    write!(out, "{}", help_line())?;
    out.flush()
}

/// Moves back to the top of the frame drawn by `draw` and clears it.
fn erase<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    // cursor sits on the help line, one row below the last choice
    write!(out, "\r{}{}", cursor::Up(count as u16), clear::AfterCursor)
}

fn help_line() -> String {
    let key = |k: &str| format!("{}{k}{}", style::Bold, style::Reset);
    let label = |l: &str| format!("{}{l}{}", style::Faint, style::Reset);
    let sep = label(" • ");

    [("↑↓", "navigate"), ("⏎", "select"), ("esc", "exit")]
        .iter()
        .map(|(k, l)| format!("{} {}", key(k), label(l)))
        .collect::<Vec<_>>()
        .join(&sep)
}
