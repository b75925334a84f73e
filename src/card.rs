use core::time::Duration;

use termion::{
    color::{self, AnsiValue, Rgb},
    style,
};

use crate::{error::CardResult, gradient::Fade, menu::Choice};

const TITLE_ART: &str = "
███████╗██╗  ██╗ █████╗ ███╗   ██╗███████╗   ██╗  ██╗ ██████╗ ██╗     ██╗      ██████╗ ███╗   ███╗ █████╗ ███╗   ██╗
██╔════╝██║  ██║██╔══██╗████╗  ██║██╔════╝   ██║  ██║██╔═══██╗██║     ██║     ██╔═══██╗████╗ ████║██╔══██╗████╗  ██║
███████╗███████║███████║██╔██╗ ██║█████╗     ███████║██║   ██║██║     ██║     ██║   ██║██╔████╔██║███████║██╔██╗ ██║
╚════██║██╔══██║██╔══██║██║╚██╗██║██╔══╝     ██╔══██║██║   ██║██║     ██║     ██║   ██║██║╚██╔╝██║██╔══██║██║╚██╗██║
███████║██║  ██║██║  ██║██║ ╚████║███████╗   ██║  ██║╚██████╔╝███████╗███████╗╚██████╔╝██║ ╚═╝ ██║██║  ██║██║ ╚████║
╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═══╝╚══════╝   ╚═╝  ╚═╝ ╚═════╝ ╚══════╝╚══════╝ ╚═════╝ ╚═╝     ╚═╝╚═╝  ╚═╝╚═╝  ╚═══╝
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Round,
}

impl BorderStyle {
    /// (top-left, top-right, bottom-left, bottom-right, horizontal, vertical)
    fn glyphs(self) -> (char, char, char, char, char, char) {
        match self {
            BorderStyle::Round => ('╭', '╮', '╰', '╯', '─', '│'),
        }
    }
}

/// Everything the card shows. Changing these fields never changes the flow.
pub struct Card {
    /// ASCII art title, leading and trailing newline included
    pub title_art: &'static str,
    /// Bio lines, already styled
    pub bio: String,

    /// Gradient stops for the banner and the goodbye line
    pub fade_stops: (Rgb, Rgb),

    /// Bio frame
    pub border: BorderStyle,
    pub border_color: AnsiValue,
    pub padding: usize,

    /// Modem effect timings
    pub banner_delay: Duration,
    pub pause: Duration,
    pub bio_delay: Duration,

    /// Menu entries, in display order
    pub links: Vec<Choice>,
}

impl Default for Card {
    fn default() -> Self {
        Card {
            title_art: TITLE_ART,
            bio: default_bio(),

            fade_stops: (Rgb(0xec, 0xec, 0xec), Rgb(0x35, 0x35, 0x35)),

            border: BorderStyle::Round,
            // bright black, the usual "gray"
            border_color: AnsiValue(8),
            padding: 1,

            banner_delay: Duration::from_millis(80),
            pause: Duration::from_millis(400),
            bio_delay: Duration::from_millis(40),

            links: default_links(),
        }
    }
}

impl Card {
    pub fn fade(&self) -> CardResult<Fade> {
        Fade::new(self.fade_stops.0, self.fade_stops.1)
    }

    pub fn banner(&self, fade: &Fade) -> String {
        fade.paint(self.title_art)
    }

    pub fn bio(&self) -> String {
        boxed(self.bio.trim(), self.border, self.padding, self.border_color)
    }
}

fn span<C: color::Color>(c: C, text: &str) -> String {
    format!("{}{text}{}", color::Fg(c), color::Fg(color::Reset))
}

fn default_bio() -> String {
    let bullet = span(color::Green, "•");

    format!(
        "I run an Ai Dept with some other lunatics at Cello Group Ltd\n\
         \n\
         Husband to {handle} {bullet} Educated at {school} {bullet} Building {project}\n\
         \n\
         {lead}{bullet} AI Development & Integration {bullet} {faint}Wellington, NZ{reset}",
        handle = span(color::Magenta, "@linamarin"),
        school = span(color::Red, "UGA"),
        project = span(color::Blue, "Aria Platform"),
        lead = span(color::White, "Obsessed with "),
        faint = style::Faint,
        reset = style::Reset,
    )
}

fn default_links() -> Vec<Choice> {
    vec![
        Choice::new(
            format!("{} shaneholloman.dev", span(color::Cyan, "✔")),
            "https://shaneholloman.dev",
        ),
        Choice::new(
            format!("{} x.com/shaneholloman", span(color::LightBlack, "✔")),
            "https://x.com/shaneholloman",
        ),
        Choice::new(
            format!("{} github.com/shaneholloman", span(color::White, "✔")),
            "https://github.com/shaneholloman",
        ),
    ]
}

/// `text` without its CSI escape sequences.
pub(crate) fn strip_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // parameters until the final byte
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
            continue;
        }

        out.push(c);
    }

    out
}

/// Width of `text` as it lands on screen.
pub fn visible_width(text: &str) -> usize {
    strip_escapes(text).chars().count()
}

/// Frames `text` with a border. Vertical padding is `padding` lines and
/// horizontal padding is three columns per unit, so the box reads square.
pub fn boxed(text: &str, style: BorderStyle, padding: usize, border_color: AnsiValue) -> String {
    let (tl, tr, bl, br, h, v) = style.glyphs();
    let fg = color::Fg(border_color).to_string();
    let reset = color::Fg(color::Reset).to_string();

    let lines: Vec<&str> = text.split('\n').collect();
    let width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let side = " ".repeat(padding * 3);
    let inner = width + padding * 6;

    let rule = h.to_string().repeat(inner);
    let edge = format!("{fg}{v}{reset}");
    let blank = format!("{edge}{}{edge}", " ".repeat(inner));

    let mut out = Vec::with_capacity(lines.len() + padding * 2 + 2);
    out.push(format!("{fg}{tl}{rule}{tr}{reset}"));
    out.extend((0..padding).map(|_| blank.clone()));
    for line in lines {
        let fill = " ".repeat(width - visible_width(line));
        out.push(format!("{edge}{side}{line}{fill}{side}{edge}"));
    }
    out.extend((0..padding).map(|_| blank.clone()));
    out.push(format!("{fg}{bl}{rule}{br}{reset}"));

    out.join("\n")
}
