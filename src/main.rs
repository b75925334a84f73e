use core::time::Duration;
use std::{
    io::{self, Write},
    thread::sleep,
};

use log::LevelFilter;
use termion::style;

mod card;
use card::Card;

mod error;
use error::CardResult;

mod farewell;
use farewell::{COMPLETED, FAULTED, Farewell};

mod gradient;
use gradient::Fade;

mod menu;
use menu::{Choice, Selection};

mod modem;
use modem::{DEFAULT_LINE_DELAY, render_animated};

mod opener;
use opener::{Opener, SystemOpener};

mod xoshiro256p;

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Opened,
    Cancelled,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Error)
        .parse_default_env()
        .init();

    let card = Card::default();

    // lives for the rest of the process, shared by every exit trigger
    let farewell: &'static Farewell = Box::leak(Box::new(Farewell::new(card.fade().ok())));
    if let Err(e) = farewell.install() {
        log::error!("{e}");
        farewell.say_goodbye(Some(FAULTED));
    }

    let outcome = card.fade().and_then(|fade| {
        run(
            &mut io::stdout(),
            &card,
            &fade,
            &mut SystemOpener,
            |choices| menu::prompt_terminal(farewell, choices),
        )
    });

    match outcome {
        Ok(Outcome::Opened) => farewell.say_goodbye(Some(COMPLETED)),
        Ok(Outcome::Cancelled) => farewell.say_goodbye(None),
        Err(e) => {
            log::error!("{e}");
            farewell.say_goodbye(Some(FAULTED))
        }
    }
}

/// banner -> pause -> bio -> prompt -> open
fn run<W, O, P>(out: &mut W, card: &Card, fade: &Fade, opener: &mut O, prompt: P) -> CardResult<Outcome>
where
    W: Write,
    O: Opener,
    P: FnOnce(&[Choice]) -> io::Result<Selection<'_>>,
{
    log::debug!("rendering banner");
    render_animated(out, &card.banner(fade), card.banner_delay)?;
    pause(card.pause);

    log::debug!("rendering bio");
    render_animated(out, &card.bio(), card.bio_delay)?;

    match prompt(&card.links)? {
        Selection::Picked(choice) => {
            log::debug!("picked {}", choice.value);
            let opening = format!("{}\nOpening {}...\n{}", style::Faint, choice.value, style::Reset);
            render_animated(out, &opening, DEFAULT_LINE_DELAY)?;

            opener.open(&choice.value)?;
            Ok(Outcome::Opened)
        }
        Selection::Cancelled => Ok(Outcome::Cancelled),
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use termion::input::TermRead;

    use super::*;
    use crate::error::CardError;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Vec<String>,
    }

    impl Opener for RecordingOpener {
        fn open(&mut self, url: &str) -> CardResult {
            self.opened.push(url.to_owned());
            Ok(())
        }
    }

    struct BrokenOpener;

    impl Opener for BrokenOpener {
        fn open(&mut self, url: &str) -> CardResult {
            Err(CardError::Open {
                url: url.to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "no handler"),
            })
        }
    }

    fn quick_card() -> Card {
        Card {
            banner_delay: Duration::ZERO,
            pause: Duration::ZERO,
            bio_delay: Duration::ZERO,
            ..Card::default()
        }
    }

    #[test]
    fn first_option_opens_once() {
        let card = quick_card();
        let fade = card.fade().unwrap();
        let mut opener = RecordingOpener::default();
        let mut out = Vec::new();

        let outcome = run(&mut out, &card, &fade, &mut opener, |choices| {
            menu::prompt_choice(b"\r".as_slice().keys(), &mut io::sink(), choices)
        })
        .unwrap();

        assert_eq!(outcome, Outcome::Opened);
        assert_eq!(opener.opened, ["https://shaneholloman.dev"]);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Opening https://shaneholloman.dev..."));
        assert!(out.contains("Wellington, NZ"));
    }

    #[test]
    fn nth_option_opens_nth_url() {
        let card = quick_card();
        let fade = card.fade().unwrap();

        for (input, url) in [
            (b"\r".as_slice(), "https://shaneholloman.dev"),
            (b"j\r".as_slice(), "https://x.com/shaneholloman"),
            (b"jj\r".as_slice(), "https://github.com/shaneholloman"),
        ] {
            let mut opener = RecordingOpener::default();
            run(&mut io::sink(), &card, &fade, &mut opener, |choices| {
                menu::prompt_choice(input.keys(), &mut io::sink(), choices)
            })
            .unwrap();

            assert_eq!(opener.opened, [url]);
        }
    }

    #[test]
    fn cancel_opens_nothing() {
        let card = quick_card();
        let fade = card.fade().unwrap();
        let mut opener = RecordingOpener::default();
        let mut out = Vec::new();

        let outcome = run(&mut out, &card, &fade, &mut opener, |choices| {
            menu::prompt_choice(b"\x1b".as_slice().keys(), &mut io::sink(), choices)
        })
        .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(opener.opened.is_empty());
        assert!(!String::from_utf8(out).unwrap().contains("Opening"));
    }

    #[test]
    fn opener_failure_is_an_error() {
        let card = quick_card();
        let fade = card.fade().unwrap();

        let result = run(&mut io::sink(), &card, &fade, &mut BrokenOpener, |choices| {
            menu::prompt_choice(b"\r".as_slice().keys(), &mut io::sink(), choices)
        });

        assert!(matches!(result, Err(CardError::Open { .. })));
    }

    #[test]
    fn banner_comes_before_bio() {
        let card = quick_card();
        let fade = card.fade().unwrap();
        let mut out = Vec::new();

        run(&mut out, &card, &fade, &mut RecordingOpener::default(), |_| {
            Ok(Selection::Cancelled)
        })
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        let banner = out.find('█').unwrap();
        let bio = out.find("Cello Group Ltd").unwrap();
        assert!(banner < bio);
    }
}
