use std::{
    io::{self, Stdout, Write},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use termion::{cursor, raw::RawTerminal, style};

use signal_hook::{
    consts::{SIGHUP, SIGTERM},
    iterator::Signals,
};

use crate::{error::CardResult, gradient::Fade, xoshiro256p::Xoshiro256pState};

pub const GOODBYES: [&str; 4] = [
    "Stay awesome...",
    "Keep shipping...",
    "Later, friendo...",
    "Until next time...",
];

pub const INTERRUPTED: &str = "Caught you sneaking out...";
pub const FAULTED: &str = "Oops, something broke. But hey...";
pub const COMPLETED: &str = "Thanks for stopping by!";

/// Set by the first caller of `say_goodbye`, never cleared.
static LEAVING: AtomicBool = AtomicBool::new(false);

pub fn in_progress() -> bool {
    LEAVING.load(Ordering::SeqCst)
}

/// A terminal mode that has to be undone before the process goes away.
pub trait TerminalMode: Send + Sync {
    fn restore(&self) -> io::Result<()>;
}

impl TerminalMode for RawTerminal<Stdout> {
    fn restore(&self) -> io::Result<()> {
        self.suspend_raw_mode()
    }
}

/// The single way out of the program. Every trigger (signals, panics, the
/// prompt being cancelled, a finished run) ends up in `say_goodbye`.
pub struct Farewell {
    fade: Option<Fade>,
    rng: Mutex<Xoshiro256pState>,

    /// Raw mode held by the prompt, if it is open
    terminal: Mutex<Option<Arc<dyn TerminalMode>>>,
}

impl Farewell {
    pub fn new(fade: Option<Fade>) -> Self {
        Farewell {
            fade,
            rng: Mutex::new(Xoshiro256pState::from_clock()),
            terminal: Mutex::new(None),
        }
    }

    /// Registers the interrupt handler, the termination/hangup listener and
    /// the panic hook. All of them share this one value.
    pub fn install(&'static self) -> CardResult {
        ctrlc::set_handler(move || {
            self.say_goodbye(Some(INTERRUPTED));
        })?;

        // terminated from outside, nothing to explain
        let mut signals = Signals::new([SIGTERM, SIGHUP])?;
        thread::spawn(move || {
            if signals.forever().next().is_some() {
                self.say_goodbye(None);
            }
        });

        std::panic::set_hook(Box::new(move |info| {
            log::error!("{info}");
            self.say_goodbye(Some(FAULTED));
        }));

        log::debug!("exit handlers installed");
        Ok(())
    }

    pub fn hold_terminal(&self, mode: Arc<dyn TerminalMode>) {
        *self.terminal.lock().unwrap_or_else(PoisonError::into_inner) = Some(mode);
    }

    pub fn release_terminal(&self) {
        self.terminal.lock().unwrap_or_else(PoisonError::into_inner).take();
    }

    /// Undoes a held terminal mode. Returns what has to be written before the
    /// farewell so it lands on a visible cursor at column one.
    fn restore_terminal(&self) -> String {
        let held = self.terminal.lock().unwrap_or_else(PoisonError::into_inner).take();

        match held {
            Some(mode) => {
                if let Err(e) = mode.restore() {
                    log::error!("failed to restore terminal: {e}");
                }
                format!("\r{}", cursor::Show)
            }
            None => String::new(),
        }
    }

    pub fn goodbye(&self) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.pick(&GOODBYES).copied().unwrap_or(GOODBYES[0])
    }

    /// Blank line, the dimmed reason if there is one, then a goodbye in the
    /// card's colors.
    pub fn message(&self, reason: Option<&str>) -> String {
        let mut msg = String::from("\n\n");

        if let Some(reason) = reason {
            msg.push_str(&format!("{}  {reason}{}\n", style::Faint, style::Reset));
        }

        let goodbye = format!("  {}", self.goodbye());
        match &self.fade {
            Some(fade) => msg.push_str(&fade.paint(&goodbye)),
            None => msg.push_str(&goodbye),
        }
        msg.push_str("\n\n");

        msg
    }

    /// Prints the farewell and exits with status 0. Only the first caller
    /// gets through; anyone racing it parks until the process is gone.
    pub fn say_goodbye(&self, reason: Option<&str>) -> ! {
        if LEAVING.swap(true, Ordering::SeqCst) {
            loop {
                thread::park();
            }
        }

        log::debug!("leaving: {}", reason.unwrap_or("prompt cancelled"));

        let prefix = self.restore_terminal();

        // held until exit so nothing else reaches the screen
        let mut out = io::stdout().lock();
        let _ = out.write_all(prefix.as_bytes());
        let _ = out.write_all(self.message(reason).as_bytes());
        let _ = out.flush();

        std::process::exit(0)
    }
}
