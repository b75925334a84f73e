use std::process::{Command, Stdio};

use crate::error::{CardError, CardResult};

pub trait Opener {
    /// Hands `url` to whatever the host uses for links.
    fn open(&mut self, url: &str) -> CardResult;
}

/// Opens links with the platform's default handler. The handler is spawned
/// detached and never waited on.
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            // empty title so `start` doesn't eat the url
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Opener for SystemOpener {
    fn open(&mut self, url: &str) -> CardResult {
        let mut cmd = Self::command(url);
        log::debug!("opening {url} with {:?}", cmd.get_program());

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| CardError::Open {
                url: url.to_owned(),
                source,
            })
    }
}
