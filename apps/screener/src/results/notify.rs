use dialoguer::Confirm;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
    Info,
}

/// User-facing notices and yes/no confirmations.
pub trait Notifier: Send {
    fn notify(&mut self, kind: NoticeKind, message: &str);
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Terminal notifier: notices go to stdout, confirmations to an interactive prompt.
pub struct ConsoleNotifier {
    assume_yes: bool,
}

impl ConsoleNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        let marker = match kind {
            NoticeKind::Success => "✓",
            NoticeKind::Failure => "✗",
            NoticeKind::Info => "•",
        };
        info!(?kind, "{message}");
        println!("{marker} {message}");
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match Confirm::new().with_prompt(prompt).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Confirmation prompt failed ({e}); treating as declined");
                false
            }
        }
    }
}
