//! Terminal notifications

use glow_core::{NotificationLevel, Notifier};
use std::io::Write;
use std::sync::Mutex;
use tracing::debug;

/// Prints notifications, one line each, to a writer (stderr by default)
pub struct ConsoleNotifier<W: Write + Send = std::io::Stderr> {
    out: Mutex<W>,
}

impl ConsoleNotifier {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn print(&self, level: NotificationLevel, message: &str) {
        let marker = match level {
            NotificationLevel::Success => "✔",
            NotificationLevel::Error => "✘",
            NotificationLevel::Warning => "⚠",
        };
        debug!(%level, "{message}");
        match self.out.lock() {
            Ok(mut out) => {
                if let Err(e) = writeln!(out, "{marker} {message}") {
                    debug!("Failed to print notification: {e}");
                }
            }
            Err(_) => debug!("Notification output lock poisoned"),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn success(&self, message: &str) {
        self.print(NotificationLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.print(NotificationLevel::Error, message);
    }

    fn warning(&self, message: &str) {
        self.print(NotificationLevel::Warning, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_one_line_per_notification() {
        let notifier = ConsoleNotifier::new(Vec::new());
        notifier.success("Conta criada");
        notifier.error("Senha incorreta");
        notifier.warning("Confirme seu email");

        let output = String::from_utf8(notifier.into_inner()).unwrap();
        assert_eq!(
            output,
            "✔ Conta criada\n✘ Senha incorreta\n⚠ Confirme seu email\n"
        );
    }

    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_does_not_panic() {
        let notifier = ConsoleNotifier::new(ClosedTerminal);
        notifier.error("Senha incorreta");
        notifier.success("Conta criada");
    }
}
