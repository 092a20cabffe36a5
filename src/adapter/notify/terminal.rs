use std::io::{self, Write};
use std::sync::Mutex;

use tracing::warn;

use crate::application::interface::notifier::{Notice, NoticeKind, Notifier};

type Sink = Mutex<Box<dyn Write + Send>>;

/// Prints notices for the command-line client: successes to stdout,
/// failures to stderr.
pub struct TerminalNotifier {
    out: Sink,
    err: Sink,
}

impl TerminalNotifier {
    pub fn stdio() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let (sink, prefix) = match notice.kind {
            NoticeKind::Success => (&self.out, "✓"),
            NoticeKind::Failure => (&self.err, "✗"),
        };

        let result = match sink.lock() {
            Ok(mut writer) => writeln!(writer, "{} {}", prefix, notice.message).and_then(|_| writer.flush()),
            Err(_) => Err(io::Error::other("notice sink poisoned")),
        };
        if let Err(err) = result {
            warn!("Failed to print notice `{}`: {}", notice.message, err);
        }
    }
}
