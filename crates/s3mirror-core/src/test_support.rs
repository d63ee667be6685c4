//! Shared test helpers for the core crate.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;

/// In-memory log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn subscriber(buffer: LogBuffer) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_writer(move || buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish()
}

/// Runs `f` with a thread-local subscriber and returns its result plus the logged text.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let out = tracing::subscriber::with_default(subscriber(buffer.clone()), f);
    (out, buffer.contents())
}

/// Installs a capturing subscriber on the current thread until the guard drops.
/// Use from `#[tokio::test]` (current-thread runtime).
pub(crate) fn install_log_capture() -> (DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let guard = tracing::subscriber::set_default(subscriber(buffer.clone()));
    (guard, buffer)
}
