//! Per-request completion logging.

use std::time::Instant;

/// Logs one completion line for a request when dropped.
///
/// Create it at the start of a handler and record the outcome before
/// returning. Early returns, `?` and cancelled futures all drop the guard,
/// so the line is emitted on every exit path.
pub struct RequestLog {
    operation: &'static str,
    started: Instant,
    status: Option<u16>,
    error: Option<String>,
}

impl RequestLog {
    pub fn begin(operation: &'static str) -> Self {
        tracing::debug!(operation, "request started");
        Self {
            operation,
            started: Instant::now(),
            status: None,
            error: None,
        }
    }

    pub fn status(&mut self, status: u16) {
        self.status = Some(status);
    }

    pub fn error(&mut self, status: u16, error: impl std::fmt::Display) {
        self.status = Some(status);
        self.error = Some(error.to_string());
    }
}

impl Drop for RequestLog {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        match (&self.error, self.status) {
            (Some(error), status) => tracing::warn!(
                operation = self.operation,
                status = status.unwrap_or_default(),
                elapsed_ms,
                error = %error,
                "request failed"
            ),
            (None, Some(status)) => tracing::info!(
                operation = self.operation,
                status,
                elapsed_ms,
                "request completed"
            ),
            // Dropped before an outcome was recorded.
            (None, None) => tracing::warn!(
                operation = self.operation,
                elapsed_ms,
                "request aborted"
            ),
        }
    }
}

/// Formatted log capture for tests on the current thread.
#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::subscriber::DefaultGuard;

    #[derive(Clone, Default)]
    pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl LogCapture {
        /// Route this thread's logs into a fresh buffer until the guard drops.
        pub(crate) fn install() -> (Self, DefaultGuard) {
            let capture = Self::default();
            let writer = capture.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish();
            (capture, tracing::subscriber::set_default(subscriber))
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf)
                .lines()
                .map(str::to_string)
                .collect()
        }

        /// Number of lines containing `needle`.
        pub(crate) fn count(&self, needle: &str) -> usize {
            self.lines().iter().filter(|l| l.contains(needle)).count()
        }
    }

    impl io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
