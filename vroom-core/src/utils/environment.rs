use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Returns amount of CPUs.
pub fn get_cpus() -> usize {
    num_cpus::get()
}

/// Specifies a callback for logging progress information.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps resources shared by all solver runs: a logger and a cooperative cancellation signal.
/// Checked only at outer loop boundaries, so cancellation is best-effort and never interrupts
/// a move application.
#[derive(Clone)]
pub struct Environment {
    /// A logger for search progress.
    pub logger: InfoLogger,
    /// A cooperative stop flag.
    stop: Arc<AtomicBool>,
    /// An optional wall clock deadline.
    deadline: Option<Instant>,
}

impl Environment {
    /// Creates a new instance of `Environment` with the given logger.
    pub fn new(logger: InfoLogger) -> Self {
        Self { logger, stop: Arc::new(AtomicBool::new(false)), deadline: None }
    }

    /// Sets a wall clock deadline after which runs stop at the next check point.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Requests all runs to stop at their next check point.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Checks whether runs should keep exploring.
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Arc::new(|_| {}))
    }
}
