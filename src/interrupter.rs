use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use crate::cust_errors::InterruptError;

#[derive(Debug, Default, Clone)]
pub struct Interrupter {
    start_time: Option<Instant>,
    time_limit: Option<u128>,
    sigint: Option<Arc<AtomicBool>>,
}

impl Interrupter {

    /// Creates a new Interrupter.
    /// If `time_limit` (in milliseconds) is given, `self.check_interrupt()` becomes true after
    /// the `time_limit` has passed.
    pub fn new(time_limit: Option<u128>) -> Self {
        if time_limit.is_some() {
            let start = Instant::now();
            return Interrupter {
                start_time: Some(start),
                time_limit,
                sigint: None,
            }
        }
        Interrupter::default()
    }

    /// Additionally listens to `flag`, which is expected to be set by a SIGINT handler.
    pub fn with_sigint(mut self, flag: Arc<AtomicBool>) -> Self {
        self.sigint = Some(flag);
        self
    }

    /// Checks if a sigint was send, or the allowed time has expired.
    ///
    /// On default this should always return false.
    pub fn check_interrupt(&self) -> bool {
        self.send_interrupt().is_err()
    }

    /// Sends an `InterruptError` if any interrupt was set.
    pub fn send_interrupt(&self) -> Result<(), InterruptError> {
        if let Some(flag) = &self.sigint {
            if flag.load(Ordering::SeqCst) {
                return Err(InterruptError::SigInt);
            }
        }
        if let Some(dur) = self.time_limit {
            let duration = self.start_time.expect("since `time_limit` is some").elapsed();
            if duration.as_millis() >= dur {
                return Err(InterruptError::TimeOut);
            }
        }
        Ok(())
    }

}
