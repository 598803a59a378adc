//! # Utilities
//! Small helpers shared by the capture crates.
//!

use core::time::Duration;
use std::time::Instant;

use tracing::debug;

/// Display the duration as a string with units. Display is handled in the following order:
/// 1. `>= 10s` displays seconds only.
/// 1. `>= 1s` displays seconds with 1dp.
/// 1. `>= 1ms` displays milliseconds only.
/// 1. `>= 1µs` displays microseconds only.
/// 1. `< 1µs` displays nanoseconds only.
#[inline]
pub fn display_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();

    match seconds {
        10.. => format!("{seconds}s"),
        1.. => format!("{:.1}s", duration.as_secs_f32()),
        _ if duration.as_millis() >= 1 => format!("{}ms", duration.as_millis()),
        _ if duration.as_micros() >= 1 => format!("{}µs", duration.as_micros()),
        _ => format!("{}ns", duration.as_nanos()),
    }
}

/// Logs the time since construction when dropped or finished.
///
/// Capture stages hold one of these for their lifetime so a slow render or encode shows up in
/// the debug log as `[Timing] {label} took {duration}`.
pub struct DebugTime {
    label: String,
    start: Instant,
    logged: bool,
}

impl DebugTime {
    /// Start a new debug timer with the given label.
    pub fn start<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
            logged: false,
        }
    }

    /// The time elapsed since the timer was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log the timing now and return the elapsed duration.
    pub fn finish(mut self) -> Duration {
        let elapsed = self.elapsed();
        self.log(elapsed);
        elapsed
    }

    fn log(&mut self, elapsed: Duration) {
        if self.logged {
            return;
        }

        self.logged = true;
        debug!("[Timing] {} took {}", self.label, display_duration(elapsed));
    }
}

impl Drop for DebugTime {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        self.log(elapsed);
    }
}
