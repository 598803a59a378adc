//! Tests for duration display and the debug timer.

use core::time::Duration;

use utilities::{DebugTime, display_duration};

#[test]
fn display_duration_units() {
    assert_eq!(display_duration(Duration::from_secs(12)), "12s");
    assert_eq!(display_duration(Duration::from_millis(1500)), "1.5s");
    assert_eq!(display_duration(Duration::from_millis(42)), "42ms");
    assert_eq!(display_duration(Duration::from_micros(7)), "7µs");
    assert_eq!(display_duration(Duration::from_nanos(250)), "250ns");
}

#[test]
fn finish_returns_elapsed() {
    let timer = DebugTime::start("test");
    std::thread::sleep(Duration::from_millis(2));

    let elapsed = timer.finish();
    assert!(elapsed >= Duration::from_millis(2));
}
