//! Tracing subscriber setup for hosts and tests.

/// Install the default `fmt` subscriber.
///
/// Returns `false` if a global subscriber was already installed.
#[must_use]
pub fn init() -> bool {
    tracing_subscriber::fmt().try_init().is_ok()
}

/// Route log output through the test harness so it shows up for failing tests.
#[cfg(test)]
pub(crate) fn init_for_tests() -> bool {
    tracing_subscriber::fmt().with_test_writer().try_init().is_ok()
}
