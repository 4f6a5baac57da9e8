use std::time::{SystemTime, UNIX_EPOCH};

/// Produces the Unix timestamp (in seconds) placed in each signed request.
///
/// `offset` is the configured clock offset in seconds, added to the local clock.
pub trait TimestampCalculator: Send + Sync {
    fn calculate(&self, offset: i64) -> i64;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimestampCalculator;

impl TimestampCalculator for SystemTimestampCalculator {
    fn calculate(&self, offset: i64) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        now.saturating_add(offset)
    }
}

/// Always returns the same timestamp. Useful for tests and reproducible signatures.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestampCalculator(pub i64);

impl TimestampCalculator for FixedTimestampCalculator {
    fn calculate(&self, offset: i64) -> i64 {
        self.0.saturating_add(offset)
    }
}
