//! Recompute statistics for a session.

use std::time::Duration;

/// Counters updated by every recompute that reaches the executor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    /// Executor invocations.
    pub recomputes: usize,
    /// Invocations that failed.
    pub failures: usize,
    /// Wall time of the most recent invocation.
    pub last_duration: Option<Duration>,
    /// Total wall time spent in the executor.
    pub total_duration: Duration,
}

impl SessionStats {
    /// Record one executor invocation.
    pub fn record(&mut self, duration: Duration, succeeded: bool) {
        self.recomputes += 1;
        if !succeeded {
            self.failures += 1;
        }
        self.last_duration = Some(duration);
        self.total_duration += duration;
    }

    /// Average executor time per invocation.
    pub fn average_duration(&self) -> Option<Duration> {
        if self.recomputes == 0 {
            None
        } else {
            Some(self.total_duration / self.recomputes as u32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.average_duration(), None);

        stats.record(Duration::from_millis(10), true);
        stats.record(Duration::from_millis(30), false);

        assert_eq!(stats.recomputes, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.last_duration, Some(Duration::from_millis(30)));
        assert_eq!(stats.average_duration(), Some(Duration::from_millis(20)));
    }
}
