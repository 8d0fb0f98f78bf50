use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Call count and cumulative time of one profiled scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScopeTiming {
    pub calls: u64,
    pub total: Duration,
}

impl ScopeTiming {
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            let nanos = self.total.as_nanos() / u128::from(self.calls);
            Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
        }
    }
}

/// Simple scoped profiler recording call counts and cumulative time per scope.
#[derive(Default)]
pub struct Profiler {
    pub timings: HashMap<&'static str, ScopeTiming>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self, guard: &ProfilerGuard) {
        self.record(guard.name, guard.start.elapsed());
    }

    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        let timing = self.timings.entry(name).or_default();
        timing.calls += 1;
        timing.total += elapsed;
    }

    /// Scopes by descending cumulative time
    pub fn report_sorted(&self) -> Vec<(&'static str, ScopeTiming)> {
        let mut v: Vec<_> = self.timings.iter().map(|(n, t)| (*n, *t)).collect();
        v.sort_by(|a, b| b.1.total.cmp(&a.1.total).then(a.0.cmp(b.0)));
        v
    }

    pub fn clear(&mut self) {
        self.timings.clear();
    }

    /// Log the report at debug level and reset.
    pub fn log_and_clear(&mut self) {
        for (name, timing) in self.report_sorted() {
            tracing::debug!(
                scope = name,
                calls = timing.calls,
                total = ?timing.total,
                mean = ?timing.mean(),
                "profile"
            );
        }
        self.clear();
    }
}

pub struct ProfilerGuard {
    name: &'static str,
    start: Instant,
}

/// Start a profiling section. Returns a guard that will update the global
/// profiler when dropped.
pub fn start(name: &'static str) -> ProfilerGuard {
    ProfilerGuard {
        name,
        start: Instant::now(),
    }
}

#[cfg(feature = "profiling")]
impl Drop for ProfilerGuard {
    fn drop(&mut self) {
        crate::PROFILER.lock().finish(self);
    }
}

/// Macro helper to profile a scope only when the `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _guard = $crate::profiler::start($name);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_calls_and_sums_time() {
        let mut profiler = Profiler::new();
        profiler.record("aggregate", Duration::from_millis(3));
        profiler.record("aggregate", Duration::from_millis(5));
        profiler.record("reaction", Duration::from_millis(1));

        let report = profiler.report_sorted();
        assert_eq!(report[0].0, "aggregate");
        assert_eq!(report[0].1.calls, 2);
        assert_eq!(report[0].1.total, Duration::from_millis(8));
        assert_eq!(report[0].1.mean(), Duration::from_millis(4));
        assert_eq!(report[1].0, "reaction");

        profiler.log_and_clear();
        assert!(profiler.timings.is_empty());
    }

    #[test]
    fn mean_handles_call_counts_beyond_u32() {
        let timing = ScopeTiming {
            calls: 1 << 32,
            total: Duration::from_secs(1 << 32),
        };
        assert_eq!(timing.mean(), Duration::from_secs(1));

        let timing = ScopeTiming {
            calls: (1 << 32) + 1,
            total: Duration::from_nanos((1 << 32) + 1),
        };
        assert_eq!(timing.mean(), Duration::from_nanos(1));
    }

    #[test]
    fn guard_measures_elapsed_time() {
        let mut profiler = Profiler::new();
        let guard = start("scope");
        profiler.finish(&guard);
        assert_eq!(profiler.timings["scope"].calls, 1);
        // Keep the global profiler out of this test
        std::mem::forget(guard);
    }
}
