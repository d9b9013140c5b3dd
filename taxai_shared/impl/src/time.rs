use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use taxai_di::Build;
use taxai_shared_contracts::time::TimeService;
use taxai_utils::trace_instrument;

#[derive(Debug, Clone, Copy, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn now_has_millisecond_precision() {
        let now = TimeServiceImpl.now();

        assert_eq!(now.nanosecond() % 1_000_000, 0);
        assert!((Utc::now() - now).num_seconds() < 5);
    }
}
