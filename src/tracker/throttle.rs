/// Minimum-interval gate over sample timestamps.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: i64,
    last_accepted: Option<i64>,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms: i64::try_from(interval_ms).unwrap_or(i64::MAX), last_accepted: None }
    }

    /// Accept the first sample and any sample at least one interval after the
    /// last accepted one. A sample older than the last accepted one has a
    /// negative delta and is rejected like any other early sample.
    pub fn try_accept(&mut self, now_ms: i64) -> bool {
        let accept = match self.last_accepted {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        };
        if accept {
            self.last_accepted = Some(now_ms);
        }
        accept
    }

    /// Record an evaluation that bypassed the gate.
    #[inline] pub fn mark(&mut self, now_ms: i64) { self.last_accepted = Some(now_ms) }

    #[inline] pub fn last_accepted(&self) -> Option<i64> { self.last_accepted }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_gate() {
        let mut throttle = Throttle::new(1000);
        assert!(throttle.try_accept(10_000));
        assert!(!throttle.try_accept(10_500));
        assert!(!throttle.try_accept(10_999));
        assert!(throttle.try_accept(11_000));
        assert!(!throttle.try_accept(11_500));
        assert!(throttle.try_accept(12_500));
    }

    #[test]
    fn older_samples_are_rejected() {
        let mut throttle = Throttle::new(1000);
        assert!(throttle.try_accept(50_000));
        assert!(!throttle.try_accept(20_000));
        assert!(!throttle.try_accept(49_999));
        assert_eq!(throttle.last_accepted(), Some(50_000));
        assert!(throttle.try_accept(51_000));
    }

    #[test]
    fn older_samples_are_rejected_with_zero_interval() {
        let mut throttle = Throttle::new(0);
        assert!(throttle.try_accept(5_000));
        assert!(!throttle.try_accept(4_999));
        assert!(throttle.try_accept(5_000));
    }

    #[test]
    fn zero_interval_accepts_everything() {
        let mut throttle = Throttle::new(0);
        assert!(throttle.try_accept(1));
        assert!(throttle.try_accept(1));
    }
}
