//! Frame-checked timers.
//!
//! Delayed transitions are entries in a table owned by the scene and drained
//! at the top of every frame, so dropping the scene drops every pending
//! callback with it.

/// Table of one-shot events keyed by due time (milliseconds).
#[derive(Debug, Clone)]
pub struct Schedule<E> {
    entries: Vec<(f64, E)>,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> Schedule<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(&mut self, due_ms: f64, event: E) {
        self.entries.push((due_ms, event));
    }

    pub fn after(&mut self, now_ms: f64, delay_ms: f64, event: E) {
        self.at(now_ms + delay_ms, event);
    }

    /// Removes and returns every event due at or before `now_ms`, earliest
    /// first. Events sharing a due time keep their insertion order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<E> {
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.entries.len());
        for (at, event) in self.entries.drain(..) {
            if at <= now_ms {
                due.push((at, event));
            } else {
                pending.push((at, event));
            }
        }
        self.entries = pending;
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, event)| event).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Fixed-period timer that reports how many periods elapsed since the last
/// poll. Starts counting on the first poll.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period_ms: f64,
    next_due: Option<f64>,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due: None,
        }
    }

    /// Number of whole periods completed up to `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let Some(next) = self.next_due else {
            self.next_due = Some(now_ms + self.period_ms);
            return 0;
        };
        if now_ms < next || self.period_ms <= 0.0 {
            return 0;
        }
        let fired = ((now_ms - next) / self.period_ms).floor() as u32 + 1;
        self.next_due = Some(next + f64::from(fired) * self.period_ms);
        fired
    }

    /// Forgets the current phase; the next poll starts a fresh period.
    pub fn reset(&mut self) {
        self.next_due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_due_order() {
        let mut schedule = Schedule::new();
        schedule.at(30.0, "c");
        schedule.at(10.0, "a");
        schedule.at(50.0, "late");
        schedule.at(20.0, "b");

        assert_eq!(schedule.drain_due(5.0), Vec::<&str>::new());
        assert_eq!(schedule.drain_due(30.0), vec!["a", "b", "c"]);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.drain_due(100.0), vec!["late"]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn interval_counts_missed_periods() {
        let mut interval = Interval::new(500.0);
        assert_eq!(interval.poll(0.0), 0);
        assert_eq!(interval.poll(499.0), 0);
        assert_eq!(interval.poll(500.0), 1);
        assert_eq!(interval.poll(1600.0), 2);
        assert_eq!(interval.poll(1999.0), 0);
        assert_eq!(interval.poll(2000.0), 1);
    }

    #[test]
    fn interval_reset_restarts_phase() {
        let mut interval = Interval::new(100.0);
        interval.poll(0.0);
        interval.reset();
        assert_eq!(interval.poll(1000.0), 0);
        assert_eq!(interval.poll(1099.0), 0);
        assert_eq!(interval.poll(1100.0), 1);
    }
}
