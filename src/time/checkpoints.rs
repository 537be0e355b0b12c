//! Output times of a run.

/// `count` equally spaced output times ending at `end_time`.
///
/// Checkpoint `i` (1-based) lies at `end_time · i / count`. Checkpoint 0 is
/// the initial state at t = 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckpointSchedule {
    end_time: f64,
    count: usize,
}

impl CheckpointSchedule {
    /// A schedule with at least one checkpoint.
    pub fn new(end_time: f64, count: usize) -> Self {
        Self {
            end_time,
            count: count.max(1),
        }
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Time of checkpoint `index`.
    pub fn time_at(&self, index: usize) -> f64 {
        self.end_time * index as f64 / self.count as f64
    }

    /// First checkpoint strictly after `time`, if any remains.
    ///
    /// Times within a relative `1e-12` of a checkpoint count as having
    /// reached it, so a run resumed from checkpoint `i` continues with
    /// `i + 1`.
    pub fn next_after(&self, time: f64) -> Option<usize> {
        let slack = 1e-12 * self.end_time.abs().max(1.0);
        (1..=self.count).find(|&i| self.time_at(i) > time + slack)
    }

    /// All checkpoint times including t = 0.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.count).map(|i| self.time_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_spacing() {
        let schedule = CheckpointSchedule::new(10.0, 4);
        let times: Vec<f64> = schedule.times().collect();
        assert_eq!(times, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(schedule.time_at(4), schedule.end_time());
    }

    #[test]
    fn test_next_after() {
        let schedule = CheckpointSchedule::new(1.0, 5);
        assert_eq!(schedule.next_after(0.0), Some(1));
        assert_eq!(schedule.next_after(0.35), Some(2));
        assert_eq!(schedule.next_after(schedule.time_at(3)), Some(4));
        assert_eq!(schedule.next_after(1.0), None);
    }

    #[test]
    fn test_zero_count_clamped() {
        let schedule = CheckpointSchedule::new(3.0, 0);
        assert_eq!(schedule.count(), 1);
        assert_eq!(schedule.time_at(1), 3.0);
    }
}
