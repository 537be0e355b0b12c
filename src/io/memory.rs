//! In-memory checkpoint store.

use crate::solver::GridState;

use super::{CheckpointReader, IoError, OutputWriter, Snapshot};

/// Keeps every written checkpoint as a [`Snapshot`].
///
/// Serves as the checkpoint source when resuming a run and as the output
/// sink in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryWriter {
    snapshots: Vec<Snapshot>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Times of all stored snapshots.
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.time).collect()
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl OutputWriter for MemoryWriter {
    /// Store a snapshot without a step count; its `iteration` is 0.
    ///
    /// Use [`OutputWriter::write_checkpoint`] to record the iteration.
    fn write_time_step(&mut self, state: &GridState, time: f64) -> Result<(), IoError> {
        self.write_checkpoint(state, time, 0)
    }

    fn write_checkpoint(
        &mut self,
        state: &GridState,
        time: f64,
        iteration: usize,
    ) -> Result<(), IoError> {
        self.snapshots.push(Snapshot::capture(state, time, iteration));
        Ok(())
    }
}

impl CheckpointReader for MemoryWriter {
    fn read_latest(&self) -> Result<Snapshot, IoError> {
        self.latest().cloned().ok_or(IoError::NoCheckpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_checkpoints() {
        let mut state = GridState::new(2, 2, 1.0, 1.0).unwrap();
        let mut writer = MemoryWriter::new();
        assert!(matches!(writer.read_latest(), Err(IoError::NoCheckpoint)));

        writer.write_checkpoint(&state, 0.0, 0).unwrap();
        state.h_mut().fill(3.0);
        writer.write_checkpoint(&state, 0.5, 7).unwrap();

        assert_eq!(writer.len(), 2);
        assert_eq!(writer.times(), vec![0.0, 0.5]);
        let latest = writer.read_latest().unwrap();
        assert_eq!(latest.iteration, 7);
        assert_eq!(latest.water_sum(), 12.0);
        assert_eq!(writer.snapshots()[0].water_sum(), 0.0);
    }

    #[test]
    fn test_write_time_step_has_no_iteration() {
        let state = GridState::new(1, 1, 1.0, 1.0).unwrap();
        let mut writer = MemoryWriter::new();
        writer.write_checkpoint(&state, 1.0, 4).unwrap();
        writer.write_time_step(&state, 2.0).unwrap();

        let iterations: Vec<usize> = writer.snapshots().iter().map(|s| s.iteration).collect();
        assert_eq!(iterations, vec![4, 0]);
        assert_eq!(writer.times(), vec![1.0, 2.0]);
    }
}
