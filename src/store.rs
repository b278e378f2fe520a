use crate::models::Workout;

/// Ordered, append-only list of the session's workouts.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Workout>,
    revision: u64,
}

impl RecordStore {
    pub fn from_records(records: Vec<Workout>) -> Self {
        RecordStore { records, revision: 0 }
    }

    /// Appends to the end and bumps the revision so views know to refresh.
    pub fn add(&mut self, record: Workout) {
        self.records.push(record);
        self.revision += 1;
    }

    pub fn all(&self) -> &[Workout] {
        &self.records
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
