use crate::placement::PlacementRecord;

/// Append-only sequence of placements in insertion order
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    records: Vec<PlacementRecord>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: PlacementRecord) {
        log::debug!(
            "Appending placement #{} at ({}, {})",
            self.records.len() + 1,
            record.x(),
            record.y()
        );
        self.records.push(record);
    }

    pub fn all(&self) -> &[PlacementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
