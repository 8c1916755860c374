use crate::model::WeatherSnapshot;

/// Most recently resolved snapshot. The display renders only from here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotStore {
    snapshot: WeatherSnapshot,
    loaded: bool,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    /// Whether a real snapshot has replaced the placeholder at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the current snapshot wholesale.
    pub fn publish(&mut self, snapshot: WeatherSnapshot) {
        self.snapshot = snapshot;
        self.loaded = true;
    }
}
