//! Test Note Store
//!
//! A minimal stand-in for the knowledge base's note store:
//! - Notes keyed by id, each carrying a `SchedulingState`
//! - A clock the test moves forward explicitly
//! - JSON snapshots in a temporary directory, restored on demand

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use learnbase_core::{
    FixedClock, Rating, ReviewMode, ReviewResult, ReviewStats, Scheduler, SchedulerConfig,
    SchedulingState,
};
use tempfile::TempDir;

/// In-memory note store for driving review workflows
///
/// # Example
///
/// ```rust,ignore
/// let mut store = TestNoteStore::new_temp();
/// store.add_note("rust-ownership", ReviewMode::Adaptive);
///
/// store.review("rust-ownership", Rating::Good);
/// store.advance_days(1);
/// assert_eq!(store.due_notes(), vec!["rust-ownership"]);
/// ```
pub struct TestNoteStore {
    notes: BTreeMap<String, SchedulingState>,
    config: SchedulerConfig,
    now: DateTime<Utc>,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: TempDir,
    snapshot_path: PathBuf,
}

impl TestNoteStore {
    /// Empty store on the default configuration, starting at a fixed instant
    pub fn new_temp() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Empty store on a custom configuration
    pub fn with_config(config: SchedulerConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let snapshot_path = temp_dir.path().join("notes.json");

        Self {
            notes: BTreeMap::new(),
            config,
            now: crate::TestDataFactory::epoch(),
            _temp_dir: temp_dir,
            snapshot_path,
        }
    }

    /// Current instant of the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Scheduler reading the store's clock
    pub fn scheduler(&self) -> Scheduler<FixedClock> {
        Scheduler::with_clock(self.config.clone(), FixedClock::new(self.now))
    }

    pub fn advance_days(&mut self, days: i64) {
        self.now += Duration::days(days);
    }

    pub fn advance_to(&mut self, at: DateTime<Utc>) {
        self.now = at;
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    // ========================================================================
    // NOTES
    // ========================================================================

    /// Put a note under review tracking
    pub fn add_note(&mut self, id: &str, mode: ReviewMode) -> SchedulingState {
        let state = self.scheduler().new_state(mode);
        self.notes.insert(id.to_string(), state.clone());
        state
    }

    /// Insert a state as-is
    pub fn insert(&mut self, id: &str, state: SchedulingState) {
        self.notes.insert(id.to_string(), state);
    }

    pub fn get(&self, id: &str) -> Option<&SchedulingState> {
        self.notes.get(id)
    }

    /// Read-modify-write one note; `None` if the id is unknown
    pub fn review(&mut self, id: &str, rating: Rating) -> Option<ReviewResult> {
        let scheduler = self.scheduler();
        let state = self.notes.get_mut(id)?;
        let result = scheduler.review(state, rating);
        *state = result.state.clone();
        Some(result)
    }

    /// Ids of notes due at the current instant, in id order
    pub fn due_notes(&self) -> Vec<String> {
        self.notes
            .iter()
            .filter(|(_, state)| state.is_due(self.now))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn stats(&self) -> ReviewStats {
        ReviewStats::collect(self.notes.values(), self.now)
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    /// Write every note to the snapshot file as JSON
    pub fn save_snapshot(&self) -> PathBuf {
        let json = serde_json::to_string_pretty(&self.notes).expect("Failed to serialize notes");
        std::fs::write(&self.snapshot_path, json).expect("Failed to write snapshot");
        self.snapshot_path.clone()
    }

    /// Replace every note with the snapshot file's contents
    pub fn restore_snapshot(&mut self) {
        let json = std::fs::read_to_string(&self.snapshot_path).expect("Failed to read snapshot");
        self.notes = serde_json::from_str(&json).expect("Failed to parse snapshot");
    }
}
