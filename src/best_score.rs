//! Best score tracking
//!
//! A single integer persisted as a base-10 string. Read once at startup,
//! written only when a run beats it.

use crate::persistence::{KeyValueStore, StorageError};

/// Highest score achieved on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "senacFlappyHighScore";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// True iff `score` would become the new best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Take `score` if it beats the current best. Returns whether it did.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        true
    }

    /// Read the stored value; `None` if nothing was saved yet
    pub fn try_load(store: &dyn KeyValueStore) -> Result<Option<Self>, StorageError> {
        let Some(raw) = store.get(Self::STORAGE_KEY)? else {
            return Ok(None);
        };
        raw.trim()
            .parse::<u64>()
            .map(|value| Some(Self { value }))
            .map_err(|_| StorageError::Corrupt {
                key: Self::STORAGE_KEY.to_string(),
                value: raw,
            })
    }

    /// Load the best score, falling back to zero on any problem
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match Self::try_load(store) {
            Ok(Some(best)) => {
                log::info!("Loaded best score {}", best.value);
                best
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored best score: {}", e);
                Self::default()
            }
        }
    }

    /// Persist the best score; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.value.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", self.value),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_record_requires_strictly_greater() {
        let mut best = BestScore::new(5);
        assert!(!best.record(3));
        assert!(!best.record(5));
        assert_eq!(best.value, 5);
        assert!(best.record(6));
        assert_eq!(best.value, 6);
    }

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(BestScore::load(&store), BestScore::new(0));
    }

    #[test]
    fn test_save_writes_base10() {
        let mut store = MemoryStore::new();
        BestScore::new(17).save(&mut store);
        assert_eq!(
            store.get(BestScore::STORAGE_KEY).unwrap().as_deref(),
            Some("17")
        );
        assert_eq!(BestScore::load(&store).value, 17);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_zero() {
        let mut store = MemoryStore::new();
        store.set(BestScore::STORAGE_KEY, "lots").unwrap();
        assert!(matches!(
            BestScore::try_load(&store),
            Err(StorageError::Corrupt { .. })
        ));
        assert_eq!(BestScore::load(&store).value, 0);
    }

    proptest! {
        #[test]
        fn prop_record_keeps_maximum(start in 0u64..1000, score in 0u64..1000) {
            let mut best = BestScore::new(start);
            let updated = best.record(score);
            prop_assert_eq!(updated, score > start);
            prop_assert_eq!(best.value, start.max(score));
        }
    }
}
