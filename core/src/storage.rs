use core::cell::RefCell;
use core::fmt;
use hashbrown::HashMap;
use std::rc::Rc;

use crate::*;

/// String key-value capability backing anything the game persists.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError>;
}

/// In-memory store, clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.into(), value.into());
        Ok(())
    }
}

/// Cross-game high score, read once and written back only when beaten.
pub struct BestScore {
    store: Box<dyn KeyValueStore>,
    value: Score,
}

impl BestScore {
    pub fn load(store: impl KeyValueStore + 'static) -> Self {
        let value = match store.get(BEST_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring corrupt best score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                log::warn!("Could not read best score: {}", err);
                0
            }
        };
        Self {
            store: Box::new(store),
            value,
        }
    }

    pub fn value(&self) -> Score {
        self.value
    }

    /// Raises the high-water mark to `score`, returns whether it was beaten.
    pub fn record(&mut self, score: Score) -> bool {
        if score <= self.value {
            return false;
        }

        self.value = score;
        if let Err(err) = self.store.set(BEST_SCORE_KEY, &score.to_string()) {
            log::warn!("Could not save best score: {}", err);
        }
        true
    }
}

impl fmt::Debug for BestScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BestScore")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
