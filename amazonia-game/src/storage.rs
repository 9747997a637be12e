//! In-memory save store.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::rc::Rc;

use crate::SaveStore;
use crate::record::GameRecord;

/// Save store backed by a shared map; clones see the same saves.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    saves: Rc<RefCell<BTreeMap<String, GameRecord>>>,
}

impl MemorySaveStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.saves.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saves.borrow().is_empty()
    }
}

impl SaveStore for MemorySaveStore {
    type Error = Infallible;

    fn load(&self, name: &str) -> Result<Option<GameRecord>, Self::Error> {
        Ok(self.saves.borrow().get(name).cloned())
    }

    fn save(&self, record: &GameRecord) -> Result<(), Self::Error> {
        self.saves
            .borrow_mut()
            .insert(record.name().to_string(), record.clone());
        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.saves.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::GameManager;
    use crate::player::Player;
    use crate::player_class::PlayerClass;

    fn record(name: &str, days: u32) -> GameRecord {
        let player = Player::create(name, PlayerClass::Fisher).unwrap();
        GameManager::with_clock(player, 8.0, days).unwrap().to_record()
    }

    #[test]
    fn saving_overwrites_only_the_named_entry() {
        let store = MemorySaveStore::new();
        store.save(&record("Iara", 1)).unwrap();
        store.save(&record("Tupa", 2)).unwrap();
        store.save(&record("Iara", 5)).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.load("Iara").unwrap().unwrap().days_survived, 5);
        assert_eq!(store.load("Tupa").unwrap().unwrap().days_survived, 2);
        assert_eq!(store.list_names().unwrap(), vec!["Iara", "Tupa"]);
        assert!(store.load("Nobody").unwrap().is_none());
    }
}
