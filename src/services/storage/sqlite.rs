use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use super::{SlotStore, StoreError};
use crate::db::kv;

pub struct SqliteSlotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSlotStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("database lock poisoned".to_string()))
    }
}

impl SlotStore for SqliteSlotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        Ok(kv::get_slot(&conn, key)?)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        kv::put_slot(&conn, key, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn store() -> SqliteSlotStore {
        let conn = db::init_db(":memory:").unwrap();
        SqliteSlotStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_save_and_load() {
        let store = store();
        assert_eq!(store.load("tuneSpaceBookings").unwrap(), None);

        store.save("tuneSpaceBookings", "[]").unwrap();
        store.save("tuneSpaceBookings", r#"[{"id":"TN1"}]"#).unwrap();
        assert_eq!(
            store.load("tuneSpaceBookings").unwrap().as_deref(),
            Some(r#"[{"id":"TN1"}]"#)
        );
    }

    #[test]
    fn test_poisoned_lock_is_unavailable() {
        let store = store();
        let conn = Arc::clone(&store.conn);
        let _ = std::thread::spawn(move || {
            let _guard = conn.lock().unwrap();
            panic!("poison");
        })
        .join();

        assert!(matches!(store.load("k"), Err(StoreError::Unavailable(_))));
    }
}
