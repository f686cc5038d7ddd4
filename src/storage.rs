use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;
use web_sys::Storage;

use crate::GUESS_LOCAL_STORAGE_PREFIX;

#[derive(Error, Hash, Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    #[error("could not record the guess for post {0}")]
    WriteFailed(String),
}

// Guesses accepted for anonymous viewers are kept on the device so the post
// stays solved across reloads. Reads treat a broken storage as empty; writes
// report their failure instead.
pub trait GuessStore {
    fn recorded_guess(&self, post_id: &str) -> Option<String>;
    fn record_guess(&self, post_id: &str, guess: &str) -> Result<(), StorageError>;
}

pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    pub fn new(storage: Storage) -> Self {
        BrowserStore { storage }
    }

    fn key(post_id: &str) -> String {
        GUESS_LOCAL_STORAGE_PREFIX.to_owned() + post_id
    }
}

impl GuessStore for BrowserStore {
    fn recorded_guess(&self, post_id: &str) -> Option<String> {
        self.storage.get_item(&Self::key(post_id)).ok().flatten()
    }

    fn record_guess(&self, post_id: &str, guess: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(&Self::key(post_id), guess)
            .map_err(|_err| StorageError::WriteFailed(post_id.to_owned()))
    }
}

// Fallback when the browser blocks local storage; guesses then last for the
// page session only. Also the store the integration tests run against.
pub struct MemoryStore {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            records: RefCell::new(HashMap::new()),
        }
    }
}

impl GuessStore for MemoryStore {
    fn recorded_guess(&self, post_id: &str) -> Option<String> {
        self.records.borrow().get(post_id).cloned()
    }

    fn record_guess(&self, post_id: &str, guess: &str) -> Result<(), StorageError> {
        self.records
            .borrow_mut()
            .insert(post_id.to_owned(), guess.to_owned());
        Ok(())
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn browser_store_round_trip() {
        let storage = crate::get_local_storage().unwrap();
        storage.clear().unwrap();

        let store = BrowserStore::new(storage.clone());
        assert_eq!(store.recorded_guess("p1"), None);

        store.record_guess("p1", "dog").unwrap();
        assert_eq!(store.recorded_guess("p1"), Some("dog".into()));
        assert_eq!(
            storage.get_item(&BrowserStore::key("p1")).unwrap(),
            Some("dog".into())
        );
    }
}
