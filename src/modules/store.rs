use std::collections::HashMap;
use std::env;
use std::sync::Mutex;

use dotenvy::dotenv;
use log::warn;
use redis::Commands;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const USERS_KEY: &str = "boxboxd:users";
pub const RATINGS_KEY: &str = "boxboxd:ratings";
pub const CURRENT_USER_KEY: &str = "boxboxd:current-user";

/// # key value backend
/// seam between the store and the persistence medium. a failing medium
/// reads as empty and writes as a no-op, it never raises.
pub trait KvStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

pub struct RedisStorage {
    client: redis::Client,
}

impl RedisStorage {
    pub fn from_env() -> RedisStorage {
        dotenv().ok();

        let redis_url = env::var("REDIS_URL").expect("REDIS_URL must be set");
        let client = redis::Client::open(redis_url).expect("REDIS_URL is not a valid redis url");

        RedisStorage { client }
    }
}

impl KvStorage for RedisStorage {
    fn get(&self, key: &str) -> Option<String> {
        let mut conn = match self.client.get_connection() {
            Ok(conn) => conn,
            Err(error) => {
                warn!(target: "store", "redis unreachable, reading {} as empty: {}", key, error);
                return None;
            }
        };

        match conn.get::<_, Option<String>>(key) {
            Ok(value) => value,
            Err(error) => {
                warn!(target: "store", "failed reading {}: {}", key, error);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let mut conn = match self.client.get_connection() {
            Ok(conn) => conn,
            Err(error) => {
                warn!(target: "store", "redis unreachable, dropping write to {}: {}", key, error);
                return false;
            }
        };

        match conn.set::<_, _, ()>(key, value) {
            Ok(()) => true,
            Err(error) => {
                warn!(target: "store", "failed writing {}: {}", key, error);
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        let mut conn = match self.client.get_connection() {
            Ok(conn) => conn,
            Err(error) => {
                warn!(target: "store", "redis unreachable, dropping delete of {}: {}", key, error);
                return false;
            }
        };

        match conn.del::<_, ()>(key) {
            Ok(()) => true,
            Err(error) => {
                warn!(target: "store", "failed deleting {}: {}", key, error);
                false
            }
        }
    }
}

pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage {
            data: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> MemoryStorage {
        MemoryStorage::new()
    }
}

impl KvStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.data.lock().unwrap().remove(key);
        true
    }
}

/// # persistent store
/// holds the three named records: the user collection, the rating
/// collection and the current user pointer. every read deserializes the
/// whole record, every write serializes it back wholesale.
pub struct Store {
    backend: Box<dyn KvStorage>,
}

impl Store {
    pub fn from_env() -> Store {
        Store {
            backend: Box::new(RedisStorage::from_env()),
        }
    }

    pub fn in_memory() -> Store {
        Store {
            backend: Box::new(MemoryStorage::new()),
        }
    }

    /// missing or malformed data reads as an empty collection.
    pub(crate) fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Some(raw) => raw,
            None => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(error) => {
                warn!(target: "store", "malformed data under {}, treating as empty: {}", key, error);
                Vec::new()
            }
        }
    }

    pub(crate) fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> bool {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(error) => {
                warn!(target: "store", "could not serialize {}: {}", key, error);
                return false;
            }
        };

        self.backend.set(key, &json)
    }

    pub(crate) fn read_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(target: "store", "malformed data under {}, treating as absent: {}", key, error);
                None
            }
        }
    }

    pub(crate) fn write_record<T: Serialize>(&self, key: &str, record: &T) -> bool {
        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(error) => {
                warn!(target: "store", "could not serialize {}: {}", key, error);
                return false;
            }
        };

        self.backend.set(key, &json)
    }

    pub(crate) fn remove_record(&self, key: &str) -> bool {
        self.backend.remove(key)
    }
}
