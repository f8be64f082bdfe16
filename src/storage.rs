use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreResult;
use crate::models::cart::CartSnapshot;
use crate::models::{Order, User};

pub const KEY_ACCOUNT: &str = "account";
pub const KEY_SESSION: &str = "session";
pub const KEY_CART: &str = "cart";
pub const KEY_ORDER_HISTORY: &str = "order_history";

const KNOWN_KEYS: [&str; 4] = [KEY_ACCOUNT, KEY_SESSION, KEY_CART, KEY_ORDER_HISTORY];

/// File-backed JSON key-value store, one prefixed file per key. Errors
/// stop at this boundary: writes report a success flag, reads report an
/// absent value, and both leave a warning in the log. In-memory state
/// stays authoritative for the session when a write fails.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
    prefix: String,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.prefix, key))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_vec_pretty(value)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| fs::write(self.path_for(key), bytes).map_err(Into::into));
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key, error = %err, "storage write failed");
                false
            }
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(key, error = %err, "storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "storage value is not valid JSON");
                None
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => true,
            Err(err) if err.kind() == ErrorKind::NotFound => true,
            Err(err) => {
                tracing::warn!(key, error = %err, "storage remove failed");
                false
            }
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Removes every key this application owns.
    pub fn clear(&self) {
        for key in KNOWN_KEYS {
            self.remove(key);
        }
    }

    pub fn save_cart(&self, snapshot: &CartSnapshot) -> bool {
        self.set(KEY_CART, snapshot)
    }

    pub fn load_cart(&self) -> Option<CartSnapshot> {
        self.get(KEY_CART)
    }

    pub fn save_account(&self, user: &User) -> bool {
        self.set(KEY_ACCOUNT, user)
    }

    pub fn load_account(&self) -> Option<User> {
        self.get(KEY_ACCOUNT)
    }

    /// The session holds only the signed-in email; the account record
    /// is the source of truth for the rest.
    pub fn save_session(&self, email: &str) -> bool {
        self.set(KEY_SESSION, &email)
    }

    pub fn load_session(&self) -> Option<String> {
        self.get(KEY_SESSION)
    }

    pub fn remove_session(&self) -> bool {
        self.remove(KEY_SESSION)
    }

    pub fn order_history(&self) -> Vec<Order> {
        self.get(KEY_ORDER_HISTORY).unwrap_or_default()
    }

    pub fn save_order_history(&self, orders: &[Order]) -> bool {
        self.set(KEY_ORDER_HISTORY, &orders)
    }

    /// Read-append-write; this store has a single writer by convention.
    pub fn push_order(&self, order: &Order) -> bool {
        let mut history = self.order_history();
        history.push(order.clone());
        self.save_order_history(&history)
    }
}
