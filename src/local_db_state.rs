//! Thin key-value layer over an LMDB environment.
//!
//! Values are UTF-8 JSON strings; the layer knows nothing about what they
//! contain. Each call runs in its own transaction.

use std::path::{Path, PathBuf};

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::config::StoreConfig;

pub struct AppDbState {
    env: Environment,
    db: Database,
    path: PathBuf,
}

impl AppDbState {
    pub fn init(config: &StoreConfig) -> Result<Self, AppResponse> {
        let path = config.path.clone();
        std::fs::create_dir_all(&path)?;

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(config.map_size)
            .set_max_readers(config.max_readers)
            .open(&path)
            .map_err(|e| {
                warn!("Failed to open LMDB environment at {}: {e}", path.display());
                AppResponse::from(e)
            })?;

        let db = env.create_db(None, DatabaseFlags::empty())?;

        info!("LMDB environment ready at {}", path.display());
        Ok(Self { env, db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;
        let value = match txn.get(self.db, &key) {
            Ok(bytes) => Some(std::str::from_utf8(bytes)?.to_owned()),
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        debug!("get {key}: {}", if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    pub fn put(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        debug!("put {key} ({} bytes)", value.len());
        Ok(())
    }

    /// Writes `value` only when `key` is missing. Returns whether it wrote.
    pub fn put_if_absent(&self, key: &str, value: &str) -> Result<bool, AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        match txn.put(self.db, &key, &value, WriteFlags::NO_OVERWRITE) {
            Ok(()) => {
                txn.commit()?;
                Ok(true)
            }
            Err(lmdb::Error::KeyExist) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes every listed key in a single write transaction. Missing keys
    /// are skipped.
    pub fn remove_keys(&self, keys: &[String]) -> Result<usize, AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        let mut removed = 0;
        for key in keys {
            match txn.del(self.db, key, None) {
                Ok(()) => removed += 1,
                Err(lmdb::Error::NotFound) => {}
                Err(e) => return Err(e.into()),
            }
        }
        txn.commit()?;
        Ok(removed)
    }

    pub fn sync(&self) -> Result<(), AppResponse> {
        self.env.sync(true)?;
        Ok(())
    }

    /// Flushes pending writes and releases the environment.
    pub fn close_database(self) -> Result<(), AppResponse> {
        self.sync()?;
        info!("LMDB environment at {} closed", self.path.display());
        Ok(())
    }
}
