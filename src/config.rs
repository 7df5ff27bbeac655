//! Store configuration.
//!
//! A [`StoreConfig`] tells [`RecordStore::open`](crate::record_store::RecordStore::open)
//! where the LMDB environment lives, how large it may grow and under which
//! key namespace the collections are persisted. It deserializes from the
//! same camelCase JSON the FFI layer accepts, with every field optional:
//!
//! ```json
//! { "path": "vcenter.lmdb", "namespace": "@vcenter", "seedOnOpen": true }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

pub const DEFAULT_NAMESPACE: &str = "@vcenter";
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_READERS: u32 = 126;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Directory holding the LMDB environment. Created when missing.
    pub path: PathBuf,
    /// Prefix of every persisted key, e.g. `@vcenter/agents`.
    pub namespace: String,
    /// Upper bound of the memory map in bytes.
    pub map_size: usize,
    pub max_readers: u32,
    /// Seed the mock dataset right after opening.
    pub seed_on_open: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("vcenter_store.lmdb"),
            namespace: DEFAULT_NAMESPACE.to_string(),
            map_size: DEFAULT_MAP_SIZE,
            max_readers: DEFAULT_MAX_READERS,
            seed_on_open: false,
        }
    }
}

impl StoreConfig {
    /// Config for a store named `name`, stored in `<name>.lmdb`.
    pub fn new(name: &str) -> Self {
        Self {
            path: PathBuf::from(format!("{name}.lmdb")),
            ..Self::default()
        }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn seeded(mut self) -> Self {
        self.seed_on_open = true;
        self
    }

    pub fn validate(&self) -> Result<(), AppResponse> {
        if self.path.as_os_str().is_empty() {
            return Err(AppResponse::ValidationError("Store path must not be empty".to_string()));
        }
        if self.namespace.is_empty() {
            return Err(AppResponse::ValidationError("Namespace must not be empty".to_string()));
        }
        if self.namespace.contains('/') {
            return Err(AppResponse::ValidationError(format!(
                "Namespace '{}' must not contain '/'",
                self.namespace
            )));
        }
        if self.map_size == 0 {
            return Err(AppResponse::ValidationError("mapSize must be greater than zero".to_string()));
        }
        if self.max_readers == 0 {
            return Err(AppResponse::ValidationError("maxReaders must be greater than zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_appends_lmdb_extension() {
        let config = StoreConfig::new("field_office");
        assert_eq!(config.path, PathBuf::from("field_office.lmdb"));
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert!(!config.seed_on_open);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"path":"tmp/store.lmdb","seedOnOpen":true}"#).unwrap();
        assert_eq!(config.path, PathBuf::from("tmp/store.lmdb"));
        assert!(config.seed_on_open);
        assert_eq!(config.map_size, DEFAULT_MAP_SIZE);
        assert_eq!(config.max_readers, DEFAULT_MAX_READERS);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(StoreConfig::default().validate().is_ok());
        assert!(matches!(
            StoreConfig::default().with_namespace("").validate(),
            Err(AppResponse::ValidationError(_))
        ));
        assert!(matches!(
            StoreConfig::default().with_namespace("@a/b").validate(),
            Err(AppResponse::ValidationError(_))
        ));
        assert!(matches!(
            StoreConfig::default().with_map_size(0).validate(),
            Err(AppResponse::ValidationError(_))
        ));
        assert!(matches!(
            StoreConfig::at_path("").validate(),
            Err(AppResponse::ValidationError(_))
        ));
    }
}
