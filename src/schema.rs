//! Persisted key layout and the traits tying record types to it.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app_response::AppResponse;

/// Suffix of each persisted key. The full key is `<namespace>/<suffix>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Agents,
    JobPostings,
    Applications,
    TrainingModules,
    Campaigns,
    Auth,
}

impl StoreKey {
    pub const ALL: [StoreKey; 6] = [
        StoreKey::Agents,
        StoreKey::JobPostings,
        StoreKey::Applications,
        StoreKey::TrainingModules,
        StoreKey::Campaigns,
        StoreKey::Auth,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            StoreKey::Agents => "agents",
            StoreKey::JobPostings => "job_postings",
            StoreKey::Applications => "applications",
            StoreKey::TrainingModules => "training_modules",
            StoreKey::Campaigns => "campaigns",
            StoreKey::Auth => "auth",
        }
    }

    pub fn full_key(self, namespace: &str) -> String {
        format!("{namespace}/{}", self.suffix())
    }
}

/// The five array-valued keys, addressable by name from the FFI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Agents,
    JobPostings,
    Applications,
    TrainingModules,
    Campaigns,
}

impl Collection {
    pub fn key(self) -> StoreKey {
        match self {
            Collection::Agents => StoreKey::Agents,
            Collection::JobPostings => StoreKey::JobPostings,
            Collection::Applications => StoreKey::Applications,
            Collection::TrainingModules => StoreKey::TrainingModules,
            Collection::Campaigns => StoreKey::Campaigns,
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key().suffix())
    }
}

impl FromStr for Collection {
    type Err = AppResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agents" => Ok(Collection::Agents),
            "job_postings" => Ok(Collection::JobPostings),
            "applications" => Ok(Collection::Applications),
            "training_modules" => Ok(Collection::TrainingModules),
            "campaigns" => Ok(Collection::Campaigns),
            other => Err(AppResponse::BadRequest(format!("Unknown collection: {other}"))),
        }
    }
}

/// A record type persisted as one JSON array under a fixed key.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// A record type that supports shallow partial updates.
pub trait Patchable: Record {
    type Patch;

    /// Merges every field present in `patch` over `self`.
    fn apply(&mut self, patch: Self::Patch);
}
