//! The local record store.
//!
//! Every collection lives as one JSON array under its own key, and every
//! operation is a whole-collection read, an in-memory edit and a
//! whole-collection write. Reads never fail from the caller's point of view:
//! a missing or unreadable collection is logged and treated as empty.
//! Updates log and swallow write failures. Creates and session writes
//! return their errors so the caller can report them.

use chrono::Utc;
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::config::StoreConfig;
use crate::local_db_state::AppDbState;
use crate::models::{
    Agent, AgentPatch, Application, ApplicationPatch, AuthState, BusinessMetrics, Campaign,
    JobPosting, JobPostingPatch, NewApplication, NewJobPosting, TrainingModule, User,
};
use crate::queries::{sort_modules, TrainingProgress};
use crate::schema::{Patchable, Record, StoreKey};
use crate::seed;

pub struct RecordStore {
    db: AppDbState,
    config: StoreConfig,
}

impl RecordStore {
    pub fn open(config: StoreConfig) -> Result<Self, AppResponse> {
        config.validate()?;
        let db = AppDbState::init(&config)?;
        let store = Self { db, config };

        if store.config.seed_on_open {
            store.seed()?;
        }

        info!("Record store opened at {} (namespace {})", store.db.path().display(), store.config.namespace);
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn key(&self, key: StoreKey) -> String {
        key.full_key(&self.config.namespace)
    }

    /// Reads a collection. A missing key is an empty collection.
    pub(crate) fn load<T: Record>(&self) -> Result<Vec<T>, AppResponse> {
        match self.db.get(&self.key(T::COLLECTION.key()))? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrites a whole collection.
    pub(crate) fn save<T: Record>(&self, records: &[T]) -> Result<(), AppResponse> {
        let json = serde_json::to_string(records)?;
        self.db.put(&self.key(T::COLLECTION.key()), &json)
    }

    fn seed_key<T: Serialize + ?Sized>(&self, key: StoreKey, records: &T) -> Result<bool, AppResponse> {
        let json = serde_json::to_string(records)?;
        let written = self.db.put_if_absent(&self.key(key), &json)?;
        if written {
            debug!("Seeded {}", key.suffix());
        }
        Ok(written)
    }

    /// Writes the mock dataset into every collection whose key is absent.
    /// Existing collections, including empty ones, are left untouched.
    /// Returns how many collections were written.
    pub fn seed(&self) -> Result<usize, AppResponse> {
        let now = Utc::now();
        let written = [
            self.seed_key(StoreKey::Agents, &seed::agents(now))?,
            self.seed_key(StoreKey::JobPostings, &seed::job_postings(now))?,
            self.seed_key(StoreKey::Applications, &seed::applications(now))?,
            self.seed_key(StoreKey::TrainingModules, &seed::training_modules())?,
            self.seed_key(StoreKey::Campaigns, &seed::campaigns())?,
        ]
        .iter()
        .filter(|w| **w)
        .count();

        if written > 0 {
            info!("Seeded {written} collection(s) with mock data");
        }
        Ok(written)
    }

    pub fn list<T: Record>(&self) -> Vec<T> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                error!("Error reading {}: {e}", T::COLLECTION);
                Vec::new()
            }
        }
    }

    pub fn get_by_id<T: Record>(&self, id: &str) -> Option<T> {
        self.list::<T>().into_iter().find(|r| r.id() == id)
    }

    /// Shallow-merges `patch` into the record with `id` and persists the
    /// collection. A missing id writes nothing. Returns the updated record,
    /// or `None` when the id is unknown or the write failed.
    pub fn update<T: Patchable>(&self, id: &str, patch: T::Patch) -> Option<T> {
        match self.try_update::<T>(id, patch) {
            Ok(updated) => updated,
            Err(e) => {
                error!("Error updating {} record {id}: {e}", T::COLLECTION);
                None
            }
        }
    }

    fn try_update<T: Patchable>(&self, id: &str, patch: T::Patch) -> Result<Option<T>, AppResponse> {
        let mut records = self.load::<T>()?;
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            debug!("No {} record with id {id}; update skipped", T::COLLECTION);
            return Ok(None);
        };

        record.apply(patch);
        let updated = record.clone();
        self.save(&records)?;
        Ok(Some(updated))
    }

    pub fn agents(&self) -> Vec<Agent> {
        self.list()
    }

    pub fn agent(&self, id: &str) -> Option<Agent> {
        self.get_by_id(id)
    }

    pub fn update_agent(&self, id: &str, patch: AgentPatch) -> Option<Agent> {
        self.update(id, patch)
    }

    pub fn job_postings(&self) -> Vec<JobPosting> {
        self.list()
    }

    pub fn job_posting(&self, id: &str) -> Option<JobPosting> {
        self.get_by_id(id)
    }

    pub fn update_job_posting(&self, id: &str, patch: JobPostingPatch) -> Option<JobPosting> {
        self.update(id, patch)
    }

    /// Validates the draft, assigns an id and creation time, and stores the
    /// posting at the front of the collection.
    pub fn create_job_posting(&self, draft: NewJobPosting) -> Result<JobPosting, AppResponse> {
        let draft = draft.normalized()?;
        let mut postings = self.load::<JobPosting>().map_err(|e| {
            error!("Error creating job posting: {e}");
            e
        })?;

        let posting = draft.into_posting(generate_id(), Utc::now());
        postings.insert(0, posting.clone());
        self.save(&postings).map_err(|e| {
            error!("Error creating job posting: {e}");
            e
        })?;

        info!("Created job posting {} ({})", posting.id, posting.title);
        Ok(posting)
    }

    pub fn applications(&self) -> Vec<Application> {
        self.list()
    }

    pub fn application(&self, id: &str) -> Option<Application> {
        self.get_by_id(id)
    }

    pub fn applications_for_job(&self, job_id: &str) -> Vec<Application> {
        self.applications()
            .into_iter()
            .filter(|a| a.job_id == job_id)
            .collect()
    }

    /// Always stamps `updatedAt`, whether or not the patch changes anything.
    pub fn update_application(&self, id: &str, patch: ApplicationPatch) -> Option<Application> {
        self.update(id, patch)
    }

    /// Stores a new pending application at the front of the collection,
    /// then bumps `applicationsCount` on the posting it references.
    ///
    /// The two collections are committed separately. If the second write
    /// fails the application stays stored, the count is left behind and the
    /// error is returned. No posting with `jobId`, or unreadable postings,
    /// means no second write.
    pub fn create_application(&self, draft: NewApplication) -> Result<Application, AppResponse> {
        let mut applications = self.load::<Application>().map_err(|e| {
            error!("Error reading applications: {e}");
            e
        })?;
        let application = draft.into_application(generate_id(), Utc::now());
        applications.insert(0, application.clone());
        self.save(&applications).map_err(|e| {
            error!("Error creating application: {e}");
            e
        })?;

        let mut postings = match self.load::<JobPosting>() {
            Ok(postings) => postings,
            Err(e) => {
                error!(
                    "Application {} stored but job postings unreadable, applicationsCount not updated: {e}",
                    application.id
                );
                return Ok(application);
            }
        };
        match postings.iter_mut().find(|p| p.id == application.job_id) {
            Some(posting) => {
                posting.applications_count += 1;
                self.save(&postings).map_err(|e| {
                    error!(
                        "Application {} stored but applicationsCount of {} not updated: {e}",
                        application.id, application.job_id
                    );
                    e
                })?;
            }
            None => warn!(
                "Application {} references unknown job posting {}",
                application.id, application.job_id
            ),
        }

        info!("Created application {} for job {}", application.id, application.job_id);
        Ok(application)
    }

    /// Training modules in display order.
    pub fn training_modules(&self) -> Vec<TrainingModule> {
        sort_modules(self.list())
    }

    pub fn training_module(&self, id: &str) -> Option<TrainingModule> {
        self.get_by_id(id)
    }

    pub fn training_progress(&self) -> TrainingProgress {
        TrainingProgress::from_modules(&self.list::<TrainingModule>())
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        self.list()
    }

    pub fn campaign(&self, id: &str) -> Option<Campaign> {
        self.get_by_id(id)
    }

    /// Dashboard metrics. Any read failure yields the all-zero record.
    pub fn metrics(&self) -> BusinessMetrics {
        let loaded = self.load::<Agent>().and_then(|agents| {
            let applications = self.load::<Application>()?;
            let campaigns = self.load::<Campaign>()?;
            Ok((agents, applications, campaigns))
        });

        match loaded {
            Ok((agents, applications, campaigns)) => {
                BusinessMetrics::from_records(&agents, &applications, &campaigns)
            }
            Err(e) => {
                error!("Error computing metrics: {e}");
                BusinessMetrics::default()
            }
        }
    }

    /// The persisted session, or a signed-out state when none can be read.
    pub fn auth(&self) -> AuthState {
        let loaded = self
            .db
            .get(&self.key(StoreKey::Auth))
            .and_then(|json| match json {
                Some(json) => Ok(serde_json::from_str(&json)?),
                None => Ok(AuthState::signed_out()),
            });

        match loaded {
            Ok(state) => state,
            Err(e) => {
                error!("Error reading auth state: {e}");
                AuthState::signed_out()
            }
        }
    }

    fn write_auth(&self, state: &AuthState) -> Result<(), AppResponse> {
        let json = serde_json::to_string(state)?;
        self.db.put(&self.key(StoreKey::Auth), &json)
    }

    pub fn login(&self, user: User) -> Result<AuthState, AppResponse> {
        let state = AuthState::signed_in(user);
        self.write_auth(&state).map_err(|e| {
            error!("Error logging in: {e}");
            e
        })?;
        Ok(state)
    }

    pub fn logout(&self) -> Result<(), AppResponse> {
        self.write_auth(&AuthState::signed_out()).map_err(|e| {
            error!("Error logging out: {e}");
            e
        })
    }

    /// Removes every key of the namespace. Returns how many existed.
    pub fn clear_all(&self) -> Result<usize, AppResponse> {
        let keys: Vec<String> = StoreKey::ALL.iter().map(|k| self.key(*k)).collect();
        let removed = self.db.remove_keys(&keys)?;
        info!("Cleared {removed} key(s) from namespace {}", self.config.namespace);
        Ok(removed)
    }

    pub fn close(self) -> Result<(), AppResponse> {
        self.db.close_database()
    }

    #[cfg(test)]
    pub(crate) fn raw(&self, key: StoreKey) -> Option<String> {
        self.db.get(&self.key(key)).ok().flatten()
    }

    #[cfg(test)]
    pub(crate) fn put_raw(&self, key: StoreKey, value: &str) {
        self.db.put(&self.key(key), value).expect("raw write");
    }
}

/// Base-36 millisecond timestamp followed by a base-36 random suffix.
/// Uniqueness is probabilistic; nothing checks for collisions.
pub fn generate_id() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    format!("{}{}", to_base36(millis), to_base36(rand::random::<u64>()))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_295), "zz");
    }

    #[test]
    fn generated_ids_are_distinct_and_alphanumeric() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(a.len() > 8);
    }
}
