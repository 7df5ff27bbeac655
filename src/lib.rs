//! # vcenter_store
//!
//! On-device record store for a virtual call-center management app: agent
//! roster, job postings and applications, training modules, campaigns, the
//! signed-in session and a derived dashboard snapshot. Data lives in an LMDB
//! environment as one JSON document per collection, seeded with a fixed mock
//! dataset on first launch.
//!
//! The crate is used directly from Rust through [`RecordStore`] and
//! [`Session`], or from a mobile host through the C-compatible functions
//! below, which take and return NUL-terminated JSON strings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vcenter_store::{RecordStore, StoreConfig};
//! use vcenter_store::models::{AgentPatch, AgentStatus};
//!
//! let store = RecordStore::open(StoreConfig::new("vcenter").seeded())?;
//! let metrics = store.metrics();
//! println!("{} agents active", metrics.active_agents);
//!
//! store.update_agent("4", AgentPatch::status(AgentStatus::Available));
//! # Ok::<(), vcenter_store::AppResponse>(())
//! ```
//!
//! ## FFI Functions
//!
//! Every function returning `*const c_char` replies with a JSON-encoded
//! [`AppResponse`]; an `Ok` reply carries its payload as a JSON string.
//! Replies must be released with [`free_response`].
//!
//! - [`create_store`] / [`create_store_with_config`] - open a store
//! - [`seed_store`] - write the mock dataset into absent collections
//! - [`list_records`] / [`get_record`] - read a collection or one record
//! - [`create_job_posting`] / [`create_application`] - create records
//! - [`update_record`] - partial update of an agent, posting or application
//! - [`get_applications_for_job`] - applications of one posting
//! - [`get_metrics`] / [`get_training_progress`] - derived aggregates
//! - [`get_auth`] / [`login_user`] / [`logout_user`] - session record
//! - [`clear_all`] - remove every key of the store's namespace
//! - [`close_store`] - flush and release the store

pub mod app_response;
pub mod config;
pub mod local_db_state;
pub mod models;
pub mod queries;
pub mod record_store;
pub mod schema;
pub mod seed;
pub mod session;

pub use crate::app_response::AppResponse;
pub use crate::config::StoreConfig;
pub use crate::record_store::RecordStore;
pub use crate::session::Session;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::models::{Agent, Application, JobPosting, NewApplication, NewJobPosting, User};
use crate::schema::{Collection, Patchable, Record};

/// Opens (creating if needed) the store `<name>.lmdb` with default settings.
///
/// Returns a pointer to the [`RecordStore`], or null on failure. Release it
/// with [`close_store`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use vcenter_store::create_store;
///
/// let name = CString::new("vcenter").unwrap();
/// let store = create_store(name.as_ptr());
/// assert!(!store.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(name: *const c_char) -> *mut RecordStore {
    let name = match c_ptr_to_str(name) {
        Some(name) => name,
        None => {
            warn!("Null or non UTF-8 name passed to create_store");
            return std::ptr::null_mut();
        }
    };

    open_store(StoreConfig::new(name))
}

/// Opens a store from a JSON [`StoreConfig`], e.g.
/// `{"path":"data/vcenter.lmdb","seedOnOpen":true}`.
///
/// Returns null when the JSON is malformed, the config is invalid or the
/// environment can't be opened.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store_with_config(config_json: *const c_char) -> *mut RecordStore {
    let json = match c_ptr_to_str(config_json) {
        Some(json) => json,
        None => {
            warn!("Null or non UTF-8 config passed to create_store_with_config");
            return std::ptr::null_mut();
        }
    };

    match serde_json::from_str::<StoreConfig>(json) {
        Ok(config) => open_store(config),
        Err(e) => {
            warn!("Invalid store config: {e}");
            std::ptr::null_mut()
        }
    }
}

fn open_store(config: StoreConfig) -> *mut RecordStore {
    let path = config.path.display().to_string();
    match RecordStore::open(config) {
        Ok(store) => {
            info!("✅ Store opened at {path}");
            Box::into_raw(Box::new(store))
        }
        Err(e) => {
            warn!("❌ Failed to open store at {path}: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Seeds every absent collection. Replies with the number written.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn seed_store(state: *mut RecordStore) -> *const c_char {
    let store = match state_ref(state, "seed_store") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    match store.seed() {
        Ok(written) => response_to_c_string(&AppResponse::json(&written)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Replies with the whole collection as a JSON array. `collection` is one of
/// `agents`, `job_postings`, `applications`, `training_modules`, `campaigns`.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use vcenter_store::{create_store, list_records};
///
/// let name = CString::new("vcenter").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let collection = CString::new("agents").unwrap();
/// let reply = list_records(store, collection.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn list_records(state: *mut RecordStore, collection: *const c_char) -> *const c_char {
    let store = match state_ref(state, "list_records") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    let response = match collection {
        Collection::Agents => AppResponse::json(&store.agents()),
        Collection::JobPostings => AppResponse::json(&store.job_postings()),
        Collection::Applications => AppResponse::json(&store.applications()),
        Collection::TrainingModules => AppResponse::json(&store.training_modules()),
        Collection::Campaigns => AppResponse::json(&store.campaigns()),
    };
    response_to_c_string(&response)
}

/// Replies with a single record, or `NotFound`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_record(
    state: *mut RecordStore,
    collection: *const c_char,
    id: *const c_char,
) -> *const c_char {
    let store = match state_ref(state, "get_record") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    let found = match collection {
        Collection::Agents => store.agent(&id).map(|r| AppResponse::json(&r)),
        Collection::JobPostings => store.job_posting(&id).map(|r| AppResponse::json(&r)),
        Collection::Applications => store.application(&id).map(|r| AppResponse::json(&r)),
        Collection::TrainingModules => store.training_module(&id).map(|r| AppResponse::json(&r)),
        Collection::Campaigns => store.campaign(&id).map(|r| AppResponse::json(&r)),
    };

    let response = found.unwrap_or_else(|| {
        AppResponse::NotFound(format!("No {collection} record found with id: {id}"))
    });
    response_to_c_string(&response)
}

/// Creates a job posting from a JSON [`NewJobPosting`] and replies with the
/// stored posting.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use vcenter_store::{create_store, create_job_posting};
///
/// let name = CString::new("vcenter").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let json = CString::new(
///     r#"{"title":"Team Lead","description":"Lead a pod","department":"Sales","type":"full-time","salary":"$22/hour"}"#,
/// ).unwrap();
/// let reply = create_job_posting(store, json.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_job_posting(state: *mut RecordStore, json_ptr: *const c_char) -> *const c_char {
    let store = match state_ref(state, "create_job_posting") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    let draft: NewJobPosting = match parse_json(json_ptr) {
        Ok(draft) => draft,
        Err(error_ptr) => return error_ptr,
    };

    match store.create_job_posting(draft) {
        Ok(posting) => response_to_c_string(&AppResponse::json(&posting)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Creates an application from a JSON [`NewApplication`] and replies with
/// the stored application.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_application(state: *mut RecordStore, json_ptr: *const c_char) -> *const c_char {
    let store = match state_ref(state, "create_application") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    let draft: NewApplication = match parse_json(json_ptr) {
        Ok(draft) => draft,
        Err(error_ptr) => return error_ptr,
    };

    match store.create_application(draft) {
        Ok(application) => response_to_c_string(&AppResponse::json(&application)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Applies a partial JSON update to one agent, job posting or application
/// and replies with the updated record. Training modules and campaigns are
/// read-only.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use vcenter_store::{create_store, update_record};
///
/// let name = CString::new("vcenter").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let collection = CString::new("applications").unwrap();
/// let id = CString::new("app1").unwrap();
/// let patch = CString::new(r#"{"status":"interview","notes":"Call Tuesday"}"#).unwrap();
/// let reply = update_record(store, collection.as_ptr(), id.as_ptr(), patch.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn update_record(
    state: *mut RecordStore,
    collection: *const c_char,
    id: *const c_char,
    patch_json: *const c_char,
) -> *const c_char {
    let store = match state_ref(state, "update_record") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    match collection {
        Collection::Agents => patch_record::<Agent>(store, &id, patch_json),
        Collection::JobPostings => patch_record::<JobPosting>(store, &id, patch_json),
        Collection::Applications => patch_record::<Application>(store, &id, patch_json),
        Collection::TrainingModules | Collection::Campaigns => {
            let error = AppResponse::BadRequest(format!("Collection {collection} does not support updates"));
            response_to_c_string(&error)
        }
    }
}

fn patch_record<T>(store: &RecordStore, id: &str, patch_json: *const c_char) -> *const c_char
where
    T: Patchable,
    T::Patch: DeserializeOwned,
{
    let patch: T::Patch = match parse_json(patch_json) {
        Ok(patch) => patch,
        Err(error_ptr) => return error_ptr,
    };

    let response = match store.update::<T>(id, patch) {
        Some(updated) => AppResponse::json(&updated),
        // update() also yields None when the collection is unreadable or the
        // write failed; only a readable collection without `id` is NotFound.
        None => match store.load::<T>() {
            Err(e) => e,
            Ok(records) if records.iter().any(|r| r.id() == id) => {
                AppResponse::DatabaseError(format!("Failed to persist update of {} record {id}", T::COLLECTION))
            }
            Ok(_) => AppResponse::NotFound(format!("No {} record found with id: {id}", T::COLLECTION)),
        },
    };
    response_to_c_string(&response)
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_applications_for_job(state: *mut RecordStore, job_id: *const c_char) -> *const c_char {
    let store = match state_ref(state, "get_applications_for_job") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    let job_id = match c_ptr_to_string(job_id, "job id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    response_to_c_string(&AppResponse::json(&store.applications_for_job(&job_id)))
}

/// Replies with the dashboard [`BusinessMetrics`](crate::models::BusinessMetrics).
/// Never fails once the pointer is valid: unreadable data yields zeros.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_metrics(state: *mut RecordStore) -> *const c_char {
    let store = match state_ref(state, "get_metrics") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    response_to_c_string(&AppResponse::json(&store.metrics()))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_training_progress(state: *mut RecordStore) -> *const c_char {
    let store = match state_ref(state, "get_training_progress") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    response_to_c_string(&AppResponse::json(&store.training_progress()))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_auth(state: *mut RecordStore) -> *const c_char {
    let store = match state_ref(state, "get_auth") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    response_to_c_string(&AppResponse::json(&store.auth()))
}

/// Signs in the JSON [`User`] and replies with the new session record.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn login_user(state: *mut RecordStore, user_json: *const c_char) -> *const c_char {
    let store = match state_ref(state, "login_user") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    let user: User = match parse_json(user_json) {
        Ok(user) => user,
        Err(error_ptr) => return error_ptr,
    };

    match store.login(user) {
        Ok(auth) => response_to_c_string(&AppResponse::json(&auth)),
        Err(e) => response_to_c_string(&e),
    }
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn logout_user(state: *mut RecordStore) -> *const c_char {
    let store = match state_ref(state, "logout_user") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    match store.logout() {
        Ok(()) => response_to_c_string(&AppResponse::success("Logged out")),
        Err(e) => response_to_c_string(&e),
    }
}

/// Removes every key of the store's namespace, leaving it unseeded.
/// Replies with the number of keys removed.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn clear_all(state: *mut RecordStore) -> *const c_char {
    let store = match state_ref(state, "clear_all") {
        Ok(store) => store,
        Err(error_ptr) => return error_ptr,
    };

    match store.clear_all() {
        Ok(removed) => response_to_c_string(&AppResponse::json(&removed)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Flushes and releases a store returned by [`create_store`]. The pointer
/// must not be used afterwards.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(state: *mut RecordStore) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_store".to_string());
        return response_to_c_string(&error);
    }

    let store = unsafe { Box::from_raw(state) };
    match store.close() {
        Ok(()) => response_to_c_string(&AppResponse::success("Store closed successfully")),
        Err(e) => response_to_c_string(&e),
    }
}

/// Releases a reply string returned by any function of this crate.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe { drop(CString::from_raw(ptr as *mut c_char)) };
}

fn state_ref<'a>(state: *mut RecordStore, fn_name: &str) -> Result<&'a RecordStore, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(store) => Ok(store),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {fn_name}"));
            Err(response_to_c_string(&error))
        }
    }
}

fn parse_collection(ptr: *const c_char) -> Result<Collection, *const c_char> {
    let name = c_ptr_to_string(ptr, "collection")?;
    name.parse::<Collection>().map_err(|e| response_to_c_string(&e))
}

fn parse_json<T: DeserializeOwned>(ptr: *const c_char) -> Result<T, *const c_char> {
    let json = c_ptr_to_string(ptr, "JSON")?;
    serde_json::from_str(&json).map_err(|e| {
        let error = AppResponse::SerializationError(format!("Invalid JSON: {e}"));
        response_to_c_string(&error)
    })
}

/// Serializes the response to JSON and hands ownership of the C string to
/// the caller. Returns null if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

fn c_ptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Converts a C string pointer to an owned `String`, or to a `BadRequest`
/// reply naming `field_name` when the pointer is null or not UTF-8.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
