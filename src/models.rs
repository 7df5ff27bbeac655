//! Record types persisted by the store, their partial-update types and the
//! derived dashboard metrics.
//!
//! Field names serialize in camelCase and enum values use their lowercase
//! (or kebab-case) spellings, so the persisted JSON reads e.g.
//! `{"id":"j1","type":"full-time","isActive":true,"applicationsCount":24}`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::app_response::AppResponse;
use crate::schema::{Collection, Patchable, Record};

/// Fixed dashboard figure; not derived from any collection.
pub const CUSTOMER_SATISFACTION: f64 = 4.6;
/// Fixed dashboard figure; not derived from any collection.
pub const REVENUE: u64 = 45_750;

/// Location used when a job posting is created without one.
pub const DEFAULT_LOCATION: &str = "Remote";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Available,
    Busy,
    Break,
    Offline,
}

impl AgentStatus {
    /// Available and busy agents count as active on the dashboard.
    pub fn is_active(self) -> bool {
        matches!(self, AgentStatus::Available | AgentStatus::Busy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Supervisor,
    Agent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Interview,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingCategory {
    Onboarding,
    Product,
    Communication,
    Compliance,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: AgentStatus,
    pub avatar_index: u8,
    pub employee_id: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    pub calls_handled: u32,
    /// Minutes.
    pub avg_response_time: f64,
    pub rating: f64,
    pub hire_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub department: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub location: String,
    pub salary: String,
    pub is_active: bool,
    /// Incremented once per application created against this posting.
    pub applications_count: u32,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    /// Whole days elapsed since the posting was created, never negative.
    pub fn days_since_posted(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingModule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TrainingCategory,
    pub duration: String,
    pub is_required: bool,
    /// Percentage in `0..=100`.
    pub completion_rate: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub client: String,
    pub description: String,
    pub status: CampaignStatus,
    pub agents_assigned: u32,
    pub calls_today: u32,
    pub conversion_rate: f64,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar_index: u8,
    pub employee_id: String,
    pub department: String,
}

/// The persisted session record. Not a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }
}

impl Record for Agent {
    const COLLECTION: Collection = Collection::Agents;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for JobPosting {
    const COLLECTION: Collection = Collection::JobPostings;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Application {
    const COLLECTION: Collection = Collection::Applications;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for TrainingModule {
    const COLLECTION: Collection = Collection::TrainingModules;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Campaign {
    const COLLECTION: Collection = Collection::Campaigns;

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Creation payloads
// ---------------------------------------------------------------------------

/// Fields supplied by the caller when posting a job. The store assigns the
/// id, the creation time and a zero application count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobPosting {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub department: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[serde(default)]
    pub location: String,
    pub salary: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl NewJobPosting {
    /// Trims the free-text fields, rejects a blank title, description or
    /// salary, defaults a blank location to [`DEFAULT_LOCATION`] and drops
    /// blank requirement and benefit lines.
    pub fn normalized(self) -> Result<Self, AppResponse> {
        let title = required_field(&self.title, "title")?;
        let description = required_field(&self.description, "description")?;
        let salary = required_field(&self.salary, "salary")?;

        let location = match self.location.trim() {
            "" => DEFAULT_LOCATION.to_string(),
            loc => loc.to_string(),
        };

        Ok(Self {
            title,
            description,
            salary,
            location,
            requirements: clean_lines(self.requirements),
            benefits: clean_lines(self.benefits),
            department: self.department.trim().to_string(),
            job_type: self.job_type,
            is_active: self.is_active,
        })
    }

    pub fn into_posting(self, id: String, now: DateTime<Utc>) -> JobPosting {
        JobPosting {
            id,
            title: self.title,
            description: self.description,
            requirements: self.requirements,
            benefits: self.benefits,
            department: self.department,
            job_type: self.job_type,
            location: self.location,
            salary: self.salary,
            is_active: self.is_active,
            applications_count: 0,
            created_at: now,
        }
    }
}

fn required_field(value: &str, name: &str) -> Result<String, AppResponse> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppResponse::ValidationError(format!("Job posting {name} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits a multi-line form field into trimmed, non-blank entries.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fields supplied by an applicant. The store assigns the id, the pending
/// status, empty notes and both timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub job_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub cover_letter: String,
}

impl NewApplication {
    pub fn into_application(self, id: String, now: DateTime<Utc>) -> Application {
        Application {
            id,
            job_id: self.job_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            experience: self.experience,
            cover_letter: self.cover_letter,
            status: ApplicationStatus::Pending,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Distinguishes a missing field (`None`) from an explicit `null`
/// (`Some(None)`) when deserializing `Option<Option<T>>`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<AgentStatus>,
    pub avatar_index: Option<u8>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    /// `Some(None)` clears the current task.
    #[serde(deserialize_with = "deserialize_some")]
    pub current_task: Option<Option<String>>,
    pub calls_handled: Option<u32>,
    pub avg_response_time: Option<f64>,
    pub rating: Option<f64>,
    pub hire_date: Option<NaiveDate>,
}

impl AgentPatch {
    pub fn status(status: AgentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Patchable for Agent {
    type Patch = AgentPatch;

    fn apply(&mut self, patch: AgentPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.role, patch.role);
        merge(&mut self.status, patch.status);
        merge(&mut self.avatar_index, patch.avatar_index);
        merge(&mut self.employee_id, patch.employee_id);
        merge(&mut self.department, patch.department);
        merge(&mut self.current_task, patch.current_task);
        merge(&mut self.calls_handled, patch.calls_handled);
        merge(&mut self.avg_response_time, patch.avg_response_time);
        merge(&mut self.rating, patch.rating);
        merge(&mut self.hire_date, patch.hire_date);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobPostingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub department: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub is_active: Option<bool>,
    pub applications_count: Option<u32>,
}

impl JobPostingPatch {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

impl Patchable for JobPosting {
    type Patch = JobPostingPatch;

    fn apply(&mut self, patch: JobPostingPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.description, patch.description);
        merge(&mut self.requirements, patch.requirements);
        merge(&mut self.benefits, patch.benefits);
        merge(&mut self.department, patch.department);
        merge(&mut self.job_type, patch.job_type);
        merge(&mut self.location, patch.location);
        merge(&mut self.salary, patch.salary);
        merge(&mut self.is_active, patch.is_active);
        merge(&mut self.applications_count, patch.applications_count);
    }
}

/// Partial update of an application. `updatedAt` is not patchable; every
/// applied patch stamps it with the current time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationPatch {
    pub job_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience: Option<String>,
    pub cover_letter: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
}

impl ApplicationPatch {
    pub fn status(status: ApplicationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }
}

impl Patchable for Application {
    type Patch = ApplicationPatch;

    fn apply(&mut self, patch: ApplicationPatch) {
        merge(&mut self.job_id, patch.job_id);
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.experience, patch.experience);
        merge(&mut self.cover_letter, patch.cover_letter);
        merge(&mut self.status, patch.status);
        merge(&mut self.notes, patch.notes);
        // Wall clocks can step backwards; updatedAt must not.
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

fn merge<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Dashboard aggregate computed from agents, applications and campaigns.
/// `Default` is the all-zero record returned when the inputs can't be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetrics {
    pub total_agents: usize,
    pub active_agents: usize,
    pub total_applications: usize,
    pub pending_applications: usize,
    pub total_calls: u64,
    pub avg_response_time: f64,
    pub customer_satisfaction: f64,
    pub revenue: u64,
    pub active_campaigns: usize,
}

impl BusinessMetrics {
    pub fn from_records(agents: &[Agent], applications: &[Application], campaigns: &[Campaign]) -> Self {
        let avg_response_time = if agents.is_empty() {
            0.0
        } else {
            let total: f64 = agents.iter().map(|a| a.avg_response_time).sum();
            round_to_tenth(total / agents.len() as f64)
        };

        Self {
            total_agents: agents.len(),
            active_agents: agents.iter().filter(|a| a.status.is_active()).count(),
            total_applications: applications.len(),
            pending_applications: applications
                .iter()
                .filter(|a| a.status == ApplicationStatus::Pending)
                .count(),
            total_calls: agents.iter().map(|a| u64::from(a.calls_handled)).sum(),
            avg_response_time,
            customer_satisfaction: CUSTOMER_SATISFACTION,
            revenue: REVENUE,
            active_campaigns: campaigns
                .iter()
                .filter(|c| c.status == CampaignStatus::Active)
                .count(),
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn posting_draft() -> NewJobPosting {
        NewJobPosting {
            title: "  Night Shift Lead ".to_string(),
            description: " Lead the overnight queue ".to_string(),
            requirements: vec![" 2 years experience ".to_string(), "   ".to_string()],
            benefits: vec![],
            department: "Customer Support".to_string(),
            job_type: JobType::Contract,
            location: "  ".to_string(),
            salary: "$20/hour".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn enums_use_wire_spellings() {
        assert_eq!(serde_json::to_value(JobType::FullTime).unwrap(), json!("full-time"));
        assert_eq!(serde_json::to_value(AgentStatus::Break).unwrap(), json!("break"));
        assert_eq!(
            serde_json::from_value::<ApplicationStatus>(json!("interview")).unwrap(),
            ApplicationStatus::Interview
        );
        assert!(serde_json::from_value::<CampaignStatus>(json!("archived")).is_err());
    }

    #[test]
    fn normalized_trims_and_defaults() {
        let draft = posting_draft().normalized().unwrap();
        assert_eq!(draft.title, "Night Shift Lead");
        assert_eq!(draft.description, "Lead the overnight queue");
        assert_eq!(draft.location, DEFAULT_LOCATION);
        assert_eq!(draft.requirements, vec!["2 years experience".to_string()]);
    }

    #[test]
    fn normalized_rejects_blank_required_fields() {
        let mut draft = posting_draft();
        draft.salary = "   ".to_string();
        match draft.normalized() {
            Err(AppResponse::ValidationError(msg)) => assert!(msg.contains("salary")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn split_lines_drops_blank_entries() {
        assert_eq!(
            split_lines("Flexible hours\n\n  Paid training  \n"),
            vec!["Flexible hours".to_string(), "Paid training".to_string()]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn agent_patch_distinguishes_null_from_missing() {
        let missing: AgentPatch = serde_json::from_value(json!({"status": "busy"})).unwrap();
        assert_eq!(missing.status, Some(AgentStatus::Busy));
        assert_eq!(missing.current_task, None);

        let cleared: AgentPatch = serde_json::from_value(json!({"currentTask": null})).unwrap();
        assert_eq!(cleared.current_task, Some(None));

        let set: AgentPatch = serde_json::from_value(json!({"currentTask": "Callback"})).unwrap();
        assert_eq!(set.current_task, Some(Some("Callback".to_string())));
    }

    #[test]
    fn days_since_posted_floors_and_clamps() {
        let now = Utc::now();
        let posting = posting_draft()
            .normalized()
            .unwrap()
            .into_posting("x".to_string(), now - Duration::hours(50));
        assert_eq!(posting.days_since_posted(now), 2);
        assert_eq!(posting.days_since_posted(now - Duration::days(10)), 0);
    }

    #[test]
    fn empty_metrics_inputs_yield_zero_averages() {
        let metrics = BusinessMetrics::from_records(&[], &[], &[]);
        assert_eq!(metrics.total_agents, 0);
        assert_eq!(metrics.avg_response_time, 0.0);
        assert_eq!(metrics.revenue, REVENUE);
        assert_eq!(metrics.customer_satisfaction, CUSTOMER_SATISFACTION);
    }
}
