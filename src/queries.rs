//! Read-side helpers over loaded collections: list filters, training
//! progress and the job board summary.

use serde::{Deserialize, Serialize};

use crate::models::{
    Agent, AgentStatus, Application, ApplicationStatus, JobPosting, TrainingCategory, TrainingModule,
};

/// Roster filter. An empty query matches every agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentFilter {
    pub query: String,
    pub status: Option<AgentStatus>,
}

impl AgentFilter {
    pub fn new(query: impl Into<String>, status: Option<AgentStatus>) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    /// Case-insensitive substring match on name, employee id or department,
    /// combined with the optional status.
    pub fn matches(&self, agent: &Agent) -> bool {
        let query = self.query.to_lowercase();
        let matches_search = query.is_empty()
            || agent.name.to_lowercase().contains(&query)
            || agent.employee_id.to_lowercase().contains(&query)
            || agent.department.to_lowercase().contains(&query);

        let matches_status = self.status.map_or(true, |status| agent.status == status);

        matches_search && matches_status
    }

    pub fn apply(&self, agents: Vec<Agent>) -> Vec<Agent> {
        agents.into_iter().filter(|a| self.matches(a)).collect()
    }
}

pub fn filter_applications(
    applications: Vec<Application>,
    status: Option<ApplicationStatus>,
) -> Vec<Application> {
    match status {
        None => applications,
        Some(status) => applications.into_iter().filter(|a| a.status == status).collect(),
    }
}

pub fn filter_modules(modules: Vec<TrainingModule>, category: Option<TrainingCategory>) -> Vec<TrainingModule> {
    match category {
        None => modules,
        Some(category) => modules.into_iter().filter(|m| m.category == category).collect(),
    }
}

/// Sorts modules ascending by `order`. Stable for equal orders.
pub fn sort_modules(mut modules: Vec<TrainingModule>) -> Vec<TrainingModule> {
    modules.sort_by_key(|m| m.order);
    modules
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgress {
    pub required_total: usize,
    pub required_completed: usize,
    /// Rounded mean completion rate of the required modules.
    pub overall_percent: u8,
}

impl TrainingProgress {
    pub fn from_modules(modules: &[TrainingModule]) -> Self {
        let required: Vec<&TrainingModule> = modules.iter().filter(|m| m.is_required).collect();
        if required.is_empty() {
            return Self::default();
        }

        let sum: u32 = required.iter().map(|m| u32::from(m.completion_rate)).sum();
        let mean = f64::from(sum) / required.len() as f64;

        Self {
            required_total: required.len(),
            required_completed: required.iter().filter(|m| m.completion_rate >= 100).count(),
            overall_percent: mean.round().clamp(0.0, 100.0) as u8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoardSummary {
    pub total_postings: usize,
    pub active_postings: usize,
    pub pending_applications: usize,
}

impl JobBoardSummary {
    pub fn from_records(postings: &[JobPosting], applications: &[Application]) -> Self {
        Self {
            total_postings: postings.len(),
            active_postings: postings.iter().filter(|p| p.is_active).count(),
            pending_applications: applications
                .iter()
                .filter(|a| a.status == ApplicationStatus::Pending)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::Utc;

    #[test]
    fn agent_filter_searches_case_insensitively() {
        let agents = seed::agents(Utc::now());

        let by_department = AgentFilter::new("technical", None).apply(agents.clone());
        let names: Vec<&str> = by_department.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Emily Chen", "David Kim"]);

        let by_employee_id = AgentFilter::new("emp004", None).apply(agents.clone());
        assert_eq!(by_employee_id.len(), 1);
        assert_eq!(by_employee_id[0].name, "James Rodriguez");

        assert_eq!(AgentFilter::default().apply(agents).len(), 6);
    }

    #[test]
    fn agent_filter_combines_query_and_status() {
        let agents = seed::agents(Utc::now());
        let busy_sales = AgentFilter::new("sales", Some(AgentStatus::Busy)).apply(agents.clone());
        assert_eq!(busy_sales.len(), 1);
        assert_eq!(busy_sales[0].id, "2");

        let offline = AgentFilter::new("", Some(AgentStatus::Offline)).apply(agents);
        assert_eq!(offline.len(), 1);
        assert_eq!(offline[0].name, "Aisha Patel");
    }

    #[test]
    fn application_filter_by_status() {
        let apps = seed::applications(Utc::now());
        assert_eq!(filter_applications(apps.clone(), None).len(), 3);
        let reviewing = filter_applications(apps.clone(), Some(ApplicationStatus::Reviewing));
        assert_eq!(reviewing.len(), 1);
        assert_eq!(reviewing[0].id, "app3");
        assert!(filter_applications(apps, Some(ApplicationStatus::Approved)).is_empty());
    }

    #[test]
    fn filter_modules_by_category() {
        let modules = seed::training_modules();
        assert_eq!(filter_modules(modules.clone(), None).len(), 7);

        let ids: Vec<String> = filter_modules(modules, Some(TrainingCategory::Communication))
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["t3", "t7"]);
    }

    #[test]
    fn training_progress_over_seeded_modules() {
        let progress = TrainingProgress::from_modules(&seed::training_modules());
        assert_eq!(progress.required_total, 5);
        assert_eq!(progress.required_completed, 1);
        // (100 + 95 + 88 + 82 + 90) / 5 = 91
        assert_eq!(progress.overall_percent, 91);
    }

    #[test]
    fn training_progress_without_required_modules() {
        let optional: Vec<TrainingModule> = seed::training_modules()
            .into_iter()
            .filter(|m| !m.is_required)
            .collect();
        assert_eq!(TrainingProgress::from_modules(&optional), TrainingProgress::default());
    }

    #[test]
    fn sort_modules_orders_ascending() {
        let mut modules = seed::training_modules();
        modules.reverse();
        let orders: Vec<u32> = sort_modules(modules).iter().map(|m| m.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn job_board_summary_counts() {
        let now = Utc::now();
        let mut postings = seed::job_postings(now);
        postings[2].is_active = false;
        let summary = JobBoardSummary::from_records(&postings, &seed::applications(now));
        assert_eq!(summary.total_postings, 3);
        assert_eq!(summary.active_postings, 2);
        assert_eq!(summary.pending_applications, 1);
    }
}
