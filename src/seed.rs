//! Mock dataset written on first launch.
//!
//! Relative timestamps (posting and application dates) are computed from the
//! `now` passed in, so a freshly seeded store always shows recent activity.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{
    Agent, AgentStatus, Application, ApplicationStatus, Campaign, CampaignStatus, JobPosting,
    JobType, TrainingCategory, TrainingModule, User, UserRole,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The account signed in when the profile is opened without a session.
pub fn demo_user() -> User {
    User {
        id: "admin1".to_string(),
        name: "Alex Morgan".to_string(),
        email: "alex.morgan@vcenter.com".to_string(),
        role: UserRole::Admin,
        avatar_index: 0,
        employee_id: "ADM001".to_string(),
        department: "Management".to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn agent(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    role: UserRole,
    status: AgentStatus,
    department: &str,
    current_task: Option<&str>,
    stats: (u32, f64, f64),
    hire_date: NaiveDate,
    now: DateTime<Utc>,
) -> Agent {
    let (calls_handled, avg_response_time, rating) = stats;
    let avatar_index = id.parse::<u8>().map(|n| n.saturating_sub(1)).unwrap_or(0);
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        role,
        status,
        avatar_index,
        employee_id: format!("EMP{:0>3}", id),
        department: department.to_string(),
        current_task: current_task.map(str::to_string),
        calls_handled,
        avg_response_time,
        rating,
        hire_date,
        created_at: now,
    }
}

pub fn agents(now: DateTime<Utc>) -> Vec<Agent> {
    vec![
        agent(
            "1",
            "Sarah Johnson",
            "sarah.johnson@vcenter.com",
            "+1 (555) 123-4567",
            UserRole::Supervisor,
            AgentStatus::Available,
            "Customer Support",
            None,
            (156, 2.3, 4.8),
            date(2023, 6, 15),
            now,
        ),
        agent(
            "2",
            "Marcus Williams",
            "marcus.williams@vcenter.com",
            "+1 (555) 234-5678",
            UserRole::Agent,
            AgentStatus::Busy,
            "Sales",
            Some("Outbound Sales Call"),
            (89, 3.1, 4.5),
            date(2023, 9, 1),
            now,
        ),
        agent(
            "3",
            "Emily Chen",
            "emily.chen@vcenter.com",
            "+1 (555) 345-6789",
            UserRole::Agent,
            AgentStatus::Available,
            "Technical Support",
            None,
            (124, 2.8, 4.9),
            date(2023, 7, 20),
            now,
        ),
        agent(
            "4",
            "James Rodriguez",
            "james.rodriguez@vcenter.com",
            "+1 (555) 456-7890",
            UserRole::Agent,
            AgentStatus::Break,
            "Customer Support",
            None,
            (67, 3.5, 4.2),
            date(2024, 1, 10),
            now,
        ),
        agent(
            "5",
            "Aisha Patel",
            "aisha.patel@vcenter.com",
            "+1 (555) 567-8901",
            UserRole::Agent,
            AgentStatus::Offline,
            "Sales",
            None,
            (201, 2.1, 4.7),
            date(2023, 4, 5),
            now,
        ),
        agent(
            "6",
            "David Kim",
            "david.kim@vcenter.com",
            "+1 (555) 678-9012",
            UserRole::Agent,
            AgentStatus::Busy,
            "Technical Support",
            Some("Software Troubleshooting"),
            (143, 4.2, 4.6),
            date(2023, 11, 1),
            now,
        ),
    ]
}

pub fn job_postings(now: DateTime<Utc>) -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: "j1".to_string(),
            title: "Remote Customer Service Representative".to_string(),
            description: "Join our growing virtual call center team! We're looking for motivated \
                individuals to provide exceptional customer service from the comfort of their \
                homes. You'll handle inbound calls, resolve customer inquiries, and maintain high \
                satisfaction ratings."
                .to_string(),
            requirements: strings(&[
                "High school diploma or equivalent",
                "Excellent communication skills",
                "Reliable high-speed internet connection",
                "Quiet home office environment",
                "Basic computer proficiency",
                "Flexible availability",
            ]),
            benefits: strings(&[
                "Work from home",
                "Flexible scheduling",
                "Paid training provided",
                "Performance bonuses",
                "Health insurance options",
                "Career advancement opportunities",
            ]),
            department: "Customer Support".to_string(),
            job_type: JobType::FullTime,
            location: "Remote - USA".to_string(),
            salary: "$15-$20/hour".to_string(),
            is_active: true,
            applications_count: 24,
            created_at: now - Duration::days(7),
        },
        JobPosting {
            id: "j2".to_string(),
            title: "Virtual Sales Agent".to_string(),
            description: "Exciting opportunity for sales-driven individuals! Make outbound calls to \
                potential customers, present our products and services, and close deals. Unlimited \
                earning potential with our competitive commission structure."
                .to_string(),
            requirements: strings(&[
                "Previous sales experience preferred",
                "Strong persuasion skills",
                "Goal-oriented mindset",
                "Comfortable with cold calling",
                "CRM experience a plus",
            ]),
            benefits: strings(&[
                "Base pay plus commission",
                "Uncapped earnings",
                "Weekly bonuses",
                "Flexible hours",
                "Comprehensive training",
            ]),
            department: "Sales".to_string(),
            job_type: JobType::FullTime,
            location: "Remote - Nationwide".to_string(),
            salary: "$12/hour + commission".to_string(),
            is_active: true,
            applications_count: 18,
            created_at: now - Duration::days(14),
        },
        JobPosting {
            id: "j3".to_string(),
            title: "Technical Support Specialist".to_string(),
            description: "Help customers troubleshoot technical issues and provide solutions. Ideal \
                for tech-savvy individuals who enjoy problem-solving and helping others."
                .to_string(),
            requirements: strings(&[
                "Technical aptitude required",
                "Experience with troubleshooting",
                "Patience and empathy",
                "Typing speed 40+ WPM",
                "Available for evening shifts",
            ]),
            benefits: strings(&[
                "Higher pay rate",
                "Technical certifications",
                "Equipment provided",
                "Shift differentials",
            ]),
            department: "Technical Support".to_string(),
            job_type: JobType::PartTime,
            location: "Remote - USA".to_string(),
            salary: "$18-$25/hour".to_string(),
            is_active: true,
            applications_count: 12,
            created_at: now - Duration::days(3),
        },
    ]
}

pub fn applications(now: DateTime<Utc>) -> Vec<Application> {
    vec![
        Application {
            id: "app1".to_string(),
            job_id: "j1".to_string(),
            name: "Jennifer Martinez".to_string(),
            email: "jennifer.m@email.com".to_string(),
            phone: "+1 (555) 111-2222".to_string(),
            experience: "3 years of customer service experience at a retail company. Handled \
                phone and email inquiries."
                .to_string(),
            cover_letter: "I am excited to apply for the Remote Customer Service Representative \
                position. My background in retail customer service has prepared me well for this \
                role."
                .to_string(),
            status: ApplicationStatus::Pending,
            notes: String::new(),
            created_at: now - Duration::days(2),
            updated_at: now - Duration::days(2),
        },
        Application {
            id: "app2".to_string(),
            job_id: "j2".to_string(),
            name: "Robert Thompson".to_string(),
            email: "robert.t@email.com".to_string(),
            phone: "+1 (555) 333-4444".to_string(),
            experience: "5 years in B2B sales. Consistently exceeded quotas by 20%.".to_string(),
            cover_letter: "As a proven sales professional, I am confident I can contribute to \
                your team's success."
                .to_string(),
            status: ApplicationStatus::Interview,
            notes: "Strong candidate. Schedule video interview.".to_string(),
            created_at: now - Duration::days(5),
            updated_at: now - Duration::days(1),
        },
        Application {
            id: "app3".to_string(),
            job_id: "j1".to_string(),
            name: "Michelle Lee".to_string(),
            email: "michelle.lee@email.com".to_string(),
            phone: "+1 (555) 555-6666".to_string(),
            experience: "Recent graduate with internship experience in call center operations."
                .to_string(),
            cover_letter: "I am eager to start my career in customer service with your company."
                .to_string(),
            status: ApplicationStatus::Reviewing,
            notes: "Entry level but enthusiastic".to_string(),
            created_at: now - Duration::days(1),
            updated_at: now,
        },
    ]
}

fn module(
    order: u32,
    title: &str,
    description: &str,
    category: TrainingCategory,
    duration: &str,
    is_required: bool,
    completion_rate: u8,
) -> TrainingModule {
    TrainingModule {
        id: format!("t{order}"),
        title: title.to_string(),
        description: description.to_string(),
        category,
        duration: duration.to_string(),
        is_required,
        completion_rate,
        content_url: None,
        order,
    }
}

pub fn training_modules() -> Vec<TrainingModule> {
    vec![
        module(
            1,
            "Welcome to the Team",
            "Introduction to our company culture, mission, and values. Learn about your role and expectations.",
            TrainingCategory::Onboarding,
            "30 min",
            true,
            100,
        ),
        module(
            2,
            "Systems & Tools Training",
            "Learn how to use our CRM, phone system, and other essential tools for daily operations.",
            TrainingCategory::Onboarding,
            "1 hour",
            true,
            95,
        ),
        module(
            3,
            "Customer Communication Excellence",
            "Master the art of professional phone etiquette, active listening, and conflict resolution.",
            TrainingCategory::Communication,
            "45 min",
            true,
            88,
        ),
        module(
            4,
            "Product Knowledge Deep Dive",
            "Comprehensive overview of our products and services to help customers effectively.",
            TrainingCategory::Product,
            "2 hours",
            true,
            82,
        ),
        module(
            5,
            "Compliance & Data Security",
            "Understanding privacy regulations, data handling procedures, and security protocols.",
            TrainingCategory::Compliance,
            "1 hour",
            true,
            90,
        ),
        module(
            6,
            "Advanced Sales Techniques",
            "Learn upselling, cross-selling, and closing strategies to maximize conversions.",
            TrainingCategory::Advanced,
            "1.5 hours",
            false,
            45,
        ),
        module(
            7,
            "Handling Difficult Customers",
            "Strategies for de-escalation and turning negative experiences into positive outcomes.",
            TrainingCategory::Communication,
            "45 min",
            false,
            67,
        ),
    ]
}

pub fn campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            id: "c1".to_string(),
            name: "Holiday Support Surge".to_string(),
            client: "TechGiant Inc.".to_string(),
            description: "Extended customer support for holiday shopping season.".to_string(),
            status: CampaignStatus::Active,
            agents_assigned: 4,
            calls_today: 234,
            conversion_rate: 0.0,
            start_date: date(2024, 11, 1),
            end_date: Some(date(2025, 1, 15)),
        },
        Campaign {
            id: "c2".to_string(),
            name: "New Product Launch".to_string(),
            client: "Innovate Corp".to_string(),
            description: "Outbound sales campaign for new product line introduction.".to_string(),
            status: CampaignStatus::Active,
            agents_assigned: 3,
            calls_today: 156,
            conversion_rate: 23.5,
            start_date: date(2024, 11, 15),
            end_date: None,
        },
        Campaign {
            id: "c3".to_string(),
            name: "Customer Retention".to_string(),
            client: "ServiceFirst LLC".to_string(),
            description: "Reach out to at-risk customers with special offers.".to_string(),
            status: CampaignStatus::Paused,
            agents_assigned: 2,
            calls_today: 0,
            conversion_rate: 18.2,
            start_date: date(2024, 10, 1),
            end_date: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_helper_derives_employee_fields_from_id() {
        let agents = agents(Utc::now());
        assert_eq!(agents.len(), 6);
        assert_eq!(agents[0].employee_id, "EMP001");
        assert_eq!(agents[0].avatar_index, 0);
        assert_eq!(agents[5].employee_id, "EMP006");
        assert_eq!(agents[5].avatar_index, 5);
        assert_eq!(agents[1].current_task.as_deref(), Some("Outbound Sales Call"));
    }

    #[test]
    fn seeded_application_counts_match_mock_postings() {
        let postings = job_postings(Utc::now());
        let counts: Vec<u32> = postings.iter().map(|p| p.applications_count).collect();
        assert_eq!(counts, vec![24, 18, 12]);
    }

    #[test]
    fn training_modules_are_numbered_by_order() {
        for module in training_modules() {
            assert_eq!(module.id, format!("t{}", module.order));
        }
    }
}
