use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod endpoints;
pub mod state;
pub use endpoints::*;

pub type ProjectId = TypedId<Project>;

/// Reference data describing one client portfolio. Projects are never
/// created or edited at runtime.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub campaign_count: u32,
    pub total_budget: u64,
    pub last_activity: DateTime<Utc>,
    pub created_at: NaiveDate,
    pub owner: String,
    pub avatar: Option<String>,
}

impl TypedIdMarker for Project {
    fn tag() -> &'static str {
        "PRJ"
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ProjectStatus {
    Active,
    Paused,
    Completed,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ProjectType {
    ECommerce,
    Saas,
    LeadGen,
    Brand,
    MobileApp,
}

impl ProjectType {
    pub fn label(self) -> &'static str {
        match self {
            ProjectType::ECommerce => "E-commerce",
            ProjectType::Saas => "SaaS",
            ProjectType::LeadGen => "Lead Gen",
            ProjectType::Brand => "Brand",
            ProjectType::MobileApp => "Mobile App",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub project_count: usize,
    pub active_projects: usize,
    pub total_budget: u64,
    pub total_campaigns: u64,
}

impl PortfolioSummary {
    pub fn of<'a, I>(projects: I) -> PortfolioSummary
    where
        I: IntoIterator<Item = &'a Project>,
    {
        projects
            .into_iter()
            .fold(PortfolioSummary::default(), |summary, project| {
                PortfolioSummary {
                    project_count: summary.project_count + 1,
                    active_projects: summary.active_projects
                        + (project.status == ProjectStatus::Active) as usize,
                    total_budget: summary.total_budget.saturating_add(project.total_budget),
                    total_campaigns: summary.total_campaigns + u64::from(project.campaign_count),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn project_type_serializes_as_kebab_code() {
        let value = serde_json::to_value(ProjectType::ECommerce).unwrap();

        assert_eq!(value, serde_json::json!("E-COMMERCE"));
        assert_eq!(ProjectType::LeadGen.label(), "Lead Gen");
    }

    #[test]
    fn summary_of_seeded_portfolio() {
        let projects = seed::projects();

        let summary = PortfolioSummary::of(&projects);

        assert_eq!(summary.project_count, 6);
        assert_eq!(summary.active_projects, 4);
        assert_eq!(summary.total_budget, 410_000);
        assert_eq!(summary.total_campaigns, 68);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let none: [Project; 0] = [];

        assert_eq!(PortfolioSummary::of(&none), PortfolioSummary::default());
    }
}
