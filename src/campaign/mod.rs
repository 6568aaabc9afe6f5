use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::error::Error;
use crate::metrics::percentage;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod endpoints;
pub mod manager;
pub mod store;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub channel: Option<Channel>,
    pub budget: u64,
    pub spent: u64,
    pub target: u64,
    pub achieved: u64,
    pub conversions: u64,
    pub clicks: u64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Campaign {
    /// Achieved over target, in percent. Not capped; use [`display_progress`]
    /// when rendering.
    pub fn performance(&self) -> f64 {
        percentage(self.achieved, self.target)
    }

    pub fn budget_progress(&self) -> f64 {
        percentage(self.spent, self.budget)
    }

    pub fn performance_band(&self, thresholds: &Thresholds) -> PerformanceBand {
        PerformanceBand::classify(self.performance(), thresholds)
    }
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CMP"
    }
}

/// Clamps a percentage into what a progress bar can show.
pub fn display_progress(value: f64) -> f64 {
    value.max(0.0).min(100.0)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    /// Staying put is always allowed. Active and paused flip between each
    /// other and may both finish; a completed campaign is final.
    pub fn can_transition_to(self, to: CampaignStatus) -> bool {
        use CampaignStatus::*;

        match (self, to) {
            (from, to) if from == to => true,
            (Active, Paused) | (Paused, Active) => true,
            (Active, Completed) | (Paused, Completed) => true,
            _ => false,
        }
    }

    pub fn toggled(self) -> Option<CampaignStatus> {
        match self {
            CampaignStatus::Active => Some(CampaignStatus::Paused),
            CampaignStatus::Paused => Some(CampaignStatus::Active),
            CampaignStatus::Completed => None,
        }
    }
}

impl Default for CampaignStatus {
    fn default() -> CampaignStatus {
        CampaignStatus::Active
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Channel {
    Search,
    Social,
    Display,
    Video,
    Email,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum PerformanceBand {
    OnTarget,
    AtRisk,
    Behind,
}

impl PerformanceBand {
    pub fn classify(performance: f64, thresholds: &Thresholds) -> PerformanceBand {
        if performance >= thresholds.on_target {
            PerformanceBand::OnTarget
        } else if performance >= thresholds.at_risk {
            PerformanceBand::AtRisk
        } else {
            PerformanceBand::Behind
        }
    }
}

/// The editable part of a campaign, as entered in the create and edit forms.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CampaignDraft {
    pub name: String,
    pub status: CampaignStatus,
    pub channel: Option<Channel>,
    pub budget: u64,
    pub spent: u64,
    pub target: u64,
    pub achieved: u64,
    pub conversions: u64,
    pub clicks: u64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CampaignDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::CampaignNameRequired);
        }

        if self.budget == 0 {
            return Err(Error::CampaignBudgetNotPositive {
                budget: self.budget,
            });
        }

        if let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) {
            if end_date < start_date {
                return Err(Error::CampaignDatesOutOfOrder {
                    start_date,
                    end_date,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn into_campaign(self, id: CampaignId, now: DateTime<Utc>) -> Campaign {
        Campaign {
            id,
            name: self.name.trim().to_string(),
            status: self.status,
            channel: self.channel,
            budget: self.budget,
            spent: self.spent,
            target: self.target,
            achieved: self.achieved,
            conversions: self.conversions,
            clicks: self.clicks,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: now,
            modified_at: now,
        }
    }
}

impl From<&Campaign> for CampaignDraft {
    fn from(campaign: &Campaign) -> CampaignDraft {
        CampaignDraft {
            name: campaign.name.clone(),
            status: campaign.status,
            channel: campaign.channel,
            budget: campaign.budget,
            spent: campaign.spent,
            target: campaign.target,
            achieved: campaign.achieved,
            conversions: campaign.conversions,
            clicks: campaign.clicks,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, budget: u64) -> CampaignDraft {
        CampaignDraft {
            name: name.into(),
            budget,
            ..CampaignDraft::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn draft_requires_a_name() {
        assert_eq!(
            draft("", 100).validate().unwrap_err(),
            Error::CampaignNameRequired
        );
        assert_eq!(
            draft("   ", 100).validate().unwrap_err(),
            Error::CampaignNameRequired
        );
    }

    #[test]
    fn draft_requires_a_positive_budget() {
        assert_eq!(
            draft("X", 0).validate().unwrap_err(),
            Error::CampaignBudgetNotPositive { budget: 0 }
        );
        assert!(draft("X", 100).validate().is_ok());
    }

    #[test]
    fn draft_rejects_end_before_start() {
        let draft = CampaignDraft {
            start_date: Some(date(2024, 2, 1)),
            end_date: Some(date(2024, 1, 1)),
            ..draft("X", 100)
        };

        assert_eq!(
            draft.validate().unwrap_err(),
            Error::CampaignDatesOutOfOrder {
                start_date: date(2024, 2, 1),
                end_date: date(2024, 1, 1),
            }
        );
    }

    #[test]
    fn toggle_flips_active_and_paused() {
        let once = CampaignStatus::Active.toggled().unwrap();
        let twice = once.toggled().unwrap();

        assert_eq!(once, CampaignStatus::Paused);
        assert_eq!(twice, CampaignStatus::Active);
        assert_eq!(CampaignStatus::Completed.toggled(), None);
    }

    #[test]
    fn completed_is_final() {
        use CampaignStatus::*;

        assert!(Active.can_transition_to(Completed));
        assert!(Paused.can_transition_to(Completed));
        assert!(Completed.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Active));
        assert!(!Completed.can_transition_to(Paused));
    }

    #[test]
    fn performance_is_uncapped_but_display_is() {
        let mut campaign = draft("Holiday Shopping Campaign", 50000)
            .into_campaign(CampaignId::new(), Utc::now());
        campaign.target = 1000;
        campaign.achieved = 1150;

        assert_eq!(campaign.performance(), 115.0);
        assert_eq!(display_progress(campaign.performance()), 100.0);
    }

    #[test]
    fn performance_with_zero_target_is_zero() {
        let campaign = draft("X", 100).into_campaign(CampaignId::new(), Utc::now());

        assert_eq!(campaign.performance(), 0.0);
        assert_eq!(campaign.budget_progress(), 0.0);
    }

    #[test]
    fn bands_follow_thresholds() {
        let defaults = Thresholds::default();
        let strict = Thresholds {
            on_target: 120.0,
            at_risk: 90.0,
            ..Thresholds::default()
        };

        assert_eq!(PerformanceBand::classify(100.0, &defaults), PerformanceBand::OnTarget);
        assert_eq!(PerformanceBand::classify(75.0, &defaults), PerformanceBand::AtRisk);
        assert_eq!(PerformanceBand::classify(74.9, &defaults), PerformanceBand::Behind);
        assert_eq!(PerformanceBand::classify(100.0, &strict), PerformanceBand::AtRisk);
    }
}
