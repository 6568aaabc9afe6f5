use serde::Serialize;

use crate::campaign::{Campaign, CampaignStatus};
use crate::config::Thresholds;

pub mod endpoints;
pub mod filter;
pub use endpoints::*;

/// `part` as a percentage of `whole`, or 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

/// `numerator / denominator`, or 0 when `denominator` is 0.
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Totals {
    pub total_budget: u64,
    pub total_spent: u64,
    pub total_conversions: u64,
    pub total_clicks: u64,
}

impl Totals {
    pub fn budget_utilization(&self) -> f64 {
        percentage(self.total_spent, self.total_budget)
    }

    pub fn conversion_rate(&self) -> f64 {
        percentage(self.total_conversions, self.total_clicks)
    }

    pub fn cost_per_acquisition(&self) -> f64 {
        ratio(self.total_spent, self.total_conversions)
    }
}

pub fn aggregate<'a, I>(campaigns: I) -> Totals
where
    I: IntoIterator<Item = &'a Campaign>,
{
    campaigns
        .into_iter()
        .fold(Totals::default(), |totals, campaign| Totals {
            total_budget: totals.total_budget.saturating_add(campaign.budget),
            total_spent: totals.total_spent.saturating_add(campaign.spent),
            total_conversions: totals
                .total_conversions
                .saturating_add(campaign.conversions),
            total_clicks: totals.total_clicks.saturating_add(campaign.clicks),
        })
}

/// Everything the summary cards show for one set of campaigns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overview {
    #[serde(flatten)]
    pub totals: Totals,
    pub budget_utilization: f64,
    pub conversion_rate: f64,
    pub cost_per_acquisition: f64,
    pub campaign_count: usize,
    pub active_campaigns: usize,
    pub utilization_warning: bool,
}

impl Overview {
    pub fn compute<'a, I>(campaigns: I, thresholds: &Thresholds) -> Overview
    where
        I: IntoIterator<Item = &'a Campaign>,
        I::IntoIter: Clone,
    {
        let campaigns = campaigns.into_iter();
        let totals = aggregate(campaigns.clone());
        let budget_utilization = totals.budget_utilization();

        Overview {
            totals,
            budget_utilization,
            conversion_rate: totals.conversion_rate(),
            cost_per_acquisition: totals.cost_per_acquisition(),
            campaign_count: campaigns.clone().count(),
            active_campaigns: campaigns
                .filter(|campaign| campaign.status == CampaignStatus::Active)
                .count(),
            utilization_warning: budget_utilization > thresholds.utilization_warning,
        }
    }
}
