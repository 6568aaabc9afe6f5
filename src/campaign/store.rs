use std::collections::HashMap;

use chrono::Utc;

use crate::error::Error;

use super::{Campaign, CampaignDraft, CampaignId, CampaignStatus};

/// The session's working set of campaigns, keyed by id and listed in
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct CampaignStore {
    campaigns: HashMap<CampaignId, Campaign>,
    order: Vec<CampaignId>,
}

impl CampaignStore {
    pub fn new() -> CampaignStore {
        CampaignStore::default()
    }

    pub fn from_campaigns(campaigns: Vec<Campaign>) -> CampaignStore {
        let mut store = CampaignStore::new();
        for campaign in campaigns {
            store.order.push(campaign.id);
            store.campaigns.insert(campaign.id, campaign);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Campaign> + '_ {
        self.order.iter().filter_map(move |id| self.campaigns.get(id))
    }

    pub fn get(&self, campaign_id: CampaignId) -> Option<&Campaign> {
        self.campaigns.get(&campaign_id)
    }

    pub fn expect(&self, campaign_id: CampaignId) -> Result<&Campaign, Error> {
        self.get(campaign_id)
            .ok_or(Error::CampaignNotFound { campaign_id })
    }

    #[tracing::instrument(skip(self))]
    pub fn insert(&mut self, draft: CampaignDraft) -> Result<&Campaign, Error> {
        draft.validate()?;

        let campaign = draft.into_campaign(CampaignId::new(), Utc::now());
        let campaign_id = campaign.id;
        self.order.push(campaign_id);

        Ok(&*self.campaigns.entry(campaign_id).or_insert(campaign))
    }

    /// Replaces the editable fields of a campaign. A status change must be a
    /// legal transition.
    #[tracing::instrument(skip(self))]
    pub fn replace(
        &mut self,
        campaign_id: CampaignId,
        draft: CampaignDraft,
    ) -> Result<&Campaign, Error> {
        draft.validate()?;

        let existing = self
            .campaigns
            .get_mut(&campaign_id)
            .ok_or(Error::CampaignNotFound { campaign_id })?;

        if !existing.status.can_transition_to(draft.status) {
            return Err(Error::InvalidStatusTransition {
                campaign_id,
                from: existing.status,
                to: draft.status,
            });
        }

        let updated = draft.into_campaign(campaign_id, Utc::now());
        *existing = Campaign {
            created_at: existing.created_at,
            ..updated
        };

        Ok(&*existing)
    }

    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, campaign_id: CampaignId) -> Result<Campaign, Error> {
        let campaign = self
            .campaigns
            .remove(&campaign_id)
            .ok_or(Error::CampaignNotFound { campaign_id })?;
        self.order.retain(|id| *id != campaign_id);

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    pub fn set_status(
        &mut self,
        campaign_id: CampaignId,
        status: CampaignStatus,
    ) -> Result<&Campaign, Error> {
        let campaign = self
            .campaigns
            .get_mut(&campaign_id)
            .ok_or(Error::CampaignNotFound { campaign_id })?;

        if !campaign.status.can_transition_to(status) {
            return Err(Error::InvalidStatusTransition {
                campaign_id,
                from: campaign.status,
                to: status,
            });
        }

        campaign.status = status;
        campaign.modified_at = Utc::now();

        Ok(&*campaign)
    }

    /// Flips an active campaign to paused and back. Completed campaigns
    /// cannot be toggled.
    #[tracing::instrument(skip(self))]
    pub fn toggle_status(&mut self, campaign_id: CampaignId) -> Result<&Campaign, Error> {
        let status = self.expect(campaign_id)?.status;
        let toggled = status.toggled().ok_or(Error::InvalidStatusTransition {
            campaign_id,
            from: status,
            to: CampaignStatus::Active,
        })?;

        self.set_status(campaign_id, toggled)
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

    #[test]
    fn insert_appends_exactly_one_record() {
        let mut store = CampaignStore::new();

        let id = store.insert(draft("X", 100)).unwrap().id;

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().name, "X");
    }

    #[test]
    fn insert_rejects_invalid_drafts_without_side_effects() {
        let mut store = CampaignStore::new();

        assert_eq!(
            store.insert(draft("", 100)).unwrap_err(),
            Error::CampaignNameRequired
        );
        assert_eq!(
            store.insert(draft("X", 0)).unwrap_err(),
            Error::CampaignBudgetNotPositive { budget: 0 }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_names_are_distinct_records() {
        let mut store = CampaignStore::new();
        let first = store.insert(draft("Same", 100)).unwrap().id;
        let second = store.insert(draft("Same", 200)).unwrap().id;

        store.remove(first).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(second).unwrap().budget, 200);
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut store = CampaignStore::new();
        for name in &["a", "b", "c"] {
            store.insert(draft(name, 100)).unwrap();
        }
        let b = store.iter().nth(1).unwrap().id;

        store.remove(b).unwrap();

        let names: Vec<_> = store.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn replace_keeps_id_and_creation_time() {
        let mut store = CampaignStore::new();
        let original = store.insert(draft("Before", 100)).unwrap().clone();

        let updated = store
            .replace(original.id, draft("After", 500))
            .unwrap()
            .clone();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, "After");
        assert_eq!(updated.budget, 500);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_cannot_reopen_completed_campaign() {
        let mut store = CampaignStore::new();
        let id = store
            .insert(CampaignDraft {
                status: CampaignStatus::Completed,
                ..draft("Done", 100)
            })
            .unwrap()
            .id;

        let result = store.replace(id, draft("Done", 100));

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidStatusTransition {
                campaign_id: id,
                from: CampaignStatus::Completed,
                to: CampaignStatus::Active,
            }
        );
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut store = CampaignStore::new();
        let missing = CampaignId::new();
        let not_found = Error::CampaignNotFound {
            campaign_id: missing,
        };

        assert_eq!(store.remove(missing).unwrap_err(), not_found);
        assert_eq!(store.toggle_status(missing).unwrap_err(), not_found);
        assert_eq!(
            store.replace(missing, draft("X", 100)).unwrap_err(),
            not_found
        );
    }

    #[test]
    fn toggle_twice_round_trips() {
        let mut store = CampaignStore::new();
        let id = store.insert(draft("X", 100)).unwrap().id;

        let once = store.toggle_status(id).unwrap().status;
        let twice = store.toggle_status(id).unwrap().status;

        assert_eq!(once, CampaignStatus::Paused);
        assert_eq!(twice, CampaignStatus::Active);
    }

    #[test]
    fn toggle_refuses_completed() {
        let mut store = CampaignStore::new();
        let id = store.insert(draft("X", 100)).unwrap().id;
        store.set_status(id, CampaignStatus::Completed).unwrap();

        let result = store.toggle_status(id);

        assert!(matches!(
            result,
            Err(Error::InvalidStatusTransition {
                from: CampaignStatus::Completed,
                ..
            })
        ));
        assert_eq!(store.get(id).unwrap().status, CampaignStatus::Completed);
    }
}
