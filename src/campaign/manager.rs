use tracing::info;

use crate::error::Error;
use crate::metrics::filter::{filter_campaigns, CampaignFilter};
use crate::user::auth::AuthState;

use super::store::CampaignStore;
use super::{Campaign, CampaignDraft, CampaignId, CampaignStatus};

#[tracing::instrument(skip(auth, store))]
pub fn create_campaign(
    auth: &AuthState,
    store: &mut CampaignStore,
    draft: CampaignDraft,
) -> Result<Campaign, Error> {
    let user = auth.require_edit("create campaign")?;

    let campaign = store.insert(draft)?.clone();
    info!(user_id = %user.id, campaign_id = %campaign.id, "created campaign");

    Ok(campaign)
}

#[tracing::instrument(skip(auth, store))]
pub fn get_campaigns(
    auth: &AuthState,
    store: &CampaignStore,
    filter: &CampaignFilter,
) -> Result<Vec<Campaign>, Error> {
    auth.require_view()?;

    let campaigns = filter_campaigns(store.iter(), filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(campaigns)
}

#[tracing::instrument(skip(auth, store))]
pub fn get_campaign_by_id(
    auth: &AuthState,
    store: &CampaignStore,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    auth.require_view()?;

    let campaign = store.expect(campaign_id)?.clone();

    Ok(campaign)
}

#[tracing::instrument(skip(auth, store))]
pub fn update_campaign(
    auth: &AuthState,
    store: &mut CampaignStore,
    campaign_id: CampaignId,
    draft: CampaignDraft,
) -> Result<Campaign, Error> {
    let user = auth.require_edit("update campaign")?;

    let campaign = store.replace(campaign_id, draft)?.clone();
    info!(user_id = %user.id, %campaign_id, "updated campaign");

    Ok(campaign)
}

#[tracing::instrument(skip(auth, store))]
pub fn delete_campaign(
    auth: &AuthState,
    store: &mut CampaignStore,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let user = auth.require_edit("delete campaign")?;

    let campaign = store.remove(campaign_id)?;
    info!(user_id = %user.id, %campaign_id, "deleted campaign");

    Ok(campaign)
}

#[tracing::instrument(skip(auth, store))]
pub fn toggle_campaign_status(
    auth: &AuthState,
    store: &mut CampaignStore,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let user = auth.require_edit("change campaign status")?;

    let campaign = store.toggle_status(campaign_id)?.clone();
    info!(user_id = %user.id, %campaign_id, status = ?campaign.status, "toggled campaign status");

    Ok(campaign)
}

#[tracing::instrument(skip(auth, store))]
pub fn complete_campaign(
    auth: &AuthState,
    store: &mut CampaignStore,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let user = auth.require_edit("complete campaign")?;

    let campaign = store
        .set_status(campaign_id, CampaignStatus::Completed)?
        .clone();
    info!(user_id = %user.id, %campaign_id, "completed campaign");

    Ok(campaign)
}
