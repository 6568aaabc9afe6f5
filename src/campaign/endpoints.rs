use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, put};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::{display_progress, manager, Campaign, CampaignDraft, CampaignId, CampaignStatus};
use super::{Channel, PerformanceBand};
use crate::config::Thresholds;
use crate::error::Error;
use crate::metrics::filter::FilterQuery;
use crate::session::SessionHandle;

#[derive(Clone, Debug, Serialize)]
pub struct CampaignBody {
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
    pub performance: f64,
    pub performance_display: f64,
    pub performance_band: PerformanceBand,
    pub budget_progress: f64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl CampaignBody {
    pub fn render(campaign: Campaign, thresholds: &Thresholds) -> CampaignBody {
        let performance = campaign.performance();

        CampaignBody {
            performance,
            performance_display: display_progress(performance),
            performance_band: campaign.performance_band(thresholds),
            budget_progress: campaign.budget_progress(),
            id: campaign.id,
            name: campaign.name,
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
            created_at: campaign.created_at,
            modified_at: campaign.modified_at,
        }
    }
}

#[post("/campaigns")]
#[tracing::instrument(skip(session))]
pub async fn create_campaign(
    session: Data<SessionHandle>,
    body: Json<CampaignDraft>,
) -> Result<Json<CampaignBody>, Error> {
    let draft = body.into_inner();

    let body = session
        .run(move |dashboard| {
            let campaign =
                manager::create_campaign(&dashboard.auth, &mut dashboard.campaigns, draft)?;
            Ok(CampaignBody::render(campaign, &dashboard.thresholds))
        })
        .await?;

    Ok(Json(body))
}

#[get("/campaigns")]
#[tracing::instrument(skip(session))]
pub async fn get_campaigns(
    session: Data<SessionHandle>,
    query: Query<FilterQuery>,
) -> Result<Json<Vec<CampaignBody>>, Error> {
    let filter = query.into_inner().into_filter(Utc::now().date_naive())?;

    let body = session
        .run(move |dashboard| {
            let campaigns = manager::get_campaigns(&dashboard.auth, &dashboard.campaigns, &filter)?;
            Ok(campaigns
                .into_iter()
                .map(|campaign| CampaignBody::render(campaign, &dashboard.thresholds))
                .collect::<Vec<_>>())
        })
        .await?;

    Ok(Json(body))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(session))]
pub async fn get_campaign_by_id(
    session: Data<SessionHandle>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();

    let body = session
        .run(move |dashboard| {
            let campaign =
                manager::get_campaign_by_id(&dashboard.auth, &dashboard.campaigns, campaign_id)?;
            Ok(CampaignBody::render(campaign, &dashboard.thresholds))
        })
        .await?;

    Ok(Json(body))
}

#[put("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(session))]
pub async fn update_campaign(
    session: Data<SessionHandle>,
    params: Path<CampaignId>,
    body: Json<CampaignDraft>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let draft = body.into_inner();

    let body = session
        .run(move |dashboard| {
            let campaign = manager::update_campaign(
                &dashboard.auth,
                &mut dashboard.campaigns,
                campaign_id,
                draft,
            )?;
            Ok(CampaignBody::render(campaign, &dashboard.thresholds))
        })
        .await?;

    Ok(Json(body))
}

#[delete("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(session))]
pub async fn delete_campaign(
    session: Data<SessionHandle>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();

    let body = session
        .run(move |dashboard| {
            let campaign =
                manager::delete_campaign(&dashboard.auth, &mut dashboard.campaigns, campaign_id)?;
            Ok(CampaignBody::render(campaign, &dashboard.thresholds))
        })
        .await?;

    Ok(Json(body))
}

#[post("/campaigns/{campaign_id}/toggle-status")]
#[tracing::instrument(skip(session))]
pub async fn toggle_campaign_status(
    session: Data<SessionHandle>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();

    let body = session
        .run(move |dashboard| {
            let campaign = manager::toggle_campaign_status(
                &dashboard.auth,
                &mut dashboard.campaigns,
                campaign_id,
            )?;
            Ok(CampaignBody::render(campaign, &dashboard.thresholds))
        })
        .await?;

    Ok(Json(body))
}

#[post("/campaigns/{campaign_id}/complete")]
#[tracing::instrument(skip(session))]
pub async fn complete_campaign(
    session: Data<SessionHandle>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();

    let body = session
        .run(move |dashboard| {
            let campaign =
                manager::complete_campaign(&dashboard.auth, &mut dashboard.campaigns, campaign_id)?;
            Ok(CampaignBody::render(campaign, &dashboard.thresholds))
        })
        .await?;

    Ok(Json(body))
}
