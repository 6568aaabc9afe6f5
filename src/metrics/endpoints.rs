use actix_web::get;
use actix_web::web::{Data, Json, Query};
use chrono::Utc;
use serde::Serialize;

use super::filter::{filter_campaigns, CampaignFilter, FilterQuery};
use super::Overview;
use crate::error::Error;
use crate::session::SessionHandle;

#[derive(Clone, Debug, Serialize)]
pub struct MetricsBody {
    #[serde(flatten)]
    pub overview: Overview,
    pub filter: CampaignFilter,
    pub active_filters: usize,
}

#[get("/metrics")]
#[tracing::instrument(skip(session))]
pub async fn get_metrics(
    session: Data<SessionHandle>,
    query: Query<FilterQuery>,
) -> Result<Json<MetricsBody>, Error> {
    let filter = query.into_inner().into_filter(Utc::now().date_naive())?;

    let body = session
        .run(move |dashboard| {
            dashboard.auth.require_view()?;

            let campaigns = filter_campaigns(dashboard.campaigns.iter(), &filter);
            let overview = Overview::compute(campaigns, &dashboard.thresholds);
            let active_filters = filter.active_count();

            Ok(MetricsBody {
                overview,
                filter,
                active_filters,
            })
        })
        .await?;

    Ok(Json(body))
}
