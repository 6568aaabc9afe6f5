use actix_web::http::header;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, HttpResponse};
use chrono::Utc;
use serde::Serialize;

use super::{PortfolioSummary, Project};
use crate::campaign::CampaignBody;
use crate::error::Error;
use crate::metrics::filter::{filter_campaigns, FilterQuery};
use crate::metrics::Overview;
use crate::session::SessionHandle;

#[derive(Clone, Debug, Serialize)]
pub struct ProjectsBody {
    pub projects: Vec<Project>,
    pub summary: PortfolioSummary,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProjectDashboardBody {
    pub project: Project,
    pub overview: Overview,
    pub active_filters: usize,
    pub campaigns: Vec<CampaignBody>,
}

#[get("/projects")]
#[tracing::instrument(skip(session))]
pub async fn get_projects(session: Data<SessionHandle>) -> Result<Json<ProjectsBody>, Error> {
    let body = session
        .run(|dashboard| {
            dashboard.auth.require_view()?;

            Ok(ProjectsBody {
                projects: dashboard.projects.projects().to_vec(),
                summary: dashboard.projects.summary(),
            })
        })
        .await?;

    Ok(Json(body))
}

#[get("/projects/current")]
#[tracing::instrument(skip(session))]
pub async fn get_current_project(
    session: Data<SessionHandle>,
) -> Result<Json<Option<Project>>, Error> {
    let project = session
        .run(|dashboard| {
            dashboard.auth.require_view()?;
            Ok(dashboard.projects.current_project().cloned())
        })
        .await?;

    Ok(Json(project))
}

#[delete("/projects/current")]
#[tracing::instrument(skip(session))]
pub async fn clear_current_project(session: Data<SessionHandle>) -> Result<HttpResponse, Error> {
    session
        .run(|dashboard| {
            dashboard.auth.require_view()?;
            dashboard.projects.clear();
            Ok(())
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/projects/{project_id}")]
#[tracing::instrument(skip(session))]
pub async fn get_project_by_id(
    session: Data<SessionHandle>,
    params: Path<String>,
) -> Result<Json<Project>, Error> {
    let project_id = params.into_inner();

    let project = session
        .run(move |dashboard| {
            dashboard.auth.require_view()?;
            dashboard
                .projects
                .get_project_by_id(&project_id)
                .cloned()
                .ok_or(Error::ProjectNotFound { project_id })
        })
        .await?;

    Ok(Json(project))
}

/// Enters the project and renders its dashboard. An unknown project sends the
/// client back to the project list instead of failing.
#[get("/projects/{project_id}/dashboard")]
#[tracing::instrument(skip(session))]
pub async fn get_project_dashboard(
    session: Data<SessionHandle>,
    params: Path<String>,
    query: Query<FilterQuery>,
) -> Result<HttpResponse, Error> {
    let project_id = params.into_inner();
    let filter = query.into_inner().into_filter(Utc::now().date_naive())?;

    let body = session
        .run(move |dashboard| {
            dashboard.auth.require_view()?;

            let project = match dashboard.projects.enter(&project_id) {
                Some(project) => project.clone(),
                None => return Ok(None),
            };

            let campaigns = filter_campaigns(dashboard.campaigns.iter(), &filter);
            let overview = Overview::compute(campaigns.iter().copied(), &dashboard.thresholds);
            let campaigns = campaigns
                .into_iter()
                .map(|campaign| CampaignBody::render(campaign.clone(), &dashboard.thresholds))
                .collect();

            Ok(Some(ProjectDashboardBody {
                project,
                overview,
                active_filters: filter.active_count(),
                campaigns,
            }))
        })
        .await?;

    match body {
        Some(body) => Ok(HttpResponse::Ok().json(body)),
        None => Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/projects"))
            .finish()),
    }
}
