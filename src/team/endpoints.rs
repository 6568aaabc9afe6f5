use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post};
use serde::Serialize;

use super::{manager, MemberDraft, MemberId, TeamMember, TeamSummary};
use crate::error::Error;
use crate::session::SessionHandle;

#[derive(Clone, Debug, Serialize)]
pub struct TeamBody {
    pub summary: TeamSummary,
    pub members: Vec<TeamMember>,
}

#[get("/team")]
#[tracing::instrument(skip(session))]
pub async fn get_team(session: Data<SessionHandle>) -> Result<Json<TeamBody>, Error> {
    let body = session
        .run(|dashboard| {
            let (members, summary) = manager::get_members(&dashboard.auth, &dashboard.team)?;
            Ok(TeamBody { summary, members })
        })
        .await?;

    Ok(Json(body))
}

#[post("/team")]
#[tracing::instrument(skip(session))]
pub async fn invite_member(
    session: Data<SessionHandle>,
    body: Json<MemberDraft>,
) -> Result<Json<TeamMember>, Error> {
    let draft = body.into_inner();

    let member = session
        .run(move |dashboard| manager::invite_member(&dashboard.auth, &mut dashboard.team, draft))
        .await?;

    Ok(Json(member))
}

#[delete("/team/{member_id}")]
#[tracing::instrument(skip(session))]
pub async fn remove_member(
    session: Data<SessionHandle>,
    params: Path<MemberId>,
) -> Result<Json<TeamMember>, Error> {
    let member_id = params.into_inner();

    let member = session
        .run(move |dashboard| {
            manager::remove_member(&dashboard.auth, &mut dashboard.team, member_id)
        })
        .await?;

    Ok(Json(member))
}
