use actix_web::web::{Data, Json, Path};
use actix_web::{get, patch, post};
use serde::{Deserialize, Serialize};

use super::auth::AuthState;
use super::{Capabilities, Role, User, UserId, UserPatch};
use crate::error::Error;
use crate::session::SessionHandle;

#[derive(Clone, Debug, Serialize)]
pub struct SessionBody {
    pub user: Option<User>,
    pub capabilities: Capabilities,
    pub available_users: Vec<User>,
}

impl SessionBody {
    pub fn render(auth: &AuthState) -> SessionBody {
        SessionBody {
            user: auth.current_user().cloned(),
            capabilities: auth.capabilities(),
            available_users: auth.roster().to_vec(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginBody {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
}

#[get("/session")]
#[tracing::instrument(skip(session))]
pub async fn get_session(session: Data<SessionHandle>) -> Result<Json<SessionBody>, Error> {
    let body = session
        .run(|dashboard| Ok(SessionBody::render(&dashboard.auth)))
        .await?;

    Ok(Json(body))
}

#[post("/session/login")]
#[tracing::instrument(skip(session))]
pub async fn login(
    session: Data<SessionHandle>,
    body: Json<LoginBody>,
) -> Result<Json<SessionBody>, Error> {
    let body = body.into_inner();
    let user = User {
        id: body.id.unwrap_or_else(UserId::new),
        name: body.name,
        email: body.email,
        role: body.role,
        avatar: body.avatar,
    };

    let body = session
        .run(move |dashboard| {
            dashboard.auth.login(user);
            Ok(SessionBody::render(&dashboard.auth))
        })
        .await?;

    Ok(Json(body))
}

#[post("/session/logout")]
#[tracing::instrument(skip(session))]
pub async fn logout(session: Data<SessionHandle>) -> Result<Json<SessionBody>, Error> {
    let body = session
        .run(|dashboard| {
            dashboard.auth.logout();
            Ok(SessionBody::render(&dashboard.auth))
        })
        .await?;

    Ok(Json(body))
}

#[post("/session/switch/{user_id}")]
#[tracing::instrument(skip(session))]
pub async fn switch_user(
    session: Data<SessionHandle>,
    params: Path<UserId>,
) -> Result<Json<SessionBody>, Error> {
    let user_id = params.into_inner();

    let body = session
        .run(move |dashboard| {
            dashboard.auth.switch_user(user_id)?;
            Ok(SessionBody::render(&dashboard.auth))
        })
        .await?;

    Ok(Json(body))
}

#[patch("/session/user")]
#[tracing::instrument(skip(session))]
pub async fn update_current_user(
    session: Data<SessionHandle>,
    body: Json<UserPatch>,
) -> Result<Json<User>, Error> {
    let patch = body.into_inner();

    let user = session
        .run(move |dashboard| dashboard.auth.update_user(patch).map(User::clone))
        .await?;

    Ok(Json(user))
}

#[get("/users")]
#[tracing::instrument(skip(session))]
pub async fn get_users(session: Data<SessionHandle>) -> Result<Json<Vec<User>>, Error> {
    let users = session
        .run(|dashboard| {
            dashboard.auth.require_view()?;
            Ok(dashboard.auth.roster().to_vec())
        })
        .await?;

    Ok(Json(users))
}
