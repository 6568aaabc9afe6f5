use actix_web::web::{self, Data, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use actix_web::{App, HttpServer, ResponseError};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::fmt::format::FmtSpan;

pub mod campaign;
pub mod config;
pub mod error;
pub mod metrics;
pub mod project;
pub mod reference;
pub mod seed;
pub mod session;
pub mod settings;
pub mod team;
pub mod typedid;
pub mod user;

use config::Config;
use error::Error;
use session::{Dashboard, SessionHandle};

/// Registers every endpoint along with the extractor error formatting. The
/// caller provides the [`SessionHandle`] as app data.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        // format query errors with custom format
        Error::InvalidQuery(err).into()
    }))
    .service(user::endpoints::get_session)
    .service(user::endpoints::login)
    .service(user::endpoints::logout)
    .service(user::endpoints::switch_user)
    .service(user::endpoints::update_current_user)
    .service(user::endpoints::get_users)
    // "current" must be tried before it is taken for a project id
    .service(project::endpoints::get_projects)
    .service(project::endpoints::get_current_project)
    .service(project::endpoints::clear_current_project)
    .service(project::endpoints::get_project_by_id)
    .service(project::endpoints::get_project_dashboard)
    .service(campaign::endpoints::create_campaign)
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::get_campaign_by_id)
    .service(campaign::endpoints::update_campaign)
    .service(campaign::endpoints::delete_campaign)
    .service(campaign::endpoints::toggle_campaign_status)
    .service(campaign::endpoints::complete_campaign)
    .service(metrics::endpoints::get_metrics)
    .service(settings::get_workspace_settings)
    .service(settings::update_workspace_settings)
    .service(team::endpoints::get_team)
    .service(team::endpoints::invite_member)
    .service(team::endpoints::remove_member)
    .service(reference::get_reference_tables);
}

pub fn not_found_service() -> actix_web::Route {
    web::to(|| async { Error::PathNotFound.error_response() })
}

pub async fn run(config: Config) -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    let session: SessionHandle = session::spawn(Dashboard::seeded(&config));

    info!(bind = %config.bind, "starting dashboard server");
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(session.clone()))
            .wrap(TracingLogger::default())
            .configure(configure)
            .default_service(not_found_service())
    })
    .bind(&config.bind)?
    .run()
    .await?;

    Ok(())
}
