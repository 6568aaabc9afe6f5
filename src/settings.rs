use actix_web::web::{Data, Json};
use actix_web::{get, put};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Error;
use crate::reference::{self, expect_code};
use crate::session::SessionHandle;
use crate::user::auth::AuthState;

/// Workspace-wide preferences edited on the settings page.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WorkspaceSettings {
    pub company_name: String,
    pub timezone: String,
    pub currency: String,
    pub date_format: String,
    pub language: String,
    pub country: String,
    pub budget_alert_threshold: u8,
}

impl Default for WorkspaceSettings {
    fn default() -> WorkspaceSettings {
        WorkspaceSettings {
            company_name: "Marketing Analytics Pro".to_string(),
            timezone: "UTC-8".to_string(),
            currency: "USD".to_string(),
            date_format: "MM/DD/YYYY".to_string(),
            language: "en".to_string(),
            country: "US".to_string(),
            budget_alert_threshold: 80,
        }
    }
}

impl WorkspaceSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.company_name.trim().is_empty() {
            return Err(Error::CompanyNameRequired);
        }

        expect_code("timezones", reference::TIMEZONES, &self.timezone)?;
        expect_code("currencies", reference::CURRENCIES, &self.currency)?;
        expect_code("date_formats", reference::DATE_FORMATS, &self.date_format)?;
        expect_code("languages", reference::LANGUAGES, &self.language)?;
        expect_code("countries", reference::COUNTRIES, &self.country)?;

        if !reference::BUDGET_ALERT_THRESHOLDS.contains(&self.budget_alert_threshold) {
            return Err(Error::UnknownReferenceCode {
                table: "budget_alert_thresholds",
                code: self.budget_alert_threshold.to_string(),
            });
        }

        Ok(())
    }
}

#[tracing::instrument(skip(auth, settings))]
pub fn get_settings(
    auth: &AuthState,
    settings: &WorkspaceSettings,
) -> Result<WorkspaceSettings, Error> {
    auth.require_edit("view settings")?;

    Ok(settings.clone())
}

#[tracing::instrument(skip(auth, settings))]
pub fn update_settings(
    auth: &AuthState,
    settings: &mut WorkspaceSettings,
    update: WorkspaceSettings,
) -> Result<WorkspaceSettings, Error> {
    let user = auth.require_edit("update settings")?;
    update.validate()?;

    *settings = WorkspaceSettings {
        company_name: update.company_name.trim().to_string(),
        ..update
    };
    info!(user_id = %user.id, "updated settings");

    Ok(settings.clone())
}

#[get("/settings")]
#[tracing::instrument(skip(session))]
pub async fn get_workspace_settings(
    session: Data<SessionHandle>,
) -> Result<Json<WorkspaceSettings>, Error> {
    let settings = session
        .run(|dashboard| get_settings(&dashboard.auth, &dashboard.settings))
        .await?;

    Ok(Json(settings))
}

#[put("/settings")]
#[tracing::instrument(skip(session))]
pub async fn update_workspace_settings(
    session: Data<SessionHandle>,
    body: Json<WorkspaceSettings>,
) -> Result<Json<WorkspaceSettings>, Error> {
    let update = body.into_inner();

    let settings = session
        .run(move |dashboard| update_settings(&dashboard.auth, &mut dashboard.settings, update))
        .await?;

    Ok(Json(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn signed_in_as(user_index: usize) -> AuthState {
        let roster = seed::users();
        let mut auth = AuthState::new(roster.clone());
        auth.login(roster[user_index].clone());
        auth
    }

    #[test]
    fn defaults_are_valid() {
        assert!(WorkspaceSettings::default().validate().is_ok());
    }

    #[test]
    fn admin_updates_settings() {
        let auth = signed_in_as(0);
        let mut settings = WorkspaceSettings::default();
        let update = WorkspaceSettings {
            company_name: "  Acme  ".into(),
            currency: "EUR".into(),
            budget_alert_threshold: 90,
            ..WorkspaceSettings::default()
        };

        let updated = update_settings(&auth, &mut settings, update).unwrap();

        assert_eq!(updated.company_name, "Acme");
        assert_eq!(settings.currency, "EUR");
        assert_eq!(settings.budget_alert_threshold, 90);
    }

    #[test]
    fn viewer_cannot_read_or_write() {
        let auth = signed_in_as(1);
        let mut settings = WorkspaceSettings::default();

        let read = get_settings(&auth, &settings);
        let write = update_settings(&auth, &mut settings, WorkspaceSettings::default());

        assert!(matches!(read, Err(Error::PermissionDenied { .. })));
        assert!(matches!(write, Err(Error::PermissionDenied { .. })));
    }

    #[test]
    fn invalid_update_leaves_settings_alone() {
        let auth = signed_in_as(0);
        let mut settings = WorkspaceSettings::default();

        let blank = update_settings(
            &auth,
            &mut settings,
            WorkspaceSettings {
                company_name: " ".into(),
                ..WorkspaceSettings::default()
            },
        );
        let bad_currency = update_settings(
            &auth,
            &mut settings,
            WorkspaceSettings {
                currency: "XYZ".into(),
                ..WorkspaceSettings::default()
            },
        );
        let bad_threshold = update_settings(
            &auth,
            &mut settings,
            WorkspaceSettings {
                budget_alert_threshold: 42,
                ..WorkspaceSettings::default()
            },
        );

        assert_eq!(blank.unwrap_err(), Error::CompanyNameRequired);
        assert_eq!(
            bad_currency.unwrap_err(),
            Error::UnknownReferenceCode {
                table: "currencies",
                code: "XYZ".into(),
            }
        );
        assert_eq!(
            bad_threshold.unwrap_err(),
            Error::UnknownReferenceCode {
                table: "budget_alert_thresholds",
                code: "42".into(),
            }
        );
        assert_eq!(settings, WorkspaceSettings::default());
    }
}
