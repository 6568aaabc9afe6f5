use actix_web::get;
use actix_web::web::{Data, Json};
use serde::Serialize;

use crate::error::Error;
use crate::session::SessionHandle;

#[derive(Copy, Clone, Debug, Serialize)]
pub struct Entry {
    pub code: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: &[Entry] = &[
    Entry { code: "USD", name: "US Dollar" },
    Entry { code: "EUR", name: "Euro" },
    Entry { code: "GBP", name: "British Pound" },
    Entry { code: "JPY", name: "Japanese Yen" },
    Entry { code: "CAD", name: "Canadian Dollar" },
    Entry { code: "AUD", name: "Australian Dollar" },
    Entry { code: "INR", name: "Indian Rupee" },
];

pub const TIMEZONES: &[Entry] = &[
    Entry { code: "UTC-8", name: "Pacific Time" },
    Entry { code: "UTC-7", name: "Mountain Time" },
    Entry { code: "UTC-6", name: "Central Time" },
    Entry { code: "UTC-5", name: "Eastern Time" },
    Entry { code: "UTC+0", name: "Greenwich Mean Time" },
    Entry { code: "UTC+1", name: "Central European Time" },
    Entry { code: "UTC+5:30", name: "India Standard Time" },
    Entry { code: "UTC+9", name: "Japan Standard Time" },
];

pub const COUNTRIES: &[Entry] = &[
    Entry { code: "US", name: "United States" },
    Entry { code: "CA", name: "Canada" },
    Entry { code: "GB", name: "United Kingdom" },
    Entry { code: "DE", name: "Germany" },
    Entry { code: "FR", name: "France" },
    Entry { code: "IN", name: "India" },
    Entry { code: "JP", name: "Japan" },
    Entry { code: "AU", name: "Australia" },
];

pub const LANGUAGES: &[Entry] = &[
    Entry { code: "en", name: "English" },
    Entry { code: "es", name: "Spanish" },
    Entry { code: "fr", name: "French" },
    Entry { code: "de", name: "German" },
    Entry { code: "ja", name: "Japanese" },
];

pub const DATE_FORMATS: &[Entry] = &[
    Entry { code: "MM/DD/YYYY", name: "MM/DD/YYYY" },
    Entry { code: "DD/MM/YYYY", name: "DD/MM/YYYY" },
    Entry { code: "YYYY-MM-DD", name: "YYYY-MM-DD" },
    Entry { code: "DD-MM-YYYY", name: "DD-MM-YYYY" },
    Entry { code: "MM-DD-YYYY", name: "MM-DD-YYYY" },
];

pub const BUDGET_ALERT_THRESHOLDS: &[u8] = &[50, 70, 80, 90, 95];

/// Fails unless `table` contains `code`.
pub fn expect_code(table_name: &'static str, table: &[Entry], code: &str) -> Result<(), Error> {
    if table.iter().any(|entry| entry.code == code) {
        Ok(())
    } else {
        Err(Error::UnknownReferenceCode {
            table: table_name,
            code: code.to_string(),
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ReferenceBody {
    pub currencies: &'static [Entry],
    pub timezones: &'static [Entry],
    pub countries: &'static [Entry],
    pub languages: &'static [Entry],
    pub date_formats: &'static [Entry],
    pub budget_alert_thresholds: &'static [u8],
}

#[get("/reference")]
#[tracing::instrument(skip(session))]
pub async fn get_reference_tables(
    session: Data<SessionHandle>,
) -> Result<Json<ReferenceBody>, Error> {
    session
        .run(|dashboard| dashboard.auth.require_view().map(|_| ()))
        .await?;

    Ok(Json(ReferenceBody {
        currencies: CURRENCIES,
        timezones: TIMEZONES,
        countries: COUNTRIES,
        languages: LANGUAGES,
        date_formats: DATE_FORMATS,
        budget_alert_thresholds: BUDGET_ALERT_THRESHOLDS,
    }))
}
