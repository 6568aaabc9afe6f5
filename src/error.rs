use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::NaiveDate;
use derivative::Derivative;
use serde::{Serialize, Serializer};

use crate::campaign::{CampaignId, CampaignStatus};
use crate::team::MemberId;
use crate::user::UserId;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    #[serde(serialize_with = "display")]
    InvalidQuery(#[derivative(PartialEq = "ignore")] QueryPayloadError),
    CampaignNameRequired,
    CampaignBudgetNotPositive {
        budget: u64,
    },
    CampaignDatesOutOfOrder {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    InvalidDateRange {
        from: NaiveDate,
        to: NaiveDate,
    },
    CompanyNameRequired,
    UnknownReferenceCode {
        table: &'static str,
        code: String,
    },
    UserNameRequired,
    UserEmailRequired,
    MemberNameRequired,
    MemberEmailRequired,

    // 401
    NotLoggedIn,

    // 403
    PermissionDenied {
        user_id: UserId,
        action: &'static str,
    },

    // 404
    PathNotFound,
    UserNotFound {
        user_id: UserId,
    },
    ProjectNotFound {
        project_id: String,
    },
    CampaignNotFound {
        campaign_id: CampaignId,
    },
    MemberNotFound {
        member_id: MemberId,
    },

    // 409
    InvalidStatusTransition {
        campaign_id: CampaignId,
        from: CampaignStatus,
        to: CampaignStatus,
    },

    // 500
    SessionUnavailable,
    InvalidConfig {
        key: &'static str,
        value: String,
    },
    #[serde(serialize_with = "display")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::InvalidQuery(_) => "E4001002",
            Error::CampaignNameRequired => "E4001003",
            Error::CampaignBudgetNotPositive { .. } => "E4001004",
            Error::CampaignDatesOutOfOrder { .. } => "E4001005",
            Error::InvalidDateRange { .. } => "E4001006",
            Error::CompanyNameRequired => "E4001007",
            Error::UnknownReferenceCode { .. } => "E4001008",
            Error::UserNameRequired => "E4001009",
            Error::UserEmailRequired => "E4001010",
            Error::MemberNameRequired => "E4001011",
            Error::MemberEmailRequired => "E4001012",
            Error::NotLoggedIn => "E4011000",
            Error::PermissionDenied { .. } => "E4031000",
            Error::PathNotFound => "E4041000",
            Error::UserNotFound { .. } => "E4041001",
            Error::ProjectNotFound { .. } => "E4041002",
            Error::CampaignNotFound { .. } => "E4041003",
            Error::MemberNotFound { .. } => "E4041004",
            Error::InvalidStatusTransition { .. } => "E4091000",
            Error::SessionUnavailable => "E5001000",
            Error::InvalidConfig { .. } => "E5001001",
            Error::IoError(_) => "E5001002",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::InvalidQuery(_) => "The given query could not be parsed",
            Error::CampaignNameRequired => "Campaign name is required",
            Error::CampaignBudgetNotPositive { .. } => "Budget must be greater than 0",
            Error::CampaignDatesOutOfOrder { .. } => {
                "The campaign end date is before its start date"
            }
            Error::InvalidDateRange { .. } => "The date range ends before it starts",
            Error::CompanyNameRequired => "Company name is required",
            Error::UnknownReferenceCode { .. } => {
                "The given code is not one of the supported values"
            }
            Error::UserNameRequired => "User name cannot be blank",
            Error::UserEmailRequired => "User email cannot be blank",
            Error::MemberNameRequired => "Member name is required",
            Error::MemberEmailRequired => "Member email is required",
            Error::NotLoggedIn => "No user is currently signed in",
            Error::PermissionDenied { .. } => "Admin access is required for this action",
            Error::PathNotFound => "The requested path was not found",
            Error::UserNotFound { .. } => "The requested user was not found",
            Error::ProjectNotFound { .. } => "The requested project was not found",
            Error::CampaignNotFound { .. } => "The requested campaign was not found",
            Error::MemberNotFound { .. } => "The requested team member was not found",
            Error::InvalidStatusTransition { .. } => {
                "The campaign cannot move to the requested status"
            }
            Error::SessionUnavailable => "The dashboard session is no longer running",
            Error::InvalidConfig { .. } => "A configuration value could not be parsed",
            Error::IoError(_) => "An error occurred during an I/O operation",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::CampaignNameRequired => StatusCode::BAD_REQUEST,
            Error::CampaignBudgetNotPositive { .. } => StatusCode::BAD_REQUEST,
            Error::CampaignDatesOutOfOrder { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidDateRange { .. } => StatusCode::BAD_REQUEST,
            Error::CompanyNameRequired => StatusCode::BAD_REQUEST,
            Error::UnknownReferenceCode { .. } => StatusCode::BAD_REQUEST,
            Error::UserNameRequired => StatusCode::BAD_REQUEST,
            Error::UserEmailRequired => StatusCode::BAD_REQUEST,
            Error::MemberNameRequired => StatusCode::BAD_REQUEST,
            Error::MemberEmailRequired => StatusCode::BAD_REQUEST,
            Error::NotLoggedIn => StatusCode::UNAUTHORIZED,
            Error::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Error::ProjectNotFound { .. } => StatusCode::NOT_FOUND,
            Error::CampaignNotFound { .. } => StatusCode::NOT_FOUND,
            Error::MemberNotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            Error::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy<'a> {
            error_code: &'static str,
            error_message: &'static str,
            error_meta: &'a Error,
        }

        HttpResponse::build(self.status_code()).json(&Dummy {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::InvalidQuery(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
