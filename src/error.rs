use std::io::Cursor;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};
use serde_json::json;
use thiserror::Error;

use crate::model::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for request handling.
#[derive(Debug, Error)]
pub enum Error {
    /// Infrastructure failure in the backing store.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Token signing or validation failure.
    #[error(transparent)]
    Jwt(#[from] JwtError),
    /// An expected business-rule rejection.
    #[error(transparent)]
    Rejected(#[from] Rejection),
    /// Escape hatch for anything else.
    #[error("{1}")]
    Status(Status, String),
}

impl Error {
    /// Shorthand for a [`Rejection::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::Rejected(Rejection::NotFound(what.into()))
    }
}

/// An expected business outcome: the request was understood and turned
/// down. Each rejection carries a stable machine-readable reason so
/// clients never have to parse prose.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("email address is already registered")]
    DuplicateEmail,
    #[error("national id is already registered")]
    DuplicateNationalId,
    #[error("{0} not found")]
    NotFound(String),
    #[error("voter has already cast a ballot in the current election")]
    AlreadyVoted,
    #[error("no election is currently active")]
    NoActiveElection,
    #[error("candidate is not standing for any position in the active election")]
    InvalidCandidate,
    #[error("election must end after it starts")]
    InvalidElectionWindow,
    #[error("minimum age for this role is {0}")]
    IneligibleAge(u32),
    #[error("{0}")]
    InvalidField(&'static str),
    #[error("no user found with the provided email and password combination")]
    InvalidCredentials,
    #[error("incorrect verification code")]
    InvalidOtp,
}

impl Rejection {
    /// The stable reason identifier reported to API clients.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "duplicate-email",
            Self::DuplicateNationalId => "duplicate-national-id",
            Self::NotFound(_) => "not-found",
            Self::AlreadyVoted => "already-voted",
            Self::NoActiveElection => "no-active-election",
            Self::InvalidCandidate => "invalid-candidate",
            Self::InvalidElectionWindow => "invalid-election-window",
            Self::IneligibleAge(_) => "ineligible-age",
            Self::InvalidField(_) => "invalid-field",
            Self::InvalidCredentials => "invalid-credentials",
            Self::InvalidOtp => "invalid-otp",
        }
    }

    /// The HTTP status this rejection maps to.
    pub fn status(&self) -> Status {
        match self {
            Self::DuplicateEmail
            | Self::DuplicateNationalId
            | Self::InvalidElectionWindow
            | Self::IneligibleAge(_)
            | Self::InvalidField(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
            Self::AlreadyVoted | Self::NoActiveElection | Self::InvalidCandidate => {
                Status::UnprocessableEntity
            }
            Self::InvalidCredentials | Self::InvalidOtp => Status::Unauthorized,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'o> {
        match self {
            // Rejections get a structured body; the caller is expected to
            // handle them.
            Self::Rejected(rejection) => {
                warn!("request rejected: {rejection}");
                let body = json!({
                    "reason": rejection.reason(),
                    "message": rejection.to_string(),
                })
                .to_string();
                Response::build()
                    .status(rejection.status())
                    .header(ContentType::JSON)
                    .sized_body(body.len(), Cursor::new(body))
                    .ok()
            }
            // Store failures are never the caller's fault.
            Self::Store(err) => {
                error!("store failure: {err}");
                Err(Status::InternalServerError)
            }
            Self::Jwt(err) => {
                warn!("token validation failed: {err}");
                Err(match err.into_kind() {
                    JwtErrorKind::ExpiredSignature | JwtErrorKind::ImmatureSignature => {
                        Status::Unauthorized
                    }
                    _ => Status::BadRequest,
                })
            }
            Self::Status(status, message) => {
                warn!("{message}");
                Err(status)
            }
        }
    }
}
