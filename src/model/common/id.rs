use std::{fmt::Display, str::FromStr};

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use rand::Rng;
use rocket::{
    form::{self, prelude::ErrorKind, FromFormField, ValueField},
    http::{
        impl_from_uri_param_identity,
        uri::fmt::{Path, UriDisplay},
    },
    request::FromParam,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw length of an ID; rendered as twice as many hex characters.
pub const ID_LENGTH: usize = 12;

/// An opaque unique record identifier, assigned at creation time.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Id([u8; ID_LENGTH]);

impl Id {
    /// Generate a fresh random ID.
    pub fn new() -> Self {
        let mut bytes = [0_u8; ID_LENGTH];
        rand::thread_rng().fill(&mut bytes);
        Self(bytes)
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Id {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", HEXLOWER.encode(&self.0))
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ID_LENGTH * 2 {
            return Err(ParseIdError::InvalidLength(s.len()));
        }
        let bytes = HEXLOWER_PERMISSIVE
            .decode(s.as_bytes())
            .map_err(|_| ParseIdError::InvalidHex)?;
        let mut id = [0_u8; ID_LENGTH];
        id.copy_from_slice(&bytes);
        Ok(Self(id))
    }
}

impl TryFrom<String> for Id {
    type Error = ParseIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.to_string()
    }
}

impl<'a> FromParam<'a> for Id {
    type Error = ParseIdError;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        param.parse::<Id>()
    }
}

impl<'r> FromFormField<'r> for Id {
    fn from_value(field: ValueField<'r>) -> form::Result<'r, Self> {
        field.value.parse::<Id>().map_err(|err| {
            let error = ErrorKind::Custom(Box::new(err));
            error.into()
        })
    }
}

impl UriDisplay<Path> for Id {
    fn fmt(&self, formatter: &mut rocket::http::uri::fmt::Formatter<'_, Path>) -> std::fmt::Result {
        formatter.write_value(self.to_string())
    }
}

impl_from_uri_param_identity!([Path] Id);

#[derive(Debug, Error)]
pub enum ParseIdError {
    #[error("id must be exactly {} characters, got {0}", ID_LENGTH * 2)]
    InvalidLength(usize),
    #[error("id must be hex-encoded")]
    InvalidHex,
}
