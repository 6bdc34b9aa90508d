use std::{fmt::Display, str::FromStr};

use rocket::{
    form::{self, prelude::ErrorKind, FromFormField, ValueField},
    http::{
        impl_from_uri_param_identity,
        uri::fmt::{Query, UriDisplay},
    },
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a phone number.
pub const PHONE_LENGTH: usize = 10;

/// Number of digits in a national ID.
pub const NATIONAL_ID_LENGTH: usize = 12;

/// An email address, validated for shape only.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = ParseEmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // local@domain.tld, with no whitespace anywhere
        let valid = !s.contains(char::is_whitespace)
            && s.split_once('@').map_or(false, |(local, domain)| {
                !local.is_empty()
                    && domain.split_once('.').map_or(false, |(host, tld)| {
                        !host.is_empty() && !tld.is_empty()
                    })
            });
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseEmailError)
        }
    }
}

impl TryFrom<String> for Email {
    type Error = ParseEmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

/// A phone number: exactly [`PHONE_LENGTH`] digits.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Phone {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for Phone {
    type Err = ParsePhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == PHONE_LENGTH && all_digits(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParsePhoneError)
        }
    }
}

impl TryFrom<String> for Phone {
    type Error = ParsePhoneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl<'r> FromFormField<'r> for Phone {
    fn from_value(field: ValueField<'r>) -> form::Result<'r, Self> {
        field.value.parse::<Phone>().map_err(|err| {
            let error = ErrorKind::Custom(Box::new(err));
            error.into()
        })
    }
}

impl UriDisplay<Query> for Phone {
    fn fmt(&self, formatter: &mut rocket::http::uri::fmt::Formatter<'_, Query>) -> std::fmt::Result {
        formatter.write_value(&self.0)
    }
}

impl_from_uri_param_identity!([Query] Phone);

/// A national identity number: exactly [`NATIONAL_ID_LENGTH`] digits.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NationalId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for NationalId {
    type Err = ParseNationalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == NATIONAL_ID_LENGTH && all_digits(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseNationalIdError)
        }
    }
}

impl TryFrom<String> for NationalId {
    type Error = ParseNationalIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NationalId> for String {
    fn from(national_id: NationalId) -> Self {
        national_id.0
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Error)]
#[error("invalid email address")]
pub struct ParseEmailError;

#[derive(Debug, Error)]
#[error("phone number must be exactly {PHONE_LENGTH} digits")]
pub struct ParsePhoneError;

#[derive(Debug, Error)]
#[error("national id must be exactly {NATIONAL_ID_LENGTH} digits")]
pub struct ParseNationalIdError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!("voter@example.com".parse::<Email>().is_ok());
        assert!("first.last@sub.example.co".parse::<Email>().is_ok());
    }

    #[test]
    fn invalid_email() {
        assert!("".parse::<Email>().is_err());
        assert!("no-at-sign.example.com".parse::<Email>().is_err());
        assert!("@example.com".parse::<Email>().is_err());
        assert!("user@nodot".parse::<Email>().is_err());
        assert!("user@.com".parse::<Email>().is_err());
        assert!("user name@example.com".parse::<Email>().is_err());
    }

    #[test]
    fn valid_phone() {
        assert!("9876543210".parse::<Phone>().is_ok());
    }

    #[test]
    fn invalid_phone() {
        assert!("12345".parse::<Phone>().is_err());
        assert!("98765432101".parse::<Phone>().is_err());
        assert!("98765o4321".parse::<Phone>().is_err());
        assert!("+919876543".parse::<Phone>().is_err());
    }

    #[test]
    fn valid_national_id() {
        assert!("123456789012".parse::<NationalId>().is_ok());
    }

    #[test]
    fn invalid_national_id() {
        assert!("1234567890".parse::<NationalId>().is_err());
        assert!("12345678901234".parse::<NationalId>().is_err());
        assert!("12345678901x".parse::<NationalId>().is_err());
    }
}
