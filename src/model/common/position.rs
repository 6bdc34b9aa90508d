use std::fmt::Display;

use rocket::FromFormField;
use serde::{Deserialize, Serialize};

/// A contestable position. Each candidate stands for exactly one;
/// elections declare the set of positions they cover.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, FromFormField)]
pub enum Position {
    #[serde(rename = "MLA")]
    Mla,
    #[serde(rename = "MP")]
    Mp,
    Mayor,
    Councilor,
}

impl Display for Position {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Mla => "MLA",
            Self::Mp => "MP",
            Self::Mayor => "Mayor",
            Self::Councilor => "Councilor",
        };
        write!(formatter, "{name}")
    }
}
