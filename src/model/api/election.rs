use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Rejection,
    model::{common::Position, db::NewElection},
};

/// An election specification, as submitted by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionSpec {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub positions: Vec<Position>,
    /// Whether to activate immediately on creation.
    #[serde(default)]
    pub is_active: bool,
}

impl TryFrom<ElectionSpec> for NewElection {
    type Error = Rejection;

    fn try_from(spec: ElectionSpec) -> Result<Self, Self::Error> {
        validate_window(spec.start_date, spec.end_date)?;
        validate_positions(&spec.positions)?;
        Ok(Self {
            title: spec.title,
            description: spec.description,
            start_date: spec.start_date,
            end_date: spec.end_date,
            positions: spec.positions,
            is_active: spec.is_active,
        })
    }
}

/// A partial election update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub positions: Option<Vec<Position>>,
    pub is_active: Option<bool>,
}

impl ElectionPatch {
    /// Whether this patch switches the election to active.
    pub fn activates(&self) -> bool {
        self.is_active == Some(true)
    }

    /// Apply the patch, revalidating the merged result.
    pub fn apply(self, election: &mut NewElection) -> Result<(), Rejection> {
        if let Some(title) = self.title {
            election.title = title;
        }
        if let Some(description) = self.description {
            election.description = description;
        }
        if let Some(start_date) = self.start_date {
            election.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            election.end_date = end_date;
        }
        if let Some(positions) = self.positions {
            validate_positions(&positions)?;
            election.positions = positions;
        }
        if let Some(is_active) = self.is_active {
            election.is_active = is_active;
        }
        validate_window(election.start_date, election.end_date)
    }
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), Rejection> {
    if end <= start {
        return Err(Rejection::InvalidElectionWindow);
    }
    Ok(())
}

fn validate_positions(positions: &[Position]) -> Result<(), Rejection> {
    if positions.is_empty() {
        return Err(Rejection::InvalidField("positions must not be empty"));
    }
    for (i, position) in positions.iter().enumerate() {
        if positions[..i].contains(position) {
            return Err(Rejection::InvalidField("positions must not repeat"));
        }
    }
    Ok(())
}
