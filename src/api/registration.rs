use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    ledger::Ledger,
    model::{
        api::{
            candidate::{CandidateRegistration, CandidateView},
            voter::{VoterRegistration, VoterView},
        },
        db::{NewCandidate, NewVoter},
    },
};

pub fn routes() -> Vec<Route> {
    routes![register_voter, register_candidate]
}

#[post("/voters", data = "<registration>", format = "json")]
pub async fn register_voter(
    registration: Json<VoterRegistration>,
    ledger: &State<Ledger>,
) -> Result<Json<VoterView>> {
    let new_voter: NewVoter = registration.0.try_into()?;
    let voter = ledger.register_voter(new_voter)?;
    Ok(Json(voter.into()))
}

#[post("/candidates", data = "<registration>", format = "json")]
pub async fn register_candidate(
    registration: Json<CandidateRegistration>,
    ledger: &State<Ledger>,
) -> Result<Json<CandidateView>> {
    let new_candidate: NewCandidate = registration.0.try_into()?;
    let candidate = ledger.register_candidate(new_candidate)?;
    Ok(Json(candidate.into()))
}
