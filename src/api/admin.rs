use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    ledger::Ledger,
    model::{
        api::{
            auth::AuthToken,
            election::{ElectionPatch, ElectionSpec},
            stats::Stats,
            voter::VoterView,
        },
        common::Id,
        db::{Admin, Election, NewElection},
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        get_voters,
        delete_voter,
        delete_candidate,
        create_election,
        update_election,
        delete_election,
        get_stats,
    ]
}

#[get("/voters")]
async fn get_voters(_token: AuthToken<Admin>, ledger: &State<Ledger>) -> Json<Vec<VoterView>> {
    Json(
        ledger
            .voters()
            .into_iter()
            .map(VoterView::from)
            .collect(),
    )
}

/// Remove a voter record. Removing an already-removed voter succeeds.
#[delete("/voters/<voter_id>")]
async fn delete_voter(
    _token: AuthToken<Admin>,
    voter_id: Id,
    ledger: &State<Ledger>,
) -> Result<()> {
    ledger.delete_voter(voter_id)?;
    Ok(())
}

/// Remove a candidate record, along with its tally.
#[delete("/candidates/<candidate_id>")]
async fn delete_candidate(
    _token: AuthToken<Admin>,
    candidate_id: Id,
    ledger: &State<Ledger>,
) -> Result<()> {
    ledger.delete_candidate(candidate_id)?;
    Ok(())
}

#[post("/elections", data = "<spec>", format = "json")]
async fn create_election(
    _token: AuthToken<Admin>,
    spec: Json<ElectionSpec>,
    ledger: &State<Ledger>,
) -> Result<Json<Election>> {
    let new_election: NewElection = spec.0.try_into()?;
    let election = ledger.create_election(new_election)?;
    Ok(Json(election))
}

#[put("/elections/<election_id>", data = "<patch>", format = "json")]
async fn update_election(
    _token: AuthToken<Admin>,
    election_id: Id,
    patch: Json<ElectionPatch>,
    ledger: &State<Ledger>,
) -> Result<Json<Election>> {
    let election = ledger.update_election(election_id, patch.0)?;
    Ok(Json(election))
}

#[delete("/elections/<election_id>")]
async fn delete_election(
    _token: AuthToken<Admin>,
    election_id: Id,
    ledger: &State<Ledger>,
) -> Result<()> {
    ledger.delete_election(election_id)?;
    Ok(())
}

#[get("/stats")]
async fn get_stats(_token: AuthToken<Admin>, ledger: &State<Ledger>) -> Json<Stats> {
    Json(ledger.stats())
}
