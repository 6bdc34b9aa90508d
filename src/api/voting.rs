use rocket::{serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    ledger::Ledger,
    model::{
        api::{
            auth::AuthToken,
            ballot::{VoteReceipt, VoteRequest},
            voter::VoterView,
        },
        db::Voter,
    },
};

pub fn routes() -> Vec<Route> {
    routes![own_record, cast_vote]
}

/// The logged-in voter's own record, including whether they have voted
/// in the current cycle.
#[get("/voter")]
async fn own_record(token: AuthToken<Voter>, ledger: &State<Ledger>) -> Result<Json<VoterView>> {
    let voter = ledger
        .voter(token.id)
        .ok_or_else(|| Error::not_found("voter"))?;
    Ok(Json(voter.into()))
}

/// Cast the logged-in voter's ballot.
#[post("/vote", data = "<request>", format = "json")]
async fn cast_vote(
    token: AuthToken<Voter>,
    request: Json<VoteRequest>,
    ledger: &State<Ledger>,
) -> Result<Json<VoteReceipt>> {
    let receipt = ledger.cast_vote(token.id, request.candidate_id)?;
    Ok(Json(receipt))
}
