use rocket::{serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    ledger::Ledger,
    model::{
        api::candidate::CandidateView,
        common::{Id, Position},
        db::Election,
    },
};

pub fn routes() -> Vec<Route> {
    routes![elections, active_election, election, candidates]
}

#[get("/elections")]
async fn elections(ledger: &State<Ledger>) -> Json<Vec<Election>> {
    Json(ledger.elections())
}

/// The at-most-one active election, or `null`.
#[get("/elections/active")]
async fn active_election(ledger: &State<Ledger>) -> Json<Option<Election>> {
    Json(ledger.active_election())
}

#[get("/elections/<election_id>", rank = 2)]
async fn election(election_id: Id, ledger: &State<Ledger>) -> Result<Json<Election>> {
    let election = ledger
        .election(election_id)
        .ok_or_else(|| Error::not_found(format!("election {election_id}")))?;
    Ok(Json(election))
}

/// All candidates, optionally narrowed to a single position.
#[get("/candidates?<position>")]
async fn candidates(
    position: Option<Position>,
    ledger: &State<Ledger>,
) -> Json<Vec<CandidateView>> {
    Json(
        ledger
            .candidates(position)
            .into_iter()
            .map(CandidateView::from)
            .collect(),
    )
}
