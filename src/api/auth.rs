use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    error::{Error, Rejection, Result},
    ledger::Ledger,
    model::{
        api::auth::{AnyUser, AuthToken, LoginRequest, UserInfo, AUTH_TOKEN_COOKIE},
        db::{Admin, Candidate, Voter},
    },
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![
        login,
        logout,
        current_admin,
        current_voter,
        current_candidate,
        no_current_user,
    ]
}

/// Unified login across all three roles. The response reports which role
/// the credentials matched.
#[post("/auth/login", data = "<credentials>", format = "json")]
pub async fn login(
    cookies: &CookieJar<'_>,
    credentials: Json<LoginRequest>,
    ledger: &State<Ledger>,
    config: &State<Config>,
) -> Result<Json<UserInfo>> {
    let user = ledger
        .user_by_email(&credentials.email)
        .filter(|user| user.verify_password(&credentials.password))
        .ok_or(Rejection::InvalidCredentials)?;

    let cookie = match &user {
        AnyUser::Voter(voter) => AuthToken::new(voter).into_cookie(config),
        AnyUser::Candidate(candidate) => AuthToken::new(candidate).into_cookie(config),
        AnyUser::Admin(admin) => AuthToken::new(admin).into_cookie(config),
    };
    cookies.add(cookie);

    Ok(Json(user.into()))
}

#[delete("/auth")]
pub fn logout(cookies: &CookieJar) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}

// `/auth/user` fans out by token rights; exactly one of the ranked routes
// succeeds. The final rank catches requests with no valid token.

#[get("/auth/user", rank = 1)]
pub async fn current_admin(
    token: AuthToken<Admin>,
    ledger: &State<Ledger>,
) -> Result<Json<UserInfo>> {
    let admin = ledger
        .admin(token.id)
        .ok_or_else(|| Error::not_found("user"))?;
    Ok(Json(AnyUser::Admin(admin).into()))
}

#[get("/auth/user", rank = 2)]
pub async fn current_voter(
    token: AuthToken<Voter>,
    ledger: &State<Ledger>,
) -> Result<Json<UserInfo>> {
    let voter = ledger
        .voter(token.id)
        .ok_or_else(|| Error::not_found("user"))?;
    Ok(Json(AnyUser::Voter(voter).into()))
}

#[get("/auth/user", rank = 3)]
pub async fn current_candidate(
    token: AuthToken<Candidate>,
    ledger: &State<Ledger>,
) -> Result<Json<UserInfo>> {
    let candidate = ledger
        .candidate(token.id)
        .ok_or_else(|| Error::not_found("user"))?;
    Ok(Json(AnyUser::Candidate(candidate).into()))
}

#[get("/auth/user", rank = 4)]
pub async fn no_current_user() -> Error {
    Error::Status(Status::Unauthorized, "Not authenticated.".to_string())
}
