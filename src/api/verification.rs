use rand::Rng;
use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    error::{Rejection, Result},
    model::{
        api::{
            otp::{Challenge, Code, CHALLENGE_COOKIE},
            verification::{FaceVerifyRequest, FaceVerifyResponse},
        },
        common::Phone,
    },
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![send_code, verify_code, verify_face]
}

/// Issue a verification code for the given phone number. The code lives
/// in a private cookie; delivery is a log line standing in for an SMS
/// gateway.
#[get("/verify/phone?<phone>")]
pub async fn send_code(phone: Phone, cookies: &CookieJar<'_>, config: &State<Config>) -> Status {
    let challenge = Challenge::new(phone);
    info!(
        "verification code for {}: {}",
        challenge.phone, challenge.code
    );
    cookies.add_private(challenge.into_cookie(config));
    Status::Ok
}

/// Check a submitted code against the pending challenge. A correct code
/// consumes the challenge.
#[post("/verify/phone", data = "<code>", format = "json")]
pub async fn verify_code(
    code: Json<Code>,
    challenge: Challenge,
    cookies: &CookieJar<'_>,
) -> Result<()> {
    if challenge.code != *code {
        return Err(Rejection::InvalidOtp.into());
    }
    cookies.remove_private(Cookie::named(CHALLENGE_COOKIE));
    Ok(())
}

/// Face verification stand-in. There is no biometric backend; anything
/// non-empty passes most of the time.
#[post("/verify/face", data = "<request>", format = "json")]
pub async fn verify_face(request: Json<FaceVerifyRequest>) -> Json<FaceVerifyResponse> {
    let verified = !request.image.is_empty() && rand::thread_rng().gen_bool(0.8);
    Json(FaceVerifyResponse { verified })
}
