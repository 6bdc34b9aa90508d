mod challenge;
mod code;

pub use challenge::{Challenge, ChallengeError, CHALLENGE_COOKIE};
pub use code::{Code, ParseCodeError, CODE_LENGTH};
