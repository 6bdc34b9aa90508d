mod request;
mod token;
mod user;

pub use request::LoginRequest;
pub use token::{AuthToken, AUTH_TOKEN_COOKIE};
pub use user::{AnyUser, Rights, User, UserInfo};
