//! Shared vocabulary types used by both stored records and API shapes.

mod contact;
mod id;
mod position;

pub use contact::{
    Email, NationalId, ParseEmailError, ParseNationalIdError, ParsePhoneError, Phone,
    NATIONAL_ID_LENGTH, PHONE_LENGTH,
};
pub use id::{Id, ParseIdError, ID_LENGTH};
pub use position::Position;
