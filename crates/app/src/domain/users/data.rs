//! Users Data

use crate::domain::users::records::UserUuid;

/// New User Data
///
/// `email` is expected to be normalised and `password_hash` to be a PHC string.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}
