//! Auth Handlers

pub(crate) mod login;
pub(crate) mod profile;
pub(crate) mod register;
pub(crate) mod register_admin;
pub(crate) mod verify;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use bazaar_app::{auth::Session, domain::users::records::UserUuid};

    use crate::test_helpers::make_user;

    pub(super) fn make_session(user: UserUuid, is_admin: bool) -> Session {
        let mut user = make_user(user);

        user.is_admin = is_admin;

        Session {
            token: "signed.jwt.token".to_string(),
            expires_at: Timestamp::UNIX_EPOCH,
            user,
        }
    }
}
