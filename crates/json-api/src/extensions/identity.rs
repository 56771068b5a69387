//! Caller identity stored in the depot by the auth middleware.

use salvo::prelude::{Depot, StatusError};

use bazaar_app::auth::Identity;

pub(crate) trait IdentityExt {
    fn insert_identity(&mut self, identity: Identity);

    /// The authenticated caller, or 401 when the auth middleware did not run.
    fn identity_or_401(&self) -> Result<Identity, StatusError>;
}

impl IdentityExt for Depot {
    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<Identity, StatusError> {
        self.obtain::<Identity>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::users::records::UserUuid;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_identity_is_unauthorized() {
        let depot = Depot::new();

        assert_eq!(
            depot.identity_or_401().err().map(|e| e.code),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn inserted_identity_is_returned() {
        let mut depot = Depot::new();
        let identity = Identity {
            user: UserUuid::new(),
            is_admin: true,
        };

        depot.insert_identity(identity);

        assert_eq!(depot.identity_or_401().ok(), Some(identity));
    }
}
