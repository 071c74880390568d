//! Driving port for login.
//!
//! Inbound adapters call this port to turn credentials into a user id
//! without knowing how accounts are stored. Password hashing lives outside
//! this service; the user directory accepts [`DEMO_PASSWORD`] for every
//! account it holds.

use async_trait::async_trait;

use crate::domain::{Email, Error, LoginCredentials, Role, User, UserId, UserName};

/// Shared password accepted for every demo account.
pub const DEMO_PASSWORD: &str = "password";

const DEMO_ACCOUNTS: [(&str, &str, &str, Role); 3] = [
    (
        "6f1c1a52-4f2e-4a54-9d1b-0c8a2a2f5d01",
        "Corner Bakery",
        "donor@foodshare.test",
        Role::Donor,
    ),
    (
        "0b7e9d8c-2a43-4c61-8f3e-5d9a6b1c7e02",
        "City Food Bank",
        "ngo@foodshare.test",
        Role::Ngo,
    ),
    (
        "9a2d4e6f-8b1c-4d3e-a5f7-1e2c3b4a5d03",
        "Site Admin",
        "admin@foodshare.test",
        Role::Admin,
    ),
];

/// Demo donor, NGO and admin accounts.
///
/// The server seeds these into the user directory at startup when demo
/// accounts are enabled.
pub fn demo_accounts() -> Result<Vec<User>, Error> {
    DEMO_ACCOUNTS
        .iter()
        .map(|(id, name, email, role)| {
            // Compile-time constants; a failure here is a programming error.
            let id = UserId::new(id)
                .map_err(|err| Error::internal(format!("invalid demo user id: {err}")))?;
            let name = UserName::new(name)
                .map_err(|err| Error::internal(format!("invalid demo user name: {err}")))?;
            let email = Email::new(email)
                .map_err(|err| Error::internal(format!("invalid demo user email: {err}")))?;
            Ok(User::new(id, name, email, *role))
        })
        .collect()
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn demo_accounts_cover_every_role() {
        let roles: Vec<Role> = demo_accounts()
            .expect("demo accounts")
            .iter()
            .map(User::role)
            .collect();
        assert_eq!(roles, vec![Role::Donor, Role::Ngo, Role::Admin]);
    }
}
