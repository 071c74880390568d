//! Resolves session user ids into accounts, registers new accounts and
//! authenticates logins against the stored directory.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CurrentUserQuery, DEMO_PASSWORD, LoginService, UserRegistration, UserRepository,
};
use crate::domain::service_support::map_user_repository_error;
use crate::domain::{Error, LoginCredentials, RegisterUser, User, UserId};

/// User directory service implementing [`CurrentUserQuery`],
/// [`UserRegistration`] and [`LoginService`].
#[derive(Clone)]
pub struct UserDirectoryService<U> {
    users: Arc<U>,
}

impl<U> UserDirectoryService<U> {
    /// Create a directory over the user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U: UserRepository> UserDirectoryService<U> {
    /// Insert or refresh `accounts` in the directory.
    pub async fn seed(&self, accounts: &[User]) -> Result<(), Error> {
        for account in accounts {
            self.users
                .upsert(account)
                .await
                .map_err(map_user_repository_error)?;
        }
        tracing::info!(count = accounts.len(), "user directory seeded");
        Ok(())
    }
}

#[async_trait]
impl<U> CurrentUserQuery for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn current_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }
}

#[async_trait]
impl<U> UserRegistration for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn register(&self, request: RegisterUser) -> Result<User, Error> {
        let user = User::new(
            UserId::random(),
            request.name().clone(),
            request.email().clone(),
            request.role(),
        );
        self.users
            .insert(&user)
            .await
            .map_err(map_user_repository_error)?;
        tracing::info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U> LoginService for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?;
        match account {
            Some(user) if credentials.password() == DEMO_PASSWORD => {
                tracing::info!(user_id = %user.id(), role = %user.role(), "user logged in");
                Ok(user.id().clone())
            }
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockUserRepository, UserPersistenceError, demo_accounts};
    use crate::domain::{ErrorCode, Role};
    use rstest::rstest;

    fn credentials(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("credential shape")
    }

    #[rstest]
    #[tokio::test]
    async fn login_accepts_known_email_with_shared_password() {
        let account = demo_accounts().expect("demo accounts").remove(1);
        let expected = account.id().clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email.as_ref() == "ngo@foodshare.test")
            .return_once(move |_| Ok(Some(account)));

        let id = UserDirectoryService::new(Arc::new(repo))
            .authenticate(&credentials("NGO@foodshare.test", DEMO_PASSWORD))
            .await
            .expect("login succeeds");
        assert_eq!(id, expected);
    }

    #[rstest]
    #[case(Some(Role::Donor), "wrong")]
    #[case(None, DEMO_PASSWORD)]
    #[tokio::test]
    async fn login_rejects_unknown_accounts_and_bad_passwords(
        #[case] known: Option<Role>,
        #[case] password: &str,
    ) {
        let account = known.and_then(|_| demo_accounts().ok()?.into_iter().next());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .return_once(move |_| Ok(account));

        let err = UserDirectoryService::new(Arc::new(repo))
            .authenticate(&credentials("donor@foodshare.test", password))
            .await
            .expect_err("login refused");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[rstest]
    #[tokio::test]
    async fn current_user_returns_stored_account() {
        let account = demo_accounts().expect("demo accounts").remove(0);
        let expected = account.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .return_once(move |_| Ok(Some(account)));

        let user = UserDirectoryService::new(Arc::new(repo))
            .current_user(expected.id())
            .await
            .expect("known user");
        assert_eq!(user, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_account_is_unauthorized() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let err = UserDirectoryService::new(Arc::new(repo))
            .current_user(&UserId::random())
            .await
            .expect_err("deleted user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failure_is_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .return_once(|_| Err(UserPersistenceError::connection("refused")));

        let err = UserDirectoryService::new(Arc::new(repo))
            .current_user(&UserId::random())
            .await
            .expect_err("db down");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    fn sign_up(role: &str) -> RegisterUser {
        RegisterUser::try_from_parts("Harbour Deli", "deli@example.org", "pw", role)
            .expect("sign-up shape")
    }

    #[rstest]
    #[case("donor", Role::Donor)]
    #[case("ngo", Role::Ngo)]
    #[tokio::test]
    async fn register_stores_account_with_requested_role(
        #[case] raw: &str,
        #[case] role: Role,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .withf(move |user| {
                user.role() == role && user.email().as_ref() == "deli@example.org"
            })
            .times(1)
            .returning(|_| Ok(()));

        let user = UserDirectoryService::new(Arc::new(repo))
            .register(sign_up(raw))
            .await
            .expect("registration succeeds");
        assert_eq!(user.role(), role);
        assert_eq!(user.name().as_ref(), "Harbour Deli");
    }

    #[rstest]
    #[tokio::test]
    async fn register_with_taken_email_is_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().return_once(|user| {
            Err(UserPersistenceError::duplicate_email(user.email().as_ref()))
        });

        let err = UserDirectoryService::new(Arc::new(repo))
            .register(sign_up("donor"))
            .await
            .expect_err("duplicate email");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "email deli@example.org is already registered");
    }

    #[rstest]
    #[tokio::test]
    async fn seed_upserts_every_account() {
        let accounts = demo_accounts().expect("demo accounts");
        let mut repo = MockUserRepository::new();
        repo.expect_upsert()
            .times(accounts.len())
            .returning(|_| Ok(()));

        UserDirectoryService::new(Arc::new(repo))
            .seed(&accounts)
            .await
            .expect("seeding succeeds");
    }
}
