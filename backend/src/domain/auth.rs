//! Login credentials and sign-up input.
//!
//! Handlers parse raw payload strings into [`LoginCredentials`] or
//! [`RegisterUser`] before they talk to the
//! [`LoginService`](crate::domain::ports::LoginService) and
//! [`UserRegistration`](crate::domain::ports::UserRegistration) ports.

use zeroize::Zeroizing;

use super::{Email, Role, UserName, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was blank or not shaped like an address.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised by [`Email::new`].
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use foodshare::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Donor@Example.org", "pw").unwrap();
/// assert_eq!(creds.email().as_ref(), "donor@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password exactly as provided.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when sign-up values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Name was blank or too long.
    #[error(transparent)]
    InvalidName(UserValidationError),
    /// Email was blank or not shaped like an address.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Role was not one of `donor`, `ngo` or `admin`.
    #[error("role must be one of donor, ngo or admin")]
    UnknownRole,
}

/// Validated sign-up request.
///
/// The password is checked for presence and then dropped; accounts
/// authenticate with the directory's shared password.
///
/// # Examples
/// ```
/// use foodshare::domain::{RegisterUser, Role};
///
/// let cmd = RegisterUser::try_from_parts("Harbour Deli", "Deli@Example.org", "pw", "donor")
///     .unwrap();
/// assert_eq!(cmd.email().as_ref(), "deli@example.org");
/// assert_eq!(cmd.role(), Role::Donor);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    name: UserName,
    email: Email,
    role: Role,
}

impl RegisterUser {
    /// Construct a sign-up request from raw inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let name = UserName::new(name).map_err(RegistrationValidationError::InvalidName)?;
        let email = Email::new(email).map_err(|_| RegistrationValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        let role = role
            .parse::<Role>()
            .map_err(|_| RegistrationValidationError::UnknownRole)?;
        Ok(Self { name, email, role })
    }

    /// Display name for the new account.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Normalised email; must not already be registered.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Role the account keeps for its lifetime.
    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::InvalidEmail)]
    #[case("donor", "pw", LoginValidationError::InvalidEmail)]
    #[case("donor@example.org", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("ngo@example.org", " secret ")
            .expect("valid inputs");
        assert_eq!(creds.password(), " secret ");
    }

    #[rstest]
    #[case("", "a@example.org", "pw", "donor", RegistrationValidationError::InvalidName(UserValidationError::EmptyName))]
    #[case("Deli", "nope", "pw", "donor", RegistrationValidationError::InvalidEmail)]
    #[case("Deli", "a@example.org", "", "donor", RegistrationValidationError::EmptyPassword)]
    #[case("Deli", "a@example.org", "pw", "Donor", RegistrationValidationError::UnknownRole)]
    fn invalid_registrations(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = RegisterUser::try_from_parts(name, email, password, role)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("ngo", Role::Ngo)]
    #[case("admin", Role::Admin)]
    fn registration_keeps_requested_role(#[case] raw: &str, #[case] role: Role) {
        let cmd = RegisterUser::try_from_parts(" Food Hub ", "hub@example.org", "pw", raw)
            .expect("valid inputs");
        assert_eq!(cmd.role(), role);
        assert_eq!(cmd.name().as_ref(), "Food Hub");
    }
}
