//! Actor resolution used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! the session-to-actor lookup here. Every protected handler goes through
//! [`resolve_actor`] so the role comes from the directory, never the cookie.

use crate::domain::ports::CurrentUserQuery;
use crate::domain::{AccessPolicy, Action, Actor, User};

use super::ApiResult;
use super::session::SessionContext;

/// Load the account behind the session cookie.
///
/// Fails with `unauthorized` when no user is logged in or the account has
/// disappeared since login.
pub(crate) async fn current_account(
    session: &SessionContext,
    directory: &dyn CurrentUserQuery,
) -> ApiResult<User> {
    let user_id = session.require_user_id()?;
    directory.current_user(&user_id).await
}

/// Resolve the caller into the [`Actor`] passed to the domain services.
pub(crate) async fn resolve_actor(
    session: &SessionContext,
    directory: &dyn CurrentUserQuery,
) -> ApiResult<Actor> {
    current_account(session, directory)
        .await
        .map(|user| user.actor())
}

/// Resolve the caller and check `action` before the handler reads its body.
///
/// Role-gated writes use this so a caller without the role is refused with
/// `forbidden` whatever the payload looks like.
pub(crate) async fn authorize_actor(
    session: &SessionContext,
    directory: &dyn CurrentUserQuery,
    action: Action<'_>,
) -> ApiResult<Actor> {
    let actor = resolve_actor(session, directory).await?;
    AccessPolicy::authorize(&actor, action)?;
    Ok(actor)
}
