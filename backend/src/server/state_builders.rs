//! Builders wiring repositories into the domain services behind [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use foodshare::domain::ports::{
    FoodListingRepository, FoodRequestRepository, UserRepository, demo_accounts,
};
use foodshare::domain::{Error, FoodListingService, FoodRequestService, UserDirectoryService};
use foodshare::inbound::http::state::{HttpState, HttpStatePorts};
use foodshare::outbound::memory::{
    InMemoryFoodListingRepository, InMemoryFoodRequestRepository, InMemoryUserRepository,
};
use foodshare::outbound::persistence::{
    DieselFoodListingRepository, DieselFoodRequestRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Repositories backing one running server.
struct Repositories<U, L, R> {
    users: Arc<U>,
    listings: Arc<L>,
    requests: Arc<R>,
}

/// Wire services over `repos`, optionally seeding the demo accounts.
async fn build_state_from<U, L, R>(
    repos: Repositories<U, L, R>,
    clock: Arc<dyn Clock>,
    seed_demo_accounts: bool,
) -> Result<HttpState, Error>
where
    U: UserRepository + 'static,
    L: FoodListingRepository + 'static,
    R: FoodRequestRepository + 'static,
{
    let Repositories {
        users,
        listings,
        requests,
    } = repos;

    let directory = Arc::new(UserDirectoryService::new(users.clone()));
    if seed_demo_accounts {
        directory.seed(&demo_accounts()?).await?;
    }

    let listing_service = Arc::new(FoodListingService::new(
        listings.clone(),
        users.clone(),
        clock.clone(),
    ));
    let request_service = Arc::new(FoodRequestService::new(requests, listings, users, clock));

    Ok(HttpState::new(HttpStatePorts {
        login: directory.clone(),
        registration: directory.clone(),
        current_user: directory,
        listings: listing_service.clone(),
        listings_query: listing_service,
        requests: request_service.clone(),
        requests_query: request_service,
    }))
}

/// Build the shared HTTP state.
///
/// Uses the Diesel repositories when a pool is configured, otherwise fresh
/// in-memory stores.
///
/// # Errors
/// Returns [`std::io::Error`] when seeding the demo accounts fails.
pub(super) async fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let seed = config.seed_demo_accounts;
    let state = match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "wiring repositories");
            build_state_from(
                Repositories {
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    listings: Arc::new(DieselFoodListingRepository::new(pool.clone())),
                    requests: Arc::new(DieselFoodRequestRepository::new(pool.clone())),
                },
                clock,
                seed,
            )
            .await
        }
        None => {
            info!(store = "memory", "wiring repositories");
            build_state_from(
                Repositories {
                    users: Arc::new(InMemoryUserRepository::new()),
                    listings: Arc::new(InMemoryFoodListingRepository::new()),
                    requests: Arc::new(InMemoryFoodRequestRepository::new()),
                },
                clock,
                seed,
            )
            .await
        }
    };

    state
        .map(web::Data::new)
        .map_err(|err| std::io::Error::other(format!("failed to build HTTP state: {err}")))
}
